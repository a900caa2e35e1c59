//! Unicode normalization followed by non-spacing mark removal.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;

use crate::unicode::is_nonspacing_mark;

/// The four standard normalization forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationMode {
    /// Canonical decomposition (NFD).
    #[default]
    Decompose,
    /// Canonical composition (NFC).
    Compose,
    /// Compatibility composition (NFKC).
    CompatibilityCompose,
    /// Compatibility decomposition (NFKD).
    CompatibilityDecompose,
}

impl NormalizationMode {
    pub const ALL: [NormalizationMode; 4] = [
        Self::Decompose,
        Self::Compose,
        Self::CompatibilityCompose,
        Self::CompatibilityDecompose,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Decompose => "decompose",
            Self::Compose => "compose",
            Self::CompatibilityCompose => "compatibility-compose",
            Self::CompatibilityDecompose => "compatibility-decompose",
        }
    }
}

impl fmt::Display for NormalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown normalization mode: {0}")]
pub struct UnknownModeError(pub String);

impl FromStr for NormalizationMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "decompose" | "nfd" => Ok(Self::Decompose),
            "compose" | "nfc" => Ok(Self::Compose),
            "compatibility-compose" | "nfkc" => Ok(Self::CompatibilityCompose),
            "compatibility-decompose" | "nfkd" => Ok(Self::CompatibilityDecompose),
            _ => Err(UnknownModeError(s.to_string())),
        }
    }
}

/// Normalize `text` to the given form.
pub fn normalize(text: &str, mode: NormalizationMode) -> String {
    match mode {
        NormalizationMode::Decompose => text.nfd().collect(),
        NormalizationMode::Compose => text.nfc().collect(),
        NormalizationMode::CompatibilityCompose => text.nfkc().collect(),
        NormalizationMode::CompatibilityDecompose => text.nfkd().collect(),
    }
}

/// Remove every codepoint of general category Mn.
pub fn strip_nonspacing_marks(text: &str) -> String {
    text.chars().filter(|&c| !is_nonspacing_mark(c)).collect()
}

/// Normalize, then strip non-spacing marks. The order matters: decomposition
/// produces marks that must also be removed.
pub fn apply(text: &str, mode: NormalizationMode) -> String {
    strip_nonspacing_marks(&normalize(text, mode))
}
