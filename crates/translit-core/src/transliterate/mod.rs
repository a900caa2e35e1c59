//! The transliteration pass.
//!
//! Input is validated, rewritten by a greedy longest-match scan over the
//! active mapping layers, and finally handed to the normalizer. Layers are
//! consulted in a fixed priority order: custom, emoji, default.

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, debug_span};

use crate::mapping::{CustomMapping, MappingLayer, ReferenceTables};
use crate::normalize::{self, NormalizationMode};
use crate::unicode::is_blank;
use crate::validate::{self, MappingBound};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransliterateError {
    #[error("input is empty or blank")]
    InvalidInput,
    #[error("input is not well-formed Unicode")]
    InvalidEncoding,
    #[error("invalid custom mapping for key {key:?}: {bound}")]
    InvalidMapping { key: String, bound: MappingBound },
    #[error("transliteration cancelled")]
    Cancelled,
}

/// Per-call options other than the custom mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub mode: NormalizationMode,
    pub use_default_mapping: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: NormalizationMode::Decompose,
            use_default_mapping: true,
        }
    }
}

impl From<&crate::settings::Settings> for Options {
    fn from(s: &crate::settings::Settings) -> Self {
        Self {
            mode: s.transliterate.mode,
            use_default_mapping: s.transliterate.use_default_mapping,
        }
    }
}

/// Counters collected during one substitution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstitutionStats {
    /// Replacements found by the longest-match scan.
    pub matched: usize,
    /// Replacements found only through the single-codepoint notation lookup.
    pub notation_fallbacks: usize,
    /// Codepoints copied through unchanged.
    pub passthrough: usize,
}

/// Transliteration engine over a set of reference tables.
///
/// Holds no per-call state; clones share the same tables.
#[derive(Debug, Clone)]
pub struct Transliterator {
    tables: Arc<ReferenceTables>,
}

impl Default for Transliterator {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Transliterator {
    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self { tables }
    }

    /// Engine over the process-wide embedded tables.
    pub fn builtin() -> Self {
        Self::new(ReferenceTables::builtin())
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn transliterate(
        &self,
        text: &str,
        mode: NormalizationMode,
        use_default_mapping: bool,
        custom: Option<&HashMap<String, String>>,
    ) -> Result<String, TransliterateError> {
        self.run(
            text,
            Options {
                mode,
                use_default_mapping,
            },
            custom,
        )
    }

    /// Entry point for UTF-16 input, where unpaired surrogates can occur.
    pub fn transliterate_utf16(
        &self,
        units: &[u16],
        mode: NormalizationMode,
        use_default_mapping: bool,
        custom: Option<&HashMap<String, String>>,
    ) -> Result<String, TransliterateError> {
        let blank = char::decode_utf16(units.iter().copied())
            .all(|r| r.map_or(false, char::is_whitespace));
        if blank {
            return Err(TransliterateError::InvalidInput);
        }
        if !validate::is_well_formed_utf16(units) {
            return Err(TransliterateError::InvalidEncoding);
        }
        let text = String::from_utf16(units).map_err(|_| TransliterateError::InvalidEncoding)?;
        self.transliterate(&text, mode, use_default_mapping, custom)
    }

    pub fn run(
        &self,
        text: &str,
        options: Options,
        custom: Option<&HashMap<String, String>>,
    ) -> Result<String, TransliterateError> {
        if is_blank(text) {
            return Err(TransliterateError::InvalidInput);
        }
        if !validate::is_well_formed(text) {
            return Err(TransliterateError::InvalidEncoding);
        }
        validate::check_mapping(custom).map_err(|v| TransliterateError::InvalidMapping {
            key: v.key,
            bound: v.bound,
        })?;

        let _span = debug_span!(
            "transliterate",
            len = text.len(),
            mode = %options.mode,
            use_default_mapping = options.use_default_mapping,
            custom_entries = custom.map_or(0, HashMap::len)
        )
        .entered();

        if !options.use_default_mapping && custom.is_none() {
            return Ok(normalize::apply(text, options.mode));
        }

        let custom_layer = custom.map(CustomMapping::new);
        let mut layers: Vec<&dyn MappingLayer> = Vec::with_capacity(3);
        if let Some(ref layer) = custom_layer {
            layers.push(layer);
        }
        if options.use_default_mapping {
            layers.push(&self.tables.emoji);
            layers.push(&self.tables.default);
        }

        let (substituted, stats) = substitute(text, &layers);
        debug!(
            matched = stats.matched,
            notation_fallbacks = stats.notation_fallbacks,
            passthrough = stats.passthrough,
            "substitution done"
        );
        Ok(normalize::apply(&substituted, options.mode))
    }
}

/// Greedy leftmost, longest-match substitution.
///
/// At each codepoint position the longest candidate that any layer knows is
/// replaced; earlier layers win ties. Candidates always end on a codepoint
/// boundary. A codepoint no candidate covers is looked up by its `U+XXXX`
/// notation and otherwise copied through.
pub fn substitute(text: &str, layers: &[&dyn MappingLayer]) -> (String, SubstitutionStats) {
    let max_key_len = layers.iter().map(|l| l.max_key_len()).max().unwrap_or(0);
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let char_count = chars.len();
    let byte_end = |pos: usize| chars.get(pos).map_or(text.len(), |&(i, _)| i);

    let mut out = String::with_capacity(text.len());
    let mut stats = SubstitutionStats::default();
    let mut pos = 0;

    'scan: while pos < char_count {
        let (start, c) = chars[pos];
        let longest = max_key_len.min(char_count - pos);
        for len in (1..=longest).rev() {
            let candidate = &text[start..byte_end(pos + len)];
            if let Some(replacement) = layers.iter().find_map(|l| l.get(candidate)) {
                out.push_str(replacement);
                stats.matched += 1;
                pos += len;
                continue 'scan;
            }
        }

        match layers.iter().find_map(|l| l.get_notation(c)) {
            Some(replacement) => {
                out.push_str(replacement);
                stats.notation_fallbacks += 1;
            }
            None => {
                out.push(c);
                stats.passthrough += 1;
            }
        }
        pos += 1;
    }

    (out, stats)
}

/// Transliterate with the embedded tables and default mapping enabled.
pub fn transliterate(text: &str, mode: NormalizationMode) -> Result<String, TransliterateError> {
    Transliterator::builtin().transliterate(text, mode, true, None)
}
