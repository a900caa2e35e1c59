use std::sync::{Arc, OnceLock};

use super::config::{parse_mapping_toml, MappingConfigError};
use super::MappingTable;

pub const DEFAULT_TOML: &str = include_str!("default_mappings.toml");
pub const EMOJI_TOML: &str = include_str!("emoji_mappings.toml");

/// The two reference tables shipped with the engine.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub default: MappingTable,
    pub emoji: MappingTable,
}

impl ReferenceTables {
    /// Build tables from `[mappings]` TOML documents in codepoint notation.
    pub fn from_toml(default_toml: &str, emoji_toml: &str) -> Result<Self, MappingConfigError> {
        let default = parse_mapping_toml(default_toml)?;
        let emoji = parse_mapping_toml(emoji_toml)?;
        Ok(Self {
            default: MappingTable::from_notation(&default),
            emoji: MappingTable::from_notation(&emoji),
        })
    }

    /// Get or initialize the process-wide tables built from the embedded
    /// data. Replacement data goes through `from_toml` instead.
    pub fn builtin() -> Arc<ReferenceTables> {
        static INSTANCE: OnceLock<Arc<ReferenceTables>> = OnceLock::new();
        let tables = INSTANCE.get_or_init(|| {
            Arc::new(
                ReferenceTables::from_toml(DEFAULT_TOML, EMOJI_TOML)
                    .expect("embedded mapping TOML must be valid"),
            )
        });
        Arc::clone(tables)
    }

    /// Longest key across both tables.
    pub fn max_key_len(&self) -> usize {
        self.default.max_key_len().max(self.emoji.max_key_len())
    }
}
