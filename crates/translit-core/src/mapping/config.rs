use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Deserialize)]
struct MappingConfig {
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum MappingConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
}

/// Parse TOML text into a sorted `BTreeMap<key, replacement>`.
///
/// Keys are returned verbatim; notation keys are decoded later by
/// `prepare_table`, which drops anything it cannot parse.
pub fn parse_mapping_toml(toml_str: &str) -> Result<BTreeMap<String, String>, MappingConfigError> {
    let config: MappingConfig =
        toml::from_str(toml_str).map_err(|e| MappingConfigError::Parse(e.to_string()))?;

    if config.mappings.is_empty() {
        return Err(MappingConfigError::Empty);
    }

    Ok(config.mappings)
}
