//! Loading mapping TOML files from disk.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use translit_core::mapping::{parse_mapping_toml, MappingConfigError, DEFAULT_TOML, EMOJI_TOML};
use translit_core::settings::TableSettings;
use translit_core::validate::{check_mapping, MappingBound};
use translit_core::ReferenceTables;

#[derive(Debug, thiserror::Error)]
pub enum MappingFileError {
    #[error("IO error reading {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("{path}: {source}")]
    Config {
        path: String,
        source: MappingConfigError,
    },

    #[error("{path}: invalid mapping for key {key:?}: {bound}")]
    Invalid {
        path: String,
        key: String,
        bound: MappingBound,
    },
}

fn read(path: &Path) -> Result<String, MappingFileError> {
    fs::read_to_string(path).map_err(|source| MappingFileError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load a custom mapping (literal keys) and check it against the grapheme
/// bounds.
pub fn load_custom_mapping(path: &Path) -> Result<HashMap<String, String>, MappingFileError> {
    let content = read(path)?;
    let map: HashMap<String, String> = parse_mapping_toml(&content)
        .map_err(|source| MappingFileError::Config {
            path: path.display().to_string(),
            source,
        })?
        .into_iter()
        .collect();
    check_mapping(Some(&map)).map_err(|v| MappingFileError::Invalid {
        path: path.display().to_string(),
        key: v.key,
        bound: v.bound,
    })?;
    Ok(map)
}

/// Reference tables per settings. Falls back to the shared embedded tables
/// when no replacement file is configured.
pub fn load_tables(tables: &TableSettings) -> Result<Arc<ReferenceTables>, MappingFileError> {
    if tables.default_file.is_none() && tables.emoji_file.is_none() {
        return Ok(ReferenceTables::builtin());
    }
    let default_toml = match tables.default_file {
        Some(ref p) => read(Path::new(p))?,
        None => DEFAULT_TOML.to_string(),
    };
    let emoji_toml = match tables.emoji_file {
        Some(ref p) => read(Path::new(p))?,
        None => EMOJI_TOML.to_string(),
    };
    let label = [tables.default_file.as_deref(), tables.emoji_file.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");
    ReferenceTables::from_toml(&default_toml, &emoji_toml)
        .map(Arc::new)
        .map_err(|source| MappingFileError::Config {
            path: label,
            source,
        })
}
