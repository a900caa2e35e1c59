
use std::collections::HashMap;
use std::sync::Arc;

use super::*;
use crate::mapping::ReferenceTables;

pub(super) fn custom(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Engine over small hand-written tables.
pub(super) fn engine_with(default: &[(&str, &str)], emoji: &[(&str, &str)]) -> Transliterator {
    let to_toml = |pairs: &[(&str, &str)]| {
        let mut s = String::from("[mappings]\n");
        for (k, v) in pairs {
            s.push_str(&format!("{k:?} = {v:?}\n"));
        }
        s
    };
    let tables = ReferenceTables::from_toml(&to_toml(default), &to_toml(emoji)).unwrap();
    Transliterator::new(Arc::new(tables))
}

pub(super) fn decompose(text: &str) -> Result<String, TransliterateError> {
    Transliterator::builtin().transliterate(text, NormalizationMode::Decompose, true, None)
}
