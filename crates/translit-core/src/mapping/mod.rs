//! Mapping tables for the substitution pass.
//!
//! Reference data is written in codepoint notation (`"U+00DF"`,
//! `"U+1F44D U+1F3FD"`) and converted once into literal text keys.
//! A `MappingTable` is immutable after construction and can be shared
//! freely between threads.

mod config;
mod tables;

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, debug_span};

use crate::unicode::{notation, MAX_CODEPOINT};

pub use config::{parse_mapping_toml, MappingConfigError};
pub use tables::{ReferenceTables, DEFAULT_TOML, EMOJI_TOML};

const NOTATION_MARKER: &str = "U+";
/// `U+10FFFF` needs six hex digits; anything longer is rejected.
const MAX_HEX_DIGITS: usize = 6;

/// One layer consulted by the substitution pass.
///
/// Layers are probed in a fixed order per candidate length, so a layer only
/// needs to answer exact-key lookups.
pub trait MappingLayer {
    /// Replacement for a literal key.
    fn get(&self, key: &str) -> Option<&str>;

    /// Longest key in this layer, in Unicode scalar values.
    fn max_key_len(&self) -> usize;

    /// Replacement for a single codepoint looked up by its `U+XXXX` notation
    /// in the raw source data. Layers without notation data return `None`.
    fn get_notation(&self, _c: char) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: HashMap<String, String>,
    notation: HashMap<String, String>,
    max_key_len: usize,
}

impl MappingTable {
    /// Build a table from codepoint-notation keys.
    pub fn from_notation(raw: &BTreeMap<String, String>) -> Self {
        let _span = debug_span!("build_mapping_table", raw_entries = raw.len()).entered();
        let entries = prepare_table(raw);
        let max_key_len = max_key_len(entries.keys());
        debug!(entries = entries.len(), max_key_len, "mapping table ready");
        Self {
            entries,
            notation: raw.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            max_key_len,
        }
    }

    /// Build a table whose keys are already literal text.
    ///
    /// Empty keys can never match and are dropped.
    pub fn from_literal<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entries: HashMap<String, String> =
            entries.into_iter().filter(|(k, _)| !k.is_empty()).collect();
        let max_key_len = max_key_len(entries.keys());
        Self {
            entries,
            notation: HashMap::new(),
            max_key_len,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up a single codepoint in the raw notation data.
    pub fn get_notation(&self, c: char) -> Option<&str> {
        self.notation.get(&notation(c)).map(String::as_str)
    }

    pub fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl MappingLayer for MappingTable {
    fn get(&self, key: &str) -> Option<&str> {
        MappingTable::get(self, key)
    }

    fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    fn get_notation(&self, c: char) -> Option<&str> {
        MappingTable::get_notation(self, c)
    }
}

/// Borrowed view over a caller-supplied mapping, valid for a single call.
pub struct CustomMapping<'a> {
    map: &'a HashMap<String, String>,
    max_key_len: usize,
}

impl<'a> CustomMapping<'a> {
    pub fn new(map: &'a HashMap<String, String>) -> Self {
        Self {
            map,
            max_key_len: max_key_len(map.keys()),
        }
    }
}

impl MappingLayer for CustomMapping<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    fn max_key_len(&self) -> usize {
        self.max_key_len
    }
}

/// Convert a notation-keyed map into a literal-keyed map.
///
/// Entries whose key decodes to nothing are dropped. When two notation keys
/// decode to the same literal key, the first one in iteration order wins.
pub fn prepare_table(raw: &BTreeMap<String, String>) -> HashMap<String, String> {
    let mut prepared = HashMap::with_capacity(raw.len());
    for (key, value) in raw {
        let Some(literal) = decode_notation(key) else {
            debug!(key = key.as_str(), "dropping unparsable notation key");
            continue;
        };
        prepared.entry(literal).or_insert_with(|| value.clone());
    }
    prepared
}

/// Decode a notation key such as `"U+1F642 U+200D U+2194 U+FE0F"` into the
/// literal text it denotes.
///
/// Tokens that are not valid hex, longer than six digits, out of range, or
/// surrogate codepoints are skipped. Returns `None` if no token decodes.
pub fn decode_notation(key: &str) -> Option<String> {
    let mut literal = String::new();
    for token in key.split(NOTATION_MARKER).skip(1) {
        let hex = token.split(' ').next().unwrap_or_default();
        match decode_token(hex) {
            Some(c) => literal.push(c),
            None => debug!(key, token = hex, "skipping notation token"),
        }
    }
    if literal.is_empty() {
        None
    } else {
        Some(literal)
    }
}

fn decode_token(hex: &str) -> Option<char> {
    if hex.is_empty() || hex.len() > MAX_HEX_DIGITS || !hex.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return None;
    }
    let cp = u32::from_str_radix(hex, 16).ok()?;
    if cp > MAX_CODEPOINT {
        return None;
    }
    char::from_u32(cp)
}

fn max_key_len<'k>(keys: impl Iterator<Item = &'k String>) -> usize {
    keys.map(|k| k.chars().count()).max().unwrap_or(0)
}
