//! Input and custom-mapping validation.
//!
//! Well-formedness is checked over UTF-16 code units, where lone surrogates
//! are representable. Native `&str` input can only violate the
//! noncharacter rules. Mapping bounds are measured in extended grapheme
//! clusters, not codepoints.

use std::collections::HashMap;
use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

use crate::unicode::{
    combine_surrogates, is_blank, is_bmp_noncharacter, is_high_surrogate, is_low_surrogate,
    is_noncharacter,
};

/// Upper bound on a custom mapping key, in graphemes.
pub const MAX_KEY_GRAPHEMES: usize = 6;
/// Upper bound on a custom mapping value, in graphemes.
pub const MAX_VALUE_GRAPHEMES: usize = 40;

/// Check a sequence of UTF-16 code units for structural validity.
///
/// Rejects unpaired surrogates, a trailing high surrogate, supplementary
/// noncharacters, and BMP units in U+FDD0..U+FDEF or equal to U+FFFE.
/// Empty input is valid here.
pub fn is_well_formed_utf16(units: &[u16]) -> bool {
    let mut i = 0;
    while i < units.len() {
        let unit = units[i];
        if is_high_surrogate(unit) {
            let Some(&low) = units.get(i + 1) else {
                return false;
            };
            if !is_low_surrogate(low) || is_noncharacter(combine_surrogates(unit, low)) {
                return false;
            }
            i += 2;
        } else if is_low_surrogate(unit) || is_bmp_noncharacter(unit) {
            return false;
        } else {
            i += 1;
        }
    }
    true
}

/// Same rules as [`is_well_formed_utf16`] applied to a Rust string.
///
/// Surrogates cannot occur in a `&str`, so only noncharacters are checked.
pub fn is_well_formed(text: &str) -> bool {
    text.chars().all(|c| {
        let cp = c as u32;
        if cp > 0xFFFF {
            !is_noncharacter(cp)
        } else {
            !is_bmp_noncharacter(cp as u16)
        }
    })
}

/// Number of extended grapheme clusters. Blank strings count as zero.
pub fn grapheme_count(s: &str) -> usize {
    if is_blank(s) {
        return 0;
    }
    s.graphemes(true).count()
}

/// Which bound a custom mapping entry broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingBound {
    EmptyKey,
    KeyTooLong,
    EmptyValue,
    ValueTooLong,
}

impl fmt::Display for MappingBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "key is empty"),
            Self::KeyTooLong => write!(f, "key exceeds {MAX_KEY_GRAPHEMES} graphemes"),
            Self::EmptyValue => write!(f, "value is empty or blank"),
            Self::ValueTooLong => write!(f, "value exceeds {MAX_VALUE_GRAPHEMES} graphemes"),
        }
    }
}

/// First offending entry found in a custom mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingViolation {
    pub key: String,
    pub bound: MappingBound,
}

fn check_entry(key: &str, value: &str) -> Option<MappingBound> {
    // Keys are measured without the blank-as-empty rule: a single space is a
    // legitimate key.
    let key_len = key.graphemes(true).count();
    if key_len == 0 {
        return Some(MappingBound::EmptyKey);
    }
    if key_len > MAX_KEY_GRAPHEMES {
        return Some(MappingBound::KeyTooLong);
    }
    let value_len = grapheme_count(value);
    if value_len == 0 {
        return Some(MappingBound::EmptyValue);
    }
    if value_len > MAX_VALUE_GRAPHEMES {
        return Some(MappingBound::ValueTooLong);
    }
    None
}

/// Check every entry of a custom mapping. `None` and empty maps are valid.
///
/// Entries are checked in key order, so the reported key is the same on
/// every call.
pub fn check_mapping(mapping: Option<&HashMap<String, String>>) -> Result<(), MappingViolation> {
    let Some(mapping) = mapping else {
        return Ok(());
    };
    let mut entries: Vec<(&String, &String)> = mapping.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (key, value) in entries {
        if let Some(bound) = check_entry(key, value) {
            return Err(MappingViolation {
                key: key.clone(),
                bound,
            });
        }
    }
    Ok(())
}

pub fn validate_mapping(mapping: Option<&HashMap<String, String>>) -> bool {
    check_mapping(mapping).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn mapping(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_utf16_valid_text() {
        assert!(is_well_formed_utf16(&utf16("Fußgängerübergänge")));
        assert!(is_well_formed_utf16(&utf16("🤓 nerd")));
        assert!(is_well_formed_utf16(&utf16("Я люблю единорогов")));
    }

    #[test]
    fn test_utf16_empty_and_blank_are_valid() {
        assert!(is_well_formed_utf16(&[]));
        assert!(is_well_formed_utf16(&utf16("   ")));
    }

    #[test]
    fn test_utf16_lone_high_surrogate() {
        assert!(!is_well_formed_utf16(&[0xD800]));
        assert!(!is_well_formed_utf16(&[0x0061, 0xD83E]));
        assert!(!is_well_formed_utf16(&[0xD83E, 0x0061]));
    }

    #[test]
    fn test_utf16_lone_low_surrogate() {
        assert!(!is_well_formed_utf16(&[0xDC00]));
        assert!(!is_well_formed_utf16(&[0x0061, 0xDD13, 0x0062]));
    }

    #[test]
    fn test_utf16_reversed_pair() {
        assert!(!is_well_formed_utf16(&[0xDD13, 0xD83E]));
    }

    #[test]
    fn test_utf16_supplementary_noncharacter() {
        // U+1FFFE = D83F DFFE, U+10FFFF = DBFF DFFF
        assert!(!is_well_formed_utf16(&[0xD83F, 0xDFFE]));
        assert!(!is_well_formed_utf16(&[0xDBFF, 0xDFFF]));
    }

    #[test]
    fn test_utf16_bmp_noncharacter() {
        assert!(!is_well_formed_utf16(&[0xFDD0]));
        assert!(!is_well_formed_utf16(&[0x0061, 0xFFFE]));
        // U+FFFF is only rejected inside surrogate pairs.
        assert!(is_well_formed_utf16(&[0xFFFF]));
    }

    #[test]
    fn test_str_well_formed() {
        assert!(is_well_formed("plain"));
        assert!(is_well_formed(""));
        assert!(!is_well_formed("a\u{FDD0}b"));
        assert!(!is_well_formed("\u{FFFE}"));
        assert!(!is_well_formed("\u{2FFFF}"));
        assert!(is_well_formed("\u{FFFF}"));
    }

    #[test]
    fn test_grapheme_count_combining() {
        assert_eq!(grapheme_count("e\u{0308}"), 1);
        assert_eq!(grapheme_count("abc"), 3);
        assert_eq!(grapheme_count("👨‍👩‍👧"), 1);
        assert_eq!(grapheme_count("🇩🇪🇫🇷"), 2);
    }

    #[test]
    fn test_grapheme_count_blank() {
        assert_eq!(grapheme_count(""), 0);
        assert_eq!(grapheme_count("   "), 0);
    }

    #[test]
    fn test_mapping_none_and_empty() {
        assert!(validate_mapping(None));
        assert!(validate_mapping(Some(&HashMap::new())));
    }

    #[test]
    fn test_mapping_key_bound() {
        assert!(validate_mapping(Some(&mapping(&[("abcdef", "x")]))));
        assert!(!validate_mapping(Some(&mapping(&[("abcdefghij", "x")]))));
        let err = check_mapping(Some(&mapping(&[("abcdefg", "x")]))).unwrap_err();
        assert_eq!(err.key, "abcdefg");
        assert_eq!(err.bound, MappingBound::KeyTooLong);
    }

    #[test]
    fn test_mapping_key_counts_graphemes() {
        // Six base letters each carrying a combining mark: 12 codepoints, 6 graphemes.
        let key = "a\u{0301}e\u{0301}i\u{0301}o\u{0301}u\u{0301}y\u{0301}";
        assert_eq!(key.chars().count(), 12);
        assert!(validate_mapping(Some(&mapping(&[(key, "x")]))));
    }

    #[test]
    fn test_mapping_value_bound() {
        let forty = "x".repeat(40);
        let forty_one = "x".repeat(41);
        assert!(validate_mapping(Some(&mapping(&[("k", forty.as_str())]))));
        let err = check_mapping(Some(&mapping(&[("k", forty_one.as_str())]))).unwrap_err();
        assert_eq!(err.bound, MappingBound::ValueTooLong);
    }

    #[test]
    fn test_mapping_blank_value_rejected() {
        let err = check_mapping(Some(&mapping(&[("k", "   ")]))).unwrap_err();
        assert_eq!(err.bound, MappingBound::EmptyValue);
        assert!(!validate_mapping(Some(&mapping(&[("k", "")]))));
    }

    #[test]
    fn test_mapping_empty_key_rejected() {
        let err = check_mapping(Some(&mapping(&[("", "x")]))).unwrap_err();
        assert_eq!(err.bound, MappingBound::EmptyKey);
    }

    #[test]
    fn test_mapping_space_key_allowed() {
        assert!(validate_mapping(Some(&mapping(&[(" ", "_")]))));
    }

    #[test]
    fn test_one_bad_entry_rejects_all() {
        let long = "y".repeat(50);
        let m = mapping(&[("a", "b"), ("c", long.as_str()), ("d", "e")]);
        assert!(!validate_mapping(Some(&m)));
    }

    #[test]
    fn test_first_violation_in_key_order() {
        // Each map gets a fresh hasher seed, so iteration order varies.
        for _ in 0..20 {
            let m = mapping(&[
                ("uvwxyzabcd", "x"),
                ("klmnopqrst", "x"),
                ("abcdefghij", "x"),
                ("ok", "fine"),
            ]);
            let err = check_mapping(Some(&m)).unwrap_err();
            assert_eq!(err.key, "abcdefghij");
            assert_eq!(err.bound, MappingBound::KeyTooLong);
        }
    }

    #[test]
    fn test_violation_display() {
        assert_eq!(
            MappingBound::KeyTooLong.to_string(),
            "key exceeds 6 graphemes"
        );
    }
}
