//! Codepoint-level classification and notation helpers.

use unicode_general_category::{get_general_category, GeneralCategory};

/// Highest valid Unicode scalar value.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

pub fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

pub fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Combine a surrogate pair into the codepoint it encodes.
pub fn combine_surrogates(high: u16, low: u16) -> u32 {
    0x10000 + (((high as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00)
}

/// Noncharacters: U+FDD0..U+FDEF plus the last two codepoints of every plane.
pub fn is_noncharacter(cp: u32) -> bool {
    (0xFDD0..=0xFDEF).contains(&cp) || (cp & 0xFFFE) == 0xFFFE
}

/// Noncharacter test for a lone BMP code unit.
///
/// Only U+FDD0..U+FDEF and U+FFFE are rejected here; a BMP U+FFFF passes.
pub fn is_bmp_noncharacter(unit: u16) -> bool {
    (0xFDD0..=0xFDEF).contains(&unit) || unit == 0xFFFE
}

/// General category Mn (combining diacritics, Hebrew points, etc.).
pub fn is_nonspacing_mark(c: char) -> bool {
    get_general_category(c) == GeneralCategory::NonspacingMark
}

/// Render a codepoint as `U+XXXX` (uppercase, at least four hex digits).
pub fn notation(c: char) -> String {
    format!("U+{:04X}", c as u32)
}

/// True if the string is empty or made only of whitespace.
pub fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surrogate_ranges() {
        assert!(is_high_surrogate(0xD800));
        assert!(is_high_surrogate(0xDBFF));
        assert!(!is_high_surrogate(0xDC00));
        assert!(is_low_surrogate(0xDC00));
        assert!(is_low_surrogate(0xDFFF));
        assert!(!is_low_surrogate(0xE000));
    }

    #[test]
    fn test_combine_surrogates() {
        // 🤓 U+1F913 = D83E DD13
        assert_eq!(combine_surrogates(0xD83E, 0xDD13), 0x1F913);
        assert_eq!(combine_surrogates(0xD800, 0xDC00), 0x10000);
        assert_eq!(combine_surrogates(0xDBFF, 0xDFFF), 0x10FFFF);
    }

    #[test]
    fn test_noncharacters() {
        assert!(is_noncharacter(0xFDD0));
        assert!(is_noncharacter(0xFDEF));
        assert!(is_noncharacter(0xFFFE));
        assert!(is_noncharacter(0xFFFF));
        assert!(is_noncharacter(0x1FFFE));
        assert!(is_noncharacter(0x10FFFF));
        assert!(!is_noncharacter(0xFDCF));
        assert!(!is_noncharacter(0x1F913));
        assert!(!is_noncharacter('a' as u32));
    }

    #[test]
    fn test_bmp_noncharacter_leaves_ffff() {
        assert!(is_bmp_noncharacter(0xFFFE));
        assert!(is_bmp_noncharacter(0xFDE0));
        assert!(!is_bmp_noncharacter(0xFFFF));
    }

    #[test]
    fn test_nonspacing_mark() {
        assert!(is_nonspacing_mark('\u{0301}'));
        assert!(is_nonspacing_mark('\u{0308}'));
        assert!(!is_nonspacing_mark('e'));
        // Spacing combining mark (Mc) is kept.
        assert!(!is_nonspacing_mark('\u{0903}'));
    }

    #[test]
    fn test_notation() {
        assert_eq!(notation('a'), "U+0061");
        assert_eq!(notation('ß'), "U+00DF");
        assert_eq!(notation('🤓'), "U+1F913");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(is_blank("\u{3000}"));
        assert!(!is_blank(" a "));
    }
}
