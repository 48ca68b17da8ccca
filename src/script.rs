use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Latin blocks accepted as "our" script: Basic Latin through Latin Extended-B.
const LATIN_RANGES: [(u32, u32); 4] = [
    (0x0000, 0x007F), // Basic Latin
    (0x0080, 0x00FF), // Latin-1 Supplement
    (0x0100, 0x017F), // Latin Extended-A
    (0x0180, 0x024F), // Latin Extended-B
];

pub const DEFAULT_SCRIPT_THRESHOLD: f64 = 0.9;

pub fn is_latin_character(ch: char) -> bool {
    let cp = ch as u32;
    LATIN_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&cp))
}

/// Fraction of characters in `text` that are latin, or `None` for empty text
pub fn latin_ratio(text: &str) -> Option<f64> {
    let (total, latin) = text.chars().fold((0usize, 0usize), |(total, latin), ch| {
        (total + 1, latin + usize::from(is_latin_character(ch)))
    });

    match total {
        0 => None,
        total => Some(latin as f64 / total as f64),
    }
}

pub fn is_latin_script(text: &str, threshold: f64) -> bool {
    latin_ratio(text).is_some_and(|ratio| ratio >= threshold)
}

/// Whether a character is a unicode format control (category Cf), e.g. soft hyphens or zero width joiners
pub fn is_format_char(ch: char) -> bool {
    ch.general_category() == GeneralCategory::Format
}

/// Characters of `text` that count as letters: alphabetic, latin and not format controls
pub fn countable_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars()
        .filter(|&ch| !is_format_char(ch))
        .filter(|&ch| ch.is_alphabetic() && is_latin_character(ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_character_boundaries() {
        assert!(is_latin_character('\u{0}'));
        assert!(is_latin_character('\u{7F}'));
        assert!(is_latin_character('\u{80}'));
        assert!(is_latin_character('\u{24F}'));
        assert!(!is_latin_character('\u{250}'));
    }

    #[test]
    fn test_latin_character_samples() {
        for ch in ['a', 'Z', 'ß', 'ø', 'ő', 'ș', 'ǎ', '1', ' '] {
            assert!(is_latin_character(ch), "{ch} should be latin");
        }
        for ch in ['α', 'ж', 'ա', '中', 'ʃ'] {
            assert!(!is_latin_character(ch), "{ch} should not be latin");
        }
    }

    #[test]
    fn test_latin_script_empty_is_false() {
        assert!(!is_latin_script("", DEFAULT_SCRIPT_THRESHOLD));
        assert!(!is_latin_script("", 0.0));
        assert_eq!(latin_ratio(""), None);
    }

    #[test]
    fn test_latin_script_strict_threshold() {
        assert!(is_latin_script("hello world", 1.0));
        assert!(!is_latin_script("hello wörld α", 1.0));
    }

    #[test]
    fn test_latin_script_threshold() {
        // 9 latin out of 10
        assert!(is_latin_script("abcdefghiж", 0.9));
        // 8 latin out of 10
        assert!(!is_latin_script("abcdefghжж", 0.9));
        assert!(!is_latin_script("καλημέρα κόσμε", DEFAULT_SCRIPT_THRESHOLD));
    }

    #[test]
    fn test_format_chars_are_skipped() {
        // soft hyphen and zero width joiner are both Cf
        assert!(is_format_char('\u{AD}'));
        assert!(is_format_char('\u{200D}'));
        assert!(!is_format_char('a'));

        let letters: String = countable_letters("ab\u{AD}c d, 1é\u{200D}ж").collect();
        assert_eq!(letters, "abcdé");
    }
}
