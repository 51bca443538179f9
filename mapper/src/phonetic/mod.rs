//! Phonetic transcoding of localized names.
//!
//! ```text
//! "Emu(鸸鹋)"  --extract-->  "鸸鹋"  --romanize-->  ["er", "miao"]  -->  ("ermiao", "em")
//! ```
//!
//! The romanization system sits behind the [`Romanizer`] trait; [`HanyuPinyin`]
//! is the default.

pub mod romanizer;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub use romanizer::{HanyuPinyin, LookupRomanizer, Romanizer};

/// Last parenthesized group, anchored at the end (trailing whitespace allowed).
static TRAILING_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^()]+)\)\s*$").expect("trailing group pattern is valid"));

/// Extract the localized name from a composite `English(Localized)` string.
///
/// Only a group at the very end counts: `"Foo(bar) baz"` yields `""`.
/// Empty or absent input, or no trailing group, yields `""`.
///
/// # Example
/// ```
/// use species_pinyin::extract_localized_name;
///
/// assert_eq!(extract_localized_name(Some("Emu(鸸鹋)")), "鸸鹋");
/// assert_eq!(extract_localized_name(Some("Emu")), "");
/// assert_eq!(extract_localized_name(None), "");
/// ```
pub fn extract_localized_name(composite: Option<&str>) -> String {
    composite
        .and_then(|s| TRAILING_GROUP.captures(s))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Full spelling and initials of a localized name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Phonetic {
    /// Syllables concatenated without separators
    pub full: String,
    /// First character of each non-empty syllable
    pub initials: String,
}

/// Romanize a localized name. Empty input gives empty spelling and initials.
pub fn to_phonetic(romanizer: &dyn Romanizer, localized: &str) -> Phonetic {
    if localized.is_empty() {
        return Phonetic::default();
    }

    let syllables = romanizer.syllables(localized);
    Phonetic {
        full: syllables.concat(),
        initials: syllables.iter().filter_map(|s| s.chars().next()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_trailing_group() {
        assert_eq!(extract_localized_name(Some("Emu(鸸鹋)")), "鸸鹋");
        assert_eq!(extract_localized_name(Some("Common Ostrich(非洲鸵鸟)")), "非洲鸵鸟");
        assert_eq!(extract_localized_name(Some("Emu(鸸鹋)  ")), "鸸鹋");
    }

    #[test]
    fn test_extract_last_group_only() {
        assert_eq!(extract_localized_name(Some("Emu (Dromaius)(鸸鹋)")), "鸸鹋");
    }

    #[test]
    fn test_extract_rejects_non_trailing_group() {
        assert_eq!(extract_localized_name(Some("Foo(bar) baz")), "");
    }

    #[test]
    fn test_extract_without_group() {
        assert_eq!(extract_localized_name(Some("Emu")), "");
        assert_eq!(extract_localized_name(Some("")), "");
        assert_eq!(extract_localized_name(Some("Emu()")), "");
        assert_eq!(extract_localized_name(None), "");
    }

    #[test]
    fn test_extract_any_plain_payload() {
        for (prefix, inner) in [("X", "Y"), ("", "鸟"), ("Long name with spaces", "a b c")] {
            let composite = format!("{}({})", prefix, inner);
            assert_eq!(extract_localized_name(Some(&composite)), inner);
        }
    }

    #[test]
    fn test_to_phonetic_emu() {
        let p = to_phonetic(&HanyuPinyin, "鸸鹋");
        assert_eq!(p.full, "ermiao");
        assert_eq!(p.initials, "em");
    }

    #[test]
    fn test_to_phonetic_empty() {
        assert_eq!(to_phonetic(&HanyuPinyin, ""), Phonetic::default());
    }

    #[test]
    fn test_initials_match_syllables() {
        let name = "白头海雕";
        let syllables = HanyuPinyin.syllables(name);
        let p = to_phonetic(&HanyuPinyin, name);

        assert_eq!(p.initials.chars().count(), syllables.len());
        for (initial, syllable) in p.initials.chars().zip(&syllables) {
            assert_eq!(Some(initial), syllable.chars().next());
        }
        assert_eq!(p.full, syllables.concat());
    }

    #[test]
    fn test_to_phonetic_is_deterministic() {
        let first = to_phonetic(&HanyuPinyin, "丹顶鹤");
        for _ in 0..5 {
            assert_eq!(to_phonetic(&HanyuPinyin, "丹顶鹤"), first);
        }
    }

    #[test]
    fn test_custom_romanizer() {
        let kana: LookupRomanizer = [('エ', "e"), ('ミ', "mi"), ('ュ', "yu")].into_iter().collect();
        let p = to_phonetic(&kana, "エミュ");
        assert_eq!(p.full, "emiyu");
        assert_eq!(p.initials, "emy");
    }
}
