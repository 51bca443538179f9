//! Romanizers: localized name -> phonetic syllables.

use once_cell::sync::Lazy;
use pinyin::ToPinyin;
use std::collections::HashMap;

/// Splits a localized name into phonetic syllables.
///
/// Implementations must be pure: the same input always yields the same
/// syllables.
pub trait Romanizer {
    fn syllables(&self, localized: &str) -> Vec<String>;
}

/// One syllable per character with a reading; every maximal run of
/// characters without one is kept verbatim as a single segment.
fn segment<F>(localized: &str, mut reading: F) -> Vec<String>
where
    F: FnMut(char) -> Option<String>,
{
    let mut out = Vec::new();
    let mut pending = String::new();

    for c in localized.chars() {
        match reading(c) {
            Some(syllable) => {
                if !pending.is_empty() {
                    out.push(std::mem::take(&mut pending));
                }
                out.push(syllable);
            }
            None => pending.push(c),
        }
    }
    if !pending.is_empty() {
        out.push(pending);
    }

    out
}

/// Characters whose usual reading in names differs from the `pinyin` crate's
/// first reading.
static CHAR_READINGS: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    [('长', "chang")].into_iter().collect()
});

/// Multi-character words read differently from their characters alone.
/// Matched longest first at each position.
const PHRASE_READINGS: &[(&str, &[&str])] = &[
    ("西藏", &["xi", "zang"]),
    ("朝鲜", &["chao", "xian"]),
    ("重庆", &["chong", "qing"]),
    ("长白山", &["chang", "bai", "shan"]),
];

fn phrase_at(rest: &str) -> Option<(&'static str, &'static [&'static str])> {
    PHRASE_READINGS
        .iter()
        .filter(|(phrase, _)| rest.starts_with(phrase))
        .max_by_key(|(phrase, _)| phrase.len())
        .copied()
}

fn char_reading(c: char) -> Option<String> {
    if let Some(reading) = CHAR_READINGS.get(&c) {
        return Some((*reading).to_string());
    }
    c.to_pinyin().map(|p| p.plain().replace('ü', "v"))
}

/// Toneless Hanyu Pinyin for Chinese characters.
///
/// Known words are read as a whole (`西藏` -> `xi zang`); other characters
/// take their usual reading, with a few overrides for polyphonic characters
/// common in names (`长尾山雀` -> `chang wei shan que`). `ü` is spelled `v`
/// (`绿` -> `lv`).
#[derive(Debug, Clone, Copy, Default)]
pub struct HanyuPinyin;

impl Romanizer for HanyuPinyin {
    fn syllables(&self, localized: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut rest = localized;

        while !rest.is_empty() {
            if let Some((phrase, readings)) = phrase_at(rest) {
                out.extend(readings.iter().map(|r| r.to_string()));
                rest = &rest[phrase.len()..];
                continue;
            }

            // Characters up to the next phrase go through the per-character path.
            let end = rest
                .char_indices()
                .skip(1)
                .find(|(i, _)| phrase_at(&rest[*i..]).is_some())
                .map_or(rest.len(), |(i, _)| i);
            out.extend(segment(&rest[..end], char_reading));
            rest = &rest[end..];
        }

        out
    }
}

/// Table-driven romanizer for scripts without a dedicated implementation.
#[derive(Debug, Clone, Default)]
pub struct LookupRomanizer {
    table: HashMap<char, String>,
}

impl LookupRomanizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, c: char, syllable: impl Into<String>) -> Self {
        self.table.insert(c, syllable.into());
        self
    }
}

impl<S: Into<String>> FromIterator<(char, S)> for LookupRomanizer {
    fn from_iter<I: IntoIterator<Item = (char, S)>>(iter: I) -> Self {
        Self {
            table: iter.into_iter().map(|(c, s)| (c, s.into())).collect(),
        }
    }
}

impl Romanizer for LookupRomanizer {
    fn syllables(&self, localized: &str) -> Vec<String> {
        segment(localized, |c| self.table.get(&c).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hanyu_pinyin_syllables() {
        assert_eq!(HanyuPinyin.syllables("鸸鹋"), vec!["er", "miao"]);
        assert_eq!(HanyuPinyin.syllables("非洲鸵鸟"), vec!["fei", "zhou", "tuo", "niao"]);
    }

    #[test]
    fn test_polyphonic_characters_in_names() {
        assert_eq!(HanyuPinyin.syllables("长尾山雀"), vec!["chang", "wei", "shan", "que"]);
        assert_eq!(HanyuPinyin.syllables("长嘴半蹼鹬"), vec!["chang", "zui", "ban", "pu", "yu"]);
        assert_eq!(HanyuPinyin.syllables("黑翅长脚鹬"), vec!["hei", "chi", "chang", "jiao", "yu"]);
    }

    #[test]
    fn test_phrase_readings() {
        assert_eq!(HanyuPinyin.syllables("西藏毛腿沙鸡"), vec!["xi", "zang", "mao", "tui", "sha", "ji"]);
        assert_eq!(HanyuPinyin.syllables("长白山"), vec!["chang", "bai", "shan"]);
        // A word between non-Han runs still splits them.
        assert_eq!(HanyuPinyin.syllables("A西藏B"), vec!["A", "xi", "zang", "B"]);
    }

    #[test]
    fn test_long_tailed_tit_phonetic() {
        let phonetic = crate::phonetic::to_phonetic(&HanyuPinyin, "长尾山雀");
        assert_eq!(phonetic.full, "changweishanque");
        assert_eq!(phonetic.initials, "cwsq");
    }

    #[test]
    fn test_non_han_runs_kept_together() {
        assert_eq!(HanyuPinyin.syllables("X鸟"), vec!["X", "niao"]);
        assert_eq!(HanyuPinyin.syllables("鸟ABC鸟"), vec!["niao", "ABC", "niao"]);
    }

    #[test]
    fn test_umlaut_spelled_v() {
        assert_eq!(HanyuPinyin.syllables("绿"), vec!["lv"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(HanyuPinyin.syllables("").is_empty());
    }

    #[test]
    fn test_lookup_romanizer() {
        let kana: LookupRomanizer = [('エ', "e"), ('ミ', "mi"), ('ュ', "yu")].into_iter().collect();
        assert_eq!(kana.syllables("エミュ"), vec!["e", "mi", "yu"]);
        assert_eq!(kana.syllables("エー"), vec!["e", "ー"]);
    }
}
