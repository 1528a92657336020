//! Character and phrase resolution.
//!
//! Both resolvers are pure functions of the input, the options and the
//! read-only dictionaries; the only state they allocate is the per-call
//! heteronym dedup set.

use std::collections::HashSet;

use hanpin_core::Dictionaries;

use crate::config::Options;
use crate::style::format;

/// Candidate readings of one character.
///
/// - input longer than one character is truncated to its first character
/// - empty input yields an empty list
/// - characters without a dictionary entry are echoed back unchanged
/// - with `heteronym` every reading is formatted and deduplicated in
///   dictionary order, otherwise only the primary reading is returned
pub fn resolve_char(dicts: &Dictionaries, han: &str, options: &Options) -> Vec<String> {
    let Some(ch) = han.chars().next() else {
        return Vec::new();
    };

    let Some(readings) = dicts.chars.get(ch) else {
        return vec![ch.to_string()];
    };

    if !options.heteronym {
        return readings
            .first()
            .map(|raw| vec![format(raw, options.style)])
            .unwrap_or_else(|| vec![ch.to_string()]);
    }

    // Distinct readings may collapse under a lossy style (e.g. hǎo/hào -> hao).
    let mut seen = HashSet::with_capacity(readings.len());
    let mut out = Vec::with_capacity(readings.len());
    for raw in readings {
        let py = format(raw, options.style);
        if seen.insert(py.clone()) {
            out.push(py);
        }
    }
    out
}

/// Candidate readings of every character of `span`, one list per character.
///
/// An exact phrase-dictionary hit wins: each position gets its single phrase
/// reading and `heteronym` is ignored. Otherwise each character is resolved
/// on its own.
pub fn resolve_phrase(dicts: &Dictionaries, span: &str, options: &Options) -> Vec<Vec<String>> {
    let hit = dicts
        .phrases
        .get(span)
        .filter(|groups| groups.len() == span.chars().count());
    if let Some(groups) = hit {
        return groups
            .iter()
            .filter_map(|group| group.first())
            .map(|raw| vec![format(raw, options.style)])
            .collect();
    }

    let mut buf = [0u8; 4];
    span.chars()
        .map(|ch| resolve_char(dicts, ch.encode_utf8(&mut buf), options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    fn demo() -> Dictionaries {
        Dictionaries::load_demo()
    }

    #[test]
    fn primary_reading_by_default() {
        let d = demo();
        assert_eq!(resolve_char(&d, "中", &Options::default()), vec!["zhōng"]);
        assert_eq!(
            resolve_char(&d, "中", &Options::with_style(Style::Tone2)),
            vec!["zhong1"]
        );
    }

    #[test]
    fn heteronyms_keep_dictionary_order() {
        let d = demo();
        let opts = Options::new(Style::Tone, true);
        assert_eq!(resolve_char(&d, "行", &opts), vec!["xíng", "háng", "hàng", "héng"]);
    }

    #[test]
    fn heteronyms_dedup_after_formatting() {
        let d = demo();
        assert_eq!(
            resolve_char(&d, "好", &Options::new(Style::Normal, true)),
            vec!["hao"]
        );
        assert_eq!(
            resolve_char(&d, "行", &Options::new(Style::Initials, true)),
            vec!["x", "h"]
        );
        assert_eq!(
            resolve_char(&d, "的", &Options::new(Style::Tone2, true)),
            vec!["de", "di2", "di4"]
        );
    }

    #[test]
    fn unknown_and_empty_input() {
        let d = demo();
        assert_eq!(resolve_char(&d, "?", &Options::default()), vec!["?"]);
        assert_eq!(resolve_char(&d, "龘", &Options::default()), vec!["龘"]);
        assert!(resolve_char(&d, "", &Options::default()).is_empty());
    }

    #[test]
    fn multi_char_input_is_truncated() {
        let d = demo();
        assert_eq!(resolve_char(&d, "中国", &Options::default()), vec!["zhōng"]);
        assert_eq!(resolve_char(&d, "x中", &Options::default()), vec!["x"]);
    }

    #[test]
    fn phrase_hit_overrides_char_readings() {
        let d = demo();
        // 重 alone is zhòng, 行 alone is xíng
        let opts = Options::new(Style::Tone, true);
        assert_eq!(
            resolve_phrase(&d, "重庆", &opts),
            vec![vec!["chóng"], vec!["qìng"]]
        );
        assert_eq!(
            resolve_phrase(&d, "银行", &Options::with_style(Style::Tone2)),
            vec![vec!["yin2"], vec!["hang2"]]
        );
    }

    #[test]
    fn phrase_miss_falls_back_per_char() {
        let d = demo();
        assert_eq!(
            resolve_phrase(&d, "中龘", &Options::default()),
            vec![vec!["zhōng"], vec!["龘"]]
        );
        assert_eq!(
            resolve_phrase(&d, "好人", &Options::new(Style::Tone, true)),
            vec![vec!["hǎo", "hào"], vec!["rén"]]
        );
        assert!(resolve_phrase(&d, "", &Options::default()).is_empty());
    }
}
