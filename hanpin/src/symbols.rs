// hanpin/src/symbols.rs
//
// Toned-vowel symbol table.
// - every toned vowel that occurs in the readings maps to its plain letter
//   and a tone digit (0 = neutral)
// - substitution is a per-character table lookup, no pattern matching

use phf::phf_map;

/// Plain letter and tone digit of a toned vowel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneMark {
    pub plain: char,
    pub tone: u8,
}

const fn mark(plain: char, tone: u8) -> ToneMark {
    ToneMark { plain, tone }
}

/// Toned vowel -> (plain letter, tone). `ü` is written `v` in plain form.
pub static PHONETIC_SYMBOLS: phf::Map<char, ToneMark> = phf_map! {
    'ā' => mark('a', 1), 'á' => mark('a', 2), 'ǎ' => mark('a', 3), 'à' => mark('a', 4),
    'ē' => mark('e', 1), 'é' => mark('e', 2), 'ě' => mark('e', 3), 'è' => mark('e', 4),
    'ō' => mark('o', 1), 'ó' => mark('o', 2), 'ǒ' => mark('o', 3), 'ò' => mark('o', 4),
    'ī' => mark('i', 1), 'í' => mark('i', 2), 'ǐ' => mark('i', 3), 'ì' => mark('i', 4),
    'ū' => mark('u', 1), 'ú' => mark('u', 2), 'ǔ' => mark('u', 3), 'ù' => mark('u', 4),
    'ü' => mark('v', 0),
    'ǖ' => mark('v', 1), 'ǘ' => mark('v', 2), 'ǚ' => mark('v', 3), 'ǜ' => mark('v', 4),
    'ń' => mark('n', 2), 'ň' => mark('n', 3), 'ǹ' => mark('n', 4),
    'ḿ' => mark('m', 2),
};

/// Table entry for `ch`, if it is a toned vowel.
pub fn lookup(ch: char) -> Option<&'static ToneMark> {
    PHONETIC_SYMBOLS.get(&ch)
}

/// `ch` with its tone mark removed; other characters are returned as is.
pub fn plain_letter(ch: char) -> char {
    lookup(ch).map(|m| m.plain).unwrap_or(ch)
}

/// Replace every toned vowel with its plain letter.
///
/// A syllable without toned vowels comes back unchanged.
pub fn strip_tone(raw: &str) -> String {
    raw.chars().map(plain_letter).collect()
}

/// Like [`strip_tone`], also returning the tone digit of the toned vowel.
///
/// `None` means no toned vowel was found, which callers must keep distinct
/// from an explicit neutral tone `Some(0)`.
pub fn split_tone(raw: &str) -> (String, Option<u8>) {
    let mut tone = None;
    let plain = raw
        .chars()
        .map(|ch| match lookup(ch) {
            Some(m) => {
                tone = Some(m.tone);
                m.plain
            }
            None => ch,
        })
        .collect();
    (plain, tone)
}

/// First combining diacritic in `raw`.
///
/// Readings are stored NFC-normalized, so a surviving combining mark means
/// a toned letter that has no precomposed form and no table entry.
pub fn unmapped_mark(raw: &str) -> Option<char> {
    raw.chars().find(|c| ('\u{0300}'..='\u{036F}').contains(c))
}
