//! Output styles and the reading formatter.
//!
//! Dictionary readings are stored in the toned form (`zhōng`). Every other
//! style is derived from it by [`format`]:
//!
//! | style         | `zhōng`  | `ài` | `de` |
//! |---------------|----------|------|------|
//! | `Normal`      | `zhong`  | `ai` | `de` |
//! | `Tone`        | `zhōng`  | `ài` | `de` |
//! | `Tone2`       | `zhong1` | `ai4`| `de` |
//! | `Initials`    | `zh`     | `""` | `d`  |
//! | `FirstLetter` | `z`      | `a`  | `d`  |

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::symbols;

pub const STYLE_NORMAL: u8 = 0;
pub const STYLE_TONE: u8 = 1;
pub const STYLE_TONE2: u8 = 2;
pub const STYLE_INITIALS: u8 = 3;
pub const STYLE_FIRST_LETTER: u8 = 4;

/// Pinyin output style. Discriminants are stable and may be persisted.
///
/// Serializes as its snake_case name. Deserializes from a name or from a
/// numeric code, the same inputs `FromStr` accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Style {
    /// Tone marks removed.
    Normal = STYLE_NORMAL,
    /// Tone mark on the vowel (dictionary form).
    #[default]
    Tone = STYLE_TONE,
    /// Tone digit appended after the syllable.
    Tone2 = STYLE_TONE2,
    /// Initial consonant cluster only.
    Initials = STYLE_INITIALS,
    /// First letter only.
    FirstLetter = STYLE_FIRST_LETTER,
}

impl Style {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Unknown codes fall back to `Tone`.
impl From<u8> for Style {
    fn from(code: u8) -> Self {
        match code {
            STYLE_NORMAL => Style::Normal,
            STYLE_TONE2 => Style::Tone2,
            STYLE_INITIALS => Style::Initials,
            STYLE_FIRST_LETTER => Style::FirstLetter,
            _ => Style::Tone,
        }
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "normal" => Ok(Style::Normal),
            "tone" => Ok(Style::Tone),
            "tone2" => Ok(Style::Tone2),
            "initials" => Ok(Style::Initials),
            "first_letter" => Ok(Style::FirstLetter),
            other => match other.parse::<u8>() {
                Ok(code) => Ok(Style::from(code)),
                Err(_) => Err(format!("unknown pinyin style: {}", s)),
            },
        }
    }
}

impl<'de> Deserialize<'de> for Style {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Code(i64),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Code(code) => Ok(u8::try_from(code).map(Style::from).unwrap_or_default()),
            Repr::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Initial consonant clusters in match priority order.
///
/// Two-letter clusters precede their one-letter prefixes, and `yu` precedes `y`.
pub const INITIALS: &[&str] = &[
    "zh", "ch", "sh", "b", "p", "m", "f", "d", "t", "n", "l", "g", "k", "h", "j", "q", "x", "r",
    "z", "c", "s", "yu", "y", "w",
];

/// Initial of a raw reading, or `""` for vowel-led syllables.
pub fn initials(raw: &str) -> &'static str {
    INITIALS
        .iter()
        .find(|i| raw.starts_with(*i))
        .copied()
        .unwrap_or("")
}

/// First letter of a raw reading with its tone mark removed.
pub fn first_letter(raw: &str) -> String {
    raw.chars()
        .next()
        .map(|ch| symbols::plain_letter(ch).to_string())
        .unwrap_or_default()
}

/// Format one raw (toned) reading in `style`.
pub fn format(raw: &str, style: Style) -> String {
    if let Some(mark) = symbols::unmapped_mark(raw) {
        tracing::warn!(reading = raw, mark = %mark.escape_unicode(), "reading has an unmapped tone mark");
    }

    match style {
        Style::Initials => initials(raw).to_string(),
        Style::FirstLetter => first_letter(raw),
        Style::Normal => symbols::strip_tone(raw),
        Style::Tone2 => match symbols::split_tone(raw) {
            (plain, Some(tone)) => format!("{}{}", plain, tone),
            (_, None) => raw.to_string(),
        },
        Style::Tone => raw.to_string(),
    }
}
