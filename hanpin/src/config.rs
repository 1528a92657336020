//! Conversion options and the pinyin-level configuration.
//!
//! `PinyinConfig` extends the base `Config` from core (flattened via serde)
//! with the output style, heteronym switch and segmenter choice.
//!
//! # Example
//!
//! ```rust
//! use hanpin::{PinyinConfig, Style};
//!
//! let config = PinyinConfig::from_toml_str("style = \"tone2\"\nheteronym = true\n").unwrap();
//! let options = config.options();
//! assert_eq!(options.style, Style::Tone2);
//! assert!(options.heteronym);
//! ```
use serde::{Deserialize, Serialize};

use crate::style::Style;

/// Per-call conversion options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Output style. Default: `Style::Tone`.
    pub style: Style,
    /// Return every distinct reading instead of the primary one. Default: false.
    pub heteronym: bool,
}

impl Options {
    pub fn new(style: Style, heteronym: bool) -> Self {
        Self { style, heteronym }
    }

    /// Options with `style` and no heteronyms.
    pub fn with_style(style: Style) -> Self {
        Self {
            style,
            heteronym: false,
        }
    }
}

/// Which segmentation adapter feeds the converter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SegmenterKind {
    /// Forward maximum matching against the phrase dictionary.
    #[default]
    Dict,
    /// One span per Han character.
    Char,
    /// jieba-rs word segmentation (requires the `jieba` feature).
    Jieba,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PinyinConfig {
    /// Dictionary paths and input handling.
    #[serde(flatten)]
    pub base: hanpin_core::Config,

    pub style: Style,
    pub heteronym: bool,
    pub segmenter: SegmenterKind,
}

impl PinyinConfig {
    /// The conversion options carried by this config.
    pub fn options(&self) -> Options {
        Options::new(self.style, self.heteronym)
    }

    pub fn base(&self) -> &hanpin_core::Config {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut hanpin_core::Config {
        &mut self.base
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> hanpin_core::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = PinyinConfig::default();
        assert_eq!(cfg.options(), Options::default());
        assert_eq!(cfg.options().style, Style::Tone);
        assert!(!cfg.options().heteronym);
        assert_eq!(cfg.segmenter, SegmenterKind::Dict);
    }

    #[test]
    fn toml_with_flattened_base() {
        let cfg = PinyinConfig::from_toml_str(
            r#"
style = "first_letter"
segmenter = "char"
char_dict = "data/chars.txt"
normalize_input = true
"#,
        )
        .unwrap();
        assert_eq!(cfg.style, Style::FirstLetter);
        assert_eq!(cfg.segmenter, SegmenterKind::Char);
        assert!(!cfg.heteronym);
        assert_eq!(
            cfg.base().char_dict.as_deref(),
            Some(std::path::Path::new("data/chars.txt"))
        );
        assert!(cfg.base().normalize_input);
    }

    #[test]
    fn unknown_style_name_is_an_error() {
        assert!(PinyinConfig::from_toml_str("style = \"bold\"\n").is_err());
    }

    #[test]
    fn style_accepts_numeric_codes() {
        let cfg = PinyinConfig::from_toml_str("style = 2\n").unwrap();
        assert_eq!(cfg.style, Style::Tone2);
        let cfg = PinyinConfig::from_toml_str("style = 4\nheteronym = true\n").unwrap();
        assert_eq!(cfg.options(), Options::new(Style::FirstLetter, true));
    }

    #[test]
    fn unknown_style_codes_fall_back_to_tone() {
        assert_eq!(PinyinConfig::from_toml_str("style = 9\n").unwrap().style, Style::Tone);
        assert_eq!(PinyinConfig::from_toml_str("style = -1\n").unwrap().style, Style::Tone);
        assert_eq!(PinyinConfig::from_toml_str("style = \"7\"\n").unwrap().style, Style::Tone);
    }

    #[test]
    fn options_serialize_style_by_name() {
        let s = toml::to_string(&Options::new(Style::Tone2, true)).unwrap();
        assert!(s.contains("style = \"tone2\""));
        let back: Options = toml::from_str(&s).unwrap();
        assert_eq!(back, Options::new(Style::Tone2, true));
    }
}
