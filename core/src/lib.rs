//! hanpin-core
//!
//! Dictionary tables, phrase trie and configuration shared by the `hanpin`
//! converter crate.
//!
//! Public API:
//! - `CharDict` - Han character -> ordered readings
//! - `PhraseDict` - exact phrase -> per-character readings (map or fst backed)
//! - `Dictionaries` - read-only bundle of both tables, cheap to clone
//! - `PhraseTrie` - char trie over phrase keys for maximum matching
//! - `Config` - dictionary locations and input handling
//! - `Error` / `Result` - loading errors
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

pub mod error;
pub use error::{Error, Result};

pub mod char_dict;
pub use char_dict::CharDict;

pub mod phrase_dict;
pub use phrase_dict::{PhraseDict, ReadingGroups};

pub mod trie;
pub use trie::PhraseTrie;

/// Generic configuration for dictionary loading and input handling.
///
/// Style-specific options (output style, heteronyms, segmenter choice) live
/// in `PinyinConfig` in the `hanpin` crate, which flattens this struct.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Character dictionary file (`.json`, `.txt` or `.bincode`).
    /// `None` selects the built-in demo table.
    pub char_dict: Option<PathBuf>,

    /// Phrase dictionary file: `.json`, `.txt`, a `.bincode` phrase list, or
    /// an `.fst` index whose payload vector sits next to it as
    /// `<stem>.payload.bincode`. `None` selects the built-in demo table.
    pub phrase_dict: Option<PathBuf>,

    /// NFC-normalize input text before segmentation. Folds CJK compatibility
    /// ideographs onto their unified codepoints.
    pub normalize_input: bool,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Read-only bundle of the character and phrase dictionaries.
///
/// Both tables sit behind `Arc`, so clones share storage and may be handed
/// to several converters or threads.
#[derive(Debug, Clone, Default)]
pub struct Dictionaries {
    pub chars: Arc<CharDict>,
    pub phrases: Arc<PhraseDict>,
}

impl Dictionaries {
    pub fn new(chars: CharDict, phrases: PhraseDict) -> Self {
        Self {
            chars: Arc::new(chars),
            phrases: Arc::new(phrases),
        }
    }

    /// Demo character and phrase tables.
    pub fn load_demo() -> Self {
        Self::new(CharDict::load_demo(), PhraseDict::load_demo())
    }
}

/// Utility helpers.
pub mod utils {
    use unicode_normalization::UnicodeNormalization;

    /// Normalize a dictionary reading: NFC and trimmed whitespace.
    pub fn normalize_reading(s: &str) -> String {
        s.nfc().collect::<String>().trim().to_string()
    }

    /// NFC-normalize free text without trimming.
    pub fn normalize_text(s: &str) -> String {
        s.nfc().collect()
    }

    /// True for CJK ideographs (unified, extensions, compatibility) and `〇`.
    pub fn is_han(ch: char) -> bool {
        matches!(ch as u32,
            0x3007
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xF900..=0xFAFF
            | 0x20000..=0x2EBEF
            | 0x2F800..=0x2FA1F
            | 0x30000..=0x323AF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_toml_roundtrip() {
        let cfg = Config {
            char_dict: Some(PathBuf::from("data/chars.json")),
            phrase_dict: None,
            normalize_input: true,
        };
        let s = cfg.to_toml_string().unwrap();
        let back = Config::from_toml_str(&s).unwrap();
        assert_eq!(back.char_dict, cfg.char_dict);
        assert!(back.phrase_dict.is_none());
        assert!(back.normalize_input);
    }

    #[test]
    fn config_save_and_load_toml() {
        let path = std::env::temp_dir().join(format!("hanpin_core_{}.toml", std::process::id()));
        let cfg = Config {
            char_dict: None,
            phrase_dict: Some(PathBuf::from("data/phrases.fst")),
            normalize_input: false,
        };
        cfg.save_toml(&path).unwrap();
        let back = Config::load_toml(&path).unwrap();
        assert!(back.char_dict.is_none());
        assert_eq!(back.phrase_dict, cfg.phrase_dict);
        assert!(!back.normalize_input);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn config_missing_fields_use_defaults() {
        let cfg = Config::from_toml_str("normalize_input = true\n").unwrap();
        assert!(cfg.char_dict.is_none());
        assert!(cfg.normalize_input);
    }

    #[test]
    fn is_han_ranges() {
        assert!(utils::is_han('中'));
        assert!(utils::is_han('〇'));
        assert!(utils::is_han('\u{20000}'));
        assert!(!utils::is_han('a'));
        assert!(!utils::is_han('，'));
        assert!(!utils::is_han('あ'));
    }

    #[test]
    fn normalize_text_folds_compatibility_ideographs() {
        // U+F900 is a compatibility form of U+8C48
        assert_eq!(utils::normalize_text("\u{F900}"), "\u{8C48}");
        assert_eq!(utils::normalize_reading("  hǎo "), "hǎo");
    }

    #[test]
    fn dictionaries_share_storage() {
        let d = Dictionaries::load_demo();
        let e = d.clone();
        assert!(Arc::ptr_eq(&d.chars, &e.chars));
        assert!(e.chars.contains('中'));
        assert!(e.phrases.contains("中国"));
    }
}
