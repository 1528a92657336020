//! Character dictionary: one Han codepoint -> ordered readings.
//!
//! The first reading of every entry is the primary (most frequent) one. The
//! remaining readings are heteronym alternatives in decreasing frequency.
//! Entries are never empty: inserting only blank readings leaves the table
//! untouched.
//!
//! Supported on-disk forms:
//! - JSON object keyed by decimal codepoint (or by the character itself),
//!   each value a comma-separated reading list: `{"20013": "zhōng,zhòng"}`
//! - bincode snapshot written by [`CharDict::save_bincode`]

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{Error, Result};
use crate::utils::normalize_reading;

/// Immutable-after-load mapping from a Han character to its readings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharDict {
    map: AHashMap<char, Vec<String>>,
}

impl CharDict {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self {
            map: AHashMap::new(),
        }
    }

    /// Append readings for `han`, keeping insertion order.
    ///
    /// Readings are NFC-normalized and trimmed. Blank readings and readings
    /// already present for the character are skipped.
    pub fn insert<R: AsRef<str>>(&mut self, han: char, readings: &[R]) {
        for r in readings {
            self.push_reading(han, r.as_ref());
        }
    }

    /// Append a single reading for `han`.
    pub fn push_reading(&mut self, han: char, reading: &str) {
        let reading = normalize_reading(reading);
        if reading.is_empty() {
            return;
        }
        let bucket = self.map.entry(han).or_default();
        if !bucket.contains(&reading) {
            bucket.push(reading);
        }
    }

    /// All readings of `han` in priority order.
    pub fn get(&self, han: char) -> Option<&[String]> {
        self.map.get(&han).map(|v| v.as_slice())
    }

    /// The primary reading of `han`.
    pub fn primary(&self, han: char) -> Option<&str> {
        self.map
            .get(&han)
            .and_then(|v| v.first())
            .map(|s| s.as_str())
    }

    pub fn contains(&self, han: char) -> bool {
        self.map.contains_key(&han)
    }

    /// Number of characters in the dictionary.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Small built-in table for smoke-testing and the CLI fallback.
    pub fn load_demo() -> Self {
        let mut d = Self::new();
        d.insert('中', &["zhōng", "zhòng"]);
        d.insert('国', &["guó"]);
        d.insert('你', &["nǐ"]);
        d.insert('好', &["hǎo", "hào"]);
        d.insert('我', &["wǒ"]);
        d.insert('们', &["men"]);
        d.insert('爱', &["ài"]);
        d.insert('人', &["rén"]);
        d.insert('一', &["yī"]);
        d.insert('的', &["de", "dí", "dì"]);
        d.insert('了', &["le", "liǎo"]);
        d.insert('重', &["zhòng", "chóng"]);
        d.insert('庆', &["qìng"]);
        d.insert('银', &["yín"]);
        d.insert('行', &["xíng", "háng", "hàng", "héng"]);
        d.insert('长', &["cháng", "zhǎng"]);
        d.insert('大', &["dà", "dài"]);
        d.insert('女', &["nǚ"]);
        d.insert('绿', &["lǜ", "lù"]);
        d.insert('嗯', &["ń", "ň", "ǹ"]);
        d.insert('阿', &["ā", "ē"]);
        d.insert('雨', &["yǔ", "yù"]);
        d
    }

    /// Parse the JSON table form.
    ///
    /// Two keys naming the same character (`"20013"` and `"中"`) fail with
    /// [`Error::DuplicateKey`].
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(content)?;
        let mut keys: AHashMap<char, String> = AHashMap::with_capacity(raw.len());
        let mut d = Self::new();
        for (key, readings) in raw {
            let han = parse_codepoint_key(&key)?;
            if let Some(prev) = keys.insert(han, key.clone()) {
                return Err(Error::DuplicateKey(format!(
                    "{:?} and {:?} both name {}",
                    prev, key, han
                )));
            }
            for r in readings.split(',') {
                d.push_reading(han, r);
            }
        }
        tracing::debug!(chars = d.len(), "parsed character dictionary from json");
        Ok(d)
    }

    /// Load the JSON table form from a file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Save the dictionary using bincode serialization.
    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    /// Load a dictionary written by [`CharDict::save_bincode`].
    pub fn load_bincode<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let d: Self = bincode::deserialize_from(reader)?;
        tracing::debug!(chars = d.len(), "loaded character dictionary from bincode");
        Ok(d)
    }
}

/// Accept a decimal codepoint (`"20013"`) or a literal single character (`"中"`).
fn parse_codepoint_key(key: &str) -> Result<char> {
    if let Ok(code) = key.trim().parse::<u32>() {
        return char::from_u32(code).ok_or_else(|| Error::InvalidCodepoint(key.to_string()));
    }
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::InvalidCodepoint(key.to_string())),
    }
}
