//! Phrase dictionary: exact multi-character key -> per-character readings.
//!
//! Each entry holds one reading group per character of the key. Groups carry
//! a single canonical reading; the phrase is already disambiguated by its
//! context, so phrase hits never expand into heteronyms.
//!
//! Two backings can coexist:
//! - an in-memory hash map for entries inserted at runtime or parsed from JSON
//! - an `fst` key index plus a bincode payload vector (key -> payload index),
//!   loaded with [`PhraseDict::load_fst_bincode`]
//!
//! In-memory entries shadow fst entries with the same key.

use ahash::AHashMap;
use fst::{Map, MapBuilder, Streamer};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::utils::normalize_reading;

/// Per-character reading groups of one phrase.
pub type ReadingGroups = Vec<Vec<String>>;

#[derive(Debug, Clone, Default)]
pub struct PhraseDict {
    map: AHashMap<String, ReadingGroups>,
    fst_map: Option<Map<Vec<u8>>>,
    payloads: Vec<ReadingGroups>,
    max_chars: usize,
}

impl PhraseDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a phrase with one reading per character.
    ///
    /// Returns false (and stores nothing) when the reading count does not
    /// match the character count or a reading is blank.
    pub fn insert<R: AsRef<str>>(&mut self, phrase: &str, readings: &[R]) -> bool {
        let groups: ReadingGroups = readings
            .iter()
            .map(|r| vec![r.as_ref().to_string()])
            .collect();
        self.insert_groups(phrase, groups)
    }

    /// Insert a phrase with explicit reading groups.
    pub fn insert_groups(&mut self, phrase: &str, groups: ReadingGroups) -> bool {
        let phrase = phrase.trim();
        let chars = phrase.chars().count();
        if chars == 0 || chars != groups.len() {
            tracing::warn!(phrase, groups = groups.len(), "phrase/reading length mismatch");
            return false;
        }

        let mut normalized = Vec::with_capacity(groups.len());
        for group in groups {
            let group: Vec<String> = group
                .iter()
                .map(|r| normalize_reading(r))
                .filter(|r| !r.is_empty())
                .collect();
            if group.is_empty() {
                tracing::warn!(phrase, "phrase has a blank reading group");
                return false;
            }
            normalized.push(group);
        }

        self.max_chars = self.max_chars.max(chars);
        self.map.insert(phrase.to_string(), normalized);
        true
    }

    /// Reading groups of an exact phrase key.
    pub fn get(&self, phrase: &str) -> Option<&[Vec<String>]> {
        if let Some(groups) = self.map.get(phrase) {
            return Some(groups.as_slice());
        }
        let fst_map = self.fst_map.as_ref()?;
        let idx = fst_map.get(phrase)? as usize;
        self.payloads.get(idx).map(|g| g.as_slice())
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.get(phrase).is_some()
    }

    /// Number of distinct phrase keys across both backings.
    pub fn len(&self) -> usize {
        match &self.fst_map {
            Some(fst_map) => {
                let shadowed = self.map.keys().filter(|k| fst_map.contains_key(k)).count();
                fst_map.len() + self.map.len() - shadowed
            }
            None => self.map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length in characters of the longest phrase key.
    pub fn max_phrase_chars(&self) -> usize {
        self.max_chars
    }

    /// All phrase keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.entries().into_keys().collect()
    }

    /// Merged, sorted view of every entry. In-memory entries win.
    fn entries(&self) -> BTreeMap<String, ReadingGroups> {
        let mut out = BTreeMap::new();
        if let Some(fst_map) = &self.fst_map {
            let mut stream = fst_map.stream();
            while let Some((key, idx)) = stream.next() {
                let (Ok(key), Some(groups)) =
                    (std::str::from_utf8(key), self.payloads.get(idx as usize))
                else {
                    continue;
                };
                out.insert(key.to_string(), groups.clone());
            }
        }
        for (k, v) in &self.map {
            out.insert(k.clone(), v.clone());
        }
        out
    }

    /// Small built-in table matching [`crate::CharDict::load_demo`].
    pub fn load_demo() -> Self {
        let mut d = Self::new();
        d.insert("中国", &["zhōng", "guó"]);
        d.insert("你好", &["nǐ", "hǎo"]);
        d.insert("我们", &["wǒ", "men"]);
        d.insert("重庆", &["chóng", "qìng"]);
        d.insert("银行", &["yín", "háng"]);
        d.insert("长大", &["zhǎng", "dà"]);
        d.insert("中国人", &["zhōng", "guó", "rén"]);
        d
    }

    /// Parse the JSON form: `{"重庆": [["chóng"], ["qìng"]]}`.
    ///
    /// Entries whose group count does not match the key are skipped.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: HashMap<String, ReadingGroups> = serde_json::from_str(content)?;
        let mut d = Self::new();
        for (phrase, groups) in raw {
            d.insert_groups(&phrase, groups);
        }
        tracing::debug!(phrases = d.len(), "parsed phrase dictionary from json");
        Ok(d)
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Save every entry as a bincode list of `(phrase, groups)` pairs.
    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let entries: Vec<(String, ReadingGroups)> = self.entries().into_iter().collect();
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, &entries)?;
        Ok(())
    }

    /// Load a file written by [`PhraseDict::save_bincode`].
    pub fn load_bincode<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let entries: Vec<(String, ReadingGroups)> = bincode::deserialize_from(reader)?;
        let mut d = Self::new();
        for (phrase, groups) in entries {
            d.insert_groups(&phrase, groups);
        }
        tracing::debug!(phrases = d.len(), "loaded phrase dictionary from bincode");
        Ok(d)
    }

    /// Write the compact artifact pair: an fst mapping each key to a payload
    /// index, and a bincode vector of payloads in key order.
    pub fn save_fst_bincode<P: AsRef<Path>>(&self, fst_path: P, bincode_path: P) -> Result<()> {
        let entries = self.entries();

        let writer = BufWriter::new(File::create(fst_path)?);
        let mut builder = MapBuilder::new(writer)?;
        let mut payloads: Vec<ReadingGroups> = Vec::with_capacity(entries.len());
        // BTreeMap iterates in byte order, which is what MapBuilder requires.
        for (i, (key, groups)) in entries.into_iter().enumerate() {
            builder.insert(&key, i as u64)?;
            payloads.push(groups);
        }
        builder.finish()?;

        let writer = BufWriter::new(File::create(bincode_path)?);
        bincode::serialize_into(writer, &payloads)?;
        Ok(())
    }

    /// Load the artifact pair written by [`PhraseDict::save_fst_bincode`].
    ///
    /// Fails with [`Error::PayloadMismatch`] when a key points past the
    /// payload vector or at a payload whose group count differs from the
    /// key's character count.
    pub fn load_fst_bincode<P: AsRef<Path>>(fst_path: P, bincode_path: P) -> Result<Self> {
        let mut buf = Vec::new();
        File::open(fst_path)?.read_to_end(&mut buf)?;
        let fst_map = Map::new(buf)?;

        let reader = BufReader::new(File::open(bincode_path)?);
        let payloads: Vec<ReadingGroups> = bincode::deserialize_from(reader)?;

        // Every key must point at a payload with one group per character.
        let mut max_chars = 0;
        {
            let mut stream = fst_map.stream();
            while let Some((key, idx)) = stream.next() {
                let key = std::str::from_utf8(key)
                    .map_err(|e| Error::PayloadMismatch(format!("non-utf8 key: {}", e)))?;
                let chars = key.chars().count();
                let groups = payloads.get(idx as usize).ok_or_else(|| {
                    Error::PayloadMismatch(format!(
                        "{} points at payload {} of {}",
                        key,
                        idx,
                        payloads.len()
                    ))
                })?;
                if groups.len() != chars || groups.iter().any(|g| g.is_empty()) {
                    return Err(Error::PayloadMismatch(format!(
                        "{} has {} characters but {} reading groups",
                        key,
                        chars,
                        groups.len()
                    )));
                }
                max_chars = max_chars.max(chars);
            }
        }

        tracing::debug!(
            phrases = fst_map.len(),
            payloads = payloads.len(),
            "loaded phrase dictionary from fst"
        );
        Ok(Self {
            map: AHashMap::new(),
            fst_map: Some(fst_map),
            payloads,
            max_chars,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut d = PhraseDict::new();
        assert!(d.insert("重庆", &["chóng", "qìng"]));
        let groups = d.get("重庆").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], vec!["chóng".to_string()]);
        assert!(d.get("重").is_none());
        assert_eq!(d.max_phrase_chars(), 2);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let mut d = PhraseDict::new();
        assert!(!d.insert("重庆", &["chóng"]));
        assert!(!d.insert("", Vec::<String>::new().as_slice()));
        assert!(d.is_empty());
    }

    #[test]
    fn json_form() {
        let d = PhraseDict::from_json_str(
            r#"{"银行": [["yín"], ["háng"]], "坏": [["huài"], ["x"]]}"#,
        )
        .unwrap();
        assert_eq!(d.len(), 1);
        assert_eq!(d.get("银行").unwrap()[1], vec!["háng".to_string()]);
    }

    #[test]
    fn fst_bincode_roundtrip() {
        let dir = std::env::temp_dir();
        let pid = std::process::id();
        let fst_path = dir.join(format!("hanpin_phrases_{}.fst", pid));
        let bin_path = dir.join(format!("hanpin_phrases_{}.bincode", pid));

        let d = PhraseDict::load_demo();
        d.save_fst_bincode(&fst_path, &bin_path).unwrap();
        let loaded = PhraseDict::load_fst_bincode(&fst_path, &bin_path).unwrap();

        assert_eq!(loaded.len(), d.len());
        assert_eq!(loaded.max_phrase_chars(), 3);
        assert_eq!(loaded.get("重庆"), d.get("重庆"));
        assert_eq!(loaded.keys(), d.keys());
        assert!(!loaded.contains("重"));

        let _ = std::fs::remove_file(fst_path);
        let _ = std::fs::remove_file(bin_path);
    }

    #[test]
    fn in_memory_entries_shadow_fst() {
        let dir = std::env::temp_dir();
        let pid = std::process::id();
        let fst_path = dir.join(format!("hanpin_shadow_{}.fst", pid));
        let bin_path = dir.join(format!("hanpin_shadow_{}.bincode", pid));

        PhraseDict::load_demo()
            .save_fst_bincode(&fst_path, &bin_path)
            .unwrap();
        let mut d = PhraseDict::load_fst_bincode(&fst_path, &bin_path).unwrap();
        let before = d.len();
        d.insert("银行", &["yín", "xíng"]);
        assert_eq!(d.len(), before);
        assert_eq!(d.get("银行").unwrap()[1], vec!["xíng".to_string()]);

        let _ = std::fs::remove_file(fst_path);
        let _ = std::fs::remove_file(bin_path);
    }

    #[test]
    fn foreign_payload_is_rejected() {
        let dir = std::env::temp_dir();
        let pid = std::process::id();
        let fst_path = dir.join(format!("hanpin_foreign_{}.fst", pid));
        let bin_path = dir.join(format!("hanpin_foreign_{}.bincode", pid));

        PhraseDict::load_demo()
            .save_fst_bincode(&fst_path, &bin_path)
            .unwrap();

        // Right length, wrong shape: one group for every key.
        let foreign: Vec<ReadingGroups> = vec![vec![vec!["x".to_string()]]; 7];
        bincode::serialize_into(File::create(&bin_path).unwrap(), &foreign).unwrap();
        assert!(matches!(
            PhraseDict::load_fst_bincode(&fst_path, &bin_path),
            Err(Error::PayloadMismatch(_))
        ));

        // Truncated: only the first key (中国) has a payload.
        let truncated: Vec<ReadingGroups> =
            vec![vec![vec!["zhōng".to_string()], vec!["guó".to_string()]]];
        bincode::serialize_into(File::create(&bin_path).unwrap(), &truncated).unwrap();
        assert!(matches!(
            PhraseDict::load_fst_bincode(&fst_path, &bin_path),
            Err(Error::PayloadMismatch(_))
        ));

        let _ = std::fs::remove_file(fst_path);
        let _ = std::fs::remove_file(bin_path);
    }

    #[test]
    fn bincode_roundtrip() {
        let tmp = std::env::temp_dir().join(format!(
            "hanpin_phrases_list_{}.bin",
            std::process::id()
        ));
        let d = PhraseDict::load_demo();
        d.save_bincode(&tmp).unwrap();
        let loaded = PhraseDict::load_bincode(&tmp).unwrap();
        assert_eq!(loaded.keys(), d.keys());
        let _ = std::fs::remove_file(tmp);
    }
}
