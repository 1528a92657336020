//! Conversion pipeline.
//!
//! Provides `Converter`, which ties a segmentation adapter to the shared
//! dictionaries and turns text into pinyin slots.
//!
//! A slot is the candidate list of one unit: a single Han character, or one
//! contiguous run of non-Chinese text. Runs are coalesced across span
//! boundaries, so the segmenter's split points inside non-Chinese text never
//! show up in the output.

use std::borrow::Cow;

use hanpin_core::utils::normalize_text;
use hanpin_core::Dictionaries;

use crate::config::Options;
use crate::resolver;
use crate::segmenter::{DictSegmenter, Segmenter};

/// Candidates for one resolved unit.
pub type Slot = Vec<String>;

/// Pinyin converter over read-only dictionaries and an injected segmenter.
///
/// The converter holds no mutable state; it is `Send + Sync` whenever the
/// segmenter is, and `convert` may be called concurrently.
#[derive(Debug, Clone)]
pub struct Converter<S> {
    dicts: Dictionaries,
    segmenter: S,
    normalize_input: bool,
}

impl Converter<DictSegmenter> {
    /// Converter using maximum matching over the phrase dictionary keys.
    pub fn with_dict_segmenter(dicts: Dictionaries) -> Self {
        let segmenter = DictSegmenter::from_phrase_dict(&dicts.phrases);
        Self::new(dicts, segmenter)
    }
}

impl<S: Segmenter> Converter<S> {
    pub fn new(dicts: Dictionaries, segmenter: S) -> Self {
        Self {
            dicts,
            segmenter,
            normalize_input: false,
        }
    }

    /// NFC-normalize input text before segmentation.
    pub fn normalize_input(mut self, enabled: bool) -> Self {
        self.normalize_input = enabled;
        self
    }

    pub fn dictionaries(&self) -> &Dictionaries {
        &self.dicts
    }

    /// Convert `text` into an ordered list of slots.
    ///
    /// A span is Chinese-led when its first character has a character
    /// dictionary entry. Chinese-led spans flush the pending non-Chinese
    /// buffer and resolve to one slot per character; everything else is
    /// appended to the buffer, which becomes a single slot.
    pub fn convert(&self, text: &str, options: &Options) -> Vec<Slot> {
        let text: Cow<'_, str> = if self.normalize_input {
            Cow::Owned(normalize_text(text))
        } else {
            Cow::Borrowed(text)
        };

        let spans = self.segmenter.segment(&text);
        tracing::debug!(spans = spans.len(), chars = text.chars().count(), "converting");

        let mut slots: Vec<Slot> = Vec::new();
        let mut nohans = String::new();

        for span in spans {
            let words = span.text;
            let chinese_led = words
                .chars()
                .next()
                .is_some_and(|ch| self.dicts.chars.contains(ch));

            if !chinese_led {
                nohans.push_str(words);
                continue;
            }

            if !nohans.is_empty() {
                slots.push(vec![std::mem::take(&mut nohans)]);
            }

            if words.chars().nth(1).is_none() {
                slots.push(resolver::resolve_char(&self.dicts, words, options));
            } else {
                slots.extend(resolver::resolve_phrase(&self.dicts, words, options));
            }
        }

        if !nohans.is_empty() {
            slots.push(vec![nohans]);
        }
        slots
    }

    /// Convert raw bytes; input that is not UTF-8 text yields no slots.
    pub fn convert_bytes(&self, bytes: &[u8], options: &Options) -> Vec<Slot> {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.convert(text, options),
            Err(e) => {
                tracing::debug!(error = %e, "input is not utf-8, nothing to convert");
                Vec::new()
            }
        }
    }

    /// Single-character lookup, bypassing segmentation.
    pub fn resolve_char(&self, han: &str, options: &Options) -> Slot {
        resolver::resolve_char(&self.dicts, han, options)
    }

    /// Phrase lookup with per-character fallback, bypassing segmentation.
    pub fn resolve_phrase(&self, span: &str, options: &Options) -> Vec<Slot> {
        resolver::resolve_phrase(&self.dicts, span, options)
    }
}

/// Join slots into one line: candidates with `,`, slots with `separator`.
pub fn join_slots(slots: &[Slot], separator: &str) -> String {
    slots
        .iter()
        .map(|slot| slot.join(","))
        .collect::<Vec<_>>()
        .join(separator)
}
