// hanpin/src/segmenter.rs
//
// Segmentation adapters.
// - the converter only reads the text of each span
// - spans must never straddle a Han / non-Han boundary
// - a span boundary inside a Han run decides phrase vs. per-char lookup

use hanpin_core::utils::is_han;
use hanpin_core::{PhraseDict, PhraseTrie};

/// A contiguous fragment of the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
}

impl<'a> Span<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

/// Splits raw text into ordered spans.
pub trait Segmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<Span<'a>>;
}

impl<S: Segmenter + ?Sized> Segmenter for &S {
    fn segment<'a>(&self, text: &'a str) -> Vec<Span<'a>> {
        (**self).segment(text)
    }
}

impl<S: Segmenter + ?Sized> Segmenter for Box<S> {
    fn segment<'a>(&self, text: &'a str) -> Vec<Span<'a>> {
        (**self).segment(text)
    }
}

/// Cut `text` into Han and non-Han runs and hand every Han run to `split_han`,
/// which returns span lengths in chars.
fn segment_runs<'a, F>(text: &'a str, mut split_han: F) -> Vec<Span<'a>>
where
    F: FnMut(&[char]) -> Vec<usize>,
{
    let indices: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |i: usize| indices.get(i).map(|(b, _)| *b).unwrap_or(text.len());

    let mut spans = Vec::new();
    let mut i = 0;
    while i < indices.len() {
        let han = is_han(indices[i].1);
        let mut j = i + 1;
        while j < indices.len() && is_han(indices[j].1) == han {
            j += 1;
        }

        if han {
            let run: Vec<char> = indices[i..j].iter().map(|(_, c)| *c).collect();
            let mut start = i;
            for len in split_han(&run) {
                let end = (start + len.max(1)).min(j);
                spans.push(Span::new(&text[byte_at(start)..byte_at(end)]));
                start = end;
                if start >= j {
                    break;
                }
            }
            if start < j {
                spans.push(Span::new(&text[byte_at(start)..byte_at(j)]));
            }
        } else {
            spans.push(Span::new(&text[byte_at(i)..byte_at(j)]));
        }
        i = j;
    }
    spans
}

/// One span per Han character; non-Han runs stay whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharSegmenter;

impl Segmenter for CharSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<Span<'a>> {
        segment_runs(text, |run| vec![1; run.len()])
    }
}

/// Forward maximum matching against the phrase dictionary keys.
///
/// At every Han position the longest known phrase starting there becomes a
/// span; otherwise the single character does.
#[derive(Debug, Default)]
pub struct DictSegmenter {
    trie: PhraseTrie,
}

impl DictSegmenter {
    pub fn new(trie: PhraseTrie) -> Self {
        Self { trie }
    }

    pub fn from_phrase_dict(dict: &PhraseDict) -> Self {
        Self::new(PhraseTrie::from_phrase_dict(dict))
    }
}

impl Segmenter for DictSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<Span<'a>> {
        segment_runs(text, |run| {
            let mut lens = Vec::new();
            let mut pos = 0;
            while pos < run.len() {
                let len = self.trie.longest_match(run, pos).unwrap_or(1);
                lens.push(len);
                pos += len;
            }
            lens
        })
    }
}

/// Word segmentation through jieba-rs.
///
/// jieba may group Han characters with adjacent non-Han text, so every word
/// is re-split on Han boundaries before it is handed to the converter.
#[cfg(feature = "jieba")]
pub struct JiebaSegmenter {
    jieba: jieba_rs::Jieba,
}

#[cfg(feature = "jieba")]
impl JiebaSegmenter {
    pub fn new() -> Self {
        Self {
            jieba: jieba_rs::Jieba::new(),
        }
    }
}

#[cfg(feature = "jieba")]
impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "jieba")]
impl Segmenter for JiebaSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<Span<'a>> {
        self.jieba
            .cut(text, true)
            .into_iter()
            .flat_map(|word| segment_runs(word, |run| vec![run.len()]))
            .collect()
    }
}
