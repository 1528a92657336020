/// Character trie over phrase keys, used for forward maximum matching.
use ahash::AHashMap;

use crate::PhraseDict;

/// A prefix tree keyed by `char`, storing which nodes end a phrase.
///
/// Built once from the phrase dictionary keys; segmenters walk it from each
/// Han position to find the longest phrase starting there.
///
/// # Example
/// ```
/// use hanpin_core::PhraseTrie;
///
/// let mut trie = PhraseTrie::new();
/// trie.insert("中国");
/// trie.insert("中国人");
///
/// let input: Vec<char> = "中国人民".chars().collect();
/// assert_eq!(trie.match_lengths(&input, 0), vec![2, 3]);
/// assert_eq!(trie.longest_match(&input, 0), Some(3));
/// assert_eq!(trie.longest_match(&input, 3), None);
/// ```
#[derive(Debug, Default)]
pub struct PhraseTrie {
    children: AHashMap<char, PhraseTrie>,
    terminal: bool,
}

impl PhraseTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trie holding every multi-character key of `dict`.
    ///
    /// Single-character keys are skipped: a one-character span resolves
    /// through the character dictionary anyway.
    pub fn from_phrase_dict(dict: &PhraseDict) -> Self {
        let mut trie = Self::new();
        for key in dict.keys() {
            if key.chars().nth(1).is_some() {
                trie.insert(&key);
            }
        }
        trie
    }

    /// Insert a phrase. Empty strings are ignored.
    pub fn insert(&mut self, phrase: &str) {
        if phrase.is_empty() {
            return;
        }
        let mut node = self;
        for ch in phrase.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.terminal = true;
    }

    /// True only for complete phrases, not bare prefixes.
    pub fn contains(&self, phrase: &str) -> bool {
        let mut node = self;
        for ch in phrase.chars() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.terminal && !phrase.is_empty()
    }

    /// Lengths (in chars) of every phrase starting at `input[start]`,
    /// shortest first.
    pub fn match_lengths(&self, input: &[char], start: usize) -> Vec<usize> {
        let mut res = Vec::new();
        let mut node = self;
        for (offset, ch) in input.iter().skip(start).enumerate() {
            match node.children.get(ch) {
                Some(child) => {
                    node = child;
                    if node.terminal {
                        res.push(offset + 1);
                    }
                }
                None => break,
            }
        }
        res
    }

    /// Length of the longest phrase starting at `input[start]`.
    pub fn longest_match(&self, input: &[char], start: usize) -> Option<usize> {
        self.match_lengths(input, start).last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_requires_complete_phrase() {
        let mut trie = PhraseTrie::new();
        trie.insert("重庆");
        trie.insert("");
        assert!(trie.contains("重庆"));
        assert!(!trie.contains("重"));
        assert!(!trie.contains(""));
    }

    #[test]
    fn match_lengths_from_offset() {
        let mut trie = PhraseTrie::new();
        trie.insert("银行");
        let input: Vec<char> = "重庆银行".chars().collect();
        assert!(trie.match_lengths(&input, 0).is_empty());
        assert_eq!(trie.match_lengths(&input, 2), vec![2]);
        assert_eq!(trie.longest_match(&input, 4), None);
    }

    #[test]
    fn built_from_demo_dict() {
        let trie = PhraseTrie::from_phrase_dict(&PhraseDict::load_demo());
        let input: Vec<char> = "中国人".chars().collect();
        assert_eq!(trie.longest_match(&input, 0), Some(3));
        assert!(trie.contains("银行"));
    }
}
