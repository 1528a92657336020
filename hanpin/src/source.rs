// hanpin/src/source.rs
//
// Dictionary sources.
// - text tables: `U+4E2D: zhōng,zhòng  # 中` and `重庆: chóng qìng`
// - json / bincode / fst artifacts are delegated to hanpin-core
// - format is picked from the file extension
//
// Malformed text lines are skipped with a warning; the rest of the table
// still loads.

use std::path::{Path, PathBuf};

use hanpin_core::{CharDict, Config, Dictionaries, Error, PhraseDict, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static CHAR_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^U\+([0-9A-Fa-f]{4,6})\s*:\s*([^#]*?)\s*(?:#.*)?$").expect("valid regex")
});

static PHRASE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^:#\s]+)\s*:\s*([^#]*?)\s*(?:#.*)?$").expect("valid regex")
});

fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

/// Parse one character table line. `Ok(None)` for blanks and comments.
pub fn parse_char_line(line_no: usize, line: &str) -> Result<Option<(char, Vec<String>)>> {
    let line = line.trim();
    if is_skippable(line) {
        return Ok(None);
    }
    let caps = CHAR_LINE.captures(line).ok_or_else(|| Error::Parse {
        line: line_no,
        reason: format!("expected `U+XXXX: readings`, got {:?}", line),
    })?;

    let code = u32::from_str_radix(&caps[1], 16).map_err(|e| Error::Parse {
        line: line_no,
        reason: e.to_string(),
    })?;
    let han = char::from_u32(code).ok_or_else(|| Error::Parse {
        line: line_no,
        reason: format!("U+{:X} is not a valid character", code),
    })?;

    let readings: Vec<String> = caps[2]
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from)
        .collect();
    if readings.is_empty() {
        return Err(Error::Parse {
            line: line_no,
            reason: format!("U+{:X} has no readings", code),
        });
    }
    Ok(Some((han, readings)))
}

/// Parse one phrase table line. `Ok(None)` for blanks and comments.
pub fn parse_phrase_line(line_no: usize, line: &str) -> Result<Option<(String, Vec<String>)>> {
    let line = line.trim();
    if is_skippable(line) {
        return Ok(None);
    }
    let caps = PHRASE_LINE.captures(line).ok_or_else(|| Error::Parse {
        line: line_no,
        reason: format!("expected `phrase: readings`, got {:?}", line),
    })?;

    let phrase = caps[1].to_string();
    let readings: Vec<String> = caps[2].split_whitespace().map(String::from).collect();
    if readings.len() != phrase.chars().count() {
        return Err(Error::Parse {
            line: line_no,
            reason: format!(
                "{} has {} characters but {} readings",
                phrase,
                phrase.chars().count(),
                readings.len()
            ),
        });
    }
    Ok(Some((phrase, readings)))
}

/// Parse a whole character table.
pub fn parse_char_table(content: &str) -> CharDict {
    let mut dict = CharDict::new();
    for (i, line) in content.lines().enumerate() {
        match parse_char_line(i + 1, line) {
            Ok(Some((han, readings))) => dict.insert(han, &readings),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "skipping character table line"),
        }
    }
    dict
}

/// Parse a whole phrase table.
pub fn parse_phrase_table(content: &str) -> PhraseDict {
    let mut dict = PhraseDict::new();
    for (i, line) in content.lines().enumerate() {
        match parse_phrase_line(i + 1, line) {
            Ok(Some((phrase, readings))) => {
                dict.insert(&phrase, &readings);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "skipping phrase table line"),
        }
    }
    dict
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Load a character dictionary, choosing the format by extension.
pub fn load_char_dict<P: AsRef<Path>>(path: P) -> Result<CharDict> {
    let path = path.as_ref();
    let dict = match extension(path).as_str() {
        "json" => CharDict::load_json(path)?,
        "bincode" | "bin" => CharDict::load_bincode(path)?,
        "txt" | "text" => parse_char_table(&std::fs::read_to_string(path)?),
        other => return Err(Error::UnsupportedFormat(format!("{} ({})", path.display(), other))),
    };
    tracing::debug!(path = %path.display(), chars = dict.len(), "character dictionary loaded");
    Ok(dict)
}

const PAYLOAD_SUFFIX: &str = ".payload.bincode";

/// Payload vector that sits next to an `.fst` phrase index:
/// `phrases.fst` -> `phrases.payload.bincode`.
pub fn fst_payload_path(fst: &Path) -> PathBuf {
    fst.with_extension("payload.bincode")
}

fn is_fst_payload(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(PAYLOAD_SUFFIX))
}

/// Load a phrase dictionary, choosing the format by extension.
///
/// A plain `.bincode` file is the `(phrase, groups)` list. An `.fst` index
/// reads its payload from [`fst_payload_path`]; naming the payload file
/// directly is an [`Error::UnsupportedFormat`].
pub fn load_phrase_dict<P: AsRef<Path>>(path: P) -> Result<PhraseDict> {
    let path = path.as_ref();
    if is_fst_payload(path) {
        return Err(Error::UnsupportedFormat(format!(
            "{} is an fst payload, load its .fst index instead",
            path.display()
        )));
    }
    let dict = match extension(path).as_str() {
        "json" => PhraseDict::load_json(path)?,
        "bincode" | "bin" => PhraseDict::load_bincode(path)?,
        "fst" => PhraseDict::load_fst_bincode(path, fst_payload_path(path).as_path())?,
        "txt" | "text" => parse_phrase_table(&std::fs::read_to_string(path)?),
        other => return Err(Error::UnsupportedFormat(format!("{} ({})", path.display(), other))),
    };
    tracing::debug!(path = %path.display(), phrases = dict.len(), "phrase dictionary loaded");
    Ok(dict)
}

/// Load both dictionaries named by `config`; missing paths fall back to the
/// built-in demo tables.
pub fn load_dictionaries(config: &Config) -> Result<Dictionaries> {
    let chars = match &config.char_dict {
        Some(path) => load_char_dict(path)?,
        None => CharDict::load_demo(),
    };
    let phrases = match &config.phrase_dict {
        Some(path) => load_phrase_dict(path)?,
        None => PhraseDict::load_demo(),
    };
    Ok(Dictionaries::new(chars, phrases))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_line_with_comment() {
        let (han, readings) = parse_char_line(1, "U+4E2D: zhōng,zhòng  # 中")
            .unwrap()
            .unwrap();
        assert_eq!(han, '中');
        assert_eq!(readings, vec!["zhōng", "zhòng"]);
    }

    #[test]
    fn char_line_blank_and_comment() {
        assert!(parse_char_line(1, "   ").unwrap().is_none());
        assert!(parse_char_line(2, "# header").unwrap().is_none());
    }

    #[test]
    fn char_line_errors_carry_line_numbers() {
        match parse_char_line(7, "4E2D zhōng") {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 7),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(parse_char_line(3, "U+4E2D:   # 中").is_err());
        assert!(parse_char_line(3, "U+D800: x").is_err());
    }

    #[test]
    fn phrase_line_counts_must_match() {
        let (phrase, readings) = parse_phrase_line(1, "重庆: chóng qìng").unwrap().unwrap();
        assert_eq!(phrase, "重庆");
        assert_eq!(readings, vec!["chóng", "qìng"]);
        assert!(parse_phrase_line(2, "重庆: chóng").is_err());
    }

    #[test]
    fn tables_skip_bad_lines() {
        let chars = parse_char_table("# chars\nU+4E2D: zhōng,zhòng\nbroken\nU+56FD: guó # 国\n");
        assert_eq!(chars.len(), 2);
        assert_eq!(chars.primary('国'), Some("guó"));

        let phrases = parse_phrase_table("中国: zhōng guó\n重庆: chóng\n\n");
        assert_eq!(phrases.len(), 1);
        assert!(phrases.contains("中国"));
    }

    #[test]
    fn unsupported_extension() {
        let err = load_char_dict("chars.xml").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn payload_path_and_rejection() {
        assert_eq!(
            fst_payload_path(Path::new("data/phrases.fst")),
            PathBuf::from("data/phrases.payload.bincode")
        );
        let err = load_phrase_dict("data/phrases.payload.bincode").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_paths_use_demo_tables() {
        let dicts = load_dictionaries(&Config::default()).unwrap();
        assert!(dicts.chars.contains('中'));
        assert!(dicts.phrases.contains("重庆"));
    }
}
