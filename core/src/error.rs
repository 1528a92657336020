//! Error types for dictionary loading and configuration.
//!
//! Conversion itself never fails; only the loading boundary (files, TOML,
//! JSON, bincode, fst artifacts) produces these errors.

use thiserror::Error;

/// Errors raised while loading or saving dictionary tables and configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fst error: {0}")]
    Fst(#[from] fst::Error),

    #[error("toml parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("toml serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// A line of a text table could not be parsed.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// A dictionary key that is not a valid Unicode scalar value.
    #[error("invalid codepoint key: {0}")]
    InvalidCodepoint(String),

    /// Two keys of one table resolve to the same character.
    #[error("duplicate dictionary key: {0}")]
    DuplicateKey(String),

    /// An fst index whose payload vector does not belong to it.
    #[error("phrase payload mismatch: {0}")]
    PayloadMismatch(String),

    #[error("unsupported dictionary format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
