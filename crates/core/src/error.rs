//! Error types for perftest-core

use thiserror::Error;

/// Result type alias for perftest-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while detecting, extracting or loading perftest output
#[derive(Error, Debug)]
pub enum Error {
    #[error("{path}: not ucc_perftest data")]
    NotRecognizedFormat { path: String },

    #[error("unable to convert {token} (from {line}): {source}")]
    Conversion {
        token: String,
        line: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("unable to parse {path}: {source}")]
    InFile {
        path: String,
        #[source]
        source: Box<Error>,
    },

    #[error(
        "unsupported data format ({path}), skipping: {sizes} different sizes with {values} values"
    )]
    LengthMismatch {
        path: String,
        sizes: usize,
        values: usize,
    },

    #[error("Failed to parse data points: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl Error {
    /// Wrap an extraction error with the file it came from
    pub fn in_file(path: impl Into<String>, source: Error) -> Self {
        Error::InFile {
            path: path.into(),
            source: Box::new(source),
        }
    }
}
