use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Path '{}' is not a valid directory", .0.display())]
    InvalidRoot(PathBuf),

    #[error("Clipboard initialization failed: {0}")]
    ClipboardInitError(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWriteError(String),

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("Tokenizer Error: {0}")]
    TokenizerError(String),

    #[error("Operation cancelled: {0}")]
    Cancelled(String),
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        PromptError::IoError(err.to_string())
    }
}

/// Why a candidate file was left out of the aggregate.
///
/// These never escape the aggregator as errors; they only reach the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file's bytes are not valid UTF-8.
    Encoding,
    /// Any other failure opening or reading the entry.
    Read(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Encoding => write!(f, "encoding error"),
            SkipReason::Read(detail) => write!(f, "{}", detail),
        }
    }
}
