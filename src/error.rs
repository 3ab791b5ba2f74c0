//! Error types for wordsprint.

use thiserror::Error;

/// Errors surfaced by the library.
///
/// Most recoverable conditions (bad preference values, oversized word
/// counts, keys after the session finished) are handled by falling back
/// and never reach this type.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error while reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Preference file could not be encoded
    #[error("Preferences error: {0}")]
    Preferences(#[from] serde_json::Error),

    /// Bundled or custom word bank could not be loaded
    #[error("Word bank error: {0}")]
    WordBank(String),

    /// A session needs at least one word
    #[error("Word bank is empty")]
    EmptyWordBank,

    /// Log file or subscriber could not be set up
    #[error("Logging error: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
