//! Result and Error types for mcnpkit-input

/// Type alias for `Result<T, input::Error>`
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for the `mcnpkit-input` crate
///
/// These are whole-document failures that abort a parse pass. Problems with
/// individual cards never end up here, they are collected as
/// [ErrorEntry](crate::ErrorEntry) diagnostics instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("expected at least 2 blank line block separators, found {found}")]
    MissingBlockSeparators { found: usize },

    #[error("failed to load the \"{name}\" vocabulary")]
    InvalidVocabulary {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
