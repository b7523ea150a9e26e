use std::io;
use std::path::PathBuf;

/// Result type of this crate, defaulting to [`AnagramError`].
pub type Result<T, E = AnagramError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum AnagramError {
    /// The word list could not be opened or read.
    #[error("failed to read word list '{}': {source}", .path.display())]
    WordList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Results could not be written out.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    /// Search options that cannot describe any result.
    #[error("invalid option '{name}': {message}")]
    InvalidOption { name: &'static str, message: String },
}

impl AnagramError {
    pub(crate) fn invalid_option(name: &'static str, message: impl Into<String>) -> Self {
        AnagramError::InvalidOption {
            name,
            message: message.into(),
        }
    }
}
