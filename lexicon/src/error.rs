//! Error types for the lexicon crate

use std::path::PathBuf;

use thiserror::Error;

use crate::Id;

/// Result type alias using [`LexiconError`]
pub type Result<T> = std::result::Result<T, LexiconError>;

/// Lexicon error type
#[derive(Error, Debug)]
pub enum LexiconError {
    /// I/O failure on one of the lexicon files
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// FST construction error
    #[error("FST error: {0}")]
    Fst(#[from] fst::Error),

    /// Words are NUL-terminated on disk and may not contain 0x00
    #[error("word contains a NUL byte: {0:?}")]
    InvalidWord(String),

    /// Words must be written in strictly ascending byte order
    #[error("word {word:?} written after {previous:?}")]
    OutOfOrder { previous: String, word: String },

    /// `u32::MAX` marks unused slots of the offset index
    #[error("identifier {0} is reserved")]
    ReservedId(Id),

    /// Two words were written with the same identifier
    #[error("identifier {0} written twice")]
    DuplicateId(Id),

    /// Every identifier below `u32::MAX` has been assigned
    #[error("lexicon identifier space exhausted")]
    Exhausted,

    /// The word store outgrew 32-bit offsets
    #[error("word store exceeds {} bytes", u32::MAX)]
    StoreTooLarge,

    /// No word is stored under this identifier
    #[error("unknown identifier: {0}")]
    UnknownId(Id),

    /// The word is not in the lexicon
    #[error("unknown word: {0:?}")]
    UnknownWord(String),

    /// A lexicon file does not have the expected layout
    #[error("corrupt lexicon file '{}': {reason}", path.display())]
    Corrupt { path: PathBuf, reason: &'static str },
}

impl LexiconError {
    /// Wraps an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LexiconError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: &'static str) -> Self {
        LexiconError::Corrupt {
            path: path.into(),
            reason,
        }
    }
}

/// Lossy rendering of a word for error messages
pub(crate) fn display_word(word: &[u8]) -> String {
    String::from_utf8_lossy(word).into_owned()
}
