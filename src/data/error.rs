//! Content loading and query errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the content store.
///
/// Everything except [`DataError::InvalidArgument`] and
/// [`DataError::AlreadyInitialized`] is a startup fault: the site must not be
/// built or served from partial data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error when reading `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid data in `{path}`")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate project id `{0}`")]
    DuplicateId(String),

    #[error("project id `{0}` must be non-empty and use only a-z, 0-9, `-` or `_`")]
    InvalidId(String),

    #[error("skill `{name}` in `{category}` has level {level}, expected 0..=100")]
    LevelOutOfRange {
        category: &'static str,
        name: String,
        level: u8,
    },

    #[error("project `{id}` has invalid {field} `{value}`")]
    InvalidDate {
        id: String,
        field: &'static str,
        value: String,
    },

    #[error("project `{id}` ends before it starts")]
    DateOrder { id: String },

    #[error("unknown {kind} `{value}`")]
    InvalidArgument { kind: &'static str, value: String },

    #[error("content store is already initialized")]
    AlreadyInitialized,
}

impl DataError {
    /// Whether this error means the backing data is missing or malformed.
    pub const fn is_startup(&self) -> bool {
        !matches!(
            self,
            Self::InvalidArgument { .. } | Self::AlreadyInitialized
        )
    }
}
