//! Error types for the editor boundaries (config, payloads, document load).

use sheetmark_geom::GeomError;
use thiserror::Error;

/// Errors that can occur while loading or saving editor data.
///
/// Pointer handling and geometry never produce these; degenerate input there
/// is dropped silently.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rotation or document size out of range
    #[error(transparent)]
    Geom(#[from] GeomError),

    /// Configuration values that cannot work together
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },

    /// Configuration written by a newer version
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// Two boxes in one collection share an id
    #[error("Duplicate box id: {0}")]
    DuplicateId(String),

    /// Operation needs a loaded document
    #[error("No document loaded")]
    NoDocument,
}

impl Error {
    /// Create an invalid configuration error with a message.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
