//! Error types for the Sharn atlas

use thiserror::Error;

/// Result type alias using the atlas Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, resolving, or rendering districts
#[derive(Error, Debug)]
pub enum Error {
    /// A network location could not be fetched
    #[error("Error loading from {url}, ensure that CORS is enabled at target ({reason})")]
    Fetch { url: String, reason: String },

    /// A local file could not be read
    #[error("Error reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Payload is not a valid dataset
    #[error("Error with JSON file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Well-formed dataset lacks a district, ward, or level
    #[error("Missing data for {key}: {detail}")]
    MissingData { key: String, detail: String },

    /// A location string could not be understood
    #[error("Invalid location {location}: {reason}")]
    InvalidLocation { location: String, reason: String },
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network or file fetch failed
    Load,
    /// Payload was not valid JSON for a dataset
    Parse,
    /// Dataset is well-formed but incomplete
    MissingData,
}

impl Error {
    /// Shorthand for a missing-data error
    pub fn missing(key: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MissingData {
            key: key.into(),
            detail: detail.into(),
        }
    }

    /// Which taxonomy bucket this error falls into
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch { .. } | Self::Read { .. } | Self::InvalidLocation { .. } => {
                ErrorKind::Load
            }
            Self::Parse(_) => ErrorKind::Parse,
            Self::MissingData { .. } => ErrorKind::MissingData,
        }
    }

    /// Whether the user must be shown a notice for this error.
    ///
    /// Missing-data errors only abort the render of one district and are logged.
    pub fn is_blocking(&self) -> bool {
        self.kind() != ErrorKind::MissingData
    }
}
