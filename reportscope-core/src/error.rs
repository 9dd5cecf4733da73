//! Error types for reportscope-core

use thiserror::Error;

/// Main error type for the reportscope-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Index fetch or parse failure
    ///
    /// `status` carries the HTTP status code when the transport reported a
    /// non-success response; transport and parse failures leave it unset.
    #[error("failed to load report index: {message}")]
    Load {
        /// HTTP status code, if the server responded
        status: Option<u16>,
        /// Human-readable failure description
        message: String,
    },

    /// Rejected report selection (name not offered for the current project/date)
    #[error("invalid report selection: {0}")]
    Selection(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for reportscope-core
pub type Result<T> = std::result::Result<T, Error>;
