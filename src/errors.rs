//! Error types for Log Store operations

use thiserror::Error;

/// Errors that can occur while talking to the Log Store
#[derive(Debug, Error)]
pub enum LogError {
    /// Network or connection level failure, including request timeouts
    #[error("Log store transport failure: {0}")]
    TransportFailure(String),

    /// The store answered with a non-2xx status other than 404
    #[error("Log store rejected request with status {status}: {message}")]
    StoreRejected {
        /// HTTP status code returned by the store
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// The requested resource has no state yet (HTTP 404)
    #[error("Log store resource not found")]
    NotFound,

    /// A conditional append was refused because the stream already exists
    #[error("Wrong expected version for stream {stream}")]
    WrongExpectedVersion {
        /// Stream the append targeted
        stream: String,
    },

    /// Request encoding error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LogError {
    /// Whether this is the distinguished "no state yet" outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, LogError::NotFound)
    }
}

/// Result type for Log Store operations
pub type LogResult<T> = Result<T, LogError>;

impl From<reqwest::Error> for LogError {
    fn from(err: reqwest::Error) -> Self {
        LogError::TransportFailure(err.to_string())
    }
}

impl From<serde_json::Error> for LogError {
    fn from(err: serde_json::Error) -> Self {
        LogError::Serialization(err.to_string())
    }
}
