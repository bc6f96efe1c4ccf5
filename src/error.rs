//! Error types for the entity layer.
//!
//! All failures are reported synchronously at the call site that detected
//! them. Nothing in the crate retries or swallows an error.

use thiserror::Error;

/// Errors surfaced by codecs, the Atom parser, entities, collections and the
/// transport seam.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed XML/Atom input or a value the codec cannot convert.
    #[error("Format error: {0}")]
    Format(String),

    /// A bare collection lookup matched items in more than one namespace.
    #[error("Key '{0}' is ambiguous across namespaces; supply a namespace to disambiguate")]
    AmbiguousKey(String),

    /// A required key is absent from both staged writes and cached content.
    #[error("Missing key: {0}")]
    MissingKey(String),

    /// Unrecognized action name passed to an action path mapping.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// The server answered with an error status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The transport could not complete the exchange.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The operation is not available for this resource shape.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ApiError {
    /// True for failures raised by the transport collaborator (status or connection).
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Http { .. } | ApiError::Transport(_))
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
