//! Error types for PixelHub batch operations

use thiserror::Error;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, PixelHubError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum PixelHubError {
    /// Batch-level precondition violations (no remote call is made)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed executor input or configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A single remote operation failed
    #[error("Remote call failed: {0}")]
    RemoteCall(String),

    /// The remote service answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status or envelope code
        status: u16,
        /// Message reported by the service
        message: String,
    },

    /// Enumerating the remote collection failed
    #[error("Remote fetch failed: {0}")]
    RemoteFetch(String),

    /// Network errors
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Response parsing errors
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PixelHubError {
    /// Whether this error originates from a remote operation rather than a local precondition
    pub fn is_remote_call(&self) -> bool {
        matches!(
            self,
            PixelHubError::RemoteCall(_)
                | PixelHubError::Api { .. }
                | PixelHubError::RemoteFetch(_)
                | PixelHubError::Network(_)
                | PixelHubError::Timeout(_)
                | PixelHubError::Parsing(_)
                | PixelHubError::HttpClient(_)
                | PixelHubError::Serialization(_)
        )
    }

    /// Whether this error is a batch-level validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, PixelHubError::Validation(_))
    }

    /// Whether this error is a configuration failure
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PixelHubError::Configuration(_) | PixelHubError::Yaml(_) | PixelHubError::Io(_)
        )
    }

    /// Status code associated with the error, if the remote service reported one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PixelHubError::Api { status, .. } => Some(*status),
            PixelHubError::HttpClient(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
