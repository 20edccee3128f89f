//! Type conversions for PixelHubError

use super::types::PixelHubError;

impl PixelHubError {
    /// Classify a transport-level reqwest failure
    ///
    /// Timeouts and connection failures get their own variants so per-item
    /// reports read "timeout" rather than an opaque client error.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PixelHubError::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            PixelHubError::Network(err.to_string())
        } else if err.is_decode() {
            PixelHubError::Parsing(err.to_string())
        } else if let Some(status) = err.status() {
            PixelHubError::api(status.as_u16(), err.to_string())
        } else {
            PixelHubError::HttpClient(err)
        }
    }
}

impl From<tokio::time::error::Elapsed> for PixelHubError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        PixelHubError::Timeout(err.to_string())
    }
}

impl From<url::ParseError> for PixelHubError {
    fn from(err: url::ParseError) -> Self {
        PixelHubError::Configuration(format!("Invalid URL: {}", err))
    }
}
