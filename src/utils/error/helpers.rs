//! Helper functions for creating specific error types

use super::types::PixelHubError;

/// Helper functions for creating specific errors
impl PixelHubError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration(message.into())
    }

    pub fn remote_call<S: Into<String>>(message: S) -> Self {
        Self::RemoteCall(message.into())
    }

    pub fn remote_fetch<S: Into<String>>(message: S) -> Self {
        Self::RemoteFetch(message.into())
    }

    pub fn api<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing(message.into())
    }
}
