//! Provider lookup error types

use thiserror::Error;

/// Lookup error with classification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LookupError {
    pub kind: LookupErrorKind,
    pub message: String,
}

impl LookupError {
    pub fn new(kind: LookupErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(LookupErrorKind::Configuration, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(LookupErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(LookupErrorKind::Timeout, message)
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self::new(LookupErrorKind::Service, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(LookupErrorKind::InvalidResponse, message)
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    /// Credential missing, detected before any request is made
    Configuration,
    /// Connection or transport failure
    Network,
    /// Request did not finish within the configured timeout
    Timeout,
    /// Non-success HTTP status or a failure status in the payload
    Service,
    /// Body could not be decoded
    InvalidResponse,
}

impl LookupErrorKind {
    pub fn is_configuration(self) -> bool {
        self == Self::Configuration
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Service => "service",
            Self::InvalidResponse => "invalid_response",
        }
    }
}
