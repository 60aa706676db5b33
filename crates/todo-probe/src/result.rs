//! Result and error types for todo-probe.

use thiserror::Error;

/// Result type for todo-probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while probing the to-do service
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A required element never became visible
    #[error("Element {locator} not visible after {timeout_ms}ms")]
    ElementNotFound {
        /// Locator that missed
        locator: String,
        /// How long the lookup waited
        timeout_ms: u64,
    },

    /// Unexpected driver fault (session crashed, protocol error, ...)
    #[error("Driver fault: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Status code did not match the verified expectation
    #[error("Unsuccessful {operation} request, expected response code {expected}, got {actual}")]
    UnexpectedStatus {
        /// API operation name
        operation: &'static str,
        /// Expected status code
        expected: u16,
        /// Actual status code
        actual: u16,
    },

    /// A record did not match what the test expected
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProbeError {
    /// Create an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Status code carried by an [`ProbeError::UnexpectedStatus`]
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { actual, .. } => Some(*actual),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_message() {
        let err = ProbeError::UnexpectedStatus {
            operation: "put",
            expected: 200,
            actual: 401,
        };
        assert_eq!(
            err.to_string(),
            "Unsuccessful put request, expected response code 200, got 401"
        );
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_status_absent_for_other_variants() {
        assert_eq!(ProbeError::assertion("nope").status(), None);
        assert_eq!(ProbeError::config("bad").status(), None);
    }
}
