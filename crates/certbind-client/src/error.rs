//! Error types returned by control-plane clients.

use std::fmt;

/// Errors that can occur while calling a control-plane API.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The requested object does not exist (HTTP 404).
    #[error("Not found: {id}")]
    NotFound {
        /// Identifier of the missing object.
        id: String,
    },

    /// The request conflicts with the current state of the object (HTTP 409).
    #[error("Conflict on {id}: {message}")]
    Conflict {
        /// Identifier of the conflicting object.
        id: String,
        /// Message reported by the service.
        message: String,
    },

    /// The service rejected the request payload (HTTP 400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Message reported by the service.
        message: String,
    },

    /// A long-running operation reached a terminal failure state.
    #[error("Long-running operation for {id} finished in state {state}: {message}")]
    OperationFailed {
        /// Identifier of the object the operation was acting on.
        id: String,
        /// Terminal provisioning state reported by the service.
        state: String,
        /// Message reported by the service.
        message: String,
    },

    /// Failed to reach the service.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Any other unexpected failure.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a new `Conflict` error.
    #[must_use]
    pub fn conflict(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Creates a new `BadRequest` error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a new `OperationFailed` error.
    #[must_use]
    pub fn operation_failed(
        id: impl Into<String>,
        state: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::OperationFailed {
            id: id.into(),
            state: state.into(),
            message: message.into(),
        }
    }

    /// Creates a new `Connection` error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if the service reported the object as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Conflict { .. } => ErrorCategory::Conflict,
            Self::BadRequest { .. } => ErrorCategory::Validation,
            Self::OperationFailed { .. } => ErrorCategory::Operation,
            Self::Connection { .. } => ErrorCategory::Infrastructure,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Categories of API errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Object not found.
    NotFound,
    /// Conflicting state.
    Conflict,
    /// Rejected payload.
    Validation,
    /// Long-running operation failure.
    Operation,
    /// Infrastructure/connection error.
    Infrastructure,
    /// Internal error.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::Validation => write!(f, "validation"),
            Self::Operation => write!(f, "operation"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::not_found("/subscriptions/s/x");
        assert_eq!(err.to_string(), "Not found: /subscriptions/s/x");

        let err = ApiError::operation_failed("/x", "Failed", "certificate not readable");
        assert_eq!(
            err.to_string(),
            "Long-running operation for /x finished in state Failed: certificate not readable"
        );
    }

    #[test]
    fn test_error_predicates() {
        assert!(ApiError::not_found("x").is_not_found());
        assert!(!ApiError::conflict("x", "busy").is_not_found());
        assert!(!ApiError::connection("reset").is_not_found());
    }

    #[test]
    fn test_error_category() {
        assert_eq!(ApiError::not_found("x").category(), ErrorCategory::NotFound);
        assert_eq!(
            ApiError::conflict("x", "busy").category(),
            ErrorCategory::Conflict
        );
        assert_eq!(
            ApiError::bad_request("bad").category(),
            ErrorCategory::Validation
        );
        assert_eq!(ErrorCategory::Infrastructure.to_string(), "infrastructure");
    }
}
