use std::time::Duration;

use certbind_client::ApiError;
use certbind_core::{CustomCertificateId, IdError};
use thiserror::Error;

use crate::config::Lifecycle;

/// Errors surfaced to the host by the custom certificate resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("decoding: {0}")]
    Decode(String),

    #[error("parsing {field}: {source}")]
    Parse {
        field: &'static str,
        #[source]
        source: IdError,
    },

    #[error("checking for existing {id}: {source}")]
    Lookup {
        id: CustomCertificateId,
        #[source]
        source: ApiError,
    },

    #[error(
        "a resource with the ID {:?} already exists - to be managed it needs to be imported into the state, see the documentation for {resource_type}",
        .id.id()
    )]
    RequiresImport {
        resource_type: &'static str,
        id: CustomCertificateId,
    },

    #[error("creating web pubsub custom certificate: {id}: {source}")]
    Create {
        id: CustomCertificateId,
        #[source]
        source: ApiError,
    },

    #[error("retrieving {id}: {source}")]
    Retrieve {
        id: CustomCertificateId,
        #[source]
        source: ApiError,
    },

    #[error("retrieving {id}: response carried no payload")]
    MissingModel { id: CustomCertificateId },

    #[error("getting key vault base uri {base_url:?} from {id}: {reason}")]
    Resolution {
        id: CustomCertificateId,
        base_url: String,
        reason: String,
    },

    #[error("deleting {id}: {source}")]
    Delete {
        id: CustomCertificateId,
        #[source]
        source: ApiError,
    },

    #[error("{operation} of {id} did not finish within {timeout:?}")]
    Timeout {
        operation: Lifecycle,
        id: CustomCertificateId,
        timeout: Duration,
    },

    #[error("state serialization error: {0}")]
    State(#[from] serde_json::Error),
}

impl ResourceError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn parse(field: &'static str, source: IdError) -> Self {
        Self::Parse { field, source }
    }

    pub fn resolution(
        id: &CustomCertificateId,
        base_url: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Resolution {
            id: id.clone(),
            base_url: base_url.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` if the target already exists and must be imported.
    pub fn is_requires_import(&self) -> bool {
        matches!(self, Self::RequiresImport { .. })
    }

    /// Returns `true` if the lifecycle deadline was exceeded.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Resource identifier involved, when one was known at the time of failure.
    pub fn resource_id(&self) -> Option<&CustomCertificateId> {
        match self {
            Self::Lookup { id, .. }
            | Self::RequiresImport { id, .. }
            | Self::Create { id, .. }
            | Self::Retrieve { id, .. }
            | Self::MissingModel { id }
            | Self::Resolution { id, .. }
            | Self::Delete { id, .. }
            | Self::Timeout { id, .. } => Some(id),
            Self::Decode(_) | Self::Parse { .. } | Self::State(_) => None,
        }
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Decode(_) | Self::Parse { .. } => ErrorCategory::Validation,
            Self::RequiresImport { .. } => ErrorCategory::Conflict,
            Self::Lookup { .. } | Self::Retrieve { .. } => ErrorCategory::Remote,
            Self::Create { .. } | Self::Delete { .. } => ErrorCategory::Operation,
            Self::MissingModel { .. } => ErrorCategory::Integrity,
            Self::Resolution { .. } => ErrorCategory::Resolution,
            Self::Timeout { .. } => ErrorCategory::Timeout,
            Self::State(_) => ErrorCategory::Serialization,
        }
    }
}

/// Error categories for monitoring and classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    Remote,
    Operation,
    Integrity,
    Resolution,
    Timeout,
    Serialization,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Conflict => write!(f, "conflict"),
            Self::Remote => write!(f, "remote"),
            Self::Operation => write!(f, "operation"),
            Self::Integrity => write!(f, "integrity"),
            Self::Resolution => write!(f, "resolution"),
            Self::Timeout => write!(f, "timeout"),
            Self::Serialization => write!(f, "serialization"),
        }
    }
}

/// Convenience result type for resource operations
pub type Result<T> = std::result::Result<T, ResourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> CustomCertificateId {
        CustomCertificateId::new("sub", "rg", "svc", "cert1")
    }

    #[test]
    fn test_requires_import_message() {
        let err = ResourceError::RequiresImport {
            resource_type: "azurerm_web_pubsub_custom_certificate",
            id: id(),
        };
        assert!(err.is_requires_import());
        assert_eq!(err.category(), ErrorCategory::Conflict);
        let message = err.to_string();
        assert!(message.contains(
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.SignalRService/webPubSub/svc/customCertificates/cert1"
        ));
        assert!(message.contains("azurerm_web_pubsub_custom_certificate"));
    }

    #[test]
    fn test_errors_carry_resource_id() {
        let err = ResourceError::Delete {
            id: id(),
            source: ApiError::connection("reset"),
        };
        assert_eq!(err.resource_id(), Some(&id()));
        assert!(err.to_string().starts_with("deleting Custom Certificate"));

        let err = ResourceError::decode("missing field `name`");
        assert_eq!(err.resource_id(), None);
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_timeout_display() {
        let err = ResourceError::Timeout {
            operation: Lifecycle::Read,
            id: id(),
            timeout: Duration::from_secs(300),
        };
        assert!(err.is_timeout());
        assert!(err.to_string().starts_with("read of Custom Certificate"));
        assert!(err.to_string().ends_with("within 300s"));
    }
}
