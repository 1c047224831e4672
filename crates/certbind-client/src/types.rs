//! Wire models for the Web PubSub custom certificate API.

use serde::{Deserialize, Serialize};

/// A custom certificate as exchanged with the Web PubSub control plane.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomCertificate {
    /// Fully qualified resource id, set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Certificate name, set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Resource type, set by the service.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    pub properties: CustomCertificateProperties,
}

impl CustomCertificate {
    /// Builds a request payload referencing a certificate in Key Vault.
    pub fn new(
        key_vault_base_uri: impl Into<String>,
        key_vault_secret_name: impl Into<String>,
        key_vault_secret_version: Option<String>,
    ) -> Self {
        Self {
            properties: CustomCertificateProperties {
                key_vault_base_uri: key_vault_base_uri.into(),
                key_vault_secret_name: key_vault_secret_name.into(),
                key_vault_secret_version,
                provisioning_state: None,
            },
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCertificateProperties {
    pub key_vault_base_uri: String,
    pub key_vault_secret_name: String,
    /// Absent when the service should follow the latest version of the secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_vault_secret_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
}

/// Provisioning state reported for long-running operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProvisioningState {
    Accepted,
    Creating,
    Updating,
    Deleting,
    Moving,
    Running,
    Succeeded,
    Failed,
    Canceled,
    Unknown,
}

impl ProvisioningState {
    /// Returns `true` once the operation will make no further progress.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::Creating => "Creating",
            Self::Updating => "Updating",
            Self::Deleting => "Deleting",
            Self::Moving => "Moving",
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Canceled => "Canceled",
            Self::Unknown => "Unknown",
        }
    }
}

/// A successful response, which may or may not carry a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    /// HTTP status code returned by the service.
    pub status: u16,
    /// Decoded body, `None` when the service returned no payload.
    pub model: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(model: T) -> Self {
        Self {
            status: 200,
            model: Some(model),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            model: None,
        }
    }
}
