//! Typed configuration and state for a certificate binding.

use certbind_core::{NestedItemId, WebPubSubId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ResourceError, Result};

pub const NAME: &str = "name";
pub const PARENT_SERVICE_ID: &str = "parent_service_id";
pub const SECRET_REFERENCE_ID: &str = "secret_reference_id";
pub const SECRET_VERSION: &str = "secret_version";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBindingConfig {
    name: String,
    parent_service_id: String,
    secret_reference_id: String,
}

/// User configuration, decoded and parsed once at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingConfig {
    pub name: String,
    pub parent_service_id: WebPubSubId,
    pub secret_reference_id: NestedItemId,
}

impl BindingConfig {
    /// Decodes a configuration object.
    ///
    /// Shape problems are reported as [`ResourceError::Decode`]; malformed
    /// identifiers as [`ResourceError::Parse`] naming the offending field.
    pub fn decode(config: &Value) -> Result<Self> {
        let raw = RawBindingConfig::deserialize(config)
            .map_err(|e| ResourceError::decode(e.to_string()))?;
        if raw.name.is_empty() {
            return Err(ResourceError::decode(format!("{NAME} must not be empty")));
        }

        let parent_service_id = WebPubSubId::parse(&raw.parent_service_id)
            .map_err(|e| ResourceError::parse(PARENT_SERVICE_ID, e))?;
        let secret_reference_id = NestedItemId::parse_optionally_versioned(&raw.secret_reference_id)
            .map_err(|e| ResourceError::parse(SECRET_REFERENCE_ID, e))?;

        Ok(Self {
            name: raw.name,
            parent_service_id,
            secret_reference_id,
        })
    }
}

/// The persisted view of a certificate binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub name: String,
    pub parent_service_id: String,
    pub secret_reference_id: String,
    /// Version reported by the service; empty when it tracks the latest version.
    #[serde(default)]
    pub secret_version: String,
}

impl Binding {
    pub fn to_state(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_state(state: &Value) -> Result<Self> {
        Ok(Self::deserialize(state)?)
    }
}
