//! Contract between a declarative resource and the host that drives it.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::Timeouts;
use crate::error::ResourceError;
use crate::schema::{self, Schema};

/// Result of refreshing a resource from the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome<M> {
    /// The object exists; the host stores the model as the new state.
    Present(M),
    /// The object no longer exists; the host drops it from state.
    Gone,
}

impl<M> ReadOutcome<M> {
    pub fn is_gone(&self) -> bool {
        matches!(self, Self::Gone)
    }

    pub fn present(self) -> Option<M> {
        match self {
            Self::Present(model) => Some(model),
            Self::Gone => None,
        }
    }
}

/// A resource managed by a declarative host.
///
/// The host decodes nothing itself: it hands raw configuration to
/// [`Resource::create`], persists the returned identifier and calls
/// [`Resource::read`] and [`Resource::delete`] with it afterwards. There is
/// no update; changes to `force_new` arguments are handled by the host as
/// delete followed by create.
#[async_trait]
pub trait Resource: Send + Sync {
    /// State model produced by [`Resource::read`].
    type Model: Send;

    /// Type name under which the host registers this resource.
    fn resource_type(&self) -> &'static str;

    /// User-configurable fields.
    fn arguments(&self) -> Schema;

    /// Fields computed by the resource.
    fn attributes(&self) -> Schema;

    fn timeouts(&self) -> Timeouts;

    /// Creates the remote object and returns its identifier.
    async fn create(&self, config: &Value) -> Result<String, ResourceError>;

    /// Refreshes state from the remote object identified by `id`.
    async fn read(&self, id: &str) -> Result<ReadOutcome<Self::Model>, ResourceError>;

    /// Deletes the remote object identified by `id`.
    async fn delete(&self, id: &str) -> Result<(), ResourceError>;

    /// Checks an identifier supplied to an import before it is read.
    fn validate_id(&self, id: &str) -> Result<(), ResourceError>;

    /// Validates user configuration against the declared schema.
    fn validate_config(&self, config: &Value) -> Result<(), ResourceError> {
        schema::validate_config(&self.arguments(), &self.attributes(), config)
            .map_err(|problems| ResourceError::decode(problems.join("; ")))
    }
}
