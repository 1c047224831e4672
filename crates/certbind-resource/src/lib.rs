//! Declarative resource binding a Web PubSub custom certificate to a
//! certificate stored in Key Vault.
//!
//! The resource exposes create, read and delete plus an identifier validator
//! and schema descriptors. Remote access goes through the traits in
//! `certbind-client`, injected at construction:
//!
//! ```ignore
//! use std::sync::Arc;
//! use certbind_resource::{CertificateBindingResource, Resource};
//!
//! let resource = CertificateBindingResource::new(Arc::new(web_pubsub), Arc::new(key_vaults));
//! let id = resource.create(&config).await?;
//! let state = resource.read(&id).await?;
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod observability;
pub mod resource;
pub mod schema;
pub mod web_pubsub_custom_certificate;

pub use config::{Lifecycle, ResourceConfig, Timeouts};
pub use error::{ErrorCategory, ResourceError, Result};
pub use model::{Binding, BindingConfig};
pub use resource::{ReadOutcome, Resource};
pub use schema::{FieldSchema, FieldType, Schema};
pub use web_pubsub_custom_certificate::{CertificateBindingResource, RESOURCE_TYPE};
