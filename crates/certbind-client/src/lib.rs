//! # certbind-client
//!
//! Contracts for the remote APIs a certificate binding talks to.
//!
//! This crate defines the traits and wire types only. Implementations are
//! provided by separate crates (see `certbind-client-memory`).
//!
//! ## Overview
//!
//! - [`CustomCertificatesClient`]: get, create-or-update-and-poll and delete
//!   for Web PubSub custom certificates.
//! - [`KeyVaultLocator`]: maps a vault base URL back to the vault's ARM id.

mod error;
mod traits;
mod types;

pub use error::{ApiError, ErrorCategory};
pub use traits::{CustomCertificatesClient, KeyVaultLocator};
pub use types::{ApiResponse, CustomCertificate, CustomCertificateProperties, ProvisioningState};

/// Type alias for a client result.
pub type ApiResult<T> = Result<T, ApiError>;

/// Type alias for a shareable custom certificates client.
pub type DynCustomCertificatesClient = std::sync::Arc<dyn CustomCertificatesClient>;

/// Type alias for a shareable Key Vault locator.
pub type DynKeyVaultLocator = std::sync::Arc<dyn KeyVaultLocator>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use certbind_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ApiError, ErrorCategory};
    pub use crate::traits::{CustomCertificatesClient, KeyVaultLocator};
    pub use crate::types::{
        ApiResponse, CustomCertificate, CustomCertificateProperties, ProvisioningState,
    };
    pub use crate::{ApiResult, DynCustomCertificatesClient, DynKeyVaultLocator};
}
