//! Client traits for the control-plane APIs.
//!
//! Retry, backoff and long-running operation polling are the responsibility
//! of the implementations; callers issue each request exactly once.

use async_trait::async_trait;
use certbind_core::CustomCertificateId;

use crate::error::ApiError;
use crate::types::{ApiResponse, CustomCertificate};

/// Custom certificate operations of the Web PubSub control plane.
///
/// Implementations must be thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```ignore
/// use certbind_client::{ApiError, CustomCertificatesClient};
///
/// async fn exists(client: &dyn CustomCertificatesClient, id: &CustomCertificateId) -> Result<bool, ApiError> {
///     match client.get(id).await {
///         Ok(_) => Ok(true),
///         Err(e) if e.is_not_found() => Ok(false),
///         Err(e) => Err(e),
///     }
/// }
/// ```
#[async_trait]
pub trait CustomCertificatesClient: Send + Sync {
    /// Fetches a custom certificate.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no certificate exists at `id`.
    /// A successful response may still carry no payload.
    async fn get(
        &self,
        id: &CustomCertificateId,
    ) -> Result<ApiResponse<CustomCertificate>, ApiError>;

    /// Creates or replaces a custom certificate and waits for the resulting
    /// long-running operation to reach a terminal state.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is rejected or if the operation
    /// finishes in a state other than `Succeeded`.
    async fn create_or_update_then_poll(
        &self,
        id: &CustomCertificateId,
        certificate: &CustomCertificate,
    ) -> Result<(), ApiError>;

    /// Deletes a custom certificate.
    ///
    /// Whether deleting an absent certificate succeeds is defined by the
    /// service, not by callers.
    async fn delete(&self, id: &CustomCertificateId) -> Result<(), ApiError>;

    /// Returns the name of this client for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

/// Resolves Key Vault data-plane URLs to ARM resource identifiers.
#[async_trait]
pub trait KeyVaultLocator: Send + Sync {
    /// Looks up the ARM resource id of the vault serving `base_url`.
    ///
    /// Returns `None` if no vault visible to the caller serves that URL.
    async fn key_vault_id_from_base_url(&self, base_url: &str)
    -> Result<Option<String>, ApiError>;
}
