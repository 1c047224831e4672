use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use certbind_client::{
    ApiError, ApiResponse, CustomCertificate, CustomCertificatesClient, ProvisioningState,
};
use certbind_core::CustomCertificateId;
use papaya::HashMap as PapayaHashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::options::{ClientOptions, MissingDelete};

const CUSTOM_CERTIFICATE_TYPE: &str = "Microsoft.SignalRService/WebPubSub/customCertificates";

/// Remote operations tracked by [`InMemoryWebPubSub`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    CreateOrUpdate,
    Delete,
}

/// ARM ids compare case-insensitively.
fn storage_key(id: &CustomCertificateId) -> String {
    id.id().to_ascii_lowercase()
}

#[derive(Debug, Default)]
struct CallCounters {
    get: AtomicU64,
    create_or_update: AtomicU64,
    delete: AtomicU64,
}

impl CallCounters {
    fn counter(&self, op: Operation) -> &AtomicU64 {
        match op {
            Operation::Get => &self.get,
            Operation::CreateOrUpdate => &self.create_or_update,
            Operation::Delete => &self.delete,
        }
    }
}

/// In-memory Web PubSub control plane using papaya lock-free HashMap.
///
/// This client provides:
/// - Custom certificate storage keyed by resource id
/// - Long-running create-or-update simulated through provisioning states
/// - Per-operation call counters
/// - One-shot fault injection per operation
#[derive(Debug)]
pub struct InMemoryWebPubSub {
    certificates: Arc<PapayaHashMap<String, CustomCertificate>>,
    faults: PapayaHashMap<Operation, ApiError>,
    provisioning_failure: Mutex<Option<String>>,
    empty_next_get: AtomicBool,
    calls: CallCounters,
    options: ClientOptions,
}

impl Default for InMemoryWebPubSub {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryWebPubSub {
    /// Creates a new control plane with default options.
    pub fn new() -> Self {
        Self::with_options(ClientOptions::default())
    }

    /// Creates a new control plane with the given options.
    pub fn with_options(options: ClientOptions) -> Self {
        Self {
            certificates: Arc::new(PapayaHashMap::new()),
            faults: PapayaHashMap::new(),
            provisioning_failure: Mutex::new(None),
            empty_next_get: AtomicBool::new(false),
            calls: CallCounters::default(),
            options,
        }
    }

    /// Stores a certificate directly, bypassing the API.
    pub fn seed(&self, id: &CustomCertificateId, mut certificate: CustomCertificate) {
        decorate(id, &mut certificate, ProvisioningState::Succeeded);
        self.certificates.pin().insert(storage_key(id), certificate);
    }

    /// Returns the stored certificate, if any.
    pub fn certificate(&self, id: &CustomCertificateId) -> Option<CustomCertificate> {
        self.certificates.pin().get(&storage_key(id)).cloned()
    }

    /// Removes a certificate directly, bypassing the API.
    pub fn evict(&self, id: &CustomCertificateId) -> Option<CustomCertificate> {
        self.certificates.pin().remove(&storage_key(id)).cloned()
    }

    /// Number of stored certificates.
    pub fn len(&self) -> usize {
        self.certificates.pin().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of calls made to `op` so far.
    pub fn calls(&self, op: Operation) -> u64 {
        self.calls.counter(op).load(Ordering::SeqCst)
    }

    /// Makes the next call to `op` fail with `error` before it has any effect.
    pub fn fail_next(&self, op: Operation, error: ApiError) {
        self.faults.pin().insert(op, error);
    }

    /// Makes the next `get` of an existing certificate succeed without a payload.
    pub fn respond_empty_next_get(&self) {
        self.empty_next_get.store(true, Ordering::SeqCst);
    }

    /// Makes the next create-or-update accept the request and then finish in
    /// `Failed` state with `message`.
    pub async fn fail_next_provisioning(&self, message: impl Into<String>) {
        *self.provisioning_failure.lock().await = Some(message.into());
    }

    async fn record(&self, op: Operation) -> Result<(), ApiError> {
        self.calls.counter(op).fetch_add(1, Ordering::SeqCst);
        if !self.options.latency.is_zero() {
            tokio::time::sleep(self.options.latency).await;
        }
        match self.faults.pin().remove(&op).cloned() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn set_state(&self, key: &str, state: ProvisioningState) {
        let guard = self.certificates.pin();
        if let Some(existing) = guard.get(key) {
            let mut updated = existing.clone();
            updated.properties.provisioning_state = Some(state);
            guard.insert(key.to_string(), updated);
        }
    }

    async fn poll_until_terminal(
        &self,
        id: &CustomCertificateId,
        key: &str,
    ) -> Result<(), ApiError> {
        for attempt in 0..self.options.polls_until_complete {
            debug!(id = %id.id(), attempt, "polling custom certificate operation");
            tokio::time::sleep(self.options.poll_interval).await;
        }

        match self.provisioning_failure.lock().await.take() {
            Some(message) => {
                self.set_state(key, ProvisioningState::Failed);
                Err(ApiError::operation_failed(
                    id.id(),
                    ProvisioningState::Failed.as_str(),
                    message,
                ))
            }
            None => {
                self.set_state(key, ProvisioningState::Succeeded);
                Ok(())
            }
        }
    }
}

fn decorate(id: &CustomCertificateId, certificate: &mut CustomCertificate, state: ProvisioningState) {
    certificate.id = Some(id.id());
    certificate.name = Some(id.custom_certificate_name.clone());
    certificate.resource_type = Some(CUSTOM_CERTIFICATE_TYPE.to_string());
    certificate.properties.provisioning_state = Some(state);
}

#[async_trait]
impl CustomCertificatesClient for InMemoryWebPubSub {
    async fn get(
        &self,
        id: &CustomCertificateId,
    ) -> Result<ApiResponse<CustomCertificate>, ApiError> {
        self.record(Operation::Get).await?;
        let found = self.certificates.pin().get(&storage_key(id)).cloned();
        match found {
            Some(_) if self.empty_next_get.swap(false, Ordering::SeqCst) => {
                Ok(ApiResponse::empty(200))
            }
            Some(certificate) => Ok(ApiResponse::ok(certificate)),
            None => Err(ApiError::not_found(id.id())),
        }
    }

    async fn create_or_update_then_poll(
        &self,
        id: &CustomCertificateId,
        certificate: &CustomCertificate,
    ) -> Result<(), ApiError> {
        self.record(Operation::CreateOrUpdate).await?;

        let properties = &certificate.properties;
        if properties.key_vault_base_uri.is_empty() {
            return Err(ApiError::bad_request("properties.keyVaultBaseUri is required"));
        }
        if properties.key_vault_secret_name.is_empty() {
            return Err(ApiError::bad_request(
                "properties.keyVaultSecretName is required",
            ));
        }

        let key = storage_key(id);
        let mut stored = certificate.clone();
        decorate(id, &mut stored, ProvisioningState::Updating);
        self.certificates.pin().insert(key.clone(), stored);
        debug!(id = %id.id(), "accepted custom certificate create-or-update");

        self.poll_until_terminal(id, &key).await
    }

    async fn delete(&self, id: &CustomCertificateId) -> Result<(), ApiError> {
        self.record(Operation::Delete).await?;
        let removed = self.certificates.pin().remove(&storage_key(id)).is_some();
        if !removed && self.options.missing_delete == MissingDelete::NotFound {
            return Err(ApiError::not_found(id.id()));
        }
        debug!(id = %id.id(), removed, "deleted custom certificate");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "in-memory"
    }
}
