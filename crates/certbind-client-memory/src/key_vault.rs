use async_trait::async_trait;
use certbind_client::{ApiError, KeyVaultLocator};
use certbind_core::KeyVaultId;
use papaya::HashMap as PapayaHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

/// Normalizes a vault base URL to `scheme://host/` in lower case.
fn normalize_base_url(base_url: &str) -> Option<String> {
    let url = Url::parse(base_url).ok()?;
    let host = url.host_str()?;
    Some(format!("{}://{}/", url.scheme(), host.to_ascii_lowercase()))
}

/// In-memory registry of Key Vaults, resolving data-plane URLs to ARM ids.
#[derive(Debug, Default)]
pub struct InMemoryKeyVaults {
    vaults: PapayaHashMap<String, KeyVaultId>,
    fault: Mutex<Option<ApiError>>,
    lookups: AtomicU64,
}

impl InMemoryKeyVaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` as the vault serving `base_url`.
    pub fn register(&self, base_url: &str, id: KeyVaultId) -> Result<(), ApiError> {
        let key = normalize_base_url(base_url).ok_or_else(|| {
            ApiError::bad_request(format!("invalid Key Vault base url {base_url:?}"))
        })?;
        self.vaults.pin().insert(key, id);
        Ok(())
    }

    /// Makes the next lookup fail with `error`.
    pub async fn fail_next(&self, error: ApiError) {
        *self.fault.lock().await = Some(error);
    }

    /// Number of lookups performed so far.
    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyVaultLocator for InMemoryKeyVaults {
    async fn key_vault_id_from_base_url(
        &self,
        base_url: &str,
    ) -> Result<Option<String>, ApiError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fault.lock().await.take() {
            return Err(err);
        }

        let Some(key) = normalize_base_url(base_url) else {
            return Err(ApiError::bad_request(format!(
                "invalid Key Vault base url {base_url:?}"
            )));
        };
        let found = self.vaults.pin().get(&key).map(KeyVaultId::id);
        debug!(base_url, found = found.is_some(), "resolved Key Vault base url");
        Ok(found)
    }
}
