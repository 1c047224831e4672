//! Web PubSub custom certificate bound to a certificate stored in Key Vault.

use std::future::Future;

use async_trait::async_trait;
use certbind_client::{CustomCertificate, DynCustomCertificatesClient, DynKeyVaultLocator};
use certbind_core::{
    CERTIFICATES, CustomCertificateId, KeyVaultId, NestedItemId, validate_custom_certificate_id,
    validate_nested_item_id, validate_nested_item_id_with_optional_version,
    validate_web_pubsub_id,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{Lifecycle, ResourceConfig, Timeouts};
use crate::error::{ResourceError, Result};
use crate::model::{
    Binding, BindingConfig, NAME, PARENT_SERVICE_ID, SECRET_REFERENCE_ID, SECRET_VERSION,
};
use crate::resource::{ReadOutcome, Resource};
use crate::schema::{FieldSchema, Schema, any_of, string_is_not_empty};

pub const RESOURCE_TYPE: &str = "azurerm_web_pubsub_custom_certificate";

fn web_pubsub_id(value: &str) -> std::result::Result<(), String> {
    validate_web_pubsub_id(value).map_err(|e| e.to_string())
}

fn nested_item_id(value: &str) -> std::result::Result<(), String> {
    validate_nested_item_id(value).map_err(|e| e.to_string())
}

fn nested_item_id_with_optional_version(value: &str) -> std::result::Result<(), String> {
    validate_nested_item_id_with_optional_version(value).map_err(|e| e.to_string())
}

fn secret_reference_id(value: &str) -> std::result::Result<(), String> {
    any_of(value, &[nested_item_id, nested_item_id_with_optional_version])
}

fn parse_resource_id(id: &str) -> Result<CustomCertificateId> {
    CustomCertificateId::parse(id).map_err(|e| ResourceError::parse("id", e))
}

/// Reconciles a Web PubSub custom certificate with its Key Vault source.
///
/// Holds no state of its own beyond shared client handles, so concurrent
/// calls for different identifiers are independent.
#[derive(Clone)]
pub struct CertificateBindingResource {
    client: DynCustomCertificatesClient,
    key_vaults: DynKeyVaultLocator,
    timeouts: Timeouts,
}

impl CertificateBindingResource {
    pub fn new(client: DynCustomCertificatesClient, key_vaults: DynKeyVaultLocator) -> Self {
        Self {
            client,
            key_vaults,
            timeouts: Timeouts::default(),
        }
    }

    pub fn from_config(
        client: DynCustomCertificatesClient,
        key_vaults: DynKeyVaultLocator,
        config: &ResourceConfig,
    ) -> Self {
        Self::new(client, key_vaults).with_timeouts(config.timeouts())
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    async fn within<T, F>(&self, operation: Lifecycle, id: &CustomCertificateId, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let limit = self.timeouts.for_operation(operation);
        tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| ResourceError::Timeout {
                operation,
                id: id.clone(),
                timeout: limit,
            })?
    }

    async fn create_remote(&self, id: &CustomCertificateId, config: &BindingConfig) -> Result<()> {
        match self.client.get(id).await {
            Ok(_) => {
                return Err(ResourceError::RequiresImport {
                    resource_type: RESOURCE_TYPE,
                    id: id.clone(),
                });
            }
            Err(e) if e.is_not_found() => {}
            Err(source) => {
                return Err(ResourceError::Lookup {
                    id: id.clone(),
                    source,
                });
            }
        }

        let secret = &config.secret_reference_id;
        let certificate = CustomCertificate::new(
            &secret.key_vault_base_url,
            &secret.name,
            secret.version().map(str::to_string),
        );

        debug!(id = %id.id(), backend = self.client.backend_name(), "submitting custom certificate");
        self.client
            .create_or_update_then_poll(id, &certificate)
            .await
            .map_err(|source| ResourceError::Create {
                id: id.clone(),
                source,
            })
    }

    async fn read_remote(&self, id: &CustomCertificateId) -> Result<ReadOutcome<Binding>> {
        let response = match self.client.get(id).await {
            Ok(response) => response,
            Err(e) if e.is_not_found() => {
                warn!(id = %id.id(), "custom certificate no longer exists, removing from state");
                return Ok(ReadOutcome::Gone);
            }
            Err(source) => {
                return Err(ResourceError::Retrieve {
                    id: id.clone(),
                    source,
                });
            }
        };

        let model = response
            .model
            .ok_or_else(|| ResourceError::MissingModel { id: id.clone() })?;
        let properties = model.properties;
        let vault_base_uri = properties.key_vault_base_uri;

        let raw_vault_id = self
            .key_vaults
            .key_vault_id_from_base_url(&vault_base_uri)
            .await
            .map_err(|e| ResourceError::resolution(id, &vault_base_uri, e))?
            .ok_or_else(|| {
                ResourceError::resolution(id, &vault_base_uri, "no Key Vault serves this base uri")
            })?;
        let vault_id = KeyVaultId::parse(&raw_vault_id)
            .map_err(|e| ResourceError::resolution(id, &vault_base_uri, e))?;
        debug!(id = %id.id(), vault = %vault_id.id(), "resolved Key Vault");

        let version = properties.key_vault_secret_version.unwrap_or_default();
        let secret = NestedItemId::new(
            &vault_base_uri,
            CERTIFICATES,
            properties.key_vault_secret_name,
            version.clone(),
        )
        .map_err(|e| ResourceError::parse("properties.keyVaultBaseUri", e))?;

        Ok(ReadOutcome::Present(Binding {
            name: id.custom_certificate_name.clone(),
            parent_service_id: id.web_pubsub_id().id(),
            secret_reference_id: secret.id(),
            secret_version: version,
        }))
    }
}

#[async_trait]
impl Resource for CertificateBindingResource {
    type Model = Binding;

    fn resource_type(&self) -> &'static str {
        RESOURCE_TYPE
    }

    fn arguments(&self) -> Schema {
        let mut schema = Schema::new();
        schema.insert(
            NAME,
            FieldSchema::required_string()
                .force_new()
                .with_validation(string_is_not_empty),
        );
        schema.insert(
            PARENT_SERVICE_ID,
            FieldSchema::required_string()
                .force_new()
                .with_validation(web_pubsub_id),
        );
        schema.insert(
            SECRET_REFERENCE_ID,
            FieldSchema::required_string()
                .force_new()
                .with_validation(secret_reference_id),
        );
        schema
    }

    fn attributes(&self) -> Schema {
        let mut schema = Schema::new();
        schema.insert(SECRET_VERSION, FieldSchema::computed_string());
        schema
    }

    fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    async fn create(&self, config: &Value) -> Result<String> {
        let config = BindingConfig::decode(config)?;
        let id = config.parent_service_id.custom_certificate(&config.name);
        info!(id = %id.id(), "creating custom certificate");

        self.within(Lifecycle::Create, &id, self.create_remote(&id, &config))
            .await?;

        info!(id = %id.id(), "created custom certificate");
        Ok(id.id())
    }

    async fn read(&self, id: &str) -> Result<ReadOutcome<Binding>> {
        let id = parse_resource_id(id)?;
        self.within(Lifecycle::Read, &id, self.read_remote(&id)).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = parse_resource_id(id)?;
        info!(id = %id.id(), "deleting custom certificate");

        let delete = async {
            self.client
                .delete(&id)
                .await
                .map_err(|source| ResourceError::Delete {
                    id: id.clone(),
                    source,
                })
        };
        self.within(Lifecycle::Delete, &id, delete).await
    }

    fn validate_id(&self, id: &str) -> Result<()> {
        validate_custom_certificate_id(id).map_err(|e| ResourceError::parse("id", e))
    }
}
