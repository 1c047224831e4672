//! Key Vault identifiers.
//!
//! Two shapes are involved when binding a certificate from Key Vault:
//!
//! - The ARM resource identifier of the vault itself
//!   (`/subscriptions/{s}/resourceGroups/{rg}/providers/Microsoft.KeyVault/vaults/{name}`).
//! - The data-plane URL of an item inside the vault, called a nested item
//!   (`https://{vault}.vault.azure.net/{kind}/{name}[/{version}]`).
//!
//! A nested item without a version refers to the latest version of the item.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{IdError, Result};
use crate::resource_id::{Segment, format_segments, parse_segments};

/// Nested item kind used for certificates.
pub const CERTIFICATES: &str = "certificates";

const KEY_VAULT_LAYOUT: &[Segment] = &[
    Segment::Static("subscriptions"),
    Segment::Value("subscriptionId"),
    Segment::Static("resourceGroups"),
    Segment::Value("resourceGroupName"),
    Segment::Static("providers"),
    Segment::Static("Microsoft.KeyVault"),
    Segment::Static("vaults"),
    Segment::Value("vaultName"),
];

/// ARM identifier of a Key Vault.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyVaultId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub vault_name: String,
}

impl KeyVaultId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        vault_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            vault_name: vault_name.into(),
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let values = parse_segments("Key Vault", input, KEY_VAULT_LAYOUT)?;
        let [subscription_id, resource_group_name, vault_name]: [String; 3] = values
            .try_into()
            .map_err(|_| IdError::Empty { kind: "Key Vault" })?;
        Ok(Self {
            subscription_id,
            resource_group_name,
            vault_name,
        })
    }

    pub fn id(&self) -> String {
        format_segments(
            KEY_VAULT_LAYOUT,
            &[
                &self.subscription_id,
                &self.resource_group_name,
                &self.vault_name,
            ],
        )
    }
}

impl fmt::Display for KeyVaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key Vault (Subscription: {:?}", self.subscription_id)?;
        write!(f, " / Resource Group Name: {:?}", self.resource_group_name)?;
        write!(f, " / Vault Name: {:?})", self.vault_name)
    }
}

impl TryFrom<String> for KeyVaultId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<KeyVaultId> for String {
    fn from(value: KeyVaultId) -> Self {
        value.id()
    }
}

/// Authority of `input` as written, without user info.
///
/// `Url` lowercases hosts, which would make a reference read back differently
/// from how it was configured.
fn raw_authority(input: &str) -> Option<&str> {
    let (_, rest) = input.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let authority = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    (!authority.is_empty()).then_some(authority)
}

fn strip_port(authority: &str) -> &str {
    match authority.rfind(':') {
        Some(i) if !authority[i..].contains(']') => &authority[..i],
        _ => authority,
    }
}

/// An item (certificate, secret or key) stored inside a Key Vault.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NestedItemId {
    /// Vault base URL, always ending in `/`.
    pub key_vault_base_url: String,
    pub nested_item_type: String,
    pub name: String,
    /// Empty when the identifier tracks the latest version.
    pub version: String,
}

impl NestedItemId {
    /// Builds a nested item identifier from its parts.
    ///
    /// The base URL is normalized to `{scheme}://{host}/` with the host kept as
    /// written; an explicit port is dropped since some Azure APIs report the
    /// vault URL as `host:443`.
    pub fn new(
        key_vault_base_url: &str,
        nested_item_type: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self> {
        if key_vault_base_url.trim().is_empty() {
            return Err(IdError::invalid_nested_item(
                key_vault_base_url,
                "vault base URL is empty",
            ));
        }
        let url = Url::parse(key_vault_base_url).map_err(|source| IdError::Url {
            input: key_vault_base_url.to_string(),
            source,
        })?;
        let host = url
            .host_str()
            .and(raw_authority(key_vault_base_url))
            .map(strip_port)
            .ok_or_else(|| {
                IdError::invalid_nested_item(key_vault_base_url, "vault base URL has no host")
            })?;

        Ok(Self {
            key_vault_base_url: format!("{}://{}/", url.scheme(), host),
            nested_item_type: nested_item_type.into(),
            name: name.into(),
            version: version.into(),
        })
    }

    /// Parses an identifier that must carry a version.
    pub fn parse_versioned(input: &str) -> Result<Self> {
        let id = Self::parse_optionally_versioned(input)?;
        if id.version.is_empty() {
            return Err(IdError::invalid_nested_item(
                input,
                "a version is required but none was specified",
            ));
        }
        Ok(id)
    }

    /// Parses an identifier that must not carry a version.
    pub fn parse_versionless(input: &str) -> Result<Self> {
        let id = Self::parse_optionally_versioned(input)?;
        if !id.version.is_empty() {
            return Err(IdError::invalid_nested_item(
                input,
                format!("expected a versionless ID but got version {:?}", id.version),
            ));
        }
        Ok(id)
    }

    /// Parses an identifier with or without a trailing version segment.
    pub fn parse_optionally_versioned(input: &str) -> Result<Self> {
        let url = Url::parse(input).map_err(|source| IdError::Url {
            input: input.to_string(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(IdError::invalid_nested_item(input, "not a hierarchical URL"));
        }
        let authority = url
            .host_str()
            .and(raw_authority(input))
            .ok_or_else(|| IdError::invalid_nested_item(input, "URL has no host"))?;

        let path = url.path().trim_start_matches('/').trim_end_matches('/');
        let components: Vec<&str> = path.split('/').collect();
        if components.len() != 2 && components.len() != 3 {
            return Err(IdError::invalid_nested_item(
                input,
                format!(
                    "expected 2 or 3 path segments, got {}",
                    if path.is_empty() { 0 } else { components.len() }
                ),
            ));
        }
        if components.iter().any(|c| c.is_empty()) {
            return Err(IdError::invalid_nested_item(input, "path segments must not be empty"));
        }

        Ok(Self {
            key_vault_base_url: format!("{}://{}/", url.scheme(), authority),
            nested_item_type: components[0].to_string(),
            name: components[1].to_string(),
            version: components.get(2).map(|v| v.to_string()).unwrap_or_default(),
        })
    }

    /// Version if the identifier pins one.
    pub fn version(&self) -> Option<&str> {
        (!self.version.is_empty()).then_some(self.version.as_str())
    }

    /// The identifier without its version.
    pub fn versionless_id(&self) -> String {
        format!(
            "{}/{}/{}",
            self.key_vault_base_url.trim_end_matches('/'),
            self.nested_item_type,
            self.name
        )
    }

    pub fn id(&self) -> String {
        match self.version() {
            Some(version) => format!("{}/{}", self.versionless_id(), version),
            None => self.versionless_id(),
        }
    }
}

impl fmt::Display for NestedItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl FromStr for NestedItemId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_optionally_versioned(s)
    }
}

impl TryFrom<String> for NestedItemId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse_optionally_versioned(&value)
    }
}

impl From<NestedItemId> for String {
    fn from(value: NestedItemId) -> Self {
        value.id()
    }
}

/// Accepts a nested item identifier with a version.
pub fn validate_nested_item_id(input: &str) -> Result<()> {
    NestedItemId::parse_versioned(input).map(|_| ())
}

/// Accepts a nested item identifier with or without a version.
pub fn validate_nested_item_id_with_optional_version(input: &str) -> Result<()> {
    NestedItemId::parse_optionally_versioned(input).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_versioned_nested_item() {
        let id = NestedItemId::parse_versioned(
            "https://vault1.vault.azure.net/certificates/mycert/abc123",
        )
        .unwrap();
        assert_eq!(id.key_vault_base_url, "https://vault1.vault.azure.net/");
        assert_eq!(id.nested_item_type, "certificates");
        assert_eq!(id.name, "mycert");
        assert_eq!(id.version(), Some("abc123"));
        assert_eq!(
            id.id(),
            "https://vault1.vault.azure.net/certificates/mycert/abc123"
        );
    }

    #[test]
    fn test_parse_versionless_nested_item() {
        let input = "https://vault1.vault.azure.net/certificates/mycert";
        let id = NestedItemId::parse_optionally_versioned(input).unwrap();
        assert_eq!(id.version(), None);
        assert_eq!(id.id(), input);

        assert!(NestedItemId::parse_versioned(input).is_err());
        assert!(NestedItemId::parse_versionless(input).is_ok());
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let id =
            NestedItemId::parse_optionally_versioned("https://v.vault.azure.net/secrets/s/").unwrap();
        assert_eq!(id.id(), "https://v.vault.azure.net/secrets/s");
    }

    #[test]
    fn test_reformat_preserves_version_presence() {
        let inputs = [
            "https://vault1.vault.azure.net/certificates/mycert/abc123",
            "https://vault1.vault.azure.net/certificates/mycert",
            "https://other.vault.azure.net/secrets/tls/0f1e2d3c4b5a69788796a5b4c3d2e1f0",
            "https://other.vault.azure.net/keys/signing",
        ];
        for input in inputs {
            let parsed = NestedItemId::parse_optionally_versioned(input).unwrap();
            let rebuilt = NestedItemId::new(
                &parsed.key_vault_base_url,
                parsed.nested_item_type.clone(),
                parsed.name.clone(),
                parsed.version.clone(),
            )
            .unwrap();
            assert_eq!(rebuilt.id(), input);
        }
    }

    #[test]
    fn test_rejects_wrong_segment_count() {
        assert!(NestedItemId::parse_optionally_versioned("https://v.vault.azure.net/").is_err());
        assert!(
            NestedItemId::parse_optionally_versioned("https://v.vault.azure.net/certificates")
                .is_err()
        );
        assert!(
            NestedItemId::parse_optionally_versioned(
                "https://v.vault.azure.net/certificates/a/b/c"
            )
            .is_err()
        );
    }

    #[test]
    fn test_rejects_non_url() {
        let err = NestedItemId::parse_optionally_versioned("certificates/mycert").unwrap_err();
        assert!(matches!(err, IdError::Url { .. }));
    }

    #[test]
    fn test_new_strips_port() {
        let id = NestedItemId::new("https://vault1.vault.azure.net:443/", CERTIFICATES, "c", "")
            .unwrap();
        assert_eq!(id.key_vault_base_url, "https://vault1.vault.azure.net/");

        let id = NestedItemId::new("https://vault1.vault.azure.net:8443", CERTIFICATES, "c", "v")
            .unwrap();
        assert_eq!(id.id(), "https://vault1.vault.azure.net/certificates/c/v");
    }

    #[test]
    fn test_host_case_is_preserved() {
        let input = "https://MyVault.vault.azure.net/certificates/mycert/abc123";
        let parsed = NestedItemId::parse_optionally_versioned(input).unwrap();
        assert_eq!(parsed.key_vault_base_url, "https://MyVault.vault.azure.net/");
        assert_eq!(parsed.id(), input);

        let rebuilt = NestedItemId::new(
            "https://MyVault.vault.azure.net:443/",
            CERTIFICATES,
            "mycert",
            "abc123",
        )
        .unwrap();
        assert_eq!(rebuilt.id(), input);
    }

    #[test]
    fn test_raw_authority() {
        assert_eq!(raw_authority("https://A.b/x"), Some("A.b"));
        assert_eq!(raw_authority("https://user@A.b:8443?q"), Some("A.b:8443"));
        assert_eq!(raw_authority("certificates/mycert"), None);
        assert_eq!(strip_port("A.b:443"), "A.b");
        assert_eq!(strip_port("[::1]"), "[::1]");
        assert_eq!(strip_port("[::1]:443"), "[::1]");
    }

    #[test]
    fn test_new_rejects_empty_base_url() {
        assert!(NestedItemId::new("", CERTIFICATES, "c", "").is_err());
    }

    #[test]
    fn test_validators() {
        assert!(validate_nested_item_id("https://v.vault.azure.net/certificates/c/1").is_ok());
        assert!(validate_nested_item_id("https://v.vault.azure.net/certificates/c").is_err());
        assert!(
            validate_nested_item_id_with_optional_version(
                "https://v.vault.azure.net/certificates/c"
            )
            .is_ok()
        );
    }

    #[test]
    fn test_parse_key_vault_id() {
        let input = "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.KeyVault/vaults/vault1";
        let id = KeyVaultId::parse(input).unwrap();
        assert_eq!(id.vault_name, "vault1");
        assert_eq!(id.id(), input);
        assert!(KeyVaultId::parse("/subscriptions/sub1/resourceGroups/rg1").is_err());
    }
}
