//! In-memory control planes for certbind.
//!
//! This crate implements the `certbind-client` traits on top of papaya
//! lock-free HashMaps. It stands in for the Azure control plane in tests and
//! local runs.
//!
//! # Example
//!
//! ```ignore
//! use certbind_client_memory::{InMemoryKeyVaults, InMemoryWebPubSub};
//!
//! let web_pubsub = InMemoryWebPubSub::new();
//! let vaults = InMemoryKeyVaults::new();
//! vaults.register("https://vault1.vault.azure.net/", vault_id);
//! ```

mod key_vault;
pub mod options;
mod web_pubsub;

pub use certbind_client::{CustomCertificatesClient, KeyVaultLocator};
pub use key_vault::InMemoryKeyVaults;
pub use options::{ClientOptions, MissingDelete};
pub use web_pubsub::{InMemoryWebPubSub, Operation};
