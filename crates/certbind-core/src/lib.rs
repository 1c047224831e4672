//! Identifier types shared by the certbind crates.
//!
//! Every identifier parses from and formats to its canonical string form, and
//! the two directions round-trip.

pub mod error;
pub mod key_vault;
mod resource_id;
pub mod web_pubsub;

pub use error::{IdError, Result};
pub use key_vault::{
    CERTIFICATES, KeyVaultId, NestedItemId, validate_nested_item_id,
    validate_nested_item_id_with_optional_version,
};
pub use web_pubsub::{
    CustomCertificateId, WebPubSubId, validate_custom_certificate_id, validate_web_pubsub_id,
};
