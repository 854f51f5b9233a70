//! Vault module — the encrypted named-secret store.
//!
//! This module provides:
//! - `VaultRecord` and `SecretEntry` value types (`record`)
//! - The `Vault` handle with init, CRUD, and master key rotation (`store`)

pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use record::{SecretEntry, VaultRecord, MAIN_PROVISIONING_KEY_NAME};
pub use store::Vault;
