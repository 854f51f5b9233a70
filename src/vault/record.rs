//! The decrypted vault contents as a pure value.
//!
//! A `VaultRecord` is a mapping from secret name to `SecretEntry`.
//! It is what gets serialized to JSON and encrypted as one unit — the
//! vault file carries no per-entry ciphertext.  Mutating methods
//! consume the record and return a new one, so the only thing that
//! ever touches disk is the store's `save`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Reserved name for the main provisioning secret.
///
/// Excluded from listings and protected from removal.  Chosen so it
/// cannot plausibly collide with a user-picked key name.
pub const MAIN_PROVISIONING_KEY_NAME: &str = "_MAIN_PROVISIONING_KEY_";

/// A single secret stored in the vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretEntry {
    /// The secret payload (an API key, token, etc).
    pub value: String,

    /// Opaque identifier assigned by the external provisioning service.
    /// Empty for secrets that were never provisioned remotely.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
}

/// The logical contents of the vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultRecord {
    secrets: HashMap<String, SecretEntry>,
}

impl VaultRecord {
    /// Build the record a freshly initialized vault starts with:
    /// only the reserved provisioning entry.
    pub fn initial(provisioning_secret: &str) -> Self {
        let mut secrets = HashMap::new();
        secrets.insert(
            MAIN_PROVISIONING_KEY_NAME.to_string(),
            SecretEntry {
                value: provisioning_secret.to_string(),
                id: String::new(),
            },
        );
        Self { secrets }
    }

    /// Look up an entry by name (including the reserved name).
    pub fn get(&self, name: &str) -> Option<&SecretEntry> {
        self.secrets.get(name)
    }

    /// Returns `true` if an entry with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.secrets.contains_key(name)
    }

    /// Return a new record with `name` set to `entry` (insert or replace).
    pub fn with_secret(mut self, name: &str, entry: SecretEntry) -> Self {
        self.secrets.insert(name.to_string(), entry);
        self
    }

    /// Return a new record with `name` removed.
    pub fn without_secret(mut self, name: &str) -> Self {
        self.secrets.remove(name);
        self
    }

    /// All secret names except the reserved provisioning name.
    ///
    /// No ordering guarantee — the underlying map is unordered.
    pub fn names(&self) -> Vec<String> {
        self.secrets
            .keys()
            .filter(|name| name.as_str() != MAIN_PROVISIONING_KEY_NAME)
            .cloned()
            .collect()
    }

    /// `(name, id)` pairs for every non-reserved entry, for display.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.secrets
            .iter()
            .filter(|(name, _)| name.as_str() != MAIN_PROVISIONING_KEY_NAME)
            .map(|(name, entry)| (name.clone(), entry.id.clone()))
            .collect()
    }
}
