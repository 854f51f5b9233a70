//! High-level vault operations used by CLI commands.
//!
//! `Vault` is an explicit handle holding the vault's file paths; every
//! operation is a full load → mutate → save cycle against disk, so each
//! call sees the file exactly as the last successful save left it and
//! no decrypted record outlives a single call.
//!
//! Persistence is overwrite-in-place, isolated behind `persist` — there
//! is no temp-file-and-rename, so a crash mid-write can corrupt the
//! vault file.  Single active process assumed; no file locking.

use std::fs;
use std::path::{Path, PathBuf};

use zeroize::Zeroize;

use crate::crypto::{cipher, MasterKey};
use crate::errors::{ApiVaultError, Result};

use super::record::{SecretEntry, VaultRecord, MAIN_PROVISIONING_KEY_NAME};

/// Name of the encrypted vault file inside the vault directory.
pub const VAULT_FILE_NAME: &str = "secrets.vault";

/// Name of the master key file inside the vault directory.
pub const KEY_FILE_NAME: &str = "master.key";

/// The vault handle.  Holds paths only — no cached record, no key.
pub struct Vault {
    vault_dir: PathBuf,
    vault_file: PathBuf,
    key_file: PathBuf,
}

impl Vault {
    /// Create a handle for the vault living in `vault_dir`.
    ///
    /// Does not touch the filesystem; use `init` to create a new vault
    /// or any operation to work with an existing one.
    pub fn new(vault_dir: PathBuf) -> Self {
        let vault_file = vault_dir.join(VAULT_FILE_NAME);
        let key_file = vault_dir.join(KEY_FILE_NAME);
        Self {
            vault_dir,
            vault_file,
            key_file,
        }
    }

    /// Returns the vault directory path.
    pub fn vault_dir(&self) -> &Path {
        &self.vault_dir
    }

    // ------------------------------------------------------------------
    // Initialization
    // ------------------------------------------------------------------

    /// True once either vault file exists on disk.  Both files count so
    /// a partially failed earlier init is still reported.
    pub fn is_initialized(&self) -> bool {
        self.vault_file.exists() || self.key_file.exists()
    }

    /// Initialize a new vault holding only the provisioning secret.
    ///
    /// Both files are checked independently so a partially failed
    /// earlier init is still caught rather than silently overwritten.
    pub fn init(&self, provisioning_secret: &str) -> Result<()> {
        if self.vault_file.exists() {
            return Err(ApiVaultError::AlreadyInitialized(self.vault_file.clone()));
        }
        if self.key_file.exists() {
            return Err(ApiVaultError::AlreadyInitialized(self.key_file.clone()));
        }

        fs::create_dir_all(&self.vault_dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.vault_dir, fs::Permissions::from_mode(0o700))?;
        }

        let master_key = MasterKey::generate()?;
        master_key.persist(&self.key_file)?;

        let record = VaultRecord::initial(provisioning_secret);
        self.save(&record, &master_key)
    }

    // ------------------------------------------------------------------
    // Load / save primitives
    // ------------------------------------------------------------------

    /// Read the master key and decrypt the vault into a record snapshot.
    fn load(&self) -> Result<(VaultRecord, MasterKey)> {
        let master_key = MasterKey::load(&self.key_file)?;

        if !self.vault_file.exists() {
            return Err(ApiVaultError::VaultNotFound(self.vault_file.clone()));
        }
        let blob = fs::read_to_string(&self.vault_file)?;

        let mut plaintext = cipher::decrypt(master_key.as_bytes(), &blob)?;
        let parsed = serde_json::from_slice::<VaultRecord>(&plaintext);
        plaintext.zeroize();

        let record = parsed
            .map_err(|e| ApiVaultError::InvalidVaultFormat(format!("vault payload: {e}")))?;

        Ok((record, master_key))
    }

    /// Serialize and encrypt `record` under `master_key`, then overwrite
    /// the vault file.  Fresh salt and nonce on every call.
    fn save(&self, record: &VaultRecord, master_key: &MasterKey) -> Result<()> {
        let mut plaintext = serde_json::to_vec(record)
            .map_err(|e| ApiVaultError::SerializationError(format!("vault payload: {e}")))?;

        let blob = cipher::encrypt(master_key.as_bytes(), &plaintext);
        plaintext.zeroize();

        Self::persist(&self.vault_file, blob?.as_bytes())
    }

    /// The single disk-write primitive: overwrite `path` with `bytes`
    /// and restrict permissions to the owner.
    fn persist(path: &Path, bytes: &[u8]) -> Result<()> {
        fs::write(path, bytes)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Secret operations
    // ------------------------------------------------------------------

    /// Add a new secret.  Fails if the name is already taken or reserved.
    ///
    /// Names are opaque — anything except the reserved provisioning
    /// name is accepted.
    pub fn add_secret(&self, name: &str, value: &str, id: &str) -> Result<()> {
        if name == MAIN_PROVISIONING_KEY_NAME {
            return Err(ApiVaultError::ReservedName(name.to_string()));
        }

        let (record, master_key) = self.load()?;

        if record.contains(name) {
            return Err(ApiVaultError::SecretAlreadyExists(name.to_string()));
        }

        let record = record.with_secret(
            name,
            SecretEntry {
                value: value.to_string(),
                id: id.to_string(),
            },
        );

        self.save(&record, &master_key)
    }

    /// Retrieve a secret's plaintext value.
    pub fn get_secret(&self, name: &str) -> Result<String> {
        let (record, _) = self.load()?;
        record
            .get(name)
            .map(|entry| entry.value.clone())
            .ok_or_else(|| ApiVaultError::SecretNotFound(name.to_string()))
    }

    /// Retrieve the external id attached to a secret (may be empty).
    pub fn get_secret_id(&self, name: &str) -> Result<String> {
        let (record, _) = self.load()?;
        record
            .get(name)
            .map(|entry| entry.id.clone())
            .ok_or_else(|| ApiVaultError::SecretNotFound(name.to_string()))
    }

    /// Replace an existing secret's value and id.
    pub fn update_secret(&self, name: &str, value: &str, id: &str) -> Result<()> {
        if name == MAIN_PROVISIONING_KEY_NAME {
            return Err(ApiVaultError::ReservedName(name.to_string()));
        }

        let (record, master_key) = self.load()?;

        if !record.contains(name) {
            return Err(ApiVaultError::SecretNotFound(name.to_string()));
        }

        let record = record.with_secret(
            name,
            SecretEntry {
                value: value.to_string(),
                id: id.to_string(),
            },
        );

        self.save(&record, &master_key)
    }

    /// Remove a secret.  The reserved provisioning entry is protected.
    pub fn remove_secret(&self, name: &str) -> Result<()> {
        let (record, master_key) = self.load()?;

        if name == MAIN_PROVISIONING_KEY_NAME {
            return Err(ApiVaultError::ReservedName(name.to_string()));
        }
        if !record.contains(name) {
            return Err(ApiVaultError::SecretNotFound(name.to_string()));
        }

        let record = record.without_secret(name);
        self.save(&record, &master_key)
    }

    /// All secret names, excluding the reserved provisioning name.
    pub fn list_secrets(&self) -> Result<Vec<String>> {
        let (record, _) = self.load()?;
        Ok(record.names())
    }

    /// `(name, external id)` pairs for display, reserved entry excluded.
    pub fn list_entries(&self) -> Result<Vec<(String, String)>> {
        let (record, _) = self.load()?;
        Ok(record.entries())
    }

    /// Retrieve the main provisioning secret.
    pub fn main_provisioning_key(&self) -> Result<String> {
        self.get_secret(MAIN_PROVISIONING_KEY_NAME)
    }

    // ------------------------------------------------------------------
    // Master key rotation
    // ------------------------------------------------------------------

    /// Replace the master key and re-encrypt the vault under it.
    ///
    /// The record is one ciphertext unit, so re-encryption is simply a
    /// fresh `save` under the new key.  The vault file is written first
    /// and the key file only afterwards, which keeps the old key intact
    /// until the data is known-good.  If the key-file overwrite fails,
    /// the vault is re-saved under the old key; if that restoration also
    /// fails, both errors are surfaced as `RotationRecoveryFailed` and
    /// manual recovery is required.
    pub fn rotate_master_key(&self) -> Result<()> {
        self.rotate_master_key_with(|new_key, key_file| new_key.replace(key_file))
    }

    /// Rotation with the key-file overwrite step factored out, so the
    /// recovery path can be exercised without real disk faults.
    fn rotate_master_key_with<F>(&self, replace_key: F) -> Result<()>
    where
        F: FnOnce(&MasterKey, &Path) -> Result<()>,
    {
        let (record, old_key) = self.load()?;
        let new_key = MasterKey::generate()?;

        self.save(&record, &new_key)?;

        if let Err(rotate_err) = replace_key(&new_key, &self.key_file) {
            // Vault file is under the new key but the key file still (or
            // partially) holds the old one.  Put the vault back under the
            // old key so the pair on disk stays consistent.
            return match self.save(&record, &old_key) {
                Ok(()) => Err(rotate_err),
                Err(restore_err) => Err(ApiVaultError::RotationRecoveryFailed {
                    rotate_error: rotate_err.to_string(),
                    restore_error: restore_err.to_string(),
                }),
            };
        }

        Ok(())
    }
}
