//! The long-lived master key and its on-disk lifecycle.
//!
//! The master key is 32 random bytes stored in its own file, separate
//! from the vault contents, with owner-only permissions.  It is never
//! written into the vault file itself.  Rotation replaces it wholesale.

use std::fs;
use std::path::Path;

use rand::rngs::OsRng;
use rand::TryRngCore;
use zeroize::Zeroize;

use crate::errors::{ApiVaultError, Result};

/// Length of the master key in bytes (256 bits).
pub const MASTER_KEY_LEN: usize = 32;

/// A 32-byte master key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; MASTER_KEY_LEN],
}

impl MasterKey {
    /// Generate a fresh master key from the OS random source.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; MASTER_KEY_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| ApiVaultError::RandomFailure(format!("master key generation: {e}")))?;
        Ok(Self { bytes })
    }

    /// Access the raw key bytes (to feed the key derivation).
    pub fn as_bytes(&self) -> &[u8; MASTER_KEY_LEN] {
        &self.bytes
    }

    /// Load a master key from `path`.
    ///
    /// The only validation is the byte length; a wrong key is caught
    /// later by AEAD authentication when the vault is decrypted.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ApiVaultError::MasterKeyNotFound(path.to_path_buf()));
        }

        let mut raw = fs::read(path)?;
        let bytes: [u8; MASTER_KEY_LEN] = match raw.as_slice().try_into() {
            Ok(b) => b,
            Err(_) => {
                raw.zeroize();
                return Err(ApiVaultError::InvalidMasterKey(path.to_path_buf()));
            }
        };
        raw.zeroize();

        Ok(Self { bytes })
    }

    /// Write the key to `path`, refusing to overwrite an existing file.
    ///
    /// Callers must never silently replace a master key — losing the old
    /// key makes the vault undecryptable.  Use `replace` during rotation.
    pub fn persist(&self, path: &Path) -> Result<()> {
        if path.exists() {
            return Err(ApiVaultError::MasterKeyExists(path.to_path_buf()));
        }
        self.replace(path)
    }

    /// Write the key to `path`, overwriting any existing file.
    pub fn replace(&self, path: &Path) -> Result<()> {
        fs::write(path, self.bytes)?;

        // On Unix, restrict permissions to owner-only read/write.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }
}
