//! Per-call key derivation using PBKDF2-HMAC-SHA256.
//!
//! Every encryption derives a fresh 32-byte key from the master key and
//! a random salt.  The iteration count is deliberately high so that a
//! stolen vault file is expensive to brute-force even if the master key
//! file is weak or partially leaked.
//!
//! The count is fixed, not configurable: the encrypted blob does not
//! record it, so both sides of the transform must agree forever.

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::Sha256;

use crate::errors::{ApiVaultError, Result};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count.
pub const ITERATIONS: u32 = 100_000;

/// Derive a 32-byte encryption key from the master key and a salt.
///
/// The same master key + salt always produce the same key; different
/// salts produce unrelated keys.
pub fn derive_key(master_key: &[u8], salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(master_key, salt, ITERATIONS, &mut key);
    key
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| ApiVaultError::RandomFailure(format!("salt generation: {e}")))?;
    Ok(salt)
}
