//! AES-256-GCM authenticated encryption of the vault payload.
//!
//! Each call to `encrypt` generates a fresh random 32-byte salt and
//! 12-byte nonce, derives a per-call key from the master key + salt
//! (see `kdf`), and seals the plaintext.  The output is a single
//! self-describing text blob:
//!
//! ```text
//! base64( salt (32B) || nonce (12B) || ciphertext + 16-byte auth tag )
//! ```
//!
//! `decrypt` inverts the transform.  Every decryption failure — bad
//! base64, short blob, wrong key, flipped bits — collapses into the
//! same `DecryptionFailed` error so callers cannot be used as an
//! oracle for which part of the blob was wrong.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::Zeroize;

use crate::errors::{ApiVaultError, Result};

use super::kdf::{self, SALT_LEN};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Encrypt `plaintext` under `master_key`.
///
/// Non-deterministic by design: two calls with identical inputs produce
/// different blobs because both the salt and the nonce are fresh.
pub fn encrypt(master_key: &[u8], plaintext: &[u8]) -> Result<String> {
    let salt = kdf::generate_salt()?;
    let mut derived = kdf::derive_key(master_key, &salt);

    let cipher = Aes256Gcm::new_from_slice(&derived)
        .map_err(|e| ApiVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;
    derived.zeroize();

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| ApiVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    // salt || nonce || ciphertext, then base64 for safe storage as text.
    let mut combined = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    combined.extend_from_slice(&salt);
    combined.extend_from_slice(&nonce);
    combined.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(&combined))
}

/// Decrypt a blob produced by `encrypt`.
pub fn decrypt(master_key: &[u8], blob: &str) -> Result<Vec<u8>> {
    let combined = BASE64
        .decode(blob.trim())
        .map_err(|_| ApiVaultError::DecryptionFailed)?;

    if combined.len() < SALT_LEN + NONCE_LEN {
        return Err(ApiVaultError::DecryptionFailed);
    }

    let (salt, rest) = combined.split_at(SALT_LEN);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let mut derived = kdf::derive_key(master_key, salt);
    let cipher =
        Aes256Gcm::new_from_slice(&derived).map_err(|_| ApiVaultError::DecryptionFailed)?;
    derived.zeroize();

    // Decrypt and verify the auth tag.
    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| ApiVaultError::DecryptionFailed)
}
