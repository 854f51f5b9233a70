//! Cryptographic primitives for ApiVault.
//!
//! This module provides:
//! - AES-256-GCM encryption into self-describing text blobs (`cipher`)
//! - PBKDF2-HMAC-SHA256 per-call key derivation (`kdf`)
//! - Master key generation and file lifecycle (`master_key`)

pub mod cipher;
pub mod kdf;
pub mod master_key;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, MasterKey};
pub use cipher::{decrypt, encrypt};
pub use kdf::{derive_key, generate_salt};
pub use master_key::{MasterKey, MASTER_KEY_LEN};
