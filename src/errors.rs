use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in ApiVault.
#[derive(Debug, Error)]
pub enum ApiVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong master key or corrupted data")]
    DecryptionFailed,

    #[error("Secure random generation failed: {0}")]
    RandomFailure(String),

    // --- Master key errors ---
    #[error("Master key file already exists at {0}")]
    MasterKeyExists(PathBuf),

    #[error("Master key file not found at {0}")]
    MasterKeyNotFound(PathBuf),

    #[error("Master key file at {0} has the wrong length (expected 32 bytes)")]
    InvalidMasterKey(PathBuf),

    // --- Vault errors ---
    #[error("Vault already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Vault not found at {0} — run `apivault init` first")]
    VaultNotFound(PathBuf),

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("Secret '{0}' not found")]
    SecretNotFound(String),

    #[error("Secret '{0}' already exists (use `rotate` to replace it)")]
    SecretAlreadyExists(String),

    #[error("'{0}' is the reserved provisioning key name and cannot be used here")]
    ReservedName(String),

    #[error(
        "Master key rotation failed and the old key could not be restored — \
         manual recovery required (rotation error: {rotate_error}; restore error: {restore_error})"
    )]
    RotationRecoveryFailed {
        rotate_error: String,
        restore_error: String,
    },

    // --- Provisioning API errors ---
    #[error("Provisioning API error: {0}")]
    Api(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for ApiVault results.
pub type Result<T> = std::result::Result<T, ApiVaultError>;
