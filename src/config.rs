//! User-level configuration, loaded from `~/.apivault.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ApiVaultError, Result};

/// Settings controlling where the vault lives and which provisioning
/// endpoint to talk to.  Every field has a default so ApiVault works
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the home directory) holding the vault
    /// and master key files.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// Base URL of the credential-issuing API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".apivault".to_string()
}

fn default_api_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            api_base_url: default_api_base_url(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the home directory.
    const FILE_NAME: &'static str = ".apivault.toml";

    /// Load settings from `<home_dir>/.apivault.toml`.
    ///
    /// If the file does not exist, defaults are returned.  If the file
    /// exists but cannot be parsed, an error is returned.
    pub fn load(home_dir: &Path) -> Result<Self> {
        let config_path = home_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            ApiVaultError::ConfigError(format!("failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Full path to the vault directory.
    pub fn vault_dir(&self, home_dir: &Path) -> PathBuf {
        home_dir.join(&self.vault_dir)
    }
}

/// The user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .map_err(|_| ApiVaultError::ConfigError("HOME is not set".into()))
}

// ── Tests ────────────────────────────────────────────────────────────
