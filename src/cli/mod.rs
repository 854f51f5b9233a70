//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{self, Settings};
use crate::errors::{ApiVaultError, Result};
use crate::vault::Vault;

/// ApiVault CLI: encrypted vault for provisioned API keys.
#[derive(Parser)]
#[command(
    name = "apivault",
    about = "Encrypted vault for provisioned API keys",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: ~/.apivault)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize a new vault with your provisioning key
    Init,

    /// Provision a new API key and store it
    Add {
        /// Name for the new key (e.g. my-project)
        name: String,
    },

    /// Print a stored key's value
    Get {
        /// Key name
        name: String,
    },

    /// Print the external id of a stored key
    GetId {
        /// Key name
        name: String,
    },

    /// List all stored keys
    List,

    /// Revoke a key remotely and remove it from the vault
    Remove {
        /// Key name
        name: String,
        /// Skip confirmation and remote revocation
        #[arg(short, long)]
        force: bool,
    },

    /// Rotate a key (provision a replacement, revoke the old one)
    Rotate {
        /// Key name
        name: String,
    },

    /// Replace the vault's master key and re-encrypt its contents
    RotateMasterKey,

    /// Show version information
    Version,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Build the vault handle and settings from the CLI arguments.
///
/// `--vault-dir` overrides the configured (or default) directory.
pub fn vault_from_cli(cli: &Cli) -> Result<(Vault, Settings)> {
    let home = config::home_dir()?;
    let settings = Settings::load(&home)?;

    let dir = match &cli.vault_dir {
        Some(dir) => PathBuf::from(dir),
        None => settings.vault_dir(&home),
    };

    Ok((Vault::new(dir), settings))
}

/// Get the provisioning key for `init`, trying in order:
/// 1. `APIVAULT_PROVISIONING_KEY` env var (CI/CD)
/// 2. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the key is wiped from memory on drop.
pub fn prompt_provisioning_key() -> Result<Zeroizing<String>> {
    if let Ok(key) = std::env::var("APIVAULT_PROVISIONING_KEY") {
        let key = key.trim().to_string();
        if !key.is_empty() {
            return Ok(Zeroizing::new(key));
        }
    }

    let key = dialoguer::Password::new()
        .with_prompt("Provisioning key (input hidden)")
        .interact()
        .map_err(|e| ApiVaultError::CommandFailed(format!("provisioning key prompt: {e}")))?;

    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(ApiVaultError::CommandFailed(
            "provisioning key cannot be empty".into(),
        ));
    }

    Ok(Zeroizing::new(key))
}
