//! `apivault init` — create a new vault seeded with the provisioning key.

use crate::cli::output;
use crate::cli::{prompt_provisioning_key, vault_from_cli, Cli};
use crate::errors::{ApiVaultError, Result};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (vault, _settings) = vault_from_cli(cli)?;

    // Check before prompting so an existing vault fails fast.
    if vault.is_initialized() {
        output::tip("Remove the vault directory first if you really want to start fresh — this deletes all stored keys.");
        return Err(ApiVaultError::AlreadyInitialized(
            vault.vault_dir().to_path_buf(),
        ));
    }

    output::info("The provisioning key is used to mint and revoke API keys.");
    output::info("You can find it in your provider dashboard.");
    let provisioning_key = prompt_provisioning_key()?;

    vault.init(&provisioning_key)?;

    output::success(&format!(
        "Vault initialized at {}",
        vault.vault_dir().display()
    ));
    output::tip("Run `apivault add <key-name>` to provision your first API key.");

    Ok(())
}
