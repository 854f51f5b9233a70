//! `apivault remove` — revoke a key remotely and delete it from the vault.

use dialoguer::Confirm;

use crate::api::ProvisioningClient;
use crate::cli::output;
use crate::cli::{vault_from_cli, Cli};
use crate::errors::{ApiVaultError, Result};

/// Execute the `remove` command.
///
/// With `--force`, both the confirmation prompt and the remote
/// revocation are skipped — the key is only deleted locally.
pub fn execute(cli: &Cli, name: &str, force: bool) -> Result<()> {
    let (vault, settings) = vault_from_cli(cli)?;

    // Look up the external id first; this also confirms the key exists.
    let key_id = vault.get_secret_id(name)?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Revoke and remove key '{name}'?"))
            .default(false)
            .interact()
            .map_err(|e| ApiVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            return Err(ApiVaultError::UserCancelled);
        }

        let provisioning_key = vault.main_provisioning_key()?;
        let client = ProvisioningClient::new(&settings.api_base_url, &provisioning_key);

        output::info(&format!("Revoking API key '{name}'..."));
        if let Err(e) = client.revoke_key(&key_id) {
            output::error(&format!("Failed to revoke key remotely: {e}"));
            output::tip(&format!(
                "If the key is already inactive, remove it anyway with `apivault remove {name} --force`."
            ));
            return Err(ApiVaultError::CommandFailed("key revocation failed".into()));
        }
        output::success(&format!("API key '{name}' revoked"));
    }

    vault.remove_secret(name)?;
    output::success(&format!("Removed key '{name}' from the vault"));

    Ok(())
}
