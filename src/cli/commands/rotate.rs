//! `apivault rotate` — replace a provisioned key with a fresh one.
//!
//! Order matters: the replacement is stored before the old key is
//! revoked, so a failed revocation never leaves the vault holding a
//! dead key.  The inverse failure (new key stored, old key still live)
//! is reported as a partial success.

use crate::api::ProvisioningClient;
use crate::cli::output;
use crate::cli::{vault_from_cli, Cli};
use crate::errors::{ApiVaultError, Result};

/// Execute the `rotate` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let (vault, settings) = vault_from_cli(cli)?;

    // Verify the key exists and grab its current external id.
    let old_key_id = vault.get_secret_id(name)?;

    let provisioning_key = vault.main_provisioning_key()?;
    let client = ProvisioningClient::new(&settings.api_base_url, &provisioning_key);

    output::info(&format!("Rotating API key '{name}'..."));

    let provisioned = client.create_key(name)?;
    vault.update_secret(name, &provisioned.key, &provisioned.hash)?;

    if let Err(e) = client.revoke_key(&old_key_id) {
        output::warning(&format!("Failed to revoke the old key: {e}"));
        output::warning("The new key is stored, but the old key may still be active.");
        return Err(ApiVaultError::CommandFailed(
            "key rotation partially succeeded but revocation failed".into(),
        ));
    }

    output::success(&format!("API key '{name}' rotated"));
    Ok(())
}
