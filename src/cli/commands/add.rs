//! `apivault add` — provision a new API key and store it in the vault.

use crate::api::ProvisioningClient;
use crate::cli::output;
use crate::cli::{vault_from_cli, Cli};
use crate::errors::Result;

/// Execute the `add` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let (vault, settings) = vault_from_cli(cli)?;

    let provisioning_key = vault.main_provisioning_key()?;
    let client = ProvisioningClient::new(&settings.api_base_url, &provisioning_key);

    output::info(&format!("Provisioning new API key '{name}'..."));
    let provisioned = client.create_key(name)?;

    vault.add_secret(name, &provisioned.key, &provisioned.hash)?;

    output::success(&format!("API key '{name}' created and stored"));
    Ok(())
}
