//! `apivault list` — show provisioning status and all stored keys.

use crate::cli::output;
use crate::cli::{vault_from_cli, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (vault, _settings) = vault_from_cli(cli)?;

    let has_provisioning_key = vault.main_provisioning_key().is_ok();
    if has_provisioning_key {
        output::success("Provisioning key configured");
    } else {
        output::warning("Provisioning key not configured");
    }

    let mut entries = vault.list_entries()?;
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    output::print_keys_table(&entries);
    Ok(())
}
