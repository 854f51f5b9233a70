//! `apivault get-id` — print the external id attached to a stored key.

use crate::cli::output;
use crate::cli::{vault_from_cli, Cli};
use crate::errors::Result;

/// Execute the `get-id` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let (vault, _settings) = vault_from_cli(cli)?;

    let id = vault.get_secret_id(name)?;
    if id.is_empty() {
        output::info(&format!("Key '{name}' has no external id"));
    } else {
        println!("{id}");
    }

    Ok(())
}
