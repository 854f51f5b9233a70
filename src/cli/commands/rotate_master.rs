//! `apivault rotate-master-key` — re-encrypt the vault under a new
//! master key.  Purely local, no network.

use crate::cli::output;
use crate::cli::{vault_from_cli, Cli};
use crate::errors::Result;

/// Execute the `rotate-master-key` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (vault, _settings) = vault_from_cli(cli)?;

    vault.rotate_master_key()?;

    output::success("Master key rotated and vault re-encrypted");
    Ok(())
}
