//! `apivault get` — print a stored key's value to stdout.

use std::io::Write;

use crate::cli::{vault_from_cli, Cli};
use crate::errors::Result;

/// Execute the `get` command.
///
/// Prints the bare value without a trailing newline so the output can
/// be captured directly in scripts.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let (vault, _settings) = vault_from_cli(cli)?;

    let value = vault.get_secret(name)?;
    print!("{}", value.trim());
    std::io::stdout().flush()?;

    Ok(())
}
