//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.  Anything that is not a
//! secret value goes to stderr; `get` prints secret values bare on
//! stdout so the command stays pipe-friendly.

use comfy_table::{ContentArrangement, Table};
use console::style;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    eprintln!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    eprintln!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    eprintln!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of stored keys (Name, Key ID).
pub fn print_keys_table(entries: &[(String, String)]) {
    if entries.is_empty() {
        info("No API keys stored yet.");
        tip("Run `apivault add <key-name>` to provision your first key.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Key ID"]);

    for (name, id) in entries {
        let id_display = if id.is_empty() { "-" } else { id.as_str() };
        table.add_row(vec![name.as_str(), id_display]);
    }

    println!("{table}");
}
