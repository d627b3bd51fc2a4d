//! Command vocabulary listing.

use crate::shell::CommandTable;
use crate::ui::Style;

/// Prints every shell command with its one-line summary, in table order.
pub fn print_commands() {
    let table = CommandTable::default();
    let width = table
        .entries()
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0);

    println!("{}", Style::header("Shell commands"));
    for entry in table.entries() {
        println!(
            "  {}  {}",
            Style::command(format!("{:<width$}", entry.name)),
            Style::secondary(entry.summary)
        );
    }
}
