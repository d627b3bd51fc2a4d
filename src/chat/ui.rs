//! Chat mode UI components.

use crate::config::ChatBackend;
use crate::ui::Style;

use super::turn::{ChatTurn, Role};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header() {
    crate::status!(
        "{} {} - Chat mode",
        Style::header("termfolio"),
        Style::version(format!("v{VERSION}"))
    );
    crate::status!(
        "{}",
        Style::hint("Type a message, /help for commands, /exit to go back to the shell")
    );
    crate::status!();
}

pub fn print_config(backend: Option<&ChatBackend>, session_id: &str) {
    println!("{}", Style::header("AI service"));
    match backend {
        Some(backend) => {
            println!(
                "  {}   {}",
                Style::label("provider"),
                Style::value(&backend.provider_name)
            );
            println!(
                "  {}      {}",
                Style::label("model"),
                Style::value(&backend.model)
            );
            println!(
                "  {}   {}",
                Style::label("endpoint"),
                Style::secondary(&backend.endpoint)
            );
            if backend.requires_api_key {
                println!(
                    "  {}    {}",
                    Style::label("api key"),
                    if backend.is_missing_key() {
                        Style::warning("(not set)")
                    } else {
                        Style::secondary("(set)")
                    }
                );
            }
        }
        None => {
            println!(
                "  {}   {}",
                Style::label("provider"),
                Style::secondary("(not configured)")
            );
        }
    }
    println!(
        "  {}    {}",
        Style::label("session"),
        Style::secondary(session_id)
    );
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    println!(
        "  {}   {}",
        Style::command("/clear"),
        Style::secondary("Start the conversation over")
    );
    println!(
        "  {}  {}",
        Style::command("/config"),
        Style::secondary("Show the AI service settings")
    );
    println!(
        "  {}    {}",
        Style::command("/help"),
        Style::secondary("Show this help")
    );
    println!(
        "  {}    {}",
        Style::command("/exit"),
        Style::secondary("Back to the shell (also /quit, /q, exit)")
    );
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}

/// Prefix shown in front of a turn's text.
pub fn turn_prefix(turn: &ChatTurn) -> String {
    match turn.role {
        Role::Assistant => Style::assistant("B.R.O. ›"),
        Role::User => Style::command("you ›"),
    }
}
