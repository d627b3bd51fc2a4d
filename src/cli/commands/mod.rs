//! Subcommand implementations.

/// Command vocabulary listing.
pub mod commands;

/// Configure command handler.
pub mod configure;

/// Provider listing command handler.
pub mod providers;

/// One-shot shell command handler.
pub mod run;

/// Interactive shell and chat handler.
pub mod shell;
