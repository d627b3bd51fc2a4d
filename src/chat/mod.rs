//! Chat mode: relays a short conversation to a completion service.
//!
//! The relay owns the transcript and the single-flight guard; the service
//! behind it is injected so the relay can be driven without a network.

/// OpenAI-compatible HTTP completion service.
pub mod client;
/// Slash command parsing and autocomplete.
pub mod command;
mod prompt;
mod relay;
mod service;
mod turn;
/// Chat mode terminal output.
pub mod ui;

pub use client::OpenAiCompletionService;
pub use prompt::build_system_prompt;
pub use relay::{
    CLEAR_SETTLE_DELAY, CONTEXT_WINDOW, ChatRelay, EMPTY_REPLY_FALLBACK, GREETING, Notice,
    Notifier, PendingRequest, SendOutcome, Silent,
};
pub use service::{CompletionService, UnconfiguredService, UpstreamError};
pub use turn::{ChatTurn, Message, Role, TurnId};
