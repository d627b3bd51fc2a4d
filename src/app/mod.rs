//! The shell⟷chat mode machine and the interactive terminal session.

mod editor;
mod mode;
mod repl;

pub use mode::{EXIT_CHAT_NOTE, Mode, Portfolio};
pub use repl::{Session, SessionOptions, StderrNotifier};

use crate::chat::{CompletionService, OpenAiCompletionService, UnconfiguredService};
use crate::config::ChatBackend;

/// Builds the completion service for a resolved backend.
///
/// Without a backend every chat message reports the missing configuration.
pub fn build_service(backend: Option<&ChatBackend>) -> Box<dyn CompletionService> {
    match backend {
        Some(backend) => Box::new(
            OpenAiCompletionService::new(
                backend.endpoint.clone(),
                backend.model.clone(),
                backend.api_key.clone(),
            )
            .requiring_api_key(backend.requires_api_key),
        ),
        None => Box::new(UnconfiguredService),
    }
}
