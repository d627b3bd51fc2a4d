//! The command interpreter behind the shell prompt.
//!
//! Maps typed commands onto a static response table and keeps the
//! transcript, command history and autocomplete state.

mod interpreter;
mod prompt;
/// The command vocabulary.
pub mod table;

pub use interpreter::{Execution, Interpreter, LineId, LineKind, TranscriptLine, WELCOME};
pub use prompt::PromptState;
pub use table::{Action, COMMANDS, CommandEntry, CommandTable, Response};
