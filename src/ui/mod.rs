//! Terminal presentation: colors, the request spinner and the typewriter.

use anyhow::Result;
use inquire::InquireError;

mod spinner;
mod theme;
/// Typewriter reveal for fresh output.
pub mod typewriter;

pub use spinner::Spinner;
pub use theme::Style;

/// Ctrl+C or Esc on an inquire prompt.
pub const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Runs an interactive flow, treating a cancelled prompt as a clean exit.
pub fn handle_prompt_cancellation<F>(f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    match f() {
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            println!();
            Ok(())
        }
        other => other,
    }
}
