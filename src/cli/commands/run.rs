//! One-shot execution of a single shell command.

use anyhow::Result;
use std::io::{self, Write};

use crate::shell::{Execution, Interpreter, LineKind};
use crate::ui::Style;

/// Executes `words` as one shell command and prints what it produced.
pub fn run_once(words: &[String]) -> Result<()> {
    let mut out = io::stdout().lock();
    run_into(&mut out, &words.join(" "))
}

fn run_into<W: Write>(out: &mut W, input: &str) -> Result<()> {
    let mut interpreter = Interpreter::default();
    // The welcome banner belongs to interactive sessions only.
    interpreter.take_fresh();

    let execution = interpreter.execute(input);
    if execution == Execution::EnterChat {
        crate::status!(
            "{} Chat needs an interactive terminal. Try {}",
            Style::hint("Note:"),
            Style::command("termfolio chat")
        );
        return Ok(());
    }

    for line in interpreter.take_fresh() {
        if line.kind == LineKind::Output {
            writeln!(out, "{}", line.text)?;
        }
    }
    out.flush()?;
    Ok(())
}
