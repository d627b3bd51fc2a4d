//! Line editor for the shell prompt.
//!
//! Up/Down, Tab and Escape are bound to handlers that drive a shared
//! [`PromptState`], so history recall and suggestion navigation behave the
//! same interactively as they do in tests. The highlighted suggestion is
//! shown as a dimmed hint after the cursor.

use anyhow::Result;
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Context, Editor, Event, EventContext, EventHandler, Helper,
    KeyCode, KeyEvent, Modifiers, Movement, RepeatCount,
};
use std::borrow::Cow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::shell::{CommandTable, PromptState};
use crate::ui::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Up,
    Down,
    Tab,
    Escape,
}

/// What the key handlers and the hinter share while a line is being edited.
#[derive(Debug)]
struct LineState {
    prompt: PromptState,
    table: CommandTable,
    history: Vec<String>,
}

impl LineState {
    fn new(table: CommandTable) -> Self {
        Self {
            prompt: PromptState::new(),
            table,
            history: Vec::new(),
        }
    }

    /// Starts a new line against the given command history.
    fn reset(&mut self, history: &[String]) {
        self.prompt = PromptState::new();
        history.clone_into(&mut self.history);
    }

    /// Picks up whatever was typed since the last key we handled.
    fn sync(&mut self, line: &str) {
        if self.prompt.input() != line {
            self.prompt.set_input(&self.table, line);
        }
    }

    /// Applies a bound key; returns the new buffer text if it changed.
    fn press(&mut self, key: Key, line: &str) -> Option<String> {
        self.sync(line);
        match key {
            Key::Up => self.prompt.back(&self.history),
            Key::Down => self.prompt.forward(&self.history),
            Key::Tab => {
                self.prompt.accept_suggestion();
            }
            Key::Escape => self.prompt.dismiss_suggestions(),
        }
        (self.prompt.input() != line).then(|| self.prompt.input().to_string())
    }

    /// The untyped rest of the highlighted suggestion.
    fn hint(&self) -> Option<String> {
        let name = self.prompt.suggestions().get(self.prompt.selected()?)?;
        let typed = self.prompt.input().trim_start().to_lowercase();
        name.get(typed.len()..)
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    }
}

fn lock(state: &Mutex<LineState>) -> MutexGuard<'_, LineState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

struct KeyHandler {
    key: Key,
    state: Arc<Mutex<LineState>>,
}

impl ConditionalEventHandler for KeyHandler {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext,
    ) -> Option<Cmd> {
        let replacement = lock(&self.state).press(self.key, ctx.line());
        // Repaint so a moved suggestion highlight shows up in the hint.
        Some(replacement.map_or(Cmd::Repaint, |text| {
            Cmd::Replace(Movement::WholeLine, Some(text))
        }))
    }
}

struct ShellHelper {
    state: Arc<Mutex<LineState>>,
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = String;
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let mut state = lock(&self.state);
        state.sync(line);
        if pos < line.len() {
            return None;
        }
        state.hint()
    }
}

impl Highlighter for ShellHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        Cow::Owned(Style::command(prompt))
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(Style::hint(hint))
    }
}

impl Validator for ShellHelper {}

/// Reads shell lines with history recall and command suggestions.
pub struct ShellEditor {
    editor: Editor<ShellHelper, DefaultHistory>,
    state: Arc<Mutex<LineState>>,
}

impl ShellEditor {
    pub fn new(table: CommandTable) -> Result<Self> {
        let state = Arc::new(Mutex::new(LineState::new(table)));

        let mut editor: Editor<ShellHelper, DefaultHistory> = Editor::new()?;
        editor.set_helper(Some(ShellHelper {
            state: Arc::clone(&state),
        }));
        for (code, key) in [
            (KeyCode::Up, Key::Up),
            (KeyCode::Down, Key::Down),
            (KeyCode::Tab, Key::Tab),
            (KeyCode::Esc, Key::Escape),
        ] {
            editor.bind_sequence(
                KeyEvent(code, Modifiers::NONE),
                EventHandler::Conditional(Box::new(KeyHandler {
                    key,
                    state: Arc::clone(&state),
                })),
            );
        }

        Ok(Self { editor, state })
    }

    /// Reads one line, recalling from `history` (oldest first).
    ///
    /// Returns the prompt ready to submit, or `None` on Ctrl+C / Ctrl+D.
    pub fn read_line(&mut self, prompt: &str, history: &[String]) -> Result<Option<PromptState>> {
        lock(&self.state).reset(history);

        match self.editor.readline(prompt) {
            Ok(line) => {
                let mut state = lock(&self.state);
                state.sync(&line);
                Ok(Some(std::mem::take(&mut state.prompt)))
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
