//! Editable input line: history recall and suggestion navigation.

use super::interpreter::{Execution, Interpreter};
use super::table::CommandTable;

/// State of the shell's input line between key presses.
///
/// Suggestion navigation takes priority over history navigation whenever a
/// suggestion list is open.
#[derive(Debug, Default)]
pub struct PromptState {
    input: String,
    suggestions: Vec<&'static str>,
    selected: usize,
    history_cursor: Option<usize>,
}

impl PromptState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[&'static str] {
        &self.suggestions
    }

    /// Index of the highlighted suggestion, if the list is open.
    pub fn selected(&self) -> Option<usize> {
        (!self.suggestions.is_empty()).then_some(self.selected)
    }

    pub const fn history_cursor(&self) -> Option<usize> {
        self.history_cursor
    }

    /// Replaces the typed text and refreshes the suggestion list.
    pub fn set_input(&mut self, table: &CommandTable, text: impl Into<String>) {
        self.input = text.into();
        self.suggestions = table.suggest(&self.input);
        self.selected = 0;
    }

    /// Up arrow, over the interpreter's command history (oldest first).
    pub fn back(&mut self, history: &[String]) {
        if !self.suggestions.is_empty() {
            self.selected = self.selected.saturating_sub(1);
            return;
        }

        if history.is_empty() {
            return;
        }

        let index = match self.history_cursor {
            None => history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.history_cursor = Some(index);
        self.input.clone_from(&history[index]);
    }

    /// Down arrow.
    pub fn forward(&mut self, history: &[String]) {
        if !self.suggestions.is_empty() {
            self.selected = (self.selected + 1).min(self.suggestions.len() - 1);
            return;
        }

        let Some(current) = self.history_cursor else {
            return;
        };

        if current + 1 < history.len() {
            self.history_cursor = Some(current + 1);
            self.input.clone_from(&history[current + 1]);
        } else {
            self.history_cursor = None;
            self.input.clear();
        }
    }

    /// Tab: takes the highlighted suggestion as input without executing it.
    ///
    /// Returns `false` when no suggestion list is open.
    pub fn accept_suggestion(&mut self) -> bool {
        let Some(choice) = self.suggestions.get(self.selected).copied() else {
            return false;
        };
        self.input = choice.to_string();
        self.dismiss_suggestions();
        true
    }

    /// Escape.
    pub fn dismiss_suggestions(&mut self) {
        self.suggestions.clear();
        self.selected = 0;
    }

    /// Enter: executes the current input and resets the line.
    pub fn submit(&mut self, interpreter: &mut Interpreter) -> Execution {
        let input = std::mem::take(&mut self.input);
        self.dismiss_suggestions();
        self.history_cursor = None;
        interpreter.execute(&input)
    }
}
