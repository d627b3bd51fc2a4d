use chrono::{DateTime, Utc};
use tracing::debug;

use super::table::{Action, CommandTable, Response};

pub const WELCOME: &str =
    "Welcome to Sifeddine's Shell\nType 'help' for commands or 'help ai' to chat.";

/// Opaque identity of a transcript line, unique within one transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Command,
    Output,
    Welcome,
}

/// One line of the shell transcript.
#[derive(Debug, Clone)]
pub struct TranscriptLine {
    pub id: LineId,
    pub kind: LineKind,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Newly produced and not yet shown; the renderer may reveal it gradually.
    pub fresh: bool,
}

/// What a call to [`Interpreter::execute`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// Blank input, echoed only.
    Empty,
    /// The transcript was reset to the `clear` echo.
    Cleared,
    /// The caller should switch to chat mode.
    EnterChat,
    /// An output line was appended.
    Output(LineId),
}

/// The command interpreter: transcript, command history and table lookup.
#[derive(Debug)]
pub struct Interpreter {
    table: CommandTable,
    lines: Vec<TranscriptLine>,
    history: Vec<String>,
    next_id: u64,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(CommandTable::default())
    }
}

impl Interpreter {
    /// Creates an interpreter whose transcript holds only the welcome line.
    pub fn new(table: CommandTable) -> Self {
        let mut interpreter = Self {
            table,
            lines: Vec::new(),
            history: Vec::new(),
            next_id: 0,
        };
        interpreter.push(LineKind::Welcome, WELCOME.to_string());
        interpreter
    }

    pub const fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    /// Commands executed so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Executes one line of user input against the command table.
    pub fn execute(&mut self, raw: &str) -> Execution {
        let key = raw.trim().to_lowercase();
        let echo = self.make_line(LineKind::Command, raw.to_string());

        if key.is_empty() {
            self.lines.push(echo);
            return Execution::Empty;
        }

        self.history.push(key.clone());

        let response = self.table.lookup(&key).map(|entry| entry.response);
        debug!(command = %key, known = response.is_some(), "executing shell command");

        match response {
            Some(Response::Action(Action::Clear)) => {
                self.lines.clear();
                self.lines.push(echo);
                Execution::Cleared
            }
            Some(Response::Action(Action::EnterChat)) => {
                self.lines.push(echo);
                Execution::EnterChat
            }
            Some(response) => {
                self.lines.push(echo);
                let text = response.render().unwrap_or_default();
                Execution::Output(self.push(LineKind::Output, text))
            }
            None => {
                self.lines.push(echo);
                Execution::Output(self.push(LineKind::Output, not_found(&key)))
            }
        }
    }

    /// Returns all command names that complete `partial`, in table order.
    ///
    /// Blank input suggests nothing rather than the whole vocabulary.
    pub fn suggest(&self, partial: &str) -> Vec<&'static str> {
        self.table.suggest(partial)
    }

    /// Appends an informational output line outside of command execution.
    pub fn notify(&mut self, text: impl Into<String>) -> LineId {
        self.push(LineKind::Output, text.into())
    }

    /// Returns the lines not yet shown and marks them as shown.
    pub fn take_fresh(&mut self) -> Vec<TranscriptLine> {
        self.lines
            .iter_mut()
            .filter(|line| line.fresh)
            .map(|line| {
                line.fresh = false;
                line.clone()
            })
            .collect()
    }

    fn push(&mut self, kind: LineKind, text: String) -> LineId {
        let line = self.make_line(kind, text);
        let id = line.id;
        self.lines.push(line);
        id
    }

    fn make_line(&mut self, kind: LineKind, text: String) -> TranscriptLine {
        let id = LineId(self.next_id);
        self.next_id += 1;
        TranscriptLine {
            id,
            kind,
            text,
            created_at: Utc::now(),
            fresh: true,
        }
    }
}

fn not_found(command: &str) -> String {
    format!("Command not found: {command}. Type 'help' for available commands.")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::shell::table::{COMMANDS, CommandEntry};
    use std::collections::HashSet;

    fn last_text(interpreter: &Interpreter) -> &str {
        &interpreter.lines().last().unwrap().text
    }

    #[test]
    fn test_starts_with_welcome_line() {
        let interpreter = Interpreter::default();
        assert_eq!(interpreter.lines().len(), 1);
        assert_eq!(interpreter.lines()[0].kind, LineKind::Welcome);
        assert_eq!(interpreter.lines()[0].text, WELCOME);
    }

    #[test]
    fn test_known_literal_commands_produce_one_output_line() {
        for entry in COMMANDS {
            let Response::Literal(expected) = entry.response else {
                continue;
            };
            let mut interpreter = Interpreter::default();
            let before = interpreter.lines().len();

            let result = interpreter.execute(&format!("  {}  ", entry.name.to_uppercase()));

            assert!(matches!(result, Execution::Output(_)));
            assert_eq!(interpreter.lines().len(), before + 2);
            let output = interpreter.lines().last().unwrap();
            assert_eq!(output.kind, LineKind::Output);
            assert_eq!(output.text, expected);
        }
    }

    #[test]
    fn test_generator_command_uses_current_value() {
        fn fixed() -> String {
            "generated".to_string()
        }
        static TABLE: &[CommandEntry] = &[CommandEntry {
            name: "roll",
            summary: "",
            response: Response::Generator(fixed),
        }];

        let mut interpreter = Interpreter::new(CommandTable::new(TABLE));
        interpreter.execute("Roll");
        assert_eq!(last_text(&interpreter), "generated");
    }

    #[test]
    fn test_command_echo_keeps_original_casing() {
        let mut interpreter = Interpreter::default();
        interpreter.execute("  About ");
        let echo = &interpreter.lines()[1];
        assert_eq!(echo.kind, LineKind::Command);
        assert_eq!(echo.text, "  About ");
    }

    #[test]
    fn test_unknown_command_fallback() {
        let mut interpreter = Interpreter::default();
        let result = interpreter.execute("Sudo Make Me A Sandwich");
        assert!(matches!(result, Execution::Output(_)));
        assert_eq!(
            last_text(&interpreter),
            "Command not found: sudo make me a sandwich. Type 'help' for available commands."
        );
    }

    #[test]
    fn test_empty_input_echoes_without_history_or_output() {
        let mut interpreter = Interpreter::default();
        assert_eq!(interpreter.execute("   "), Execution::Empty);
        assert_eq!(interpreter.lines().len(), 2);
        assert_eq!(interpreter.lines()[1].kind, LineKind::Command);
        assert!(interpreter.history().is_empty());
    }

    #[test]
    fn test_clear_leaves_only_its_own_echo() {
        let mut interpreter = Interpreter::default();
        interpreter.execute("about");
        interpreter.execute("projects");

        assert_eq!(interpreter.execute(" CLEAR "), Execution::Cleared);
        assert_eq!(interpreter.lines().len(), 1);
        assert_eq!(interpreter.lines()[0].kind, LineKind::Command);
        assert_eq!(interpreter.lines()[0].text, " CLEAR ");
    }

    #[test]
    fn test_enter_chat_echoes_without_output() {
        let mut interpreter = Interpreter::default();
        assert_eq!(interpreter.execute("Help AI"), Execution::EnterChat);
        assert_eq!(interpreter.lines().len(), 2);
        assert_eq!(interpreter.lines()[1].kind, LineKind::Command);
        assert_eq!(interpreter.history(), ["help ai"]);
    }

    #[test]
    fn test_history_records_non_empty_commands() {
        let mut interpreter = Interpreter::default();
        interpreter.execute("about");
        interpreter.execute("");
        interpreter.execute("Nope");
        assert_eq!(interpreter.history(), ["about", "nope"]);
    }

    #[test]
    fn test_line_ids_unique_across_clear() {
        let mut interpreter = Interpreter::default();
        let mut seen = HashSet::new();
        for line in interpreter.lines() {
            seen.insert(line.id);
        }
        for cmd in ["about", "clear", "projects", "x"] {
            interpreter.execute(cmd);
            for line in interpreter.lines() {
                seen.insert(line.id);
            }
        }
        // welcome + about(2) + clear(1) + projects(2) + x(2)
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_suggest_prefix() {
        let interpreter = Interpreter::default();
        assert_eq!(interpreter.suggest("pro"), vec!["projects"]);
        assert_eq!(interpreter.suggest("PRO"), vec!["projects"]);
        assert_eq!(interpreter.suggest("co"), vec!["contact"]);
        assert!(interpreter.suggest("zzz").is_empty());
    }

    #[test]
    fn test_suggest_empty_input_is_empty() {
        let interpreter = Interpreter::default();
        assert!(interpreter.suggest("").is_empty());
        assert!(interpreter.suggest("   ").is_empty());
    }

    #[test]
    fn test_take_fresh_marks_lines_shown() {
        let mut interpreter = Interpreter::default();
        interpreter.execute("about");

        let fresh = interpreter.take_fresh();
        assert_eq!(fresh.len(), 3);
        assert!(interpreter.take_fresh().is_empty());

        interpreter.execute("lab");
        let fresh = interpreter.take_fresh();
        assert_eq!(fresh.len(), 2);
        assert_eq!(fresh[0].kind, LineKind::Command);
        assert_eq!(fresh[1].kind, LineKind::Output);
    }

    #[test]
    fn test_notify_appends_output_line() {
        let mut interpreter = Interpreter::default();
        interpreter.notify("hello");
        assert_eq!(interpreter.lines().len(), 2);
        assert_eq!(interpreter.lines()[1].kind, LineKind::Output);
        assert_eq!(last_text(&interpreter), "hello");
    }
}
