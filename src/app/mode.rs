use tracing::info;

use crate::chat::{ChatRelay, CompletionService, PendingRequest, SendOutcome};
use crate::shell::{Execution, Interpreter, PromptState};

pub const EXIT_CHAT_NOTE: &str = "Exited chat mode. Back in the shell.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Shell,
    Chat,
}

/// The shell and chat components plus the mode switch between them.
///
/// `Shell → Chat` happens on the reserved chat command, `Chat → Shell` on
/// [`Portfolio::exit_chat`]. Neither transition discards the other side's
/// transcript.
pub struct Portfolio {
    interpreter: Interpreter,
    relay: ChatRelay,
    mode: Mode,
}

impl Portfolio {
    pub const fn new(interpreter: Interpreter, relay: ChatRelay) -> Self {
        Self {
            interpreter,
            relay,
            mode: Mode::Shell,
        }
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub const fn interpreter_mut(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    pub const fn relay(&self) -> &ChatRelay {
        &self.relay
    }

    pub const fn relay_mut(&mut self) -> &mut ChatRelay {
        &mut self.relay
    }

    /// Runs a shell command, switching to chat mode if it asks for it.
    ///
    /// Returns `None` outside of shell mode.
    pub fn execute(&mut self, raw: &str) -> Option<Execution> {
        if self.mode != Mode::Shell {
            return None;
        }

        let execution = self.interpreter.execute(raw);
        Some(self.after_execution(execution))
    }

    /// Submits the prompt's current line and resets the prompt.
    ///
    /// Outside of shell mode returns `None` and leaves the prompt untouched.
    pub fn submit(&mut self, prompt: &mut PromptState) -> Option<Execution> {
        if self.mode != Mode::Shell {
            return None;
        }

        let execution = prompt.submit(&mut self.interpreter);
        Some(self.after_execution(execution))
    }

    fn after_execution(&mut self, execution: Execution) -> Execution {
        if execution == Execution::EnterChat {
            self.enter_chat();
        }
        execution
    }

    /// Switches to chat mode directly (e.g. `termfolio chat`).
    pub fn enter_chat(&mut self) {
        if self.mode == Mode::Chat {
            return;
        }
        self.mode = Mode::Chat;
        self.relay.enter();
        info!(session = %self.relay.session_id(), "entered chat mode");
    }

    /// Leaves chat mode and notes it in the shell transcript.
    ///
    /// Returns `false` if not in chat mode.
    pub fn exit_chat(&mut self) -> bool {
        if self.mode != Mode::Chat {
            return false;
        }
        self.mode = Mode::Shell;
        self.interpreter.notify(EXIT_CHAT_NOTE);
        info!(session = %self.relay.session_id(), "left chat mode");
        true
    }

    /// Sends a chat message; ignored outside of chat mode.
    pub async fn send<S>(&mut self, service: &S, text: &str) -> SendOutcome
    where
        S: CompletionService + ?Sized,
    {
        if self.mode != Mode::Chat {
            return SendOutcome::Ignored;
        }
        self.relay.send(service, text).await
    }

    /// Starts a chat request without awaiting it.
    ///
    /// The caller runs the request and hands the result to
    /// [`ChatRelay::resolve`], which is where notices are raised. Returns
    /// `None` outside of chat mode or when [`ChatRelay::begin`] refuses.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingRequest> {
        if self.mode != Mode::Chat {
            return None;
        }
        self.relay.begin(text)
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new(Interpreter::default(), ChatRelay::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::chat::{Message, Notice, Notifier, Role, UpstreamError};
    use crate::shell::LineKind;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct Echo;

    #[async_trait]
    impl CompletionService for Echo {
        async fn complete(&self, messages: &[Message]) -> Result<String, UpstreamError> {
            Ok(messages.last().map(|m| m.content.clone()).unwrap_or_default())
        }
    }

    #[test]
    fn test_starts_in_shell() {
        let portfolio = Portfolio::default();
        assert_eq!(portfolio.mode(), Mode::Shell);
        assert!(portfolio.relay().turns().is_empty());
    }

    #[test]
    fn test_chat_token_enters_chat_and_keeps_shell_lines() {
        let mut portfolio = Portfolio::default();
        portfolio.execute("about");
        let before = portfolio.interpreter().lines().len();

        assert_eq!(portfolio.execute("help ai"), Some(Execution::EnterChat));

        assert_eq!(portfolio.mode(), Mode::Chat);
        // The chat command's own echo is the only new line.
        assert_eq!(portfolio.interpreter().lines().len(), before + 1);
        assert_eq!(portfolio.relay().turns().len(), 1);
    }

    #[test]
    fn test_shell_commands_ignored_in_chat() {
        let mut portfolio = Portfolio::default();
        portfolio.execute("chat");
        let lines = portfolio.interpreter().lines().len();

        assert_eq!(portfolio.execute("help ai"), None);
        assert_eq!(portfolio.interpreter().lines().len(), lines);
        assert_eq!(portfolio.mode(), Mode::Chat);
    }

    #[test]
    fn test_exit_appends_exactly_one_line() {
        let mut portfolio = Portfolio::default();
        portfolio.execute("help ai");
        let before = portfolio.interpreter().lines().len();

        assert!(portfolio.exit_chat());

        assert_eq!(portfolio.mode(), Mode::Shell);
        let lines = portfolio.interpreter().lines();
        assert_eq!(lines.len(), before + 1);
        assert_eq!(lines.last().unwrap().kind, LineKind::Output);
        assert_eq!(lines.last().unwrap().text, EXIT_CHAT_NOTE);
    }

    #[test]
    fn test_exit_from_shell_is_noop() {
        let mut portfolio = Portfolio::default();
        assert!(!portfolio.exit_chat());
        assert_eq!(portfolio.interpreter().lines().len(), 1);
    }

    #[tokio::test]
    async fn test_reentering_chat_does_not_duplicate_greeting() {
        let mut portfolio = Portfolio::default();
        portfolio.execute("help ai");
        portfolio.send(&Echo, "ping").await;
        portfolio.exit_chat();

        portfolio.execute("help ai");

        let turns = portfolio.relay().turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[2].role, Role::Assistant);
        assert_eq!(turns[2].text, "ping");
    }

    #[test]
    fn test_submit_through_prompt_enters_chat() {
        let mut portfolio = Portfolio::default();
        let mut prompt = PromptState::new();

        prompt.set_input(portfolio.interpreter().table(), "CHAT");
        assert_eq!(portfolio.submit(&mut prompt), Some(Execution::EnterChat));

        assert_eq!(portfolio.mode(), Mode::Chat);
        assert_eq!(prompt.input(), "");
        assert_eq!(portfolio.interpreter().history(), ["chat"]);
    }

    #[test]
    fn test_submit_in_chat_leaves_prompt_untouched() {
        let mut portfolio = Portfolio::default();
        portfolio.enter_chat();
        let mut prompt = PromptState::new();
        prompt.set_input(portfolio.interpreter().table(), "about");

        assert_eq!(portfolio.submit(&mut prompt), None);
        assert_eq!(prompt.input(), "about");
    }

    #[tokio::test]
    async fn test_send_in_shell_is_ignored() {
        let mut portfolio = Portfolio::default();
        assert_eq!(portfolio.send(&Echo, "hello").await, SendOutcome::Ignored);
        assert!(portfolio.relay().turns().is_empty());
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Notice>>>);

    impl Notifier for Recorder {
        fn notify(&self, notice: &Notice) {
            self.0.lock().unwrap().push(notice.clone());
        }
    }

    #[test]
    fn test_missing_credential_notice_waits_for_resolve() {
        let recorder = Recorder::default();
        let relay = ChatRelay::new(Box::new(recorder.clone()));
        let mut portfolio = Portfolio::new(Interpreter::default(), relay);
        portfolio.enter_chat();

        let pending = portfolio.begin_send("hello").unwrap();
        assert_eq!(pending.messages().last().unwrap().content, "hello");
        assert!(recorder.0.lock().unwrap().is_empty());

        let outcome = portfolio
            .relay_mut()
            .resolve(pending, Err(UpstreamError::NotConfigured));

        assert!(matches!(outcome, SendOutcome::Failed(_)));
        assert_eq!(*recorder.0.lock().unwrap(), [Notice::MissingCredential]);
    }

    #[test]
    fn test_begin_send_in_shell_is_ignored() {
        let mut portfolio = Portfolio::default();
        assert!(portfolio.begin_send("hello").is_none());
        assert!(portfolio.relay().turns().is_empty());
    }

    #[test]
    fn test_modes_cycle() {
        let mut portfolio = Portfolio::default();
        for _ in 0..3 {
            portfolio.execute("chat");
            assert_eq!(portfolio.mode(), Mode::Chat);
            portfolio.exit_chat();
            assert_eq!(portfolio.mode(), Mode::Shell);
        }
        assert_eq!(portfolio.relay().turns().len(), 1);
    }
}
