use chrono::Utc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use super::service::{CompletionService, UpstreamError};
use super::turn::{ChatTurn, Message, Role, TurnId};

/// Number of prior turns sent upstream with each new message.
pub const CONTEXT_WINDOW: usize = 10;

/// Pause between emptying the transcript and re-greeting.
pub const CLEAR_SETTLE_DELAY: Duration = Duration::from_millis(300);

pub const GREETING: &str = "Hey! I'm B.R.O., Barely Responding Optimally. Ask me anything about \
Sifeddine's work, projects or philosophy, or just chat about tech, automation and digital chaos. \
What's on your mind?";

pub const EMPTY_REPLY_FALLBACK: &str = "I didn't catch a reply that time. Mind sending that again?";

const GENERIC_FAILURE: &str =
    "Something went wrong with the AI connection. The digital gremlins are at it again!";

/// Out-of-band signals meant for whoever runs the site, not the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The completion service has no credential configured.
    MissingCredential,
}

/// Receives [`Notice`]s raised by the relay.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// A notifier that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Notifier for Silent {
    fn notify(&self, _notice: &Notice) {}
}

/// A request that has been started but not resolved.
///
/// Only one can exist per relay at a time.
#[derive(Debug)]
#[must_use = "a pending request must be resolved to clear the in-flight state"]
pub struct PendingRequest {
    user_turn: TurnId,
    messages: Vec<Message>,
}

impl PendingRequest {
    /// The outbound payload: prior context plus the new user message.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub const fn user_turn(&self) -> TurnId {
        self.user_turn
    }
}

/// Result of a call to [`ChatRelay::send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input or a request already in flight; nothing changed.
    Ignored,
    /// The assistant's reply was appended.
    Replied(TurnId),
    /// The request failed and an apology was appended.
    Failed(TurnId),
}

/// Relays a short rolling conversation to a completion service.
pub struct ChatRelay {
    session_id: String,
    turns: Vec<ChatTurn>,
    in_flight: bool,
    next_id: u64,
    window: usize,
    clear_delay: Duration,
    notifier: Box<dyn Notifier>,
}

impl Default for ChatRelay {
    fn default() -> Self {
        Self::new(Box::new(Silent))
    }
}

impl ChatRelay {
    pub fn new(notifier: Box<dyn Notifier>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            turns: Vec::new(),
            in_flight: false,
            next_id: 0,
            window: CONTEXT_WINDOW,
            clear_delay: CLEAR_SETTLE_DELAY,
            notifier,
        }
    }

    #[must_use]
    pub const fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    #[must_use]
    pub const fn with_clear_delay(mut self, delay: Duration) -> Self {
        self.clear_delay = delay;
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Seeds the greeting when entering chat mode with an empty transcript.
    ///
    /// Returns `true` if a greeting was added.
    pub fn enter(&mut self) -> bool {
        if !self.turns.is_empty() {
            return false;
        }
        self.push(Role::Assistant, GREETING.to_string());
        true
    }

    /// Sends `text` and waits for the reply.
    ///
    /// Failures never surface as errors; they become an assistant turn.
    pub async fn send<S>(&mut self, service: &S, text: &str) -> SendOutcome
    where
        S: CompletionService + ?Sized,
    {
        let Some(pending) = self.begin(text) else {
            return SendOutcome::Ignored;
        };
        let result = service.complete(pending.messages()).await;
        self.resolve(pending, result)
    }

    /// First phase of a send: records the user turn and builds the payload.
    ///
    /// Returns `None` for blank input or while another request is pending.
    pub fn begin(&mut self, text: &str) -> Option<PendingRequest> {
        if text.trim().is_empty() || self.in_flight {
            return None;
        }

        let start = self.turns.len().saturating_sub(self.window);
        let mut messages: Vec<Message> = self.turns[start..].iter().map(Message::from).collect();

        let user_turn = self.push(Role::User, text.to_string());
        messages.push(Message {
            role: Role::User,
            content: text.to_string(),
        });
        self.in_flight = true;

        debug!(
            session = %self.session_id,
            messages = messages.len(),
            "chat request started"
        );
        Some(PendingRequest {
            user_turn,
            messages,
        })
    }

    /// Second phase of a send: appends the reply or an apology.
    pub fn resolve(
        &mut self,
        pending: PendingRequest,
        result: Result<String, UpstreamError>,
    ) -> SendOutcome {
        self.in_flight = false;
        debug!(session = %self.session_id, user_turn = pending.user_turn.0, "chat request resolved");

        match result {
            Ok(reply) => {
                let text = if reply.trim().is_empty() {
                    EMPTY_REPLY_FALLBACK.to_string()
                } else {
                    reply
                };
                SendOutcome::Replied(self.push(Role::Assistant, text))
            }
            Err(err) => {
                warn!(session = %self.session_id, error = %err, "chat request failed");
                if err.is_configuration() {
                    self.notifier.notify(&Notice::MissingCredential);
                }
                SendOutcome::Failed(self.push(Role::Assistant, failure_text(&err)))
            }
        }
    }

    /// Empties the conversation, then greets again after a short pause.
    pub async fn clear(&mut self) {
        self.turns.clear();
        tokio::time::sleep(self.clear_delay).await;
        self.push(Role::Assistant, GREETING.to_string());
    }

    fn push(&mut self, role: Role, text: String) -> TurnId {
        let id = TurnId(self.next_id);
        self.next_id += 1;
        self.turns.push(ChatTurn {
            id,
            role,
            text,
            created_at: Utc::now(),
        });
        id
    }
}

fn failure_text(err: &UpstreamError) -> String {
    let reason = match err {
        UpstreamError::NotConfigured => Some(
            "Looks like the AI service needs an API key. Whoever runs this shell should add one to the config."
                .to_string(),
        ),
        UpstreamError::Transport(detail) | UpstreamError::Malformed(detail)
            if detail.trim().is_empty() =>
        {
            None
        }
        other => Some(format!("Sorry, {other}.")),
    };

    format!(
        "Oops! {} Try again in a moment, or explore the other shell commands.",
        reason.as_deref().unwrap_or(GENERIC_FAILURE)
    )
}
