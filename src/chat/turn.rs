use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Opaque identity of a chat turn, unique within one relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnId(pub(crate) u64);

/// One entry of the chat transcript.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub id: TurnId,
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A turn as sent upstream: role and text only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl From<&ChatTurn> for Message {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            role: turn.role,
            content: turn.text.clone(),
        }
    }
}
