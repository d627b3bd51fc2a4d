//! The completion service boundary used by the chat relay.

use async_trait::async_trait;
use thiserror::Error;

use super::turn::Message;

/// Why a completion request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// No credential is available for the completion service.
    #[error("the AI service is not configured (missing API key)")]
    NotConfigured,
    #[error("could not reach the AI service: {0}")]
    Transport(String),
    #[error("the AI service answered with status {status}")]
    Status { status: u16, body: String },
    #[error("the AI service sent a reply I couldn't read: {0}")]
    Malformed(String),
}

impl UpstreamError {
    /// Operator misconfiguration rather than a transient failure.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::NotConfigured)
    }
}

/// Anything that can turn a conversation into a reply.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Returns the assistant's reply to `messages`, oldest first.
    async fn complete(&self, messages: &[Message]) -> Result<String, UpstreamError>;
}

/// A service that was never set up; every request fails as unconfigured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredService;

#[async_trait]
impl CompletionService for UnconfiguredService {
    async fn complete(&self, _messages: &[Message]) -> Result<String, UpstreamError> {
        Err(UpstreamError::NotConfigured)
    }
}
