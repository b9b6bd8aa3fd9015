//! Host collaborators the like command talks to.

use async_trait::async_trait;
use thiserror::Error;

use crate::ai::ChatStream;

/// A chat message could not be delivered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to send message: {message}")]
pub struct DeliveryError {
    /// Transport detail from the host.
    pub message: String,
}

/// The incoming message that triggered a command, plus a way to answer it.
#[async_trait]
pub trait CommandContext: Send + Sync {
    /// Platform identifier of the sender, if the host could determine it.
    fn user_id(&self) -> Option<&str>;

    /// Conversation the message arrived in.
    fn chat_stream(&self) -> &ChatStream;

    /// Sends `text` to the conversation.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] when the host cannot send the message.
    async fn send_text(&self, text: &str) -> Result<(), DeliveryError>;
}

/// Identity lookup: platform account to person, person to display name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    /// Stable person identifier for a platform account.
    fn person_id(&self, platform: &str, user_id: &str) -> String;

    /// Display name of a person; `None` when unknown.
    async fn person_name(&self, person_id: &str) -> Option<String>;
}
