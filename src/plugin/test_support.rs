//! Test-support utilities for command flows.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::ai::ChatStream;

use super::context::{CommandContext, DeliveryError};

/// A message captured by [`RecordingContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Tokio clock reading when the message was sent.
    pub at: Instant,
    /// Message text.
    pub text: String,
}

/// Command context that records every sent message.
#[derive(Debug)]
pub struct RecordingContext {
    user_id: Option<String>,
    chat: ChatStream,
    sent: Mutex<Vec<SentMessage>>,
}

impl RecordingContext {
    /// Context for a message sent by `user_id` in a private chat.
    #[must_use]
    pub fn from_user(user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self {
            chat: ChatStream::new("qq", user_id.clone()),
            user_id: Some(user_id),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Context for a message whose sender could not be determined.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            chat: ChatStream::new("qq", "unknown"),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Messages sent so far, in order.
    #[must_use]
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    /// Texts sent so far, in order.
    #[must_use]
    pub fn sent_texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|message| message.text).collect()
    }
}

#[async_trait]
impl CommandContext for RecordingContext {
    fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    fn chat_stream(&self) -> &ChatStream {
        &self.chat
    }

    async fn send_text(&self, text: &str) -> Result<(), DeliveryError> {
        let mut sent = self.sent.lock().map_err(|error| DeliveryError {
            message: error.to_string(),
        })?;
        sent.push(SentMessage {
            at: Instant::now(),
            text: text.to_owned(),
        });
        Ok(())
    }
}
