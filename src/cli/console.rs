//! Command context that prints replies to a terminal.

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use qq_like::ai::ChatStream;
use qq_like::plugin::{CommandContext, DeliveryError};

/// [`CommandContext`] writing each sent message as one line.
#[derive(Debug)]
pub struct ConsoleContext<W> {
    user_id: Option<String>,
    chat: ChatStream,
    writer: Mutex<W>,
}

impl<W: Write + Send> ConsoleContext<W> {
    /// Creates a context for a message from `user_id` in `chat`.
    pub const fn new(user_id: Option<String>, chat: ChatStream, writer: W) -> Self {
        Self {
            user_id,
            chat,
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the context and returns the writer.
    #[cfg(test)]
    pub fn into_writer(self) -> Option<W> {
        self.writer.into_inner().ok()
    }
}

#[async_trait]
impl<W: Write + Send> CommandContext for ConsoleContext<W> {
    fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    fn chat_stream(&self) -> &ChatStream {
        &self.chat
    }

    async fn send_text(&self, text: &str) -> Result<(), DeliveryError> {
        let mut writer = self.writer.lock().map_err(|error| DeliveryError {
            message: error.to_string(),
        })?;
        writeln!(writer, "{text}")
            .and_then(|()| writer.flush())
            .map_err(|error| DeliveryError {
                message: error.to_string(),
            })
    }
}
