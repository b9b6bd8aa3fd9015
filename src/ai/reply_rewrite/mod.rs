//! Persona-based reply rewriting shared by command handlers.

mod model;
mod openai;
mod service;
mod splitter;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use model::{ChatStream, RewriteError, RewriteFlags, RewriteRequest};
pub use openai::{OpenAiReplyRewriteConfig, OpenAiReplyRewriter};
pub use service::{DisabledReplyRewriter, ReplyRewriter};
pub use splitter::split_reply;

#[cfg(test)]
pub use service::MockReplyRewriter;
