//! Rewriter contract and the disabled implementation.

use async_trait::async_trait;

use super::model::{ChatStream, RewriteError, RewriteRequest};

/// Rephrases a plain reply into one or more ordered message segments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReplyRewriter: Send + Sync + std::fmt::Debug {
    /// Rewrite `request` for the conversation `chat`.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError`] when the rewrite cannot be produced.
    async fn rewrite_reply(
        &self,
        chat: &ChatStream,
        request: &RewriteRequest,
    ) -> Result<Vec<String>, RewriteError>;
}

/// Rewriter used when no rewrite service is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledReplyRewriter;

#[async_trait]
impl ReplyRewriter for DisabledReplyRewriter {
    async fn rewrite_reply(
        &self,
        _chat: &ChatStream,
        _request: &RewriteRequest,
    ) -> Result<Vec<String>, RewriteError> {
        Err(RewriteError::Configuration {
            message: "no rewrite service configured".to_owned(),
        })
    }
}
