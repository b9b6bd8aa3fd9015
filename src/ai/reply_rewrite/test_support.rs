//! Test-support utilities for reply rewrite flows.

use async_trait::async_trait;

use super::{ChatStream, ReplyRewriter, RewriteError, RewriteRequest};

/// Deterministic rewriter stub used by unit and behavioural tests.
#[derive(Debug, Clone)]
pub struct StubReplyRewriter {
    response: Result<Vec<String>, RewriteError>,
}

impl StubReplyRewriter {
    /// Creates a stub that always returns the provided segments.
    #[must_use]
    pub fn success<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            response: Ok(segments.into_iter().map(Into::into).collect()),
        }
    }

    /// Creates a stub that always returns the provided error.
    #[must_use]
    pub const fn failure(error: RewriteError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[async_trait]
impl ReplyRewriter for StubReplyRewriter {
    async fn rewrite_reply(
        &self,
        _chat: &ChatStream,
        _request: &RewriteRequest,
    ) -> Result<Vec<String>, RewriteError> {
        self.response.clone()
    }
}
