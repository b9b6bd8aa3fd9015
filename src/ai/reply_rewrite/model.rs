//! Shared domain models for reply rewriting.

use thiserror::Error;

/// Conversation the reply belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatStream {
    /// Chat platform, e.g. `qq`.
    pub platform: String,
    /// Group or private-chat identifier on that platform.
    pub chat_id: String,
}

impl ChatStream {
    /// Constructs a chat handle.
    #[must_use]
    pub fn new(platform: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            chat_id: chat_id.into(),
        }
    }
}

/// Feature switches forwarded to the rewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteFlags {
    /// Allow deliberate typos for a casual tone.
    pub enable_chinese_typo: bool,
    /// Split the rewritten reply into several messages.
    pub enable_splitter: bool,
}

/// Input payload for a rewrite request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRequest {
    raw_reply: String,
    reason: String,
    flags: RewriteFlags,
}

impl RewriteRequest {
    /// Construct a request from the plain reply and the reason it was produced.
    #[must_use]
    pub fn new(raw_reply: impl Into<String>, reason: impl Into<String>, flags: RewriteFlags) -> Self {
        Self {
            raw_reply: raw_reply.into(),
            reason: reason.into(),
            flags,
        }
    }

    /// Plain reply that should be rephrased.
    #[must_use]
    pub const fn raw_reply(&self) -> &str {
        self.raw_reply.as_str()
    }

    /// Why the reply was produced.
    #[must_use]
    pub const fn reason(&self) -> &str {
        self.reason.as_str()
    }

    /// Feature switches for this request.
    #[must_use]
    pub const fn flags(&self) -> RewriteFlags {
        self.flags
    }
}

/// Failures raised by a rewriter. Callers fall back to the plain reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RewriteError {
    /// The rewriter is not configured (e.g. no API key).
    #[error("rewrite configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Networking failed while calling the rewrite service.
    #[error("rewrite request transport failed: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The rewrite service returned an error or an unreadable payload.
    #[error("rewrite service error: {message}")]
    Api {
        /// Status or decoding detail.
        message: String,
    },

    /// The rewrite service produced no text.
    #[error("rewrite service returned no text")]
    EmptyResponse,
}
