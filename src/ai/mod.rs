//! AI integration services.
//!
//! Holds the reply rewriter that rephrases plain command replies in the
//! bot's persona before they are sent.

pub mod reply_rewrite;

pub use reply_rewrite::{
    ChatStream, DisabledReplyRewriter, OpenAiReplyRewriteConfig, OpenAiReplyRewriter,
    ReplyRewriter, RewriteError, RewriteFlags, RewriteRequest, split_reply,
};

#[cfg(test)]
pub use reply_rewrite::MockReplyRewriter;
