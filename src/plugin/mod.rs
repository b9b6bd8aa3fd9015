//! Chat command that sends likes to the requesting user.
//!
//! The host routes messages matching [`LIKE_COMMAND_PATTERN`] to
//! [`LikeCommand::execute`], supplying the incoming message as a
//! [`CommandContext`]. Identity lookup and reply rewriting are injected as
//! [`PersonDirectory`] and [`crate::ai::ReplyRewriter`].

mod command;
mod context;
mod directory;
mod reply;
mod trigger;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use command::{CommandResult, LikeCommand, PLATFORM};
pub use context::{CommandContext, DeliveryError, PersonDirectory};
pub use directory::StaticPersonDirectory;
pub use reply::{DeliveryOptions, REWRITE_REASON, SEGMENT_PAUSE, deliver_reply, format_reply};
pub use trigger::{LIKE_COMMAND_PATTERN, is_like_trigger};

#[cfg(test)]
pub use context::MockPersonDirectory;
