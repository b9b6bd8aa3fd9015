//! QQ like command for chat bots backed by a NapCat HTTP gateway.
//!
//! The library sends profile likes to the user who asked for them, in
//! fixed increments up to a per-invocation cap, and answers in chat with
//! the result, optionally rephrased by an AI rewriter in the bot's persona.

pub mod ai;
pub mod config;
pub mod napcat;
pub mod plugin;
pub mod telemetry;

pub use config::LikePluginConfig;
pub use napcat::{GatewayConfig, LikeError, LikeOutcome, request_likes};
pub use plugin::{CommandContext, CommandResult, LikeCommand, PersonDirectory, is_like_trigger};
