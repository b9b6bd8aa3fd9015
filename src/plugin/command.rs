//! The like command: resolve the sender, send likes, report back.

use tracing::{info, warn};

use crate::ai::ReplyRewriter;
use crate::config::LikePluginConfig;
use crate::napcat::request_likes;

use super::context::{CommandContext, PersonDirectory};
use super::reply::{DeliveryOptions, deliver_reply, format_reply};

/// Platform name used for identity lookups.
pub const PLATFORM: &str = "qq";

/// Result reported back to the host after a command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether any likes were delivered.
    pub success: bool,
    /// Log line describing what happened.
    pub message: String,
    /// Host interception level; the like command always consumes the message.
    pub intercept_level: u8,
}

impl CommandResult {
    fn new(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            intercept_level: 1,
        }
    }
}

/// Handles the like command for one incoming message.
pub struct LikeCommand<'a> {
    config: &'a LikePluginConfig,
    directory: &'a dyn PersonDirectory,
    rewriter: &'a dyn ReplyRewriter,
}

impl<'a> LikeCommand<'a> {
    /// Creates the command from the plugin configuration and collaborators.
    #[must_use]
    pub const fn new(
        config: &'a LikePluginConfig,
        directory: &'a dyn PersonDirectory,
        rewriter: &'a dyn ReplyRewriter,
    ) -> Self {
        Self {
            config,
            directory,
            rewriter,
        }
    }

    /// Runs the command. Every failure is reported to the chat and reflected
    /// in the returned [`CommandResult`]; nothing is propagated.
    pub async fn execute(&self, context: &dyn CommandContext) -> CommandResult {
        let Some(user_id) = context.user_id().filter(|id| !id.is_empty()) else {
            if let Err(error) = context.send_text("无法获取用户ID,点赞失败").await {
                warn!("{error}");
            }
            return CommandResult::new(false, "无法获取用户ID");
        };

        let person_id = self.directory.person_id(PLATFORM, user_id);
        let display_name = self.directory.person_name(&person_id).await;

        let gateway = match self.config.gateway_config() {
            Ok(gateway) => gateway,
            Err(error) => {
                warn!("{error}");
                deliver_reply(
                    context,
                    self.rewriter,
                    self.delivery_options(),
                    "Napcat服务配置不完整，点赞失败",
                )
                .await;
                return CommandResult::new(false, error.user_message());
            }
        };

        let outcome = request_likes(user_id, &gateway).await;
        let raw_reply = format_reply(display_name.as_deref(), &outcome);
        info!("like command for {user_id}: {raw_reply}");

        let note = deliver_reply(context, self.rewriter, self.delivery_options(), &raw_reply).await;
        CommandResult::new(outcome.success, format!("{raw_reply} {note}"))
    }

    const fn delivery_options(&self) -> DeliveryOptions {
        DeliveryOptions {
            rewrite: self.config.rewrite_enabled(),
            flags: self.config.rewrite_flags(),
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
