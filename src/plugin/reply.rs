//! Reply formatting and delivery for the like command.

use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::ai::{ReplyRewriter, RewriteFlags, RewriteRequest};
use crate::napcat::LikeOutcome;

use super::context::CommandContext;

/// Context handed to the rewriter alongside the plain reply.
pub const REWRITE_REASON: &str = "用户正在请求点赞。你尝试进行了点赞，请根据点赞结果生成回复。";

/// Pause after each rewritten segment so the transport keeps them in order.
pub const SEGMENT_PAUSE: Duration = Duration::from_millis(300);

const REWRITTEN_NOTE: &str = "已发送重写后的点赞回复";
const PLAIN_NOTE: &str = "已发送点赞回复";

/// How a reply is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeliveryOptions {
    /// Route the reply through the rewriter first.
    pub rewrite: bool,
    /// Flags forwarded to the rewriter.
    pub flags: RewriteFlags,
}

/// Formats the chat reply for a like outcome.
#[must_use]
pub fn format_reply(display_name: Option<&str>, outcome: &LikeOutcome) -> String {
    let target = display_name
        .filter(|name| !name.is_empty())
        .map_or_else(String::new, |name| format!("为 {name} "));

    if outcome.success {
        format!("已成功{target}点赞 {} 次", outcome.count)
    } else {
        format!("{target}点赞失败: {}", outcome.failure_message)
    }
}

/// Sends `raw_reply`, rewriting it first when enabled.
///
/// Rewritten segments are sent one by one in order, each followed by
/// [`SEGMENT_PAUSE`]. A failed or empty rewrite falls back to the plain
/// reply. Returns a short note describing what was sent.
pub async fn deliver_reply(
    context: &dyn CommandContext,
    rewriter: &dyn ReplyRewriter,
    options: DeliveryOptions,
    raw_reply: &str,
) -> &'static str {
    if options.rewrite {
        let request = RewriteRequest::new(raw_reply, REWRITE_REASON, options.flags);
        match rewriter
            .rewrite_reply(context.chat_stream(), &request)
            .await
        {
            Ok(segments) if !segments.is_empty() => {
                for segment in &segments {
                    send_or_log(context, segment).await;
                    sleep(SEGMENT_PAUSE).await;
                }
                return REWRITTEN_NOTE;
            }
            Ok(_) => warn!("reply rewrite produced no segments, sending the original reply"),
            Err(error) => warn!("reply rewrite failed, sending the original reply: {error}"),
        }
    }

    send_or_log(context, raw_reply).await;
    PLAIN_NOTE
}

async fn send_or_log(context: &dyn CommandContext, text: &str) {
    if let Err(error) = context.send_text(text).await {
        warn!("{error}");
    }
}
