//! Bounded like loop over a [`LikeGateway`].

use tracing::{info, warn};

use super::error::LikeError;
use super::gateway::{HttpLikeGateway, LikeGateway};
use super::model::{GatewayConfig, LIKE_CAP, LIKES_PER_REQUEST, LikeOutcome};

/// Why a like sequence stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The cap was reached; every call succeeded.
    CapReached,
    /// A call failed and the sequence was abandoned.
    Failed(LikeError),
}

impl StopReason {
    /// Message associated with the stop.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::CapReached => format!("已达到单次点赞上限{LIKE_CAP}次"),
            Self::Failed(error) => error.user_message(),
        }
    }
}

/// Sends increments of [`LIKES_PER_REQUEST`] until [`LIKE_CAP`] is reached
/// or the first call fails.
///
/// Calls are strictly sequential. Likes delivered before a failure still
/// count, so the outcome is successful whenever the total is non-zero.
pub async fn accumulate_likes(gateway: &dyn LikeGateway, user_id: &str) -> LikeOutcome {
    let mut count = 0_u32;

    let reason = loop {
        if let Err(error) = gateway.send_like(user_id, LIKES_PER_REQUEST).await {
            break StopReason::Failed(error);
        }
        count += LIKES_PER_REQUEST;
        if count >= LIKE_CAP {
            break StopReason::CapReached;
        }
    };

    if count > 0 {
        info!("sent {count} likes to {user_id}, stopped: {}", reason.message());
        LikeOutcome::delivered(count)
    } else {
        let message = reason.message();
        warn!("no likes sent to {user_id}: {message}");
        LikeOutcome::failed(message)
    }
}

/// Sends likes to `user_id` through the NapCat gateway described by
/// `config`, bounding each call by `config.timeout`.
///
/// A gateway that cannot be constructed is reported as a failed outcome
/// without any HTTP call.
pub async fn request_likes(user_id: &str, config: &GatewayConfig) -> LikeOutcome {
    match HttpLikeGateway::new(config) {
        Ok(gateway) => accumulate_likes(&gateway, user_id).await,
        Err(error) => {
            warn!("cannot reach NapCat gateway: {error}");
            LikeOutcome::failed(error.user_message())
        }
    }
}

#[cfg(test)]
#[path = "requester_tests.rs"]
mod tests;
