//! NapCat like gateway and the bounded like loop.
//!
//! NapCat exposes `POST /send_like`, which accepts a QQ account and a number
//! of likes. This module wraps that endpoint behind [`LikeGateway`] and
//! drives it from [`accumulate_likes`], which sends fixed increments until
//! the per-invocation cap is reached or a call fails.

pub mod error;
pub mod gateway;
pub mod model;
pub mod requester;

pub use error::LikeError;
pub use gateway::{HttpLikeGateway, LikeGateway};
pub use model::{
    DEFAULT_GATEWAY_TIMEOUT, GatewayConfig, GatewayReply, LIKE_CAP, LIKES_PER_REQUEST, LikeOutcome,
    SendLikePayload,
};
pub use requester::{StopReason, accumulate_likes, request_likes};

#[cfg(test)]
pub use gateway::MockLikeGateway;
