//! Gateways for sending likes through NapCat.
//!
//! The trait seam lets the like loop run against a mock in tests while the
//! reqwest implementation handles real HTTP calls.

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use reqwest::Client;
use tracing::{debug, error};
use url::Url;

use super::error::LikeError;
use super::model::{GatewayConfig, GatewayReply, SendLikePayload};

/// Gateway that can deliver one batch of likes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeGateway: Send + Sync {
    /// Request `times` likes for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns the [`LikeError`] variant for the phase that failed.
    async fn send_like(&self, user_id: &str, times: u32) -> Result<(), LikeError>;
}

/// reqwest-backed NapCat gateway.
#[derive(Debug, Clone)]
pub struct HttpLikeGateway {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl HttpLikeGateway {
    /// Builds a gateway for the configured NapCat instance, using the
    /// configuration's timeout for every call.
    ///
    /// # Errors
    ///
    /// Returns [`LikeError::Configuration`] when the address is invalid and
    /// [`LikeError::Transport`] when the HTTP client cannot be constructed.
    pub fn new(config: &GatewayConfig) -> Result<Self, LikeError> {
        let endpoint = config.send_like_url()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| LikeError::Transport {
                message: format!("failed to configure NapCat HTTP client: {error}"),
            })?;

        Ok(Self {
            client,
            endpoint,
            token: config.token.clone(),
        })
    }

    /// Endpoint this gateway posts to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl LikeGateway for HttpLikeGateway {
    async fn send_like(&self, user_id: &str, times: u32) -> Result<(), LikeError> {
        let payload = SendLikePayload { user_id, times };
        debug!(
            "sending like request: {}",
            serde_json::to_string(&payload).unwrap_or_default()
        );

        let mut request = self.client.post(self.endpoint.clone()).json(&payload);
        if let Some(token) = self.token.as_deref() {
            request = request.header(AUTHORIZATION, token);
        }

        let response = request.send().await.map_err(|source| {
            error!("like request failed: {source}");
            LikeError::Transport {
                message: source.to_string(),
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| {
            error!("failed to read like response: {source}");
            LikeError::ReadBody {
                message: source.to_string(),
            }
        })?;
        debug!("like response status: {status}, body: {body}");

        let reply: GatewayReply = serde_json::from_str(&body).map_err(|source| {
            error!("failed to parse like response: {source}");
            LikeError::Parse {
                message: source.to_string(),
            }
        })?;

        if reply.is_ok() {
            Ok(())
        } else {
            Err(LikeError::Rejected {
                message: reply.rejection_message(&body),
            })
        }
    }
}
