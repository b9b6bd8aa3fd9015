//! Data carried across a like invocation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::error::LikeError;

/// Likes requested by one `send_like` call.
pub const LIKES_PER_REQUEST: u32 = 10;

/// Maximum likes pursued by one invocation.
pub const LIKE_CAP: u32 = 50;

/// Client timeout applied to each `send_like` call unless overridden.
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(10);

const SEND_LIKE_PATH: &str = "send_like";

/// Connection details for the NapCat HTTP gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Gateway host name or address.
    pub host: String,
    /// Gateway HTTP port.
    pub port: u16,
    /// Raw value for the `Authorization` header, if the gateway needs one.
    pub token: Option<String>,
    /// HTTP client timeout for each call.
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Constructs a gateway configuration with [`DEFAULT_GATEWAY_TIMEOUT`].
    /// Blank tokens are discarded.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, token: Option<String>) -> Self {
        Self {
            host: host.into(),
            port,
            token: token.filter(|value| !value.trim().is_empty()),
            timeout: DEFAULT_GATEWAY_TIMEOUT,
        }
    }

    /// Replaces the per-call timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the `send_like` endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`LikeError::Configuration`] when the host does not form a
    /// valid URL.
    pub fn send_like_url(&self) -> Result<Url, LikeError> {
        let base = format!("http://{}:{}/", self.host, self.port);
        Url::parse(&base)
            .and_then(|url| url.join(SEND_LIKE_PATH))
            .map_err(|error| LikeError::Configuration {
                message: format!("invalid gateway address '{base}': {error}"),
            })
    }
}

/// JSON body of a `send_like` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendLikePayload<'a> {
    /// Account receiving the likes.
    pub user_id: &'a str,
    /// Likes requested by this call.
    pub times: u32,
}

/// Structured reply returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayReply {
    /// `ok` on success; anything else is a rejection.
    pub status: String,
    /// Reason supplied with rejections. Usually a string, but kept as raw
    /// JSON so an odd type never hides the rejection.
    #[serde(default)]
    pub message: Option<Value>,
}

impl GatewayReply {
    /// Whether the gateway accepted the request.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// Rejection text: the gateway message when non-empty, otherwise a
    /// fallback embedding the raw body.
    #[must_use]
    pub fn rejection_message(&self, raw_body: &str) -> String {
        let message = match &self.message {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        };
        if message.is_empty() {
            format!("未知错误，响应内容: {raw_body}")
        } else {
            message
        }
    }
}

/// Aggregate result of one like invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeOutcome {
    /// True when at least one increment succeeded.
    pub success: bool,
    /// Likes delivered; zero on failure.
    pub count: u32,
    /// Reason for failure; empty on success.
    pub failure_message: String,
}

impl LikeOutcome {
    /// Outcome for a sequence that delivered `count` likes.
    #[must_use]
    pub const fn delivered(count: u32) -> Self {
        Self {
            success: true,
            count,
            failure_message: String::new(),
        }
    }

    /// Outcome for a sequence that delivered nothing.
    #[must_use]
    pub fn failed(failure_message: impl Into<String>) -> Self {
        Self {
            success: false,
            count: 0,
            failure_message: failure_message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use std::time::Duration;

    use super::{DEFAULT_GATEWAY_TIMEOUT, GatewayConfig, GatewayReply};

    #[rstest]
    fn send_like_url_joins_host_port_and_path() {
        let config = GatewayConfig::new("127.0.0.1", 9999, None);
        let url = config.send_like_url().expect("address should be valid");

        assert_eq!(url.as_str(), "http://127.0.0.1:9999/send_like");
    }

    #[rstest]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_owned()))]
    #[case(None)]
    fn blank_tokens_are_dropped(#[case] token: Option<String>) {
        let config = GatewayConfig::new("localhost", 3000, token);
        assert!(config.token.is_none());
    }

    #[rstest]
    fn timeout_defaults_and_can_be_replaced() {
        let config = GatewayConfig::new("localhost", 3000, None);
        assert_eq!(config.timeout, DEFAULT_GATEWAY_TIMEOUT);

        let shortened = config.with_timeout(Duration::from_millis(250));
        assert_eq!(shortened.timeout, Duration::from_millis(250));
    }

    #[rstest]
    fn invalid_host_is_a_configuration_error() {
        let config = GatewayConfig::new("bad host", 80, None);
        assert!(config.send_like_url().is_err());
    }

    #[rstest]
    #[case(r#"{"status":"failed","message":"今日点赞已达上限"}"#, "今日点赞已达上限")]
    #[case(r#"{"status":"failed","message":""}"#, r#"未知错误，响应内容: {"status":"failed","message":""}"#)]
    #[case(r#"{"status":"failed"}"#, r#"未知错误，响应内容: {"status":"failed"}"#)]
    #[case(r#"{"status":"failed","message":null}"#, r#"未知错误，响应内容: {"status":"failed","message":null}"#)]
    #[case(r#"{"status":"failed","message":123}"#, "123")]
    #[case(r#"{"status":"failed","message":{"code":1400}}"#, r#"{"code":1400}"#)]
    fn rejection_message_prefers_gateway_text(#[case] body: &str, #[case] expected: &str) {
        let reply: GatewayReply = serde_json::from_str(body).expect("reply should decode");

        assert!(!reply.is_ok());
        assert_eq!(reply.rejection_message(body), expected);
    }
}
