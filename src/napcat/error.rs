//! Error types exposed by the NapCat like gateway.

use thiserror::Error;

/// Failures surfaced while calling the NapCat `send_like` endpoint.
///
/// Each variant corresponds to one phase of a single gateway call. All of
/// them end the current like sequence; none are retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LikeError {
    /// Gateway host or port is not configured.
    #[error("NapCat gateway configuration is incomplete: {message}")]
    Configuration {
        /// Which part of the configuration is missing.
        message: String,
    },

    /// The request could not be delivered (connection refused, timeout).
    #[error("network error talking to NapCat: {message}")]
    Transport {
        /// Transport-level error detail.
        message: String,
    },

    /// The response arrived but its body could not be read.
    #[error("failed to read NapCat response: {message}")]
    ReadBody {
        /// Error detail from the body reader.
        message: String,
    },

    /// The body was not a JSON reply with a `status` field.
    #[error("failed to parse NapCat response: {message}")]
    Parse {
        /// Decoder error detail.
        message: String,
    },

    /// NapCat answered with a status other than `ok`.
    #[error("NapCat rejected the like request: {message}")]
    Rejected {
        /// Gateway-supplied message, or a fallback embedding the raw body.
        message: String,
    },
}

impl LikeError {
    /// Chat-facing text describing the failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration { .. } => "Napcat服务配置不完整".to_owned(),
            Self::Transport { .. } => "网络请求异常".to_owned(),
            Self::ReadBody { .. } => "读取响应失败".to_owned(),
            Self::Parse { .. } => "响应解析失败".to_owned(),
            Self::Rejected { message } => message.clone(),
        }
    }
}
