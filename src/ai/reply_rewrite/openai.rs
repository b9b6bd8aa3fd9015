//! OpenAI-compatible HTTP implementation of the reply rewriter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::{ChatStream, RewriteError, RewriteRequest};
use super::service::ReplyRewriter;
use super::splitter::split_reply;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Configuration for [`OpenAiReplyRewriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiReplyRewriteConfig {
    /// Base API URL (e.g., `https://api.openai.com/v1`).
    pub base_url: String,
    /// Model identifier sent in chat-completions requests.
    pub model: String,
    /// API key used for bearer authentication.
    pub api_key: Option<String>,
    /// HTTP timeout.
    pub timeout: Duration,
    /// Bot persona the reply is rewritten in.
    pub persona: String,
}

impl Default for OpenAiReplyRewriteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            persona: String::new(),
        }
    }
}

impl OpenAiReplyRewriteConfig {
    /// Constructs configuration with required API settings.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            timeout,
            persona: String::new(),
        }
    }

    /// Sets the persona used in the system prompt.
    #[must_use]
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }
}

/// OpenAI-compatible reply rewriter.
#[derive(Debug, Clone, Default)]
pub struct OpenAiReplyRewriter {
    config: OpenAiReplyRewriteConfig,
}

impl OpenAiReplyRewriter {
    /// Creates a rewriter from explicit configuration.
    #[must_use]
    pub const fn new(config: OpenAiReplyRewriteConfig) -> Self {
        Self { config }
    }

    fn extract_api_key(&self) -> Result<&str, RewriteError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| RewriteError::Configuration {
                message: concat!(
                    "AI API key is required (use --ai-api-key, ",
                    "QQ_LIKE_AI_API_KEY, or OPENAI_API_KEY)"
                )
                .to_owned(),
            })
    }

    fn create_http_client(&self) -> Result<Client, RewriteError> {
        Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|error| RewriteError::Configuration {
                message: format!("failed to configure AI HTTP client: {error}"),
            })
    }

    async fn complete(&self, request: &RewriteRequest) -> Result<String, RewriteError> {
        let api_key = self.extract_api_key()?;
        let endpoint = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let payload = ChatCompletionsRequest {
            model: self.config.model.as_str(),
            messages: vec![
                ChatCompletionsMessage {
                    role: "system",
                    content: build_system_prompt(self.config.persona.as_str(), request),
                },
                ChatCompletionsMessage {
                    role: "user",
                    content: build_prompt(request),
                },
            ],
        };
        let client = self.create_http_client()?;

        let response = client
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| RewriteError::Network {
                message: error.to_string(),
            })?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.map_or_else(
                |_| "(failed to read error response body)".to_owned(),
                |content| truncate_for_message(content.as_str(), 160),
            );
            return Err(RewriteError::Api {
                message: format!("AI request failed with status {}: {body}", status.as_u16()),
            });
        }

        let response_payload: ChatCompletionsResponse =
            response.json().await.map_err(|error| RewriteError::Api {
                message: format!("AI response JSON decoding failed: {error}"),
            })?;

        response_payload
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .map(ToOwned::to_owned)
            .ok_or(RewriteError::EmptyResponse)
    }
}

#[async_trait]
impl ReplyRewriter for OpenAiReplyRewriter {
    async fn rewrite_reply(
        &self,
        chat: &ChatStream,
        request: &RewriteRequest,
    ) -> Result<Vec<String>, RewriteError> {
        debug!(
            "rewriting reply for {}:{}: {}",
            chat.platform,
            chat.chat_id,
            request.raw_reply()
        );
        let text = self.complete(request).await?;
        let segments = split_reply(&text, request.flags().enable_splitter);
        if segments.is_empty() {
            return Err(RewriteError::EmptyResponse);
        }
        Ok(segments)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionsMessage>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionsMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

fn build_system_prompt(persona: &str, request: &RewriteRequest) -> String {
    let mut prompt = String::new();
    if !persona.trim().is_empty() {
        prompt.push_str(persona.trim());
        prompt.push('\n');
    }
    prompt.push_str("请用你自己的语气改写下面的回复，保留其中的事实和数字，不要提及你是AI。");
    if request.flags().enable_chinese_typo {
        prompt.push_str("可以偶尔带一点口语化的错别字。");
    }
    if request.flags().enable_splitter {
        prompt.push_str("回复可以分成几句短句，每句单独一行。");
    } else {
        prompt.push_str("只输出一句话。");
    }
    prompt
}

fn build_prompt(request: &RewriteRequest) -> String {
    format!(
        "场景：{}\n原始回复：{}",
        request.reason(),
        request.raw_reply()
    )
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output: String = message.chars().take(max_chars).collect();
    if message.chars().nth(max_chars).is_some() {
        output.push_str("...");
    }
    output
}

#[cfg(test)]
#[path = "openai_tests.rs"]
mod tests;
