//! Plugin configuration loaded from CLI, environment, and files.
//!
//! The configuration is read once at start-up into [`LikePluginConfig`].
//! Settings that have a built-in default are resolved through accessors
//! such as [`LikePluginConfig::rewrite_enabled`], so a layer that leaves a
//! setting out never masks a lower layer.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in plugin defaults
//! 2. **Configuration file** – `.qq-like.toml` in the current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `QQ_LIKE_NAPCAT_HOST`, `QQ_LIKE_NAPCAT_PORT`,
//!    `QQ_LIKE_NAPCAT_TOKEN`, ...
//! 4. **Command-line arguments** – `--user-id`/`-u`, `--napcat-host`, ...
//!
//! # Configuration File
//!
//! Flat keys:
//!
//! ```toml
//! napcat_host = "127.0.0.1"
//! napcat_port = 9999
//! napcat_token = ""
//! enable_rewrite_reply = true
//! enable_splitter = false
//! ```
//!
//! The plugin's sectioned layout is accepted as well. Flat keys, from any
//! layer, win over the sections:
//!
//! ```toml
//! [like_plugin]
//! enable_rewrite_reply = true
//! enable_splitter = false
//!
//! [napcat]
//! host = "127.0.0.1"
//! port = 9999
//! token = ""
//! ```

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::ai::RewriteFlags;
use crate::napcat::{GatewayConfig, LikeError};

const DEFAULT_NAPCAT_HOST: &str = "127.0.0.1";
const DEFAULT_NAPCAT_PORT: u16 = 9999;
const DEFAULT_REWRITE_REPLY: bool = true;
const DEFAULT_TRIGGER_MESSAGE: &str = "/like";
const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_AI_TIMEOUT_SECONDS: u64 = 20;
const DEFAULT_PERSONA_PROMPT: &str = "你是麦麦，一个活泼友善的QQ群聊机器人，说话简短自然。";

/// `[like_plugin]` table of the sectioned file layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LikePluginSection {
    /// Same as [`LikePluginConfig::enable_rewrite_reply`].
    pub enable_rewrite_reply: Option<bool>,
    /// Same as [`LikePluginConfig::enable_splitter`].
    pub enable_splitter: Option<bool>,
}

/// `[napcat]` table of the sectioned file layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NapcatSection {
    /// Same as [`LikePluginConfig::napcat_host`].
    pub host: Option<String>,
    /// Same as [`LikePluginConfig::napcat_port`].
    pub port: Option<u16>,
    /// Same as [`LikePluginConfig::napcat_token`].
    pub token: Option<String>,
}

/// Plugin configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use qq_like::LikePluginConfig;
///
/// let config = LikePluginConfig::load().expect("failed to load configuration");
/// let gateway = config.gateway_config().expect("gateway configured");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "QQ_LIKE",
    discovery(
        dotfile_name = ".qq-like.toml",
        config_file_name = "qq-like.toml",
        app_name = "qq-like"
    )
)]
pub struct LikePluginConfig {
    /// QQ account of the user issuing the command.
    ///
    /// Can be provided via:
    /// - CLI: `--user-id <ID>` or `-u <ID>`
    /// - Environment: `QQ_LIKE_USER_ID`
    #[ortho_config(cli_short = 'u')]
    pub user_id: Option<String>,

    /// Display name reported by the identity lookup for `user_id`.
    #[ortho_config(cli_short = 'n')]
    pub display_name: Option<String>,

    /// Incoming message text; it must match the like trigger.
    #[ortho_config(cli_short = 'm')]
    pub message: String,

    /// Rewrites the reply in the bot persona before sending it.
    ///
    /// Unset means on. Can be provided via:
    /// - CLI: `--enable-rewrite-reply <true|false>`
    /// - Environment: `QQ_LIKE_ENABLE_REWRITE_REPLY`
    /// - Config file: `enable_rewrite_reply = false`
    pub enable_rewrite_reply: Option<bool>,

    /// Splits long rewritten replies into several messages. Unset means off.
    pub enable_splitter: Option<bool>,

    /// Lets the rewriter add deliberate Chinese typos for a casual tone.
    /// Unset means off.
    pub enable_chinese_typo: Option<bool>,

    /// NapCat HTTP service host; `127.0.0.1` when unset.
    pub napcat_host: Option<String>,

    /// NapCat HTTP service port; `9999` when unset.
    pub napcat_port: Option<u16>,

    /// NapCat access token sent as the `Authorization` header.
    pub napcat_token: Option<String>,

    /// Timeout for each NapCat HTTP call, in seconds.
    pub http_timeout_seconds: u64,

    /// Base URL of the OpenAI-compatible API used to rewrite replies.
    pub ai_base_url: String,

    /// Model used to rewrite replies.
    pub ai_model: String,

    /// API key for the rewrite service; falls back to `OPENAI_API_KEY`.
    pub ai_api_key: Option<String>,

    /// Timeout for rewrite requests, in seconds.
    pub ai_timeout_seconds: u64,

    /// Bot persona the rewriter writes in.
    pub persona_prompt: String,

    /// Sectioned `[like_plugin]` settings, consulted when the flat key is unset.
    #[ortho_config(skip_cli)]
    pub like_plugin: LikePluginSection,

    /// Sectioned `[napcat]` settings, consulted when the flat key is unset.
    #[ortho_config(skip_cli)]
    pub napcat: NapcatSection,
}

impl Default for LikePluginConfig {
    fn default() -> Self {
        Self {
            user_id: None,
            display_name: None,
            message: DEFAULT_TRIGGER_MESSAGE.to_owned(),
            enable_rewrite_reply: None,
            enable_splitter: None,
            enable_chinese_typo: None,
            napcat_host: None,
            napcat_port: None,
            napcat_token: None,
            http_timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
            ai_base_url: DEFAULT_AI_BASE_URL.to_owned(),
            ai_model: DEFAULT_AI_MODEL.to_owned(),
            ai_api_key: None,
            ai_timeout_seconds: DEFAULT_AI_TIMEOUT_SECONDS,
            persona_prompt: DEFAULT_PERSONA_PROMPT.to_owned(),
            like_plugin: LikePluginSection::default(),
            napcat: NapcatSection::default(),
        }
    }
}

impl LikePluginConfig {
    /// Whether replies go through the rewriter.
    #[must_use]
    pub const fn rewrite_enabled(&self) -> bool {
        resolve_flag(
            self.enable_rewrite_reply,
            self.like_plugin.enable_rewrite_reply,
            DEFAULT_REWRITE_REPLY,
        )
    }

    /// Whether rewritten replies are split into several messages.
    #[must_use]
    pub const fn splitter_enabled(&self) -> bool {
        resolve_flag(self.enable_splitter, self.like_plugin.enable_splitter, false)
    }

    /// Returns the NapCat gateway settings, including the call timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LikeError::Configuration`] when the host is blank or the
    /// port is zero.
    pub fn gateway_config(&self) -> Result<GatewayConfig, LikeError> {
        let host = self
            .napcat_host
            .as_deref()
            .or(self.napcat.host.as_deref())
            .unwrap_or(DEFAULT_NAPCAT_HOST)
            .trim();
        if host.is_empty() {
            return Err(LikeError::Configuration {
                message: "napcat_host is required".to_owned(),
            });
        }
        let port = self
            .napcat_port
            .or(self.napcat.port)
            .unwrap_or(DEFAULT_NAPCAT_PORT);
        if port == 0 {
            return Err(LikeError::Configuration {
                message: "napcat_port is required".to_owned(),
            });
        }
        let token = self
            .napcat_token
            .clone()
            .or_else(|| self.napcat.token.clone());

        Ok(GatewayConfig::new(host, port, token).with_timeout(self.gateway_timeout()))
    }

    /// Timeout applied to each NapCat HTTP call.
    #[must_use]
    pub const fn gateway_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    /// Timeout applied to rewrite requests.
    #[must_use]
    pub const fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_seconds)
    }

    /// Resolves the rewrite API key, falling back to `OPENAI_API_KEY`.
    #[must_use]
    pub fn resolve_ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .or_else(|| env::var("OPENAI_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Flags forwarded to the rewrite collaborator.
    #[must_use]
    pub const fn rewrite_flags(&self) -> RewriteFlags {
        RewriteFlags {
            enable_chinese_typo: resolve_flag(self.enable_chinese_typo, None, false),
            enable_splitter: self.splitter_enabled(),
        }
    }
}

const fn resolve_flag(flat: Option<bool>, section: Option<bool>, default: bool) -> bool {
    match (flat, section) {
        (Some(value), _) | (None, Some(value)) => value,
        (None, None) => default,
    }
}
