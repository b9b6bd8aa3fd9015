//! Console host: runs the like command for a message given on the command
//! line and prints the bot's replies to stdout.

mod console;

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use qq_like::ai::{
    ChatStream, DisabledReplyRewriter, OpenAiReplyRewriteConfig, OpenAiReplyRewriter,
    ReplyRewriter,
};
use qq_like::plugin::{PLATFORM, StaticPersonDirectory};
use qq_like::{CommandResult, LikeCommand, LikePluginConfig, is_like_trigger};
use thiserror::Error;
use tracing::{info, warn};

pub use console::ConsoleContext;

/// Failures that stop the console host before the command runs.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Writing to the terminal failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

/// Loads configuration and runs the command.
///
/// Returns `None` when the message is not a like trigger.
///
/// # Errors
///
/// Returns [`CliError`] when configuration cannot be loaded or the
/// terminal cannot be written to.
pub async fn run() -> Result<Option<CommandResult>, CliError> {
    let config = LikePluginConfig::load().map_err(|error| CliError::Configuration {
        message: error.to_string(),
    })?;

    if !is_like_trigger(&config.message) {
        writeln!(
            io::stderr().lock(),
            "message {:?} does not trigger the like command",
            config.message
        )
        .map_err(|error| CliError::Io {
            message: error.to_string(),
        })?;
        return Ok(None);
    }

    let directory = build_directory(&config);
    let rewriter = build_rewriter(&config);
    let chat = ChatStream::new(PLATFORM, config.user_id.as_deref().unwrap_or("console"));
    let context = ConsoleContext::new(config.user_id.clone(), chat, io::stdout());

    let result = LikeCommand::new(&config, &directory, rewriter.as_ref())
        .execute(&context)
        .await;
    info!("{}", result.message);
    Ok(Some(result))
}

/// Maps the outcome of [`run`] to the process exit code, reporting errors
/// on `stderr`.
pub fn exit_code(
    outcome: &Result<Option<CommandResult>, CliError>,
    stderr: &mut impl Write,
) -> ExitCode {
    match outcome {
        Ok(None) => ExitCode::SUCCESS,
        Ok(Some(result)) if result.success => ExitCode::SUCCESS,
        Ok(Some(_)) => ExitCode::FAILURE,
        Err(error) => {
            drop(writeln!(stderr, "{error}"));
            ExitCode::FAILURE
        }
    }
}

fn build_directory(config: &LikePluginConfig) -> StaticPersonDirectory {
    match (config.user_id.as_deref(), config.display_name.as_deref()) {
        (Some(user_id), Some(name)) => {
            StaticPersonDirectory::new().with_person(PLATFORM, user_id, name)
        }
        _ => StaticPersonDirectory::new(),
    }
}

fn build_rewriter(config: &LikePluginConfig) -> Box<dyn ReplyRewriter> {
    if !config.rewrite_enabled() {
        return Box::new(DisabledReplyRewriter);
    }
    let Some(api_key) = config.resolve_ai_api_key() else {
        warn!("reply rewriting is enabled but no AI API key is configured");
        return Box::new(DisabledReplyRewriter);
    };

    let rewrite_config = OpenAiReplyRewriteConfig::new(
        config.ai_base_url.clone(),
        config.ai_model.clone(),
        Some(api_key),
        config.ai_timeout(),
    )
    .with_persona(config.persona_prompt.clone());
    Box::new(OpenAiReplyRewriter::new(rewrite_config))
}
