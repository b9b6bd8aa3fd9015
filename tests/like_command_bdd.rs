//! Behavioural tests for the like command flow.

mod support;

use qq_like::ai::reply_rewrite::test_support::StubReplyRewriter;
use qq_like::ai::{DisabledReplyRewriter, RewriteError};
use qq_like::plugin::test_support::RecordingContext;
use qq_like::LikePluginConfig;
use qq_like::plugin::{CommandResult, LikeCommand, StaticPersonDirectory, is_like_trigger};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::json;
use support::runtime::{SharedRuntime, ensure_runtime_and_server};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(ScenarioState, Default)]
struct LikeState {
    runtime: Slot<SharedRuntime>,
    server: Slot<MockServer>,
    config: Slot<LikePluginConfig>,
    directory: Slot<StaticPersonDirectory>,
    rewriter: Slot<StubReplyRewriter>,
    sent: Slot<Vec<String>>,
    result: Slot<CommandResult>,
}

#[fixture]
fn like_state() -> LikeState {
    LikeState::default()
}

type StepResult = Result<(), Box<dyn std::error::Error>>;

fn unquote(text: &str) -> &str {
    text.trim_matches('"')
}

fn split_segments(text: &str) -> Vec<String> {
    unquote(text).split('|').map(ToOwned::to_owned).collect()
}

/// Starts the mock gateway and points the plugin configuration at it.
fn start_gateway(like_state: &LikeState) -> Result<SharedRuntime, Box<dyn std::error::Error>> {
    let runtime = ensure_runtime_and_server(&like_state.runtime, &like_state.server)?;
    let address = like_state
        .server
        .with_ref(|server| *server.address())
        .ok_or("mock server not initialised")?;

    like_state.config.set(LikePluginConfig {
        napcat_host: Some(address.ip().to_string()),
        napcat_port: Some(address.port()),
        enable_rewrite_reply: Some(false),
        http_timeout_seconds: 5,
        ..LikePluginConfig::default()
    });
    Ok(runtime)
}

fn mount(like_state: &LikeState, runtime: &SharedRuntime, mock: Mock) -> StepResult {
    like_state
        .server
        .with_ref(|server| runtime.block_on(mock.mount(server)))
        .ok_or_else(|| "mock server not initialised".into())
}

#[given("a NapCat gateway that accepts {count:u64} like requests")]
fn gateway_accepts(like_state: &LikeState, count: u64) -> StepResult {
    let runtime = start_gateway(like_state)?;
    let mock = Mock::given(method("POST"))
        .and(path("/send_like"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .up_to_n_times(count);
    mount(like_state, &runtime, mock)
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("a NapCat gateway that rejects like requests with {message}")]
fn gateway_rejects(like_state: &LikeState, message: String) -> StepResult {
    let runtime = start_gateway(like_state)?;
    let body = json!({"status": "failed", "message": unquote(&message)});
    let mock = Mock::given(method("POST"))
        .and(path("/send_like"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body));
    mount(like_state, &runtime, mock)
}

#[given("the NapCat host is not configured")]
fn host_not_configured(like_state: &LikeState) -> StepResult {
    like_state
        .config
        .with_mut(|config| config.napcat_host = Some(String::new()))
        .ok_or_else(|| "configuration not initialised".into())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("the sender {user_id} is known as {name}")]
fn sender_is_known(like_state: &LikeState, user_id: String, name: String) {
    let directory = like_state.directory.take().unwrap_or_default();
    like_state
        .directory
        .set(directory.with_person("qq", unquote(&user_id), unquote(&name)));
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("reply rewriting produces {segments}")]
fn rewriting_produces(like_state: &LikeState, segments: String) -> StepResult {
    like_state
        .config
        .with_mut(|config| config.enable_rewrite_reply = Some(true))
        .ok_or("configuration not initialised")?;
    like_state
        .rewriter
        .set(StubReplyRewriter::success(split_segments(&segments)));
    Ok(())
}

#[given("reply rewriting fails")]
fn rewriting_fails(like_state: &LikeState) -> StepResult {
    like_state
        .config
        .with_mut(|config| config.enable_rewrite_reply = Some(true))
        .ok_or("configuration not initialised")?;
    like_state
        .rewriter
        .set(StubReplyRewriter::failure(RewriteError::Network {
            message: "timeout".to_owned(),
        }));
    Ok(())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[when("the sender {user_id} sends {text}")]
fn sender_sends(like_state: &LikeState, user_id: String, text: String) -> StepResult {
    let runtime = like_state.runtime.get().ok_or("runtime not initialised")?;
    let config = like_state.config.get().ok_or("configuration not initialised")?;
    let directory = like_state.directory.get().unwrap_or_default();
    let context = RecordingContext::from_user(unquote(&user_id));

    if is_like_trigger(unquote(&text)) {
        let result = match like_state.rewriter.get() {
            Some(rewriter) => runtime.block_on(
                LikeCommand::new(&config, &directory, &rewriter).execute(&context),
            ),
            None => runtime.block_on(
                LikeCommand::new(&config, &directory, &DisabledReplyRewriter).execute(&context),
            ),
        };
        like_state.result.set(result);
    }

    like_state.sent.set(context.sent_texts());
    Ok(())
}

fn assert_sent(like_state: &LikeState, expected: &[String]) -> StepResult {
    let sent = like_state
        .sent
        .get()
        .ok_or("no message has been handled yet")?;
    if sent != expected {
        return Err(format!("expected bot to send {expected:?}, got {sent:?}").into());
    }
    Ok(())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the bot replies {text}")]
fn bot_replies(like_state: &LikeState, text: String) -> StepResult {
    assert_sent(like_state, &[unquote(&text).to_owned()])
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the bot sends in order {segments}")]
fn bot_replies_in_order(like_state: &LikeState, segments: String) -> StepResult {
    assert_sent(like_state, &split_segments(&segments))
}

#[then("the bot stays silent")]
fn bot_stays_silent(like_state: &LikeState) -> StepResult {
    if like_state.result.with_ref(|_| ()).is_some() {
        return Err("the command should not have run".into());
    }
    assert_sent(like_state, &[])
}

fn assert_success(like_state: &LikeState, expected: bool) -> StepResult {
    let success = like_state
        .result
        .with_ref(|result| result.success)
        .ok_or("the command has not run")?;
    if success != expected {
        return Err(format!("expected success={expected}, got {success}").into());
    }
    Ok(())
}

#[then("the command reports success")]
fn command_reports_success(like_state: &LikeState) -> StepResult {
    assert_success(like_state, true)
}

#[then("the command reports failure")]
fn command_reports_failure(like_state: &LikeState) -> StepResult {
    assert_success(like_state, false)
}

#[then("the gateway received {count:u64} like requests")]
fn gateway_received(like_state: &LikeState, count: u64) -> StepResult {
    let runtime = like_state.runtime.get().ok_or("runtime not initialised")?;
    let received = like_state
        .server
        .with_ref(|server| runtime.block_on(server.received_requests()))
        .ok_or("mock server not initialised")?
        .ok_or("request recording is disabled")?;

    let actual = received.len() as u64;
    if actual != count {
        return Err(format!("expected {count} like requests, got {actual}").into());
    }
    Ok(())
}

#[scenario(path = "tests/features/like_command.feature", index = 0)]
fn every_like_request_succeeds(like_state: LikeState) {
    let _ = like_state;
}

#[scenario(path = "tests/features/like_command.feature", index = 1)]
fn gateway_rejects_first_request(like_state: LikeState) {
    let _ = like_state;
}

#[scenario(path = "tests/features/like_command.feature", index = 2)]
fn partial_likes_still_count(like_state: LikeState) {
    let _ = like_state;
}

#[scenario(path = "tests/features/like_command.feature", index = 3)]
fn missing_host_stops_early(like_state: LikeState) {
    let _ = like_state;
}

#[scenario(path = "tests/features/like_command.feature", index = 4)]
fn rewritten_reply_is_segmented(like_state: LikeState) {
    let _ = like_state;
}

#[scenario(path = "tests/features/like_command.feature", index = 5)]
fn failed_rewrite_falls_back(like_state: LikeState) {
    let _ = like_state;
}

#[scenario(path = "tests/features/like_command.feature", index = 6)]
fn other_messages_are_ignored(like_state: LikeState) {
    let _ = like_state;
}
