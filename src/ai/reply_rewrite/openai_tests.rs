//! Unit tests for the OpenAI-compatible reply rewriter.

use std::time::Duration;

use rstest::{fixture, rstest};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{OpenAiReplyRewriteConfig, OpenAiReplyRewriter, build_system_prompt, truncate_for_message};
use crate::ai::reply_rewrite::{ChatStream, ReplyRewriter, RewriteError, RewriteFlags, RewriteRequest};

#[fixture]
fn rewrite_request() -> RewriteRequest {
    RewriteRequest::new(
        "已成功为 小明 点赞 50 次",
        "用户正在请求点赞。",
        RewriteFlags::default(),
    )
}

fn rewriter_for(server: &MockServer) -> OpenAiReplyRewriter {
    OpenAiReplyRewriter::new(
        OpenAiReplyRewriteConfig::new(
            format!("{}/v1", server.uri()),
            "gpt-4o-mini",
            Some("sk-test".to_owned()),
            Duration::from_secs(5),
        )
        .with_persona("你是麦麦"),
    )
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    }))
}

#[rstest]
#[tokio::test]
async fn rewrite_requires_api_key(rewrite_request: RewriteRequest) {
    let rewriter = OpenAiReplyRewriter::default();

    let result = rewriter
        .rewrite_reply(&ChatStream::default(), &rewrite_request)
        .await;

    assert!(
        matches!(result, Err(RewriteError::Configuration { .. })),
        "expected missing API key to map to Configuration error, got {result:?}"
    );
}

#[rstest]
#[tokio::test]
async fn rewrite_returns_single_segment_without_splitter(rewrite_request: RewriteRequest) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .respond_with(completion("  点好啦！50个赞已送达～  "))
        .expect(1)
        .mount(&server)
        .await;

    let segments = rewriter_for(&server)
        .rewrite_reply(&ChatStream::new("qq", "10001"), &rewrite_request)
        .await
        .expect("rewrite should succeed");

    assert_eq!(segments, vec!["点好啦！50个赞已送达～".to_owned()]);
}

#[rstest]
#[tokio::test]
async fn rewrite_splits_when_splitter_enabled() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(completion("点好啦！一共50个赞～记得回赞哦"))
        .mount(&server)
        .await;
    let request = RewriteRequest::new(
        "已成功点赞 50 次",
        "reason",
        RewriteFlags {
            enable_chinese_typo: false,
            enable_splitter: true,
        },
    );

    let segments = rewriter_for(&server)
        .rewrite_reply(&ChatStream::default(), &request)
        .await
        .expect("rewrite should succeed");

    assert_eq!(segments, vec!["点好啦！", "一共50个赞～", "记得回赞哦"]);
}

#[rstest]
#[tokio::test]
async fn non_ok_status_maps_to_api_error(rewrite_request: RewriteRequest) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let result = rewriter_for(&server)
        .rewrite_reply(&ChatStream::default(), &rewrite_request)
        .await;

    let Err(RewriteError::Api { message }) = &result else {
        panic!("expected Api error, got {result:?}");
    };
    assert!(message.contains("429"), "status should be reported: {message}");
    assert!(message.contains("rate limited"));
}

#[rstest]
#[tokio::test]
async fn blank_completion_is_empty_response(rewrite_request: RewriteRequest) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(completion("\n\t"))
        .mount(&server)
        .await;

    let result = rewriter_for(&server)
        .rewrite_reply(&ChatStream::default(), &rewrite_request)
        .await;

    assert_eq!(result, Err(RewriteError::EmptyResponse));
}

#[rstest]
fn system_prompt_reflects_persona_and_flags() {
    let request = RewriteRequest::new(
        "raw",
        "reason",
        RewriteFlags {
            enable_chinese_typo: true,
            enable_splitter: true,
        },
    );

    let prompt = build_system_prompt("你是麦麦", &request);

    assert!(prompt.starts_with("你是麦麦"));
    assert!(prompt.contains("错别字"));
    assert!(prompt.contains("每句单独一行"));
}

#[rstest]
#[case("short", 10, "short")]
#[case("点赞点赞点赞", 2, "点赞...")]
fn truncate_for_message_respects_char_boundaries(
    #[case] message: &str,
    #[case] max_chars: usize,
    #[case] expected: &str,
) {
    assert_eq!(truncate_for_message(message, max_chars), expected);
}
