//! End-to-end runs of the binary against a mock server.

use std::process::{Command, Output};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run the binary in an isolated directory with only the given provider env.
async fn run(args: &[&str], env: &[(&str, String)]) -> Output {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let env: Vec<(String, String)> = env.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();

    tokio::task::spawn_blocking(move || {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "").unwrap();

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_chatwire"));
        cmd.args(&args)
            .current_dir(dir.path())
            .env("CHATWIRE_CONFIG", &config)
            .env_remove("CHATWIRE_LOG");
        for var in [
            "OPENAI_API_KEY",
            "ANTHROPIC_API_KEY",
            "OPENAI_BASE_URL",
            "ANTHROPIC_BASE_URL",
        ] {
            cmd.env_remove(var);
        }
        cmd.envs(env);
        cmd.output().unwrap()
    })
    .await
    .unwrap()
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_key_exits_with_help() {
    let output = run(&["--provider", "openai", "--scenario", "simple_chat"], &[]).await;

    assert!(!output.status.success());
    let stderr = text(&output.stderr);
    assert!(stderr.contains("Missing OPENAI_API_KEY!"));
    assert!(stderr.contains("OPENAI_API_KEY=your-key-here"));
}

#[tokio::test(flavor = "multi_thread")]
async fn successful_stream_prints_events_and_text() {
    let mock_server = MockServer::start().await;
    let body = concat!(
        "data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\" there\"}}]}\n\n",
        "data: [DONE]\n\n",
    );
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = run(
        &["--provider", "openai", "--scenario", "tool_call"],
        &[
            ("OPENAI_API_KEY", "test-key".to_string()),
            ("OPENAI_BASE_URL", mock_server.uri()),
        ],
    )
    .await;

    assert!(output.status.success(), "stderr: {}", text(&output.stderr));
    let stdout = text(&output.stdout);
    assert!(stdout.contains("OpenAI Request Payload"));
    assert!(stdout.contains("\"get_weather\""));
    assert!(stdout.contains("Streaming Response"));
    assert!(stdout.contains("data: [DONE]"));
    assert!(stdout.contains("Stream complete."));
    assert!(stdout.contains("Accumulated Text Response"));
    assert!(stdout.contains("Hi there"));
}

#[tokio::test(flavor = "multi_thread")]
async fn http_error_exits_with_status_and_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(401).set_body_raw(r#"{"error":"invalid key"}"#, "application/json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = run(
        &["--provider", "anthropic", "--scenario", "simple_chat"],
        &[
            ("ANTHROPIC_API_KEY", "bad-key".to_string()),
            ("ANTHROPIC_BASE_URL", mock_server.uri()),
        ],
    )
    .await;

    assert!(!output.status.success());
    assert!(text(&output.stderr).contains(r#"Error 401: {"error":"invalid key"}"#));
    let stdout = text(&output.stdout);
    assert!(!stdout.contains("Stream complete."));
    assert!(!stdout.contains("Accumulated Text Response"));
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_image_exits_before_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let output = run(
        &["--provider", "openai", "--scenario", "image_input"],
        &[
            ("OPENAI_API_KEY", "test-key".to_string()),
            ("OPENAI_BASE_URL", mock_server.uri()),
        ],
    )
    .await;

    assert!(!output.status.success());
    assert!(text(&output.stderr).contains("Image file not found"));
}
