use github::GitHubDispatchClient;
use serde_json::json;
use trigger::{DispatchTransport, GitHubToken, TriggerHandler};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DISPATCH_PATH: &str = "/repos/Ch4Angelia/computerscience/dispatches";

fn handler(server: &MockServer) -> TriggerHandler<GitHubDispatchClient> {
    let client = GitHubDispatchClient::new().unwrap();
    TriggerHandler::new(client, GitHubToken::new("ghp_test")).with_api_base(server.uri())
}

#[tokio::test]
async fn test_dispatch_sends_fixed_headers_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DISPATCH_PATH))
        .and(header("Accept", "application/vnd.github.v3+json"))
        .and(header("Authorization", "token ghp_test"))
        .and(header("User-Agent", "dispatch-trigger"))
        .and(body_json(json!({ "event_type": "trigger_update" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = handler(&server).handle().await;

    assert_eq!(response.status, 200);
    assert_eq!(
        serde_json::to_value(&response.body).unwrap(),
        json!({ "message": "Update triggered successfully!" })
    );
}

#[tokio::test]
async fn test_remote_rejection_passes_body_text_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DISPATCH_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&server)
        .await;

    let response = handler(&server).handle().await;

    assert_eq!(response.status, 404);
    assert_eq!(
        serde_json::to_value(&response.body).unwrap(),
        json!({ "error": "GitHub API Error", "details": "Not Found" })
    );
}

#[tokio::test]
async fn test_json_error_body_is_passed_as_raw_text() {
    let server = MockServer::start().await;
    let github_error = r#"{"message":"Bad credentials","documentation_url":"https://docs.github.com/rest"}"#;

    Mock::given(method("POST"))
        .and(path(DISPATCH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string(github_error))
        .mount(&server)
        .await;

    let response = handler(&server).handle().await;

    assert_eq!(response.status, 401);
    assert_eq!(
        serde_json::to_value(&response.body).unwrap(),
        json!({ "error": "GitHub API Error", "details": github_error })
    );
}

#[tokio::test]
async fn test_client_reports_status_without_interpreting_it() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let client = GitHubDispatchClient::new().unwrap();
    let token = GitHubToken::new("ghp_test").unwrap();
    let request =
        trigger::DispatchRequest::build(&trigger::DispatchTarget::default(), &token, &server.uri());

    let response = client.send(&request).await.unwrap();

    assert_eq!(response.status, 503);
    assert_eq!(response.body, "unavailable");
}

#[tokio::test]
async fn test_missing_token_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = GitHubDispatchClient::new().unwrap();
    let response = TriggerHandler::new(client, None)
        .with_api_base(server.uri())
        .handle()
        .await;

    assert_eq!(response.status, 500);
    assert_eq!(
        serde_json::to_value(&response.body).unwrap(),
        json!({ "error": "Server Error: Token not found." })
    );
}

#[tokio::test]
async fn test_connection_refused_is_internal_server_error() {
    let client = GitHubDispatchClient::new().unwrap();
    let response = TriggerHandler::new(client, GitHubToken::new("ghp_test"))
        .with_api_base("http://127.0.0.1:1")
        .handle()
        .await;

    assert_eq!(response.status, 500);
    let body = serde_json::to_value(&response.body).unwrap();
    assert_eq!(body["error"], "Internal Server Error");
    assert!(body["details"].as_str().is_some_and(|d| !d.is_empty()), "got: {body}");
}

#[tokio::test]
async fn test_truncated_response_body_is_internal_server_error() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // Announces a 100-byte body, sends 5 bytes, then closes the connection.
    let server = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = server.accept().await.unwrap();
        let mut received = Vec::new();
        let mut buf = [0u8; 1024];
        while !String::from_utf8_lossy(&received).contains("trigger_update\"}") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 100\r\n\r\nshort")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let client = GitHubDispatchClient::new().unwrap();
    let response = TriggerHandler::new(client, GitHubToken::new("ghp_test"))
        .with_api_base(format!("http://{addr}"))
        .handle()
        .await;

    assert_eq!(response.status, 500);
    let body = serde_json::to_value(&response.body).unwrap();
    assert_eq!(body["error"], "Internal Server Error");
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("body"), "got: {details}");
}
