// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! End-to-end interception against a mock server

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokenwarden::{
    AttachmentController, AuthPipeline, Error, HookSet, HttpClient, SessionTokenProvider,
};
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn attach(client: &Arc<HttpClient>, session: &SessionTokenProvider, hooks: HookSet) {
    let pipeline = AuthPipeline::with_hooks(Arc::new(session.clone()), hooks);
    AttachmentController::new(client.clone(), pipeline).activate();
}

#[tokio::test]
async fn attaches_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer GOOD_TOKEN"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"user":"alice"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(HttpClient::new().unwrap());
    let session = SessionTokenProvider::new("GOOD_TOKEN");
    attach(&client, &session, HookSet::new());

    let response = client.get(format!("{}/me", server.uri())).await.unwrap();

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body["user"], "alice");
    assert_eq!(session.logout_count(), 0);
}

#[tokio::test]
async fn custom_request_hook_headers_are_kept() {
    let server = MockServer::start().await;
    Mock::given(path("/items"))
        .and(header("x-client", "integration"))
        .and(header("authorization", "Bearer GOOD_TOKEN"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(HttpClient::new().unwrap());
    let session = SessionTokenProvider::new("GOOD_TOKEN");
    let hooks = HookSet::new().on_request(|request| {
        Ok(request
            .header("x-client", "integration")
            .header("authorization", "Bearer OVERRIDE"))
    });
    attach(&client, &session, hooks);

    let response = client.get(format!("{}/items", server.uri())).await.unwrap();

    assert_eq!(response.status_code(), 204);
}

#[tokio::test]
async fn unauthorized_response_ends_session() {
    let server = MockServer::start().await;
    Mock::given(path("/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .mount(&server)
        .await;

    let client = Arc::new(HttpClient::new().unwrap());
    let session = SessionTokenProvider::new("STALE_TOKEN");
    attach(&client, &session, HookSet::new());

    let err = client.get(format!("{}/me", server.uri())).await.unwrap_err();

    assert_eq!(err.response_status(), Some(401));
    assert!(matches!(err, Error::Status(ref r) if r.text_lossy() == "expired"));
    assert_eq!(session.logout_count(), 1);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn missing_token_still_sends_request() {
    let server = MockServer::start().await;
    Mock::given(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(path("/public"))
        .respond_with(ResponseTemplate::new(200).set_body_string("open"))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(HttpClient::new().unwrap());
    let session = SessionTokenProvider::empty();
    attach(&client, &session, HookSet::new());

    let response = client.get(format!("{}/public", server.uri())).await.unwrap();

    assert_eq!(response.text().unwrap(), "open");
    assert_eq!(session.logout_count(), 1);
}

#[tokio::test]
async fn forbidden_response_keeps_session() {
    let server = MockServer::start().await;
    Mock::given(path("/admin"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = Arc::new(HttpClient::new().unwrap());
    let session = SessionTokenProvider::new("GOOD_TOKEN");
    let hooks = HookSet::new().on_response_error(|error| {
        let forbidden = error
            .response()
            .filter(|r| r.status_code() == 403)
            .cloned();
        match forbidden {
            Some(response) => Ok(response.extension("forbidden", true)),
            None => Err(error),
        }
    });
    attach(&client, &session, hooks);

    let response = client.get(format!("{}/admin", server.uri())).await.unwrap();

    assert_eq!(response.status_code(), 403);
    assert_eq!(
        response.extensions.get("forbidden"),
        Some(&serde_json::Value::Bool(true))
    );
    assert_eq!(session.logout_count(), 0);
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn recovering_hook_does_not_prevent_logout() {
    let server = MockServer::start().await;
    Mock::given(path("/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = Arc::new(HttpClient::new().unwrap());
    let session = SessionTokenProvider::new("GOOD_TOKEN");
    let hooks = HookSet::new().on_response_error(|error| error.response().cloned().ok_or(error));
    attach(&client, &session, hooks);

    let response = client.get(format!("{}/me", server.uri())).await.unwrap();

    assert_eq!(response.status_code(), 401);
    assert_eq!(session.logout_count(), 1);
}

#[tokio::test]
async fn request_builder_runs_through_interceptors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("authorization", "Bearer GOOD_TOKEN"))
        .and(header("x-trace", "trace-42"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({ "name": "widget" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(HttpClient::new().unwrap());
    let session = SessionTokenProvider::new("GOOD_TOKEN");
    let hooks = HookSet::new().on_request(|request| {
        let trace = request
            .extensions
            .get("trace")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        match trace {
            Some(trace) => Ok(request.header("x-trace", trace)),
            None => Err(Error::other("missing trace extension")),
        }
    });
    attach(&client, &session, hooks);

    let response = client
        .request(Method::POST, format!("{}/items", server.uri()))
        .unwrap()
        .header("accept", "application/json")
        .json(&serde_json::json!({ "name": "widget" }))
        .unwrap()
        .timeout(Duration::from_secs(5))
        .extension("trace", "trace-42")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status_code(), 201);
    assert_eq!(session.logout_count(), 0);
}

#[tokio::test]
async fn truncated_unauthorized_body_still_ends_session() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        // Promise more body than is ever written, then hang up
        socket
            .write_all(b"HTTP/1.1 401 Unauthorized\r\ncontent-length: 100\r\n\r\nexp")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let client = Arc::new(HttpClient::new().unwrap());
    let session = SessionTokenProvider::new("STALE_TOKEN");
    attach(&client, &session, HookSet::new());

    let err = client.get(format!("http://{}/me", addr)).await.unwrap_err();

    assert_eq!(err.response_status(), Some(401));
    assert!(err.response().is_some_and(|r| r.body_len() == 0));
    assert_eq!(session.logout_count(), 1);
    assert!(!session.is_authenticated());
}
