//! Multi-line session workflows: headers, extraction, chaining and the
//! session file.

use super::{eval, start, start_with};
use rapid::interpreter::Flow;
use rapid::session::{load_session, save_session};
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_session_header_set_and_clear() {
    let (server, mut interpreter) = start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert_eq!(eval(&mut interpreter, "?h auth: secret").await, "auth: secret");
    eval(&mut interpreter, "g(one)").await;
    eval(&mut interpreter, "?hc").await;
    eval(&mut interpreter, "g(two)").await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].headers.get("auth").unwrap(), "secret");
    assert!(requests[1].headers.get("auth").is_none());
}

#[tokio::test]
async fn test_assignment_with_request_extracts_field() {
    let (server, mut interpreter) = start().await;
    Mock::given(method("GET"))
        .and(path("/y"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"x": 3, "z": 4}"#))
        .expect(1)
        .mount(&server)
        .await;

    let output = eval(&mut interpreter, "x = g(y)").await;

    assert!(output.starts_with("✓ 200 OK"), "got: {}", output);
    assert!(output.ends_with("\nx = 3"), "got: {}", output);
    assert_eq!(interpreter.store().get("x"), Some(&json!(3)));
    assert!(interpreter.store().get("z").is_none());
    assert!(interpreter.last_response().contains("\"z\": 4"));
}

#[tokio::test]
async fn test_destructure_last_response() {
    let (server, mut interpreter) = start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"id":1,"email":"a@b.com","other":"x"}"#),
        )
        .mount(&server)
        .await;

    eval(&mut interpreter, "g(me)").await;
    let output = eval(&mut interpreter, "{id,email} = $").await;

    assert_eq!(output, "id = 1\nemail = a@b.com");
    assert_eq!(interpreter.store().get("id"), Some(&json!(1)));
    assert_eq!(interpreter.store().get("email"), Some(&json!("a@b.com")));
    assert!(interpreter.store().get("other").is_none());
}

#[tokio::test]
async fn test_extracted_value_chains_into_next_request() {
    let (server, mut interpreter) = start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"data":{"items":[{"id":17},{"id":18}]}}"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/18"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"name":"Ann"}"#))
        .expect(1)
        .mount(&server)
        .await;

    eval(&mut interpreter, "g(users)").await;
    assert_eq!(
        eval(&mut interpreter, "second = $.data.items.1.id").await,
        "second = 18"
    );

    let output = eval(&mut interpreter, "g(users/${second})").await;
    assert!(output.contains("\"name\": \"Ann\""), "got: {}", output);
}

#[tokio::test]
async fn test_literal_binding_and_clearing() {
    let (_server, mut interpreter) = start().await;

    assert_eq!(eval(&mut interpreter, "name = John").await, "name = John");
    assert_eq!(interpreter.store().get("name"), Some(&json!("John")));

    eval(&mut interpreter, "?vc").await;
    assert!(interpreter.store().variables.is_empty());
    eval(&mut interpreter, "?vc").await;
    assert!(interpreter.store().variables.is_empty());
}

#[tokio::test]
async fn test_transport_error_keeps_state() {
    let (server, mut interpreter) = start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("first"))
        .mount(&server)
        .await;

    eval(&mut interpreter, "g(a)").await;
    eval(&mut interpreter, "k = v").await;

    let output = eval(&mut interpreter, "g(http://127.0.0.1:9/down)").await;

    assert!(output.starts_with("? could not complete request:"), "got: {}", output);
    assert_eq!(interpreter.last_response(), "first");
    assert_eq!(interpreter.store().get("k"), Some(&json!("v")));
    assert!(matches!(interpreter.eval_line("$").await, Flow::Continue(ref s) if s == "first"));
}

#[tokio::test]
async fn test_session_file_seeds_auth_and_headers() {
    let dir = TempDir::new().unwrap();
    let session_path = dir.path().join(".rapid.json");
    fs::write(
        &session_path,
        r#"{"$$auth": "tok-9", "userId": 3, "$$header:X-Client": "rapid-tests"}"#,
    )
    .unwrap();

    let store = load_session(&session_path).unwrap();
    let (server, mut interpreter) = start_with(store).await;
    Mock::given(method("GET"))
        .and(path("/users/3"))
        .and(header("authorization", "Bearer tok-9"))
        .and(header("x-client", "rapid-tests"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let output = eval(&mut interpreter, "g(users/${userId})").await;
    assert!(output.starts_with("✓ 200 OK"), "got: {}", output);

    eval(&mut interpreter, "extra = 1").await;
    save_session(&session_path, interpreter.store()).unwrap();

    let reloaded = load_session(&session_path).unwrap();
    assert_eq!(&reloaded, interpreter.store());
}

#[tokio::test]
async fn test_rejected_session_header_keeps_requests_working() {
    let (server, mut interpreter) = start().await;
    Mock::given(method("GET"))
        .and(header("x-ok", "1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    eval(&mut interpreter, "?h x-ok: 1").await;
    let output = eval(&mut interpreter, "?h bad name: v").await;
    assert!(output.starts_with("? invalid header"), "got: {}", output);
    assert_eq!(eval(&mut interpreter, "?h").await, "x-ok: 1");

    assert!(eval(&mut interpreter, "g(a)").await.starts_with("✓ 200 OK"));
    assert!(eval(&mut interpreter, "g(b)").await.starts_with("✓ 200 OK"));
}

#[tokio::test]
async fn test_auth_field_destructured_from_response() {
    let (server, mut interpreter) = start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"$$auth":"tok-1"}"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    eval(&mut interpreter, "p(login {user:ann})").await;
    assert_eq!(eval(&mut interpreter, "$$auth = $").await, "$$auth = tok-1");

    let output = eval(&mut interpreter, "g(me)").await;
    assert!(output.starts_with("✓ 200 OK"), "got: {}", output);
}
