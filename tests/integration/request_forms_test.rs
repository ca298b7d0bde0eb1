//! Request expression forms: verbs, body encodings, headers and URLs.

use super::{eval, start};
use serde_json::json;
use wiremock::matchers::{any, body_json, body_string, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_post_condensed_json_body() {
    let (server, mut interpreter) = start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "Bob", "age": "30"})))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":5}"#))
        .expect(1)
        .mount(&server)
        .await;

    let output = eval(&mut interpreter, "p(/users {name:Bob,age:30})").await;

    assert!(output.starts_with("✓ 201 Created ("), "got: {}", output);
    assert_eq!(interpreter.last_response(), "{\n \"id\": 5\n}");
}

#[tokio::test]
async fn test_post_form_body() {
    let (server, mut interpreter) = start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("user=ann&note=a%2Bb"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let output = eval(&mut interpreter, "p(login ?user=ann&note=a+b)").await;
    assert!(output.starts_with("✓ 200 OK"), "got: {}", output);
}

#[tokio::test]
async fn test_put_text_body() {
    let (server, mut interpreter) = start().await;
    Mock::given(method("PUT"))
        .and(path("/notes/1"))
        .and(header("content-type", "text/plain"))
        .and(body_string("hello (big) world"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let output = eval(&mut interpreter, r#"pu(notes/1 "hello (big) world")"#).await;
    assert_eq!(
        output.split(" (").next(),
        Some("✓ 204 No Content"),
        "got: {}",
        output
    );
}

#[tokio::test]
async fn test_patch_interpolates_path_and_body() {
    let (server, mut interpreter) = start().await;
    Mock::given(method("PATCH"))
        .and(path("/users/42"))
        .and(body_json(json!({"email": "a@b.com"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    eval(&mut interpreter, "id = 42").await;
    eval(&mut interpreter, "mail = a@b.com").await;
    let output = eval(&mut interpreter, "pa(users/${id} {email:${mail}})").await;

    assert!(output.starts_with("✓ 200 OK"), "got: {}", output);
}

#[tokio::test]
async fn test_delete_request() {
    let (server, mut interpreter) = start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let output = eval(&mut interpreter, "d(users/1)").await;
    assert!(output.starts_with("✓ 204"), "got: {}", output);
}

#[tokio::test]
async fn test_inline_header_overrides_session_header() {
    let (server, mut interpreter) = start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(header("x-tenant", "beta"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    eval(&mut interpreter, "?h x-tenant: alpha").await;
    eval(&mut interpreter, "?h Accept: application/json").await;
    let output = eval(&mut interpreter, "g(items <X-Tenant:beta>)").await;

    assert!(output.starts_with("✓ 200 OK"), "got: {}", output);
    assert_eq!(
        interpreter.store().headers.get("x-tenant"),
        Some(&"alpha".to_string())
    );
}

#[tokio::test]
async fn test_absolute_url_ignores_base() {
    let (server, mut interpreter) = start().await;
    let (other, _) = start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&other)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let line = format!("g({}/health)", other.uri());
    let output = eval(&mut interpreter, &line).await;

    assert!(output.ends_with("\nok"), "got: {}", output);
}

#[tokio::test]
async fn test_missing_body_is_a_usage_error() {
    let (server, mut interpreter) = start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"a":1}"#))
        .mount(&server)
        .await;

    eval(&mut interpreter, "g(first)").await;
    let before = interpreter.last_response().to_string();

    let output = eval(&mut interpreter, "p(users)").await;

    assert!(output.starts_with("? "), "got: {}", output);
    assert!(output.contains("usage: p(path body)"), "got: {}", output);
    assert_eq!(interpreter.last_response(), before);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unrecognized_body_form_is_rejected() {
    let (server, mut interpreter) = start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = eval(&mut interpreter, "p(users name=Bob)").await;
    assert!(output.starts_with("? "), "got: {}", output);
}

#[tokio::test]
async fn test_variable_supplies_path_and_body() {
    let (server, mut interpreter) = start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "Bob"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    eval(&mut interpreter, "req = users {name:Bob}").await;
    let output = eval(&mut interpreter, "p(${req})").await;

    assert!(output.starts_with("✓ 201 Created"), "got: {}", output);
}

#[tokio::test]
async fn test_inline_header_with_illegal_name_is_rejected() {
    let (server, mut interpreter) = start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = eval(&mut interpreter, "g(users <bad name:x>)").await;

    assert!(output.starts_with("? Invalid inline header '<bad name:x>'"), "got: {}", output);
}
