//! Failure responses of the node routes.

use super::harness::{app, send, send_request};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

#[rstest]
#[case(Method::GET)]
#[case(Method::DELETE)]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_id_is_not_found(#[case] method: Method) {
    let app = app("/api/nodes");

    let (status, body) = send(&app, method, &format!("/api/nodes/{}", Uuid::new_v4()), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Node not found"}));
}

#[rstest]
#[case(Method::GET)]
#[case(Method::DELETE)]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_id_is_not_found(#[case] method: Method) {
    let app = app("/api/nodes");

    let (status, body) = send(&app, method, "/api/nodes/not-a-node-id", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Node not found"}));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_delete_leaves_store_unchanged() {
    let app = app("/api/nodes");
    send(
        &app,
        Method::POST,
        "/api/nodes",
        Some(json!({"name": "n1", "fingerprint": "fp1"})),
    )
    .await;
    let (_, before) = send(&app, Method::GET, "/api/nodes", None).await;

    send(&app, Method::DELETE, &format!("/api/nodes/{}", Uuid::new_v4()), None).await;

    let (_, after) = send(&app, Method::GET, "/api/nodes", None).await;
    assert_eq!(before, after);
}

#[rstest]
#[case(json!({"fingerprint": "fp1"}))]
#[case(json!({"name": "n1"}))]
#[case(json!({"name": "n1", "fingerprint": "fp1", "metadata": [1, 2]}))]
#[case(json!({"name": 5, "fingerprint": "fp1"}))]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_body_is_unprocessable(#[case] payload: Value) {
    let app = app("/api/nodes");

    let (status, body) = send(&app, Method::POST, "/api/nodes", Some(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[rstest]
#[case(json!({"name": "", "fingerprint": "fp1"}), "node name must not be empty")]
#[case(json!({"name": "n1", "fingerprint": "   "}), "fingerprint must not be empty")]
#[tokio::test(flavor = "multi_thread")]
async fn blank_fields_are_unprocessable(#[case] payload: Value, #[case] detail: &str) {
    let app = app("/api/nodes");

    let (status, body) = send(&app, Method::POST, "/api/nodes", Some(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "detail": detail }));

    let (_, listed) = send(&app, Method::GET, "/api/nodes", None).await;
    assert_eq!(listed, json!([]));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_json_is_a_bad_request() {
    let app = app("/api/nodes");
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/nodes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .expect("request should build");

    let (status, body) = send_request(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_content_type_is_rejected() {
    let app = app("/api/nodes");
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/nodes")
        .body(Body::from(json!({"name": "n1", "fingerprint": "fp1"}).to_string()))
        .expect("request should build");

    let (status, _) = send_request(&app, request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
