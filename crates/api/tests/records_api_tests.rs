mod helpers;

use addd_application::ports::KeyValueStore;
use addd_domain::RecordType;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use helpers::*;
use serde_json::json;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(None);

    let response = app.send(get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_list_records_sorted_by_storage_key() {
    let app = create_test_app(None);
    app.seed("www.example.com", "192.0.2.2", RecordType::A).await;
    app.seed("api.example.com", "192.0.2.1", RecordType::A).await;

    let response = app.send(get("/records")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["fqdn"], "api.example.com");
    assert_eq!(records[1]["fqdn"], "www.example.com");
}

#[tokio::test]
async fn test_defaults() {
    let app = create_test_app(None);

    let body = body_json(app.send(get("/records/defaults")).await).await;

    assert_eq!(body["type"], "A");
    assert_eq!(body["class"], "IN");
    assert_eq!(body["ttl"], 86400);
    assert_eq!(body["fqdn"], "");
}

#[tokio::test]
async fn test_create_record() {
    let app = create_test_app(None);

    let response = app
        .send(json_request(
            "POST",
            "/records",
            json!({"fqdn": "Host.Example.com.", "address": "2001:db8::10", "type": "AAAA"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "created");
    assert_eq!(body["record"]["fqdn"], "host.example.com");
    assert_eq!(body["record"]["ttl"], 86400);
    assert_eq!(app.store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_duplicate_conflicts() {
    let app = create_test_app(None);
    app.seed("host.example.com", "192.0.2.1", RecordType::A).await;

    let response = app
        .send(json_request(
            "POST",
            "/records",
            json!({"fqdn": "host.example.com", "address": "192.0.2.9"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_create_rejects_family_mismatch() {
    let app = create_test_app(None);

    let response = app
        .send(json_request(
            "POST",
            "/records",
            json!({"fqdn": "host.example.com", "address": "2001:db8::1", "type": "A"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_record_and_missing_record() {
    let app = create_test_app(None);
    app.seed("host.example.com", "192.0.2.1", RecordType::A).await;

    let found = app.send(get("/records/host.example.com/A")).await;
    assert_eq!(found.status(), StatusCode::OK);
    assert_eq!(body_json(found).await["address"], "192.0.2.1");

    let missing = app.send(get("/records/host.example.com/AAAA")).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_type_in_path() {
    let app = create_test_app(None);

    let response = app.send(get("/records/host.example.com/MX")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_record() {
    let app = create_test_app(None);
    app.seed("host.example.com", "192.0.2.1", RecordType::A).await;

    let response = app
        .send(json_request(
            "PUT",
            "/records/host.example.com/A",
            json!({"address": "192.0.2.50", "ttl": 60}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "updated");
    assert_eq!(body["old-record"]["address"], "192.0.2.1");
    assert_eq!(body["new-record"]["address"], "192.0.2.50");
    assert_eq!(body["new-record"]["ttl"], 60);
}

#[tokio::test]
async fn test_update_with_different_name_is_rejected() {
    let app = create_test_app(None);
    app.seed("host.example.com", "192.0.2.1", RecordType::A).await;

    let response = app
        .send(json_request(
            "PUT",
            "/records/host.example.com/A",
            json!({"fqdn": "other.example.com", "address": "192.0.2.2"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let still = body_json(app.send(get("/records/host.example.com/A")).await).await;
    assert_eq!(still["address"], "192.0.2.1");
}

#[tokio::test]
async fn test_delete_record() {
    let app = create_test_app(None);
    app.seed("host.example.com", "192.0.2.1", RecordType::A).await;

    let response = app.send(delete("/records/host.example.com/A")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "deleted");
    assert_eq!(body["record"]["fqdn"], "host.example.com");

    let again = app.send(delete("/records/host.example.com/A")).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_token_required_for_every_method() {
    let app = create_test_app(Some(TOKEN));

    assert_eq!(
        app.send(get("/records")).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.send(get("/health")).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let wrong = Request::builder()
        .uri("/records")
        .header("X-Auth-Token", "nope")
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.send(wrong).await.status(), StatusCode::UNAUTHORIZED);

    let right = Request::builder()
        .uri("/records")
        .header("X-Auth-Token", TOKEN)
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.send(right).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_token_guards_writes() {
    let app = create_test_app(Some(TOKEN));

    let response = app
        .send(json_request(
            "POST",
            "/records",
            json!({"fqdn": "host.example.com", "address": "192.0.2.1"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(app.store.list().await.unwrap().is_empty());
}

fn raw_json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_malformed_create_body_returns_json_error() {
    let app = create_test_app(None);

    let response = app
        .send(raw_json_request("POST", "/records", "{\"fqdn\": "))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Serialization error"));
}

#[tokio::test]
async fn test_malformed_update_body_returns_json_error() {
    let app = create_test_app(None);
    app.seed("host.example.com", "203.0.113.5", RecordType::A).await;

    let response = app
        .send(raw_json_request(
            "PUT",
            "/records/host.example.com/A",
            "{\"ttl\": \"soon\"}",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}
