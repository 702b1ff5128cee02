#![allow(clippy::unused_async, unused_must_use)]
//! Tests for the history HTTP API.
//!
//! Verifies the lenient read path, append-to-front ordering, and the
//! raw-storage/filtered-display split.

use salvo::http::StatusCode;
use serde_json::json;

use fipe_test::component::types::displayable_records;

use super::helpers::*;

fn record(model: &str) -> serde_json::Value {
    json!({"tipo": "carros", "marca": "Fiat", "modelo": model, "ano": "2015"})
}

// ============================================================================
// GET /historico
// ============================================================================

/// ## Summary
/// Test that GET over a missing history file returns an empty array.
#[test_log::test(tokio::test)]
async fn get_missing_history_returns_empty_array() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = create_history_service(&dir.path().join("historico.json"));

    let response = TestRequest::get("/historico").send(&service).await;

    let body = response.assert_status(StatusCode::OK).body_json();
    assert_eq!(body, json!([]));
}

/// ## Summary
/// Test that GET over a corrupt history file still returns 200 with an
/// empty array instead of failing the read path.
#[test_log::test(tokio::test)]
async fn get_corrupt_history_returns_empty_array() {
    let dir = tempfile::tempdir().expect("tempdir");
    let history_file = dir.path().join("historico.json");
    std::fs::write(&history_file, b"{definitely not json").expect("write corrupt file");

    let service = create_history_service(&history_file);
    let response = TestRequest::get("/historico").send(&service).await;

    let body = response.assert_status(StatusCode::OK).body_json();
    assert_eq!(body, json!([]));
}

/// ## Summary
/// Test that a history file holding a non-array value reads as empty.
#[test_log::test(tokio::test)]
async fn get_non_array_history_returns_empty_array() {
    let dir = tempfile::tempdir().expect("tempdir");
    let history_file = dir.path().join("historico.json");
    std::fs::write(&history_file, b"{\"tipo\": \"carros\"}").expect("write object file");

    let service = create_history_service(&history_file);
    let response = TestRequest::get("/historico").send(&service).await;

    let body = response.assert_status(StatusCode::OK).body_json();
    assert_eq!(body, json!([]));
}

/// ## Summary
/// Test that GET responds with a JSON content type.
#[test_log::test(tokio::test)]
async fn get_history_is_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = create_history_service(&dir.path().join("historico.json"));

    TestRequest::get("/historico")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header_contains("Content-Type", "application/json");
}

// ============================================================================
// POST /historico
// ============================================================================

/// ## Summary
/// Test that POST acknowledges with 201 `{ok: true}`.
#[test_log::test(tokio::test)]
async fn post_history_returns_created_ack() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = create_history_service(&dir.path().join("historico.json"));

    let body = TestRequest::post("/historico")
        .json_body(&record("Uno"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .body_json();
    assert_eq!(body, json!({"ok": true}));
}

/// ## Summary
/// Test that POST then GET round-trips the record as the first element.
#[test_log::test(tokio::test)]
async fn post_then_get_round_trips_newest_first() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = create_history_service(&dir.path().join("historico.json"));

    TestRequest::post("/historico")
        .json_body(&record("Uno"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);
    TestRequest::post("/historico")
        .json_body(&record("Palio"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);

    let body = TestRequest::get("/historico")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .body_json();

    assert_eq!(body, json!([record("Palio"), record("Uno")]));
}

/// ## Summary
/// Test that a body that is not valid JSON is rejected with 400.
#[test_log::test(tokio::test)]
async fn post_invalid_json_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = create_history_service(&dir.path().join("historico.json"));

    TestRequest::post("/historico")
        .content_type("application/json; charset=utf-8")
        .body(b"{oops".to_vec())
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

/// ## Summary
/// Test that no shape validation happens at the store boundary: a record
/// missing `modelo` is persisted verbatim, served raw by GET, and only
/// dropped by the consuming-layer display filter.
#[test_log::test(tokio::test)]
async fn malformed_record_is_stored_raw_and_filtered_on_display() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = create_history_service(&dir.path().join("historico.json"));

    let malformed = json!({"tipo": "carros", "marca": "Fiat", "ano": "2015"});
    TestRequest::post("/historico")
        .json_body(&malformed)
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);
    TestRequest::post("/historico")
        .json_body(&record("Uno"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);

    let body = TestRequest::get("/historico")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .body_json();

    let raw = body.as_array().expect("array body");
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[1], malformed);

    let displayable = displayable_records(raw);
    assert_eq!(displayable.len(), 1);
    assert_eq!(displayable[0].model, "Uno");
}

// ============================================================================
// Healthcheck
// ============================================================================

/// ## Summary
/// Test that the healthcheck answers OK.
#[test_log::test(tokio::test)]
async fn healthcheck_answers_ok() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = create_history_service(&dir.path().join("historico.json"));

    TestRequest::get("/healthcheck")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("OK");
}
