//! BattleSpy bulk delete validation.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use serde_json::json;

#[tokio::test]
async fn empty_id_list_is_rejected() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = post_json(app, "/api/v1/battlespy/reports/delete", json!({ "ids": [] })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn oversized_id_list_is_rejected() {
    let app = common::build_test_app(common::unreachable_pool());
    let ids: Vec<i64> = (1..=1_001).collect();
    let response = post_json(app, "/api/v1/battlespy/messages/delete", json!({ "ids": ids })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_ids_field_is_a_client_error() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = post_json(app, "/api/v1/battlespy/messages/delete", json!({})).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
