//! Branch API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

use branch_service::application::dto::BranchResponse;
use branch_service::shared::error::ErrorResponse;

use crate::common::{branch_id, branch_payload, unique_email, TestApp};

#[tokio::test]
async fn test_create_branch_returns_created_branch() {
    let app = TestApp::new();
    let email = unique_email();

    let response = app
        .post_json("/api/v1/branches", &branch_payload(&email))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let branch: BranchResponse = response.json();
    assert!(!branch.id.is_empty());
    assert_eq!(branch.email_address, email);
    assert_eq!(branch.phone_number, "+593987654321");
    assert_eq!(branch.state, "ACTIVE");
    assert!(branch.branch_holidays.is_empty());
    assert_eq!(branch.creation_date, branch.last_modified_date);
}

#[tokio::test]
async fn test_create_branch_ignores_client_holidays_and_id() {
    let app = TestApp::new();
    let mut payload = branch_payload(&unique_email());
    payload["id"] = json!("client-chosen");
    payload["branchHolidays"] = json!([{"date": "2024-01-01", "name": "New Year"}]);

    let response = app.post_json("/api/v1/branches", &payload).await;

    assert_eq!(response.status, StatusCode::CREATED);
    let branch: BranchResponse = response.json();
    assert_ne!(branch.id, "client-chosen");
    assert!(branch.branch_holidays.is_empty());
}

#[tokio::test]
async fn test_create_branch_duplicate_email_is_bad_request() {
    let app = TestApp::new();
    let email = unique_email();
    let original = app.create_branch(&email).await;

    let response = app
        .post_json("/api/v1/branches", &branch_payload(&email))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = response.json();
    assert!(error.message.contains("already exists"));

    let list: Vec<Value> = app.get("/api/v1/branches").await.json();
    assert_eq!(list, vec![original]);
}

#[test_case(json!({"name": "X", "phoneNumber": "+593987654321", "state": "ACTIVE"}) ; "missing email")]
#[test_case(json!({"emailAddress": "not-an-email", "name": "X", "phoneNumber": "+593987654321", "state": "ACTIVE"}) ; "invalid email")]
#[test_case(json!({"emailAddress": "a@banquito.com", "name": " ", "phoneNumber": "+593987654321", "state": "ACTIVE"}) ; "blank name")]
#[test_case(json!({"emailAddress": "a@banquito.com", "name": "X", "phoneNumber": "12ab", "state": "ACTIVE"}) ; "invalid phone")]
#[test_case(json!({"emailAddress": "a@banquito.com", "name": "X", "phoneNumber": "+593987654321"}) ; "missing state")]
#[tokio::test]
async fn test_create_branch_invalid_payload_is_bad_request(payload: Value) {
    let app = TestApp::new();

    let response = app.post_json("/api/v1/branches", &payload).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let list: Vec<Value> = app.get("/api/v1/branches").await.json();
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_create_branch_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .send_json("POST", "/api/v1/branches", &json!("just a string"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_branches_in_creation_order() {
    let app = TestApp::new();
    let first = app.create_branch(&unique_email()).await;
    let second = app.create_branch(&unique_email()).await;

    let response = app.get("/api/v1/branches").await;

    assert_eq!(response.status, StatusCode::OK);
    let list: Vec<Value> = response.json();
    assert_eq!(list, vec![first, second]);
}

#[tokio::test]
async fn test_get_branch_matches_creation_result() {
    let app = TestApp::new();
    let created = app.create_branch(&unique_email()).await;

    let response = app
        .get(&format!("/api/v1/branches/{}", branch_id(&created)))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let fetched: Value = response.json();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_unknown_branch_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/api/v1/branches/507f1f77bcf86cd799439011").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let error: ErrorResponse = response.json();
    assert_eq!(
        error.message,
        "Branch not found with id: 507f1f77bcf86cd799439011"
    );
}

#[tokio::test]
async fn test_update_phone() {
    let app = TestApp::new();
    let created: BranchResponse =
        serde_json::from_value(app.create_branch(&unique_email()).await).unwrap();

    let response = app
        .request(
            "PATCH",
            &format!("/api/v1/branches/{}/phone?phoneNumber=0991234567", created.id),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let updated: BranchResponse = response.json();
    assert_eq!(updated.phone_number, "0991234567");
    assert!(updated.last_modified_date > created.last_modified_date);
    assert_eq!(updated.creation_date, created.creation_date);

    let fetched: BranchResponse = app
        .get(&format!("/api/v1/branches/{}", created.id))
        .await
        .json();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_phone_with_plus_prefix_is_url_encoded() {
    let app = TestApp::new();
    let created = app.create_branch(&unique_email()).await;

    let response = app
        .request(
            "PATCH",
            &format!(
                "/api/v1/branches/{}/phone?phoneNumber=%2B593999999999",
                branch_id(&created)
            ),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let updated: BranchResponse = response.json();
    assert_eq!(updated.phone_number, "+593999999999");
}

#[tokio::test]
async fn test_update_phone_invalid_number_leaves_branch_unchanged() {
    let app = TestApp::new();
    let created = app.create_branch(&unique_email()).await;
    let id = branch_id(&created);

    let response = app
        .request("PATCH", &format!("/api/v1/branches/{}/phone?phoneNumber=abc", id))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let fetched: Value = app.get(&format!("/api/v1/branches/{}", id)).await.json();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_update_phone_missing_parameter_is_bad_request() {
    let app = TestApp::new();
    let created = app.create_branch(&unique_email()).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/v1/branches/{}/phone", branch_id(&created)),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_phone_unknown_branch_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request("PATCH", "/api/v1/branches/missing/phone?phoneNumber=0991234567")
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
