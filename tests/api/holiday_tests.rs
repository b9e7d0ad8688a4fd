//! Holiday API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

use branch_service::application::dto::{BranchResponse, HolidayResponse};

use crate::common::{branch_id, unique_email, TestApp};

async fn branch_with_holidays(app: &TestApp, holidays: Value) -> String {
    let branch = app.create_branch(&unique_email()).await;
    let id = branch_id(&branch);
    let response = app
        .post_json(&format!("/api/v1/branches/{}/holidays", id), &holidays)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    id
}

async fn holidays_of(app: &TestApp, id: &str) -> Vec<Value> {
    let response = app.get(&format!("/api/v1/branches/{}/holidays", id)).await;
    assert_eq!(response.status, StatusCode::OK);
    response.json()
}

async fn is_holiday(app: &TestApp, id: &str, date: &str) -> bool {
    let response = app
        .get(&format!("/api/v1/branches/{}/holidays/check?date={}", id, date))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    response.json()
}

#[tokio::test]
async fn test_add_holidays_appends_in_order() {
    let app = TestApp::new();
    let created: BranchResponse =
        serde_json::from_value(app.create_branch(&unique_email()).await).unwrap();

    let response = app
        .post_json(
            &format!("/api/v1/branches/{}/holidays", created.id),
            &json!([
                {"date": "2024-12-25", "name": "Christmas"},
                {"date": "2024-01-01", "name": "New Year"}
            ]),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let updated: BranchResponse = response.json();
    assert_eq!(
        updated
            .branch_holidays
            .iter()
            .map(|h| h.name.as_str())
            .collect::<Vec<_>>(),
        vec!["Christmas", "New Year"]
    );
    assert!(updated.last_modified_date > created.last_modified_date);
}

#[tokio::test]
async fn test_adding_same_holiday_twice_keeps_both() {
    let app = TestApp::new();
    let new_year = json!([{"date": "2024-01-01", "name": "New Year"}]);
    let id = branch_with_holidays(&app, new_year.clone()).await;

    let response = app
        .post_json(&format!("/api/v1/branches/{}/holidays", id), &new_year)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let holidays = holidays_of(&app, &id).await;
    assert_eq!(
        holidays,
        vec![
            json!({"date": "2024-01-01", "name": "New Year"}),
            json!({"date": "2024-01-01", "name": "New Year"}),
        ]
    );
}

#[tokio::test]
async fn test_add_empty_holiday_list() {
    let app = TestApp::new();
    let id = branch_with_holidays(&app, json!([])).await;

    assert!(holidays_of(&app, &id).await.is_empty());
}

#[test_case(json!([{"name": "No date"}]) ; "missing date")]
#[test_case(json!([{"date": "2024-01-01", "name": ""}]) ; "blank name")]
#[test_case(json!([{"date": "01/01/2024", "name": "New Year"}]) ; "bad date format")]
#[test_case(json!({"date": "2024-01-01", "name": "New Year"}) ; "object instead of array")]
#[tokio::test]
async fn test_add_invalid_holidays_is_bad_request(body: Value) {
    let app = TestApp::new();
    let branch = app.create_branch(&unique_email()).await;
    let id = branch_id(&branch);

    let response = app
        .post_json(&format!("/api/v1/branches/{}/holidays", id), &body)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(holidays_of(&app, &id).await.is_empty());
}

#[tokio::test]
async fn test_remove_holidays_by_date_ignores_name() {
    let app = TestApp::new();
    let id = branch_with_holidays(
        &app,
        json!([
            {"date": "2024-01-01", "name": "New Year"},
            {"date": "2024-05-24", "name": "Battle of Pichincha"},
            {"date": "2024-01-01", "name": "Año Nuevo"}
        ]),
    )
    .await;
    assert!(is_holiday(&app, &id, "2024-01-01").await);

    let response = app
        .request(
            "DELETE",
            &format!("/api/v1/branches/{}/holidays?dates=2024-01-01", id),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let updated: BranchResponse = response.json();
    assert_eq!(
        updated.branch_holidays,
        vec![HolidayResponse {
            date: chrono::NaiveDate::from_ymd_opt(2024, 5, 24).unwrap(),
            name: "Battle of Pichincha".into(),
        }]
    );
    assert!(!is_holiday(&app, &id, "2024-01-01").await);
    assert!(is_holiday(&app, &id, "2024-05-24").await);
}

#[test_case("dates=2024-01-01&dates=2024-12-25" ; "repeated parameter")]
#[test_case("dates=2024-01-01,2024-12-25" ; "comma separated")]
#[tokio::test]
async fn test_remove_several_dates(query: &str) {
    let app = TestApp::new();
    let id = branch_with_holidays(
        &app,
        json!([
            {"date": "2024-01-01", "name": "New Year"},
            {"date": "2024-11-02", "name": "All Souls' Day"},
            {"date": "2024-12-25", "name": "Christmas"}
        ]),
    )
    .await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/v1/branches/{}/holidays?{}", id, query),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        holidays_of(&app, &id).await,
        vec![json!({"date": "2024-11-02", "name": "All Souls' Day"})]
    );
}

#[tokio::test]
async fn test_remove_date_not_present_keeps_calendar() {
    let app = TestApp::new();
    let id = branch_with_holidays(&app, json!([{"date": "2024-01-01", "name": "New Year"}])).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/v1/branches/{}/holidays?dates=2030-01-01", id),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(holidays_of(&app, &id).await.len(), 1);
}

#[test_case("" ; "missing dates")]
#[test_case("?dates=2024-02-30" ; "impossible date")]
#[test_case("?dates=tomorrow" ; "not a date")]
#[tokio::test]
async fn test_remove_invalid_dates_is_bad_request(query: &str) {
    let app = TestApp::new();
    let id = branch_with_holidays(&app, json!([{"date": "2024-01-01", "name": "New Year"}])).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/v1/branches/{}/holidays{}", id, query),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(holidays_of(&app, &id).await.len(), 1);
}

#[tokio::test]
async fn test_check_matches_holiday_list() {
    let app = TestApp::new();
    let id = branch_with_holidays(
        &app,
        json!([
            {"date": "2024-02-12", "name": "Carnival"},
            {"date": "2024-02-13", "name": "Carnival"}
        ]),
    )
    .await;

    let holidays = holidays_of(&app, &id).await;
    for date in ["2024-02-11", "2024-02-12", "2024-02-13", "2024-02-14"] {
        let listed = holidays.iter().any(|h| h["date"] == date);
        assert_eq!(is_holiday(&app, &id, date).await, listed, "date {}", date);
    }
}

#[test_case("" ; "missing date")]
#[test_case("?date=2024-1-1x" ; "malformed date")]
#[tokio::test]
async fn test_check_invalid_date_is_bad_request(query: &str) {
    let app = TestApp::new();
    let branch = app.create_branch(&unique_email()).await;

    let response = app
        .get(&format!(
            "/api/v1/branches/{}/holidays/check{}",
            branch_id(&branch),
            query
        ))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[test_case("POST", "/api/v1/branches/missing/holidays" ; "add")]
#[test_case("DELETE", "/api/v1/branches/missing/holidays?dates=2024-01-01" ; "remove")]
#[test_case("GET", "/api/v1/branches/missing/holidays" ; "list")]
#[test_case("GET", "/api/v1/branches/missing/holidays/check?date=2024-01-01" ; "check")]
#[tokio::test]
async fn test_unknown_branch_is_not_found(method: &str, uri: &str) {
    let app = TestApp::new();

    let response = if method == "POST" {
        app.send_json(method, uri, &json!([{"date": "2024-01-01", "name": "New Year"}]))
            .await
    } else {
        app.request(method, uri).await
    };

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
