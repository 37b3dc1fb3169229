use std::sync::Once;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use use_by_api::api::routes::create_app;
use use_by_api::config::AppConfig;

// Initialize tracing once for all tests
static INIT: Once = Once::new();

fn initialize() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("info")
            .with_test_writer()
            .try_init();
    });
}

fn test_app() -> Router {
    initialize();
    create_app(&AppConfig {
        scan_delay: Duration::ZERO,
        ..AppConfig::default()
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn new_draft(app: &Router) -> Value {
    let (status, draft) = send(app, Method::POST, "/api/v1/drafts", None).await;
    assert_eq!(status, StatusCode::OK);
    draft
}

fn valid_draft() -> Value {
    json!({
        "medicine_name": "Paracetamol",
        "dosage": "500mg",
        "intake": "with_food",
        "reminder_times": ["08:00"],
        "recurrence": "daily",
        "selected_days": [0, 1, 2, 3, 4, 5, 6]
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "development");
    assert_eq!(body["components"]["reminder_backend"]["status"], "ok");
}

#[tokio::test]
async fn test_new_draft_defaults() {
    let app = test_app();
    let draft = new_draft(&app).await;

    assert_eq!(draft["medicine_name"], "");
    assert_eq!(draft["intake"], "with_food");
    assert_eq!(draft["reminder_times"], json!(["09:00"]));
    assert_eq!(draft["recurrence"], "daily");
    assert_eq!(draft["selected_days"], json!([0, 1, 2, 3, 4, 5, 6]));
}

#[tokio::test]
async fn test_edit_reminder_times() {
    let app = test_app();
    let draft = new_draft(&app).await;

    let (status, draft) = send(
        &app,
        Method::POST,
        "/api/v1/drafts/reminder-times",
        Some(json!({ "draft": draft })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft["reminder_times"], json!(["09:00", "12:00"]));

    let (status, draft) = send(
        &app,
        Method::POST,
        "/api/v1/drafts/reminder-times/update",
        Some(json!({ "draft": draft, "index": 1, "time": "21:30" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft["reminder_times"], json!(["09:00", "21:30"]));

    let (status, draft) = send(
        &app,
        Method::POST,
        "/api/v1/drafts/reminder-times/remove",
        Some(json!({ "draft": draft, "index": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft["reminder_times"], json!(["21:30"]));
}

#[tokio::test]
async fn test_remove_only_reminder_time_is_invalid_operation() {
    let app = test_app();
    let draft = new_draft(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/drafts/reminder-times/remove",
        Some(json!({ "draft": draft.clone(), "index": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_operation");
    assert_eq!(body["details"]["draft"], draft);
}

#[tokio::test]
async fn test_full_draft_stays_editable() {
    let app = test_app();
    let mut draft = valid_draft();
    draft["reminder_times"] = json!(vec!["08:00"; 24]);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/drafts/reminder-times",
        Some(json!({ "draft": draft.clone() })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, shrunk) = send(
        &app,
        Method::POST,
        "/api/v1/drafts/reminder-times/remove",
        Some(json!({ "draft": draft.clone(), "index": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shrunk["reminder_times"].as_array().unwrap().len(), 23);

    let (status, report) = send(&app, Method::POST, "/api/v1/drafts/validate", Some(draft)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["valid"], true);
}

#[tokio::test]
async fn test_update_out_of_bounds_is_invalid_operation() {
    let app = test_app();
    let draft = new_draft(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/drafts/reminder-times/update",
        Some(json!({ "draft": draft, "index": 3, "time": "10:00" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_operation");
}

#[tokio::test]
async fn test_recurrence_round_trip_keeps_selection() {
    let app = test_app();
    let draft = new_draft(&app).await;

    let (_, draft) = send(
        &app,
        Method::POST,
        "/api/v1/drafts/recurrence",
        Some(json!({ "draft": draft, "recurrence": "selected_days" })),
    )
    .await;
    let (_, draft) = send(
        &app,
        Method::POST,
        "/api/v1/drafts/weekdays/toggle",
        Some(json!({ "draft": draft, "day": 6 })),
    )
    .await;
    assert_eq!(draft["selected_days"], json!([0, 1, 2, 3, 4, 5]));

    let (_, draft) = send(
        &app,
        Method::POST,
        "/api/v1/drafts/recurrence",
        Some(json!({ "draft": draft, "recurrence": "daily" })),
    )
    .await;
    let (status, draft) = send(
        &app,
        Method::POST,
        "/api/v1/drafts/recurrence",
        Some(json!({ "draft": draft, "recurrence": "selected_days" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft["recurrence"], "selected_days");
    assert_eq!(draft["selected_days"], json!([0, 1, 2, 3, 4, 5]));
}

#[tokio::test]
async fn test_validate_missing_name_only() {
    let app = test_app();
    let mut draft = valid_draft();
    draft["medicine_name"] = json!("");

    let (status, report) = send(&app, Method::POST, "/api/v1/drafts/validate", Some(draft)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["valid"], false);
    assert_eq!(
        report["errors"],
        json!([{ "field": "medicine_name", "code": "missing_name", "message": "Medicine name is required" }])
    );
}

#[tokio::test]
async fn test_validate_reports_selection_and_date_errors() {
    let app = test_app();
    let mut draft = valid_draft();
    draft["recurrence"] = json!("selected_days");
    draft["selected_days"] = json!([]);
    draft["start_date"] = json!("2024-06-10");
    draft["end_date"] = json!("2024-06-01");

    let (status, report) = send(&app, Method::POST, "/api/v1/drafts/validate", Some(draft)).await;

    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = report["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["code"].as_str())
        .collect();
    assert_eq!(codes, vec!["no_selected_days", "end_before_start"]);
}

#[tokio::test]
async fn test_validate_valid_draft() {
    let app = test_app();
    let mut draft = valid_draft();
    draft["medicine_name"] = json!("  Paracetamol ");

    let (status, report) = send(&app, Method::POST, "/api/v1/drafts/validate", Some(draft)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["valid"], true);
    assert_eq!(report["errors"], json!([]));
    assert_eq!(report["schedule"]["medicine_name"], "Paracetamol");
}

#[tokio::test]
async fn test_submit_and_read_back() {
    let app = test_app();

    let (status, committed) = send(&app, Method::POST, "/api/v1/schedules", Some(valid_draft())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = committed["id"].as_str().unwrap().to_string();
    assert_eq!(committed["schedule"]["dosage"], "500mg");

    let (status, list) = send(&app, Method::GET, "/api/v1/schedules", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, fetched) = send(&app, Method::GET, &format!("/api/v1/schedules/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, committed);

    let (_, health) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(
        health["components"]["reminder_backend"]["message"],
        "1 committed schedule(s)"
    );
}

#[tokio::test]
async fn test_submit_invalid_draft_is_unprocessable() {
    let app = test_app();
    let draft = new_draft(&app).await;

    let (status, body) = send(&app, Method::POST, "/api/v1/schedules", Some(draft)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"].as_array().unwrap().len(), 2);

    let (_, list) = send(&app, Method::GET, "/api/v1/schedules", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_revise_leaves_committed_schedule_untouched() {
    let app = test_app();
    let (_, committed) = send(&app, Method::POST, "/api/v1/schedules", Some(valid_draft())).await;
    let id = committed["id"].as_str().unwrap().to_string();

    let (status, mut draft) = send(
        &app,
        Method::POST,
        &format!("/api/v1/schedules/{}/revise", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft, committed["schedule"]);

    draft["dosage"] = json!("1000mg");
    let (status, recommitted) = send(&app, Method::POST, "/api/v1/schedules", Some(draft)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(recommitted["id"], committed["id"]);

    let (_, original) = send(&app, Method::GET, &format!("/api/v1/schedules/{}", id), None).await;
    assert_eq!(original["schedule"]["dosage"], "500mg");
}

#[tokio::test]
async fn test_schedule_lookup_errors() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/v1/schedules/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/schedules/6a2f41a3-c54c-fce8-32d2-0324e1c32e22",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_occurrences() {
    let app = test_app();
    let mut draft = valid_draft();
    draft["recurrence"] = json!("selected_days");
    draft["selected_days"] = json!([0, 2]);
    draft["reminder_times"] = json!(["20:00", "08:00"]);
    let (_, committed) = send(&app, Method::POST, "/api/v1/schedules", Some(draft)).await;
    let id = committed["id"].as_str().unwrap().to_string();

    // 2024-06-03 is a Monday
    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/schedules/{}/occurrences?from=2024-06-03&to=2024-06-05", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["occurrences"],
        json!([
            "2024-06-03T08:00:00",
            "2024-06-03T20:00:00",
            "2024-06-05T08:00:00",
            "2024-06-05T20:00:00"
        ])
    );

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/schedules/{}/occurrences?from=2024-06-03", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["to"], "2024-06-09");

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/v1/schedules/{}/occurrences?from=2024-06-05&to=2024-06-03", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reversed_range_wins_over_unknown_schedule() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/schedules/6a2f41a3-c54c-fce8-32d2-0324e1c32e22/occurrences?from=2024-06-05&to=2024-06-03",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_next_occurrence() {
    let app = test_app();
    let mut draft = valid_draft();
    draft["end_date"] = json!("2024-06-30");
    let (_, committed) = send(&app, Method::POST, "/api/v1/schedules", Some(draft)).await;
    let id = committed["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/schedules/{}/next?after=2024-06-03T08:00:00", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["next"], "2024-06-04T08:00:00");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/schedules/{}/next?after=2024-07-01T00:00:00", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["next"], Value::Null);
}

#[tokio::test]
async fn test_products() {
    let app = test_app();

    let (status, categories) = send(&app, Method::GET, "/api/v1/products/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(categories.as_array().unwrap().len(), 6);
    assert_eq!(categories[0]["id"], "medicine");

    let (status, product) = send(&app, Method::POST, "/api/v1/products/scan", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["name"], "Vitamin D3 Tablets");
    assert_eq!(product["prices"].as_array().unwrap().len(), 3);
}
