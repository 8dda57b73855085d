//! Reservation API contract test
//!
//! 直接走 Router：创建门店/区域/桌台/时段，然后验证预订接口的统一
//! 信封（成功携带 tableIds/totalCapacity/assignmentType/isSharedTableOnly，
//! 无容量时 success=false 且不带 error）。

use axum::body::{to_bytes, Body};
use branch_server::{Config, Server, ServerState};
use http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

const DATE: &str = "2026-08-14"; // Friday
const DAY: i32 = 5;

async fn request(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn post(app: &axum::Router, uri: &str, body: Value) -> Value {
    let (status, value) = request(app, "POST", uri, Some(body)).await;
    assert_eq!(status, StatusCode::OK, "POST {uri} failed: {value}");
    value
}

#[tokio::test]
async fn reservation_envelope_contract() {
    let config = Config::with_overrides("/tmp/pearl-api-test", 0);
    let state = ServerState::in_memory(&config).await;
    let app = Server::app(state);

    let branch = post(
        &app,
        "/api/branches",
        json!({"name": "Central", "timezone": "UTC"}),
    )
    .await;
    let branch_id = branch["id"].as_str().unwrap().to_string();

    let zone = post(
        &app,
        "/api/zones",
        json!({"branch": branch_id, "name": "Hall"}),
    )
    .await;
    let zone_id = zone["id"].as_str().unwrap().to_string();

    let table = post(
        &app,
        "/api/tables",
        json!({
            "branch": branch_id,
            "zone": zone_id,
            "name": "Communal",
            "capacity": 10,
            "is_shared": true
        }),
    )
    .await;
    let table_id = table["id"].as_str().unwrap().to_string();

    let slot = post(
        &app,
        "/api/time_slots",
        json!({
            "branch": branch_id,
            "name": "Dinner",
            "start_time": "19:00",
            "end_time": "21:00",
            "days_of_week": [DAY]
        }),
    )
    .await;
    let slot_id = slot["id"].as_str().unwrap().to_string();

    // Successful auto-assignment carries the full contract fields
    let seated = post(
        &app,
        "/api/reservations",
        json!({
            "branch": branch_id,
            "customer_name": "Ana",
            "date": DATE,
            "time_slot": slot_id,
            "people": 4
        }),
    )
    .await;
    assert_eq!(seated["success"], true);
    assert!(seated.get("error").is_none());
    let data = &seated["data"];
    assert_eq!(data["tableIds"], json!([table_id]));
    assert_eq!(data["totalCapacity"], 10);
    assert_eq!(data["assignmentType"], "shared_table");
    assert_eq!(data["isSharedTableOnly"], true);
    assert_eq!(data["reservation"]["status"], "PENDING");

    // An oversized party gets a plain negative: success=false, no error
    let refused = post(
        &app,
        "/api/reservations",
        json!({
            "branch": branch_id,
            "customer_name": "Bus tour",
            "date": DATE,
            "time_slot": slot_id,
            "people": 20
        }),
    )
    .await;
    assert_eq!(refused["success"], false);
    assert!(refused.get("error").is_none());
    // the reservation is stored unassigned for manual seating
    assert_eq!(refused["data"]["reservation"]["tables"], json!([]));

    // availability reflects the committed assignment
    let (status, rows) = request(
        &app,
        "GET",
        &format!("/api/time_slots/{slot_id}/availability?date={DATE}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows[0]["remaining"], 6);
    assert_eq!(rows[0]["capacity"], 10);

    // a missing slot is NotFound, clearly distinct from "no capacity"
    let (status, body) = request(
        &app,
        "GET",
        &format!("/api/time_slots/time_slot:ghost/availability?date={DATE}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}
