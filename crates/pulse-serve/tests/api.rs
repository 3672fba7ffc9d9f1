use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use pulse_serve::{AppState, app};
use serde_json::{Value, json};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

fn test_state(dir: &TempDir) -> AppState {
    AppState {
        db_path: dir.path().join("events.db").to_string_lossy().into_owned(),
        request_timeout: Duration::from_secs(5),
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = app(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn create_event(state: &AppState, body: Value) -> Value {
    let (status, body) = send(state, post_json("/events", &body)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"].clone()
}

#[tokio::test]
async fn health_reports_ok() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, body) = send(&state, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn create_event_returns_created_with_id() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, body) = send(
        &state,
        post_json(
            "/events",
            &json!({"event_name": "app_launch", "payload": {"user_id": "u-1"}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
    assert_eq!(body["data"]["event_name"], "app_launch");
    assert_eq!(body["data"]["payload"]["user_id"], "u-1");
    assert!(body["data"]["created_at"].is_string());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn create_event_without_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, body) = send(&state, post_json("/events", &json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "event_name is required");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn malformed_json_body_is_rejected() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    let request = Request::builder()
        .method("POST")
        .uri("/events")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&state, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid request body");
}

#[tokio::test]
async fn unparseable_timestamp_in_body_is_rejected() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, body) = send(
        &state,
        post_json(
            "/events",
            &json!({"event_name": "login", "timestamp": "yesterday"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid request body");
}

#[tokio::test]
async fn get_event_round_trips() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    let created = create_event(
        &state,
        json!({"event_name": "purchase", "payload": {"user_id": "u-2", "amount": 9.5}}),
    )
    .await;

    let uri = format!("/events/{}", created["id"]);
    let (status, body) = send(&state, get(&uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], created["id"]);
    assert_eq!(body["data"]["payload"]["amount"], 9.5);
}

#[tokio::test]
async fn get_event_unknown_id_is_not_found() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, body) = send(&state, get("/events/99999999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "event not found");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn get_event_non_numeric_id_is_bad_request() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, body) = send(&state, get("/events/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid event id");
}

#[tokio::test]
async fn list_events_returns_newest_first() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    create_event(
        &state,
        json!({"event_name": "older", "timestamp": "2024-05-01T10:00:00Z"}),
    )
    .await;
    create_event(
        &state,
        json!({"event_name": "newer", "timestamp": "2024-05-02T10:00:00Z"}),
    )
    .await;

    let (status, body) = send(&state, get("/events")).await;

    assert_eq!(status, StatusCode::OK);
    let events = body["data"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["event_name"], "newer");
    assert_eq!(events[1]["event_name"], "older");
}

#[tokio::test]
async fn list_events_filters_by_name() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    create_event(&state, json!({"event_name": "login"})).await;
    create_event(&state, json!({"event_name": "logout"})).await;

    let (status, body) = send(&state, get("/events?event_name=login")).await;

    assert_eq!(status, StatusCode::OK);
    let events = body["data"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event_name"], "login");
}

#[tokio::test]
async fn list_events_ignores_unparseable_params() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    create_event(&state, json!({"event_name": "login"})).await;

    let (status, body) = send(
        &state,
        get("/events?limit=abc&offset=-5&from=whenever&to=tomorrow"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_events_applies_limit() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    for name in ["a", "b", "c"] {
        create_event(&state, json!({"event_name": name})).await;
    }

    let (status, body) = send(&state, get("/events?limit=2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn hourly_stats_buckets_events() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    create_event(
        &state,
        json!({"event_name": "login", "timestamp": "2024-05-01T10:05:00Z", "payload": {"user_id": "u1"}}),
    )
    .await;
    create_event(
        &state,
        json!({"event_name": "login", "timestamp": "2024-05-01T10:55:00Z", "payload": {"user_id": "u2"}}),
    )
    .await;

    let (status, body) = send(
        &state,
        get("/events/stats/hourly?from=2024-05-01T00:00:00Z&to=2024-05-02T00:00:00Z"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let stats = body["data"].as_array().unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0]["event_name"], "login");
    assert_eq!(stats[0]["event_count"], 2);
    assert_eq!(stats[0]["unique_users"], 2);
}

#[tokio::test]
async fn daily_stats_filters_by_name() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    create_event(
        &state,
        json!({"event_name": "login", "timestamp": "2024-05-01T10:00:00Z"}),
    )
    .await;
    create_event(
        &state,
        json!({"event_name": "logout", "timestamp": "2024-05-01T11:00:00Z"}),
    )
    .await;

    let (status, body) = send(
        &state,
        get("/events/stats/daily?event_name=logout&from=2024-05-01T00:00:00Z&to=2024-05-02T00:00:00Z"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let stats = body["data"].as_array().unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0]["event_name"], "logout");
}

#[tokio::test]
async fn stats_route_is_not_shadowed_by_event_lookup() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, body) = send(&state, get("/events/stats/hourly")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_array());
}

#[tokio::test]
async fn request_id_header_is_echoed() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-from-client")
        .body(Body::empty())
        .unwrap();

    let response = app(state.clone()).oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "req-from-client"
    );
}

#[tokio::test]
async fn request_id_is_minted_when_absent() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let response = app(state.clone()).oneshot(get("/health")).await.unwrap();

    let value = response
        .headers()
        .get("x-request-id")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(value.starts_with("req_"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, body) = send(&state, get("/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/events"].is_object());
    assert!(body["paths"]["/events/stats/hourly"].is_object());
}
