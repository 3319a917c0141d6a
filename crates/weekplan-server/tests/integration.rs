use axum::http::StatusCode;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Send a GET request via `oneshot` and return (status, parsed JSON body).
async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Send a request with a JSON body via `oneshot` and return (status, parsed JSON body).
async fn send_json(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn router(dir: &TempDir) -> axum::Router {
    weekplan_server::build_router(dir.path().to_path_buf())
}

async fn create_client(dir: &TempDir, table: &str, name: &str) -> String {
    let (status, json) = send_json(
        router(dir),
        "POST",
        "/api/client",
        serde_json::json!({ "tableType": table, "name": name }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_str().unwrap().to_string()
}

async fn create_label(dir: &TempDir, name: &str, color: &str, category: &str) -> String {
    let (status, json) = send_json(
        router(dir),
        "POST",
        "/api/label",
        serde_json::json!({ "name": name, "color": color, "category": category }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[tokio::test]
async fn data_on_fresh_root_is_empty() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(router(&dir), "/api/data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["labels"], serde_json::json!([]));
    assert_eq!(json["tables"]["content"]["clients"], serde_json::json!([]));
}

#[tokio::test]
async fn corrupt_document_returns_503() {
    let dir = TempDir::new().unwrap();
    let path = weekplan_core::paths::document_path(dir.path());
    weekplan_core::io::atomic_write(&path, b"not json").unwrap();
    let (status, json) = get(router(&dir), "/api/data").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json["error"].as_str().unwrap().contains("unavailable"));
}

// ---------------------------------------------------------------------------
// Clients and weeks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn client_lifecycle_round_trips_through_document() {
    let dir = TempDir::new().unwrap();
    let id = create_client(&dir, "content", "Acme").await;

    let (status, _) = send_json(
        router(&dir),
        "PUT",
        "/api/client",
        serde_json::json!({ "tableType": "content", "clientId": id, "name": "Acme Corp" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send_json(
        router(&dir),
        "POST",
        "/api/week",
        serde_json::json!({
            "tableType": "content",
            "clientId": id,
            "weekKey": "2024-11",
            "note": "kickoff",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["color"], "");
    assert_eq!(json["note"], "kickoff");

    let (_, data) = get(router(&dir), "/api/data").await;
    let client = &data["tables"]["content"]["clients"][0];
    assert_eq!(client["name"], "Acme Corp");
    assert_eq!(client["weeks"]["2024-11"]["note"], "kickoff");

    let (status, _) = send_json(
        router(&dir),
        "DELETE",
        "/api/client",
        serde_json::json!({ "tableType": "content", "clientId": id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, data) = get(router(&dir), "/api/data").await;
    assert_eq!(data["tables"]["content"]["clients"], serde_json::json!([]));
}

#[tokio::test]
async fn unknown_client_returns_404() {
    let dir = TempDir::new().unwrap();
    let (status, json) = send_json(
        router(&dir),
        "POST",
        "/api/week",
        serde_json::json!({
            "tableType": "music",
            "clientId": "nope",
            "weekKey": "2024-11",
            "color": "#111",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn week_53_of_short_year_returns_400() {
    let dir = TempDir::new().unwrap();
    let id = create_client(&dir, "content", "Acme").await;
    let (status, _) = send_json(
        router(&dir),
        "POST",
        "/api/week",
        serde_json::json!({
            "tableType": "content",
            "clientId": id,
            "weekKey": "2021-53",
            "color": "#111",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_table_type_returns_400() {
    let dir = TempDir::new().unwrap();
    let (status, _) = send_json(
        router(&dir),
        "POST",
        "/api/client",
        serde_json::json!({ "tableType": "video", "name": "X" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cycle_uses_labels_of_the_table_category() {
    let dir = TempDir::new().unwrap();
    create_label(&dir, "Idea", "#111", "content").await;
    create_label(&dir, "Live", "#999", "music").await;
    create_label(&dir, "Shot", "#222", "content").await;
    let id = create_client(&dir, "content", "Acme").await;

    let body = serde_json::json!({ "tableType": "content", "clientId": id, "weekKey": "2024-11" });
    let mut colors = Vec::new();
    for _ in 0..3 {
        let (status, json) = send_json(router(&dir), "POST", "/api/week/cycle", body.clone()).await;
        assert_eq!(status, StatusCode::OK);
        colors.push(json["color"].as_str().unwrap().to_string());
    }
    assert_eq!(colors, vec!["#111", "#222", ""]);
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deleting_label_resets_weeks_and_keeps_notes() {
    let dir = TempDir::new().unwrap();
    let label = create_label(&dir, "Idea", "#111", "content").await;
    let content = create_client(&dir, "content", "Acme").await;
    let music = create_client(&dir, "music", "Band").await;
    for (table, id) in [("content", &content), ("music", &music)] {
        send_json(
            router(&dir),
            "POST",
            "/api/week",
            serde_json::json!({
                "tableType": table,
                "clientId": id,
                "weekKey": "2024-11",
                "color": "#111",
                "note": "n",
            }),
        )
        .await;
    }

    let (status, json) = send_json(
        router(&dir),
        "DELETE",
        "/api/label",
        serde_json::json!({ "id": label }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["weeksReset"], 2);

    let (_, data) = get(router(&dir), "/api/data").await;
    for table in ["content", "music"] {
        let week = &data["tables"][table]["clients"][0]["weeks"]["2024-11"];
        assert_eq!(week["color"], "");
        assert_eq!(week["note"], "n");
    }
}

#[tokio::test]
async fn updating_missing_label_returns_404() {
    let dir = TempDir::new().unwrap();
    let (status, _) = send_json(
        router(&dir),
        "PUT",
        "/api/label",
        serde_json::json!({ "id": "missing", "name": "X" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Weeks and reminders
// ---------------------------------------------------------------------------

#[tokio::test]
async fn week_window_defaults_to_ten_each_side() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(router(&dir), "/api/weeks?week=2024-10").await;
    assert_eq!(status, StatusCode::OK);
    let weeks = json["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 21);
    assert_eq!(weeks[0], "2023-52");
    assert_eq!(weeks[10], "2024-10");
    assert_eq!(weeks[20], "2024-20");
}

#[tokio::test]
async fn reminders_respect_status_and_dismissals() {
    let dir = TempDir::new().unwrap();
    let done = create_client(&dir, "content", "Done").await;
    create_client(&dir, "content", "Missing").await;
    let dismissed = create_client(&dir, "music", "Dismissed").await;
    send_json(
        router(&dir),
        "POST",
        "/api/week",
        serde_json::json!({
            "tableType": "content",
            "clientId": done,
            "weekKey": "2024-11",
            "color": "#111",
        }),
    )
    .await;

    let uri = format!("/api/reminders?week=2024-10&dismissed={dismissed}");
    let (status, json) = get(router(&dir), &uri).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json["reminders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Missing"]);
}

#[tokio::test]
async fn reminders_reject_malformed_week() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(router(&dir), "/api/reminders?week=2024-W10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn reminders_reject_week_without_successor() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(router(&dir), "/api/reminders?week=9999-52").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("10000"));
}
