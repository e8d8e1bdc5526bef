mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_ok() {
    let server = common::test_server(common::create_test_state(common::test_pool().await));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_degraded_when_database_closed() {
    let pool = common::test_pool().await;
    let server = common::test_server(common::create_test_state(pool.clone()));
    pool.close().await;

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
}

#[tokio::test]
async fn test_shorten_returns_503_when_database_closed() {
    let pool = common::test_pool().await;
    let server = common::test_server(common::create_test_state(pool.clone()));
    pool.close().await;

    let response = server
        .post("/api/shorten")
        .json(&serde_json::json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "service_unavailable"
    );
}

#[tokio::test]
async fn test_metrics_counts_events() {
    let pool = common::test_pool().await;
    let server = common::test_server(common::create_test_state(pool));

    let code = server
        .post("/api/shorten")
        .json(&serde_json::json!({ "url": "https://example.com" }))
        .await
        .json::<serde_json::Value>()["code"]
        .as_str()
        .unwrap()
        .to_string();

    server
        .post("/api/shorten")
        .json(&serde_json::json!({ "url": "https://example.com" }))
        .await
        .assert_status_ok();
    server
        .get(&format!("/{code}"))
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);
    server.get("/nothere").await.assert_status_not_found();

    let response = server.get("/metrics").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["links_created"], 1);
    assert_eq!(json["links_reused"], 1);
    assert_eq!(json["links_resolved"], 1);
    assert_eq!(json["resolution_failures"], 1);
    assert_eq!(json["visit_count_failures"], 0);
    assert_eq!(json["total_links"], 1);
}
