mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_redirect_success() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "abc123", "https://example.com/page", false).await;
    let server = common::test_server(common::create_test_state(pool.clone()));

    let response = server.get("/abc123").await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/page");
    assert_eq!(common::visits_of(&pool, "abc123").await, 1);
}

#[tokio::test]
async fn test_redirect_counts_each_visit() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "count1", "https://example.com", false).await;
    let server = common::test_server(common::create_test_state(pool.clone()));

    for _ in 0..3 {
        server
            .get("/count1")
            .await
            .assert_status(StatusCode::TEMPORARY_REDIRECT);
    }

    assert_eq!(common::visits_of(&pool, "count1").await, 3);
}

#[tokio::test]
async fn test_redirect_not_found_renders_page() {
    let server = common::test_server(common::create_test_state(common::test_pool().await));

    let response = server.get("/zzzzzz").await;

    response.assert_status_not_found();
    let body = response.text();
    assert!(body.contains("Link not found"));
    assert!(body.contains("zzzzzz"));
}

#[tokio::test]
async fn test_redirect_is_case_sensitive() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "AbC", "https://example.com", true).await;
    let server = common::test_server(common::create_test_state(pool));

    server.get("/abc").await.assert_status_not_found();
    server
        .get("/AbC")
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_link_details_do_not_count_visits() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "info01", "https://example.com", true).await;
    let server = common::test_server(common::create_test_state(pool.clone()));

    server
        .get("/info01")
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);

    let response = server.get("/api/links/info01").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "info01");
    assert_eq!(json["target"], "https://example.com");
    assert_eq!(json["is_custom"], true);
    assert_eq!(json["visits"], 1);
    assert_eq!(json["short_url"], format!("{}/info01", common::TEST_BASE_URL));

    assert_eq!(common::visits_of(&pool, "info01").await, 1);
}

#[tokio::test]
async fn test_link_details_not_found() {
    let server = common::test_server(common::create_test_state(common::test_pool().await));

    let response = server.get("/api/links/missing").await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
}
