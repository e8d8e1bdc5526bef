#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use url_shortener::config::ShortenerConfig;
use url_shortener::domain::entities::{Link, NewLink};
use url_shortener::domain::repositories::LinkRepository;
use url_shortener::infrastructure::persistence::{
    self, MIGRATOR, SqliteLinkRepository, connect_in_memory,
};
use url_shortener::routes::app_router;
use url_shortener::state::AppState;

pub const TEST_BASE_URL: &str = "https://sho.rt";

pub async fn test_pool() -> SqlitePool {
    connect_in_memory().await.unwrap()
}

/// File-backed pool with several connections, for tests that need writers
/// to actually contend. Each `name` gets a fresh database under the temp dir.
pub async fn test_file_pool(name: &str) -> SqlitePool {
    let path = std::env::temp_dir().join(format!(
        "url-shortener-test-{}-{name}.db",
        std::process::id()
    ));
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }

    let url = format!("sqlite://{}", path.display());
    let pool = persistence::connect(&url, 8, Duration::from_secs(30))
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();

    pool
}

pub fn test_config() -> ShortenerConfig {
    ShortenerConfig {
        operation_timeout: Some(Duration::from_secs(10)),
        ..ShortenerConfig::default()
    }
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    create_test_state_with(pool, test_config())
}

pub fn create_test_state_with(pool: SqlitePool, config: ShortenerConfig) -> AppState {
    AppState::new(pool, config, Some(TEST_BASE_URL.to_string())).unwrap()
}

pub fn test_server(state: AppState) -> TestServer {
    let app = ServiceExt::<Request>::into_make_service(app_router(state));
    TestServer::new(app).unwrap()
}

pub async fn create_test_link(pool: &SqlitePool, code: &str, target: &str, is_custom: bool) -> Link {
    SqliteLinkRepository::new(Arc::new(pool.clone()))
        .insert(NewLink {
            code: code.to_string(),
            target: target.to_string(),
            is_custom,
            created_at: Utc::now(),
        })
        .await
        .unwrap()
}

pub async fn visits_of(pool: &SqlitePool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT visits FROM links WHERE code = ?1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}
