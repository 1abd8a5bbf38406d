//! Test utilities shared by the handler and integration tests.

use crate::config::{Config, PoolSettings};
use crate::db::{
    handlers::{Apiaries, HiveActions, Hives, Repository},
    models::{
        apiaries::{ApiaryCreateDBRequest, ApiaryDBResponse},
        hive_actions::{HiveActionCreateDBRequest, HiveActionDBResponse},
        hives::{HiveCreateDBRequest, HiveDBResponse},
    },
};
use crate::types::{ApiaryId, DEFAULT_HIVE_TYPE, HiveId};
use axum_test::TestServer;
use sqlx::SqlitePool;

pub async fn create_test_app(pool: SqlitePool) -> TestServer {
    let config = create_test_config();

    let app = crate::Application::new_with_pool(config, Some(pool))
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

pub fn create_test_config() -> Config {
    let mut config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Default::default()
    };
    // Tests hand their own pool to the application, so the URL is only used by setup_database tests
    config.database.url = "sqlite::memory:".to_string();
    config.database.pool = PoolSettings {
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    config
}

pub async fn create_test_apiary(pool: &SqlitePool, name: &str) -> ApiaryDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Apiaries::new(&mut conn);

    repo.create(&ApiaryCreateDBRequest {
        name: Some(name.to_string()),
        postcode: None,
    })
    .await
    .expect("Failed to create test apiary")
}

pub async fn create_test_hive(pool: &SqlitePool, name: &str, apiary_id: Option<ApiaryId>) -> HiveDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Hives::new(&mut conn);

    repo.create(&HiveCreateDBRequest {
        apiary_id,
        name: name.to_string(),
        hive_type: DEFAULT_HIVE_TYPE.to_string(),
    })
    .await
    .expect("Failed to create test hive")
}

pub async fn create_test_action(pool: &SqlitePool, hive_id: HiveId, text: &str, completed: bool) -> HiveActionDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = HiveActions::new(&mut conn);

    repo.create(&HiveActionCreateDBRequest {
        hive_id,
        inspection_id: None,
        action_text: text.to_string(),
        completed,
    })
    .await
    .expect("Failed to create test hive action")
}

/// Number of rows in `table`. Only call with fixed table names.
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows");
    count
}
