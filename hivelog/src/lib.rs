//! # hivelog: record keeping for beekeepers
//!
//! `hivelog` is a small REST service that stores a beekeeper's apiaries, the hives placed in
//! them, the inspections carried out on each hive, and the follow-up actions raised during those
//! inspections. It backs a browser dashboard and is deliberately thin: every endpoint maps onto a
//! handful of SQL statements against a single SQLite database.
//!
//! ## Architecture
//!
//! The HTTP layer is built on [Axum](https://github.com/tokio-rs/axum). Persistence goes through
//! [sqlx](https://github.com/launchbadge/sqlx) with SQLite, and the schema is created by the
//! embedded migrations on startup.
//!
//! The **API layer** ([`api`]) holds the request handlers and the JSON request/response models.
//! Handlers validate and normalise input (empty strings become `null`, apiary names are resolved
//! to ids) and then call into the database layer.
//!
//! The **database layer** ([`db`]) uses the repository pattern. Each table family has a repository
//! wrapping a borrowed connection, so a handler can run several repositories inside one
//! transaction. Submitting an inspection writes up to four tables and updates the action list
//! atomically.
//!
//! Errors from either layer are converted into a JSON body of the form `{"error": "..."}` by
//! [`errors::Error`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use hivelog::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = hivelog::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     hivelog::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.
pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
mod types;

#[cfg(test)]
mod test;
#[cfg(test)]
mod test_utils;

use crate::api::handlers::{apiaries, fallback, hive_actions, hives, inspections, stats};
use crate::config::CorsOrigin;
use crate::openapi::ApiDoc;
use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::{get, put},
};
use bon::Builder;
pub use config::Config;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{ApiaryId, HiveActionId, HiveId, InspectionId};

/// Application state shared across all request handlers.
///
/// ```ignore
/// let state = AppState::builder().db(pool).config(config).build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
}

/// Get the hivelog database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Open the connection pool described by `config.database` and bring the schema up to date.
#[instrument(skip_all)]
async fn setup_database(config: &Config) -> anyhow::Result<SqlitePool> {
    let database = &config.database;

    let options = SqliteConnectOptions::from_str(&database.url)?
        .create_if_missing(database.create_if_missing)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(database.pool.max_connections)
        .min_connections(database.pool.min_connections)
        .acquire_timeout(database.pool.acquire_timeout())
        .idle_timeout(database.pool.idle_timeout())
        .connect_with(options)
        .await?;

    migrator().run(&pool).await?;
    info!("Database ready");

    Ok(pool)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let origins = &config.cors.allowed_origins;

    let allow_origin = if origins.contains(&CorsOrigin::Wildcard) {
        AllowOrigin::any()
    } else {
        let mut values = Vec::with_capacity(origins.len());
        for origin in origins {
            if let CorsOrigin::Url(url) = origin {
                // Browsers send the origin without a trailing slash
                values.push(url.origin().ascii_serialization().parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(values)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
///
/// Unknown paths and unsupported methods on known paths are answered with a JSON error body
/// rather than axum's empty defaults.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors_layer = create_cors_layer(&state.config)?;

    let api_routes = Router::new()
        .route("/apiaries", get(apiaries::list_apiaries).post(apiaries::create_apiary))
        .route("/apiaries/{id}", put(apiaries::update_apiary).delete(apiaries::delete_apiary))
        .route("/hives", get(hives::list_hives).post(hives::create_hive))
        .route("/hives/{id}", put(hives::update_hive).delete(hives::delete_hive))
        .route(
            "/hive_inspections",
            get(inspections::list_inspections).post(inspections::create_inspection),
        )
        .route("/hive_inspections/{id}", get(inspections::get_inspection))
        .route(
            "/hive_actions",
            get(hive_actions::list_hive_actions).post(hive_actions::create_hive_action),
        )
        .route("/hive_actions/{id}", put(hive_actions::update_hive_action))
        .route("/stats/hive_distribution", get(stats::hive_distribution))
        .with_state(state);

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .method_not_allowed_fallback(fallback::method_not_allowed)
        .fallback(fallback::not_found)
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// The assembled service: configuration, connection pool and router.
pub struct Application {
    router: Router,
    config: Config,
    pool: SqlitePool,
}

impl Application {
    /// Create a new application instance, opening the database described by the config
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Create a new application instance, reusing `pool` when given.
    ///
    /// Migrations are applied to the supplied pool as well; already-applied migrations are skipped.
    pub async fn new_with_pool(config: Config, pool: Option<SqlitePool>) -> anyhow::Result<Self> {
        debug!("Starting hivelog with configuration: {:#?}", config);

        let pool = match pool {
            Some(pool) => {
                migrator().run(&pool).await?;
                pool
            }
            None => setup_database(&config).await?,
        };

        let app_state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(app_state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "hivelog listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
