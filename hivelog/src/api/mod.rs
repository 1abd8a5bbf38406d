//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **Apiaries** (`/apiaries`): Bee yards
//! - **Hives** (`/hives`): Colonies, optionally assigned to an apiary
//! - **Inspections** (`/hive_inspections`): Dated observations with queen, brood and colony records
//! - **Hive actions** (`/hive_actions`): Follow-up tasks
//! - **Stats** (`/stats/*`): Dashboard aggregates
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with `utoipa`. Interactive documentation is served at `/docs`
//! and the raw document at `/api-docs/openapi.json`.

pub mod handlers;
pub mod models;
