use crate::api::models::{
    MessageResponse, non_empty,
    hives::{HiveCreate, HiveResponse, HiveUpdate},
};
use crate::db::{
    errors::DbError,
    handlers::{Apiaries, Hives, Repository},
    models::hives::{HiveCreateDBRequest, HiveUpdateDBRequest},
};
use crate::errors::{ApiJson, Error, Result};
use crate::types::{ApiaryId, DEFAULT_HIVE_TYPE, HiveId};
use crate::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sqlx::{Acquire, SqliteConnection};

/// Look up an apiary by name. No match leaves the hive unassigned rather than failing.
async fn resolve_apiary(conn: &mut SqliteConnection, name: Option<String>) -> Result<Option<ApiaryId>> {
    match non_empty(name) {
        Some(name) => {
            let id = Apiaries::new(conn).find_id_by_name(&name).await?;
            if id.is_none() {
                tracing::debug!("No apiary named {:?}; hive will be unassigned", name);
            }
            Ok(id)
        }
        None => Ok(None),
    }
}

#[utoipa::path(
    get,
    path = "/hives",
    tag = "hives",
    summary = "List hives",
    responses(
        (status = 200, description = "All hives", body = Vec<HiveResponse>),
        (status = 500, description = "Store failure")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_hives(State(state): State<AppState>) -> Result<Json<Vec<HiveResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let hives = Hives::new(&mut conn).list(&()).await?;

    Ok(Json(hives.into_iter().map(HiveResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/hives",
    tag = "hives",
    summary = "Create hive",
    request_body = HiveCreate,
    responses(
        (status = 201, description = "Hive created", body = HiveResponse),
        (status = 400, description = "Malformed body"),
        (status = 500, description = "Store failure")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_hive(State(state): State<AppState>, ApiJson(create): ApiJson<HiveCreate>) -> Result<(StatusCode, Json<HiveResponse>)> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let apiary_id = resolve_apiary(tx.acquire().await.map_err(|e| Error::Database(e.into()))?, create.current_apiary).await?;
    let request = HiveCreateDBRequest {
        apiary_id,
        name: create.name.unwrap_or_default(),
        hive_type: non_empty(create.hive_type).unwrap_or_else(|| DEFAULT_HIVE_TYPE.to_string()),
    };

    let hive = {
        let mut repo = Hives::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        repo.create(&request).await?
    };
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(hive.into())))
}

#[utoipa::path(
    put,
    path = "/hives/{id}",
    tag = "hives",
    summary = "Update hive",
    description = "Partial update. `currentApiary` is resolved by name and wins over `apiary_id`; `apiary_id: null` unassigns.",
    request_body = HiveUpdate,
    params(("id" = i64, Path, description = "Hive ID")),
    responses(
        (status = 200, description = "Hive updated", body = HiveResponse),
        (status = 404, description = "Hive not found"),
        (status = 500, description = "Store failure")
    )
)]
#[tracing::instrument(skip_all, fields(hive_id = id))]
pub async fn update_hive(State(state): State<AppState>, Path(id): Path<HiveId>, ApiJson(update): ApiJson<HiveUpdate>) -> Result<Json<HiveResponse>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let apiary_id = match update.current_apiary {
        Some(name) => Some(resolve_apiary(tx.acquire().await.map_err(|e| Error::Database(e.into()))?, Some(name)).await?),
        None => update.apiary_id,
    };
    let request = HiveUpdateDBRequest {
        name: update.name,
        apiary_id,
        hive_type: non_empty(update.hive_type),
    };

    let hive = {
        let mut repo = Hives::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        repo.update(id, &request).await.map_err(|e| match e {
            DbError::NotFound => Error::not_found("Hive", id),
            other => other.into(),
        })?
    };
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(hive.into()))
}

#[utoipa::path(
    delete,
    path = "/hives/{id}",
    tag = "hives",
    summary = "Delete hive",
    description = "Inspections and actions recorded against the hive are kept.",
    params(("id" = i64, Path, description = "Hive ID")),
    responses(
        (status = 200, description = "Hive deleted", body = MessageResponse),
        (status = 404, description = "Hive not found"),
        (status = 500, description = "Store failure")
    )
)]
#[tracing::instrument(skip_all, fields(hive_id = id))]
pub async fn delete_hive(State(state): State<AppState>, Path(id): Path<HiveId>) -> Result<Json<MessageResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    if !Hives::new(&mut conn).delete(id).await? {
        return Err(Error::not_found("Hive", id));
    }

    Ok(Json(MessageResponse::new("Hive deleted successfully")))
}

#[cfg(test)]
mod tests {
    use crate::api::models::{MessageResponse, hives::HiveResponse};
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::SqlitePool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_hive_resolves_apiary_name(pool: SqlitePool) {
        let app = create_test_app(pool.clone()).await;
        let apiary = create_test_apiary(&pool, "Home Yard").await;

        let response = app
            .post("/hives")
            .json(&json!({ "name": "Queen Bee", "currentApiary": "Home Yard", "type": "Warre" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let hive: HiveResponse = response.json();
        assert_eq!(hive.apiary_id, Some(apiary.id));
        assert_eq!(hive.name, "Queen Bee");
        assert_eq!(hive.hive_type, "Warre");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_hive_with_unknown_apiary_is_unassigned(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        let response = app.post("/hives").json(&json!({ "name": "Stray", "currentApiary": "Atlantis" })).await;

        response.assert_status(StatusCode::CREATED);
        let hive: HiveResponse = response.json();
        assert!(hive.apiary_id.is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_hive_defaults(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        let response = app.post("/hives").json(&json!({})).await;

        response.assert_status(StatusCode::CREATED);
        let hive: HiveResponse = response.json();
        assert_eq!(hive.name, "");
        assert_eq!(hive.hive_type, "Langstroth");
        assert!(hive.apiary_id.is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_hive_moves_between_apiaries(pool: SqlitePool) {
        let app = create_test_app(pool.clone()).await;
        let home = create_test_apiary(&pool, "Home Yard").await;
        let heath = create_test_apiary(&pool, "Heath").await;
        let hive = create_test_hive(&pool, "Queen Bee", Some(home.id)).await;

        let response = app.put(&format!("/hives/{}", hive.id)).json(&json!({ "currentApiary": "Heath" })).await;
        response.assert_status_ok();
        let moved: HiveResponse = response.json();
        assert_eq!(moved.apiary_id, Some(heath.id));
        assert_eq!(moved.name, "Queen Bee");

        let response = app
            .put(&format!("/hives/{}", hive.id))
            .json(&json!({ "apiary_id": home.id, "hive_type": "Top Bar" }))
            .await;
        response.assert_status_ok();
        let moved_back: HiveResponse = response.json();
        assert_eq!(moved_back.apiary_id, Some(home.id));
        assert_eq!(moved_back.hive_type, "Top Bar");

        let response = app.put(&format!("/hives/{}", hive.id)).json(&json!({ "apiary_id": null })).await;
        response.assert_status_ok();
        let unassigned: HiveResponse = response.json();
        assert!(unassigned.apiary_id.is_none());
        assert_eq!(unassigned.hive_type, "Top Bar");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_missing_hive_returns_404_and_changes_nothing(pool: SqlitePool) {
        let app = create_test_app(pool.clone()).await;
        let hive = create_test_hive(&pool, "Queen Bee", None).await;

        let response = app.put("/hives/9999").json(&json!({ "name": "Renamed" })).await;

        response.assert_status_not_found();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Hive not found");

        let hives: Vec<HiveResponse> = app.get("/hives").await.json();
        assert_eq!(hives.len(), 1);
        assert_eq!(hives[0].id, hive.id);
        assert_eq!(hives[0].name, "Queen Bee");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_with_empty_hive_type_keeps_current_type(pool: SqlitePool) {
        let app = create_test_app(pool.clone()).await;
        let hive = create_test_hive(&pool, "Queen Bee", None).await;

        let response = app.put(&format!("/hives/{}", hive.id)).json(&json!({ "hive_type": "" })).await;

        response.assert_status_ok();
        let updated: HiveResponse = response.json();
        assert_eq!(updated.hive_type, hive.hive_type);
        assert_eq!(updated.name, "Queen Bee");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_hive(pool: SqlitePool) {
        let app = create_test_app(pool.clone()).await;
        let hive = create_test_hive(&pool, "Queen Bee", None).await;

        let response = app.delete(&format!("/hives/{}", hive.id)).await;
        response.assert_status_ok();
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Hive deleted successfully");

        let response = app.delete(&format!("/hives/{}", hive.id)).await;
        response.assert_status_not_found();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Hive not found");
    }
}
