use crate::api::models::hive_actions::{HiveActionCreate, HiveActionResponse, HiveActionUpdate, ListHiveActionsQuery};
use crate::db::{
    errors::DbError,
    handlers::{HiveActions, Hives, Repository},
    models::hive_actions::HiveActionUpdateDBRequest,
};
use crate::errors::{ApiJson, Error, Result};
use crate::types::HiveActionId;
use crate::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/hive_actions",
    tag = "hive_actions",
    summary = "List hive actions",
    params(ListHiveActionsQuery),
    responses(
        (status = 200, description = "Matching hive actions", body = Vec<HiveActionResponse>),
        (status = 500, description = "Store failure")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_hive_actions(
    State(state): State<AppState>,
    Query(query): Query<ListHiveActionsQuery>,
) -> Result<Json<Vec<HiveActionResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let actions = HiveActions::new(&mut conn).list(&query.into()).await?;

    Ok(Json(actions.into_iter().map(HiveActionResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/hive_actions",
    tag = "hive_actions",
    summary = "Create hive action",
    request_body = HiveActionCreate,
    responses(
        (status = 201, description = "Hive action created", body = HiveActionResponse),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "Hive not found"),
        (status = 500, description = "Store failure")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_hive_action(
    State(state): State<AppState>,
    ApiJson(create): ApiJson<HiveActionCreate>,
) -> Result<(StatusCode, Json<HiveActionResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    if Hives::new(&mut conn).get_by_id(create.hive_id).await?.is_none() {
        return Err(Error::not_found("Hive", create.hive_id));
    }
    let action = HiveActions::new(&mut conn).create(&create.into()).await?;

    Ok((StatusCode::CREATED, Json(action.into())))
}

#[utoipa::path(
    put,
    path = "/hive_actions/{id}",
    tag = "hive_actions",
    summary = "Update hive action",
    request_body = HiveActionUpdate,
    params(("id" = i64, Path, description = "Hive action ID")),
    responses(
        (status = 200, description = "Hive action updated", body = HiveActionResponse),
        (status = 404, description = "Hive action not found"),
        (status = 500, description = "Store failure")
    )
)]
#[tracing::instrument(skip_all, fields(hive_action_id = id))]
pub async fn update_hive_action(
    State(state): State<AppState>,
    Path(id): Path<HiveActionId>,
    ApiJson(update): ApiJson<HiveActionUpdate>,
) -> Result<Json<HiveActionResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let request = HiveActionUpdateDBRequest {
        completed: update.completed,
    };
    let action = HiveActions::new(&mut conn).update(id, &request).await.map_err(|e| match e {
        DbError::NotFound => Error::not_found("Hive action", id),
        other => other.into(),
    })?;

    Ok(Json(action.into()))
}

#[cfg(test)]
mod tests {
    use crate::api::models::hive_actions::HiveActionResponse;
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::SqlitePool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_hive_action(pool: SqlitePool) {
        let app = create_test_app(pool.clone()).await;
        let hive = create_test_hive(&pool, "Queen Bee", None).await;

        let response = app
            .post("/hive_actions")
            .json(&json!({ "hive_id": hive.id, "action_text": "Add a super", "inspection_id": null }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let action: HiveActionResponse = response.json();
        assert_eq!(action.hive_id, hive.id);
        assert_eq!(action.action_text, "Add a super");
        assert!(!action.completed);
        assert!(action.completed_at.is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_hive_action_for_unknown_hive(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        let response = app.post("/hive_actions").json(&json!({ "hive_id": 5, "action_text": "Feed" })).await;

        response.assert_status_not_found();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Hive not found");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_filters_by_hive_and_completion(pool: SqlitePool) {
        let app = create_test_app(pool.clone()).await;
        let hive = create_test_hive(&pool, "Queen Bee", None).await;
        let other = create_test_hive(&pool, "Drone Home", None).await;

        let open = create_test_action(&pool, hive.id, "Feed", false).await;
        create_test_action(&pool, hive.id, "Treat", true).await;
        create_test_action(&pool, other.id, "Requeen", false).await;

        let response = app.get(&format!("/hive_actions?hive_id={}&completed=false", hive.id)).await;
        response.assert_status_ok();
        let actions: Vec<HiveActionResponse> = response.json();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].id, open.id);
        assert!(actions.iter().all(|a| a.hive_id == hive.id && !a.completed));

        let completed: Vec<HiveActionResponse> = app.get("/hive_actions?completed=true").await.json();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].action_text, "Treat");

        let all: Vec<HiveActionResponse> = app.get("/hive_actions").await.json();
        assert_eq!(all.len(), 3);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_empty_filters_are_treated_as_absent(pool: SqlitePool) {
        let app = create_test_app(pool.clone()).await;
        let hive = create_test_hive(&pool, "Queen Bee", None).await;
        let other = create_test_hive(&pool, "Drone Home", None).await;
        create_test_action(&pool, hive.id, "Feed", false).await;
        create_test_action(&pool, hive.id, "Treat", true).await;
        create_test_action(&pool, other.id, "Requeen", false).await;

        let response = app.get("/hive_actions?hive_id=&completed=false").await;
        response.assert_status_ok();
        let open: Vec<HiveActionResponse> = response.json();
        assert_eq!(open.len(), 2);
        assert!(open.iter().all(|a| !a.completed));

        let response = app.get(&format!("/hive_actions?hive_id={}&completed=", hive.id)).await;
        response.assert_status_ok();
        let for_hive: Vec<HiveActionResponse> = response.json();
        assert_eq!(for_hive.len(), 2);
        assert!(for_hive.iter().all(|a| a.hive_id == hive.id));

        let all: Vec<HiveActionResponse> = app.get("/hive_actions?hive_id=&completed=").await.json();
        assert_eq!(all.len(), 3);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_unparseable_filter_is_rejected(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        app.get("/hive_actions?completed=maybe").await.assert_status_bad_request();
        app.get("/hive_actions?hive_id=seven").await.assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_hive_action(pool: SqlitePool) {
        let app = create_test_app(pool.clone()).await;
        let hive = create_test_hive(&pool, "Queen Bee", None).await;
        let action = create_test_action(&pool, hive.id, "Feed", false).await;

        let response = app.put(&format!("/hive_actions/{}", action.id)).json(&json!({ "completed": true })).await;
        response.assert_status_ok();
        let done: HiveActionResponse = response.json();
        assert!(done.completed);
        assert!(done.completed_at.is_some());

        let response = app.put(&format!("/hive_actions/{}", action.id)).json(&json!({ "completed": false })).await;
        response.assert_status_ok();
        let reopened: HiveActionResponse = response.json();
        assert!(!reopened.completed);
        assert!(reopened.completed_at.is_none());

        let response = app.put("/hive_actions/9999").json(&json!({ "completed": true })).await;
        response.assert_status_not_found();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Hive action not found");
    }
}
