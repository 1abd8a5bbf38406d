//! End-to-end flows through the HTTP API, covering the behaviour a dashboard session relies on.

use crate::api::models::{
    MessageResponse,
    apiaries::ApiaryResponse,
    hive_actions::HiveActionResponse,
    hives::HiveResponse,
    inspections::{InspectionDetailsResponse, InspectionResponse},
    stats::HiveDistributionResponse,
};
use crate::test_utils::{count_rows, create_test_action, create_test_app, create_test_hive};
use axum::http::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;

/// Walk through a season: set up an apiary and hive, inspect it twice, and tick off the actions
/// raised in the first inspection during the second.
#[sqlx::test]
#[test_log::test]
async fn test_inspection_season_journey(pool: SqlitePool) {
    let app = create_test_app(pool.clone()).await;

    let apiary: ApiaryResponse = app
        .post("/apiaries")
        .json(&json!({ "name": "Orchard", "postcode": "OX1 2AB" }))
        .await
        .json();

    let response = app
        .post("/hives")
        .json(&json!({ "name": "Queen Bee", "currentApiary": "Orchard", "type": "National" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let hive: HiveResponse = response.json();
    assert_eq!(hive.apiary_id, Some(apiary.id));
    assert_eq!(hive.hive_type, "National");

    // First visit raises two follow-up actions
    let response = app
        .post("/hive_inspections")
        .json(&json!({
            "hive_id": hive.id,
            "inspection_date": "2025-04-12",
            "general_behavior": "Calm",
            "queenStatusData": { "queen_seen": true, "queen_marked": true, "queen_mark_color": "Blue" },
            "broodPresenceData": { "eggs_present": true, "drone_brood": 2 },
            "colonyStrengthData": { "bee_coverage": "Strong", "brood_frames": 7, "queenright_status": "Queenright" },
            "actions": [
                { "text": "Add a super", "checked": false },
                { "text": "Check feeder", "checked": false }
            ]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let first: InspectionResponse = response.json();

    let open: Vec<HiveActionResponse> = app
        .get(&format!("/hive_actions?hive_id={}&completed=false", hive.id))
        .await
        .json();
    assert_eq!(open.len(), 2);
    assert!(open.iter().all(|a| a.inspection_id == Some(first.id)));

    // Second visit completes both and raises nothing new
    let ids: Vec<i64> = open.iter().map(|a| a.id).collect();
    app.post("/hive_inspections")
        .json(&json!({
            "hive_id": hive.id,
            "inspection_date": "2025-04-26",
            "completed_action_ids": ids
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let open: Vec<HiveActionResponse> = app
        .get(&format!("/hive_actions?hive_id={}&completed=false", hive.id))
        .await
        .json();
    assert!(open.is_empty());

    let done: Vec<HiveActionResponse> = app
        .get(&format!("/hive_actions?hive_id={}&completed=true", hive.id))
        .await
        .json();
    assert_eq!(done.len(), 2);
    assert!(done.iter().all(|a| a.completed_at.is_some()));

    let history: Vec<InspectionDetailsResponse> = app.get(&format!("/hive_inspections?hive_id={}", hive.id)).await.json();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].inspection.id, first.id);
    let queen = history[1].queen_status.as_ref().expect("first inspection recorded the queen");
    assert_eq!(queen.status.queen_mark_color.as_deref(), Some("Blue"));
    assert!(history[0].queen_status.is_none());

    let distribution: HiveDistributionResponse = app.get("/stats/hive_distribution").await.json();
    assert_eq!(distribution.apiaries[0].hive_count, 1);
    assert_eq!(distribution.unassigned, 0);
}

#[sqlx::test]
#[test_log::test]
async fn test_full_payload_writes_one_row_per_table(pool: SqlitePool) {
    let app = create_test_app(pool.clone()).await;
    let hive = create_test_hive(&pool, "Queen Bee", None).await;

    let response = app
        .post("/hive_inspections")
        .json(&json!({
            "hive_id": hive.id,
            "queenStatusData": { "queen_seen": true },
            "broodPresenceData": { "eggs_present": true },
            "colonyStrengthData": { "brood_frames": 5 }
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let inspection: InspectionResponse = response.json();

    for table in ["hive_inspections", "queen_status", "brood_presence", "colony_strength"] {
        assert_eq!(count_rows(&pool, table).await, 1, "{table}");
    }

    for table in ["queen_status", "brood_presence", "colony_strength"] {
        let (inspection_id,): (i64,) = sqlx::query_as(&format!("SELECT inspection_id FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(inspection_id, inspection.id, "{table}");
    }
}

#[sqlx::test]
#[test_log::test]
async fn test_completed_action_ids_complete_exactly_those_rows(pool: SqlitePool) {
    let app = create_test_app(pool.clone()).await;
    let hive = create_test_hive(&pool, "Queen Bee", None).await;
    let first = create_test_action(&pool, hive.id, "Feed", false).await;
    let second = create_test_action(&pool, hive.id, "Treat for varroa", false).await;
    let third = create_test_action(&pool, hive.id, "Clean floor", false).await;
    assert_eq!((first.id, second.id), (1, 2));

    app.post("/hive_inspections")
        .json(&json!({ "hive_id": hive.id, "completed_action_ids": [1, 2] }))
        .await
        .assert_status(StatusCode::CREATED);

    let actions: Vec<HiveActionResponse> = app.get("/hive_actions").await.json();
    let completed: Vec<i64> = actions.iter().filter(|a| a.completed).map(|a| a.id).collect();
    assert_eq!(completed, vec![1, 2]);
    assert!(actions.iter().any(|a| a.id == third.id && !a.completed && a.completed_at.is_none()));
}

#[sqlx::test]
#[test_log::test]
async fn test_blank_actions_are_dropped(pool: SqlitePool) {
    let app = create_test_app(pool.clone()).await;
    let hive = create_test_hive(&pool, "Queen Bee", None).await;

    app.post("/hive_inspections")
        .json(&json!({
            "hive_id": hive.id,
            "actions": [
                { "text": "check feeder", "checked": false },
                { "text": "  ", "checked": true }
            ]
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let actions: Vec<HiveActionResponse> = app.get("/hive_actions").await.json();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].action_text, "check feeder");
    assert!(!actions[0].completed);
}

#[sqlx::test]
#[test_log::test]
async fn test_list_open_actions_for_one_hive(pool: SqlitePool) {
    let app = create_test_app(pool.clone()).await;
    sqlx::query("INSERT INTO hives (id, name) VALUES (7, 'Seven'), (8, 'Eight')")
        .execute(&pool)
        .await
        .unwrap();
    let open = create_test_action(&pool, 7, "Feed", false).await;
    create_test_action(&pool, 7, "Inspect", true).await;
    create_test_action(&pool, 8, "Feed", false).await;

    let response = app.get("/hive_actions?hive_id=7&completed=false").await;

    response.assert_status_ok();
    let actions: Vec<HiveActionResponse> = response.json();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].id, open.id);
}

#[sqlx::test]
#[test_log::test]
async fn test_failed_submission_leaves_nothing_behind(pool: SqlitePool) {
    let app = create_test_app(pool.clone()).await;
    let hive = create_test_hive(&pool, "Queen Bee", None).await;
    let pending = create_test_action(&pool, hive.id, "Feed", false).await;
    sqlx::query("CREATE TRIGGER reject_actions BEFORE INSERT ON hive_actions BEGIN SELECT RAISE(ABORT, 'actions unavailable'); END")
        .execute(&pool)
        .await
        .unwrap();

    let response = app
        .post("/hive_inspections")
        .json(&json!({
            "hive_id": hive.id,
            "queenStatusData": { "queen_seen": true },
            "colonyStrengthData": { "brood_frames": 4 },
            "completed_action_ids": [pending.id],
            "actions": [{ "text": "Add a super", "checked": false }]
        }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("actions unavailable"));

    assert_eq!(count_rows(&pool, "hive_inspections").await, 0);
    assert_eq!(count_rows(&pool, "queen_status").await, 0);
    assert_eq!(count_rows(&pool, "colony_strength").await, 0);
    let (completed,): (bool,) = sqlx::query_as("SELECT completed FROM hive_actions WHERE id = $1")
        .bind(pending.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(!completed);
}

#[sqlx::test]
#[test_log::test]
async fn test_retiring_an_apiary_keeps_its_hives(pool: SqlitePool) {
    let app = create_test_app(pool.clone()).await;
    let apiary: ApiaryResponse = app.post("/apiaries").json(&json!({ "name": "Heath" })).await.json();
    app.post("/hives")
        .json(&json!({ "name": "Heather", "currentApiary": "Heath" }))
        .await
        .assert_status(StatusCode::CREATED);

    for _ in 0..2 {
        let response = app.delete(&format!("/apiaries/{}", apiary.id)).await;
        response.assert_status_ok();
        let message: MessageResponse = response.json();
        assert_eq!(message.message, "Apiary deleted successfully");
    }

    let hives: Vec<HiveResponse> = app.get("/hives").await.json();
    assert_eq!(hives.len(), 1);
    assert!(hives[0].apiary_id.is_none());

    let distribution: HiveDistributionResponse = app.get("/stats/hive_distribution").await.json();
    assert!(distribution.apiaries.is_empty());
    assert_eq!(distribution.unassigned, 1);
}
