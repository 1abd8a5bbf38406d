//! Database repository for hive actions.
//!
//! Besides the single-row operations of [`Repository`], this exposes the two batch operations
//! used by inspection submission: [`HiveActions::complete_many`] and [`HiveActions::create_many`].

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::hive_actions::{HiveActionCreateDBRequest, HiveActionDBResponse, HiveActionUpdateDBRequest},
};
use crate::types::{HiveActionId, HiveId};
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::instrument;

const HIVE_ACTION_COLUMNS: &str = "id, hive_id, inspection_id, action_text, completed, completed_at, created_at";

/// Filter for listing hive actions
#[derive(Debug, Clone, Default)]
pub struct HiveActionFilter {
    pub hive_id: Option<HiveId>,
    pub completed: Option<bool>,
}

pub struct HiveActions<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> HiveActions<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Mark exactly the given actions completed at `now`. Returns the number of rows changed.
    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    pub async fn complete_many(&mut self, ids: &[HiveActionId], now: DateTime<Utc>) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut query = QueryBuilder::<Sqlite>::new("UPDATE hive_actions SET completed = TRUE, completed_at = ");
        query.push_bind(now);
        query.push(" WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let result = query.build().execute(&mut *self.db).await?;
        Ok(result.rows_affected())
    }

    /// Insert several actions in one statement. Completed actions are stamped with `now`.
    #[instrument(skip(self, requests), fields(count = requests.len()), err)]
    pub async fn create_many(&mut self, requests: &[HiveActionCreateDBRequest], now: DateTime<Utc>) -> Result<Vec<HiveActionDBResponse>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let mut query =
            QueryBuilder::<Sqlite>::new("INSERT INTO hive_actions (hive_id, inspection_id, action_text, completed, completed_at, created_at) ");
        query.push_values(requests, |mut row, request| {
            row.push_bind(request.hive_id)
                .push_bind(request.inspection_id)
                .push_bind(request.action_text.clone())
                .push_bind(request.completed)
                .push_bind(request.completed.then_some(now))
                .push_bind(now);
        });
        query.push(" RETURNING ");
        query.push(HIVE_ACTION_COLUMNS);

        // RETURNING order is unspecified in SQLite
        let mut actions = query.build_query_as::<HiveActionDBResponse>().fetch_all(&mut *self.db).await?;
        actions.sort_by_key(|action| action.id);
        Ok(actions)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for HiveActions<'c> {
    type CreateRequest = HiveActionCreateDBRequest;
    type UpdateRequest = HiveActionUpdateDBRequest;
    type Response = HiveActionDBResponse;
    type Id = HiveActionId;
    type Filter = HiveActionFilter;

    #[instrument(skip(self, request), fields(hive_id = request.hive_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let mut created = self.create_many(std::slice::from_ref(request), Utc::now()).await?;
        created.pop().ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let action = sqlx::query_as::<_, HiveActionDBResponse>(&format!("SELECT {HIVE_ACTION_COLUMNS} FROM hive_actions WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(action)
    }

    #[instrument(skip(self, filter), fields(hive_id = ?filter.hive_id, completed = ?filter.completed), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {HIVE_ACTION_COLUMNS} FROM hive_actions WHERE 1=1"));

        if let Some(hive_id) = filter.hive_id {
            query.push(" AND hive_id = ");
            query.push_bind(hive_id);
        }
        if let Some(completed) = filter.completed {
            query.push(" AND completed = ");
            query.push_bind(completed);
        }
        query.push(" ORDER BY id");

        let actions = query.build_query_as::<HiveActionDBResponse>().fetch_all(&mut *self.db).await?;
        tracing::debug!("Retrieved {} hive actions", actions.len());

        Ok(actions)
    }

    #[instrument(skip(self, request), fields(completed = request.completed), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let completed_at = request.completed.then(Utc::now);

        let action = sqlx::query_as::<_, HiveActionDBResponse>(&format!(
            "UPDATE hive_actions SET completed = $2, completed_at = $3 WHERE id = $1 RETURNING {HIVE_ACTION_COLUMNS}"
        ))
        .bind(id)
        .bind(request.completed)
        .bind(completed_at)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;

    fn action(hive_id: HiveId, text: &str, completed: bool) -> HiveActionCreateDBRequest {
        HiveActionCreateDBRequest {
            hive_id,
            inspection_id: None,
            action_text: text.to_string(),
            completed,
        }
    }

    async fn seed_hives(pool: &SqlitePool) {
        sqlx::query("INSERT INTO hives (name) VALUES ('one'), ('two')")
            .execute(pool)
            .await
            .unwrap();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_starts_uncompleted(pool: SqlitePool) {
        seed_hives(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = HiveActions::new(&mut conn);

        let created = repo.create(&action(1, "add super", false)).await.unwrap();
        assert_eq!(created.hive_id, 1);
        assert_eq!(created.action_text, "add super");
        assert!(!created.completed);
        assert!(created.completed_at.is_none());
        assert!(created.inspection_id.is_none());

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.action_text, "add super");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_filters(pool: SqlitePool) {
        seed_hives(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = HiveActions::new(&mut conn);

        let now = Utc::now();
        repo.create_many(
            &[
                action(1, "feed", false),
                action(1, "treat", true),
                action(2, "requeen", false),
            ],
            now,
        )
        .await
        .unwrap();

        let all = repo.list(&HiveActionFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let hive_one = repo
            .list(&HiveActionFilter {
                hive_id: Some(1),
                completed: None,
            })
            .await
            .unwrap();
        assert_eq!(hive_one.len(), 2);

        let open_hive_one = repo
            .list(&HiveActionFilter {
                hive_id: Some(1),
                completed: Some(false),
            })
            .await
            .unwrap();
        assert_eq!(open_hive_one.len(), 1);
        assert_eq!(open_hive_one[0].action_text, "feed");

        let done = repo
            .list(&HiveActionFilter {
                hive_id: None,
                completed: Some(true),
            })
            .await
            .unwrap();
        assert_eq!(done.len(), 1);
        assert!(done[0].completed_at.is_some());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_toggles_completed_at(pool: SqlitePool) {
        seed_hives(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = HiveActions::new(&mut conn);
        let created = repo.create(&action(2, "check stores", false)).await.unwrap();

        let done = repo.update(created.id, &HiveActionUpdateDBRequest { completed: true }).await.unwrap();
        assert!(done.completed);
        assert!(done.completed_at.is_some());

        let reopened = repo.update(created.id, &HiveActionUpdateDBRequest { completed: false }).await.unwrap();
        assert!(!reopened.completed);
        assert!(reopened.completed_at.is_none());

        let missing = repo.update(9999, &HiveActionUpdateDBRequest { completed: true }).await;
        assert!(matches!(missing, Err(DbError::NotFound)));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_complete_many_touches_only_listed_rows(pool: SqlitePool) {
        seed_hives(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = HiveActions::new(&mut conn);
        let created = repo
            .create_many(&[action(1, "a", false), action(1, "b", false), action(1, "c", false)], Utc::now())
            .await
            .unwrap();

        let changed = repo.complete_many(&[created[0].id, created[1].id], Utc::now()).await.unwrap();
        assert_eq!(changed, 2);
        assert_eq!(repo.complete_many(&[], Utc::now()).await.unwrap(), 0);

        let rows = repo.list(&HiveActionFilter::default()).await.unwrap();
        let states: Vec<(bool, bool)> = rows.iter().map(|a| (a.completed, a.completed_at.is_some())).collect();
        assert_eq!(states, vec![(true, true), (true, true), (false, false)]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_many_stamps_completed_rows(pool: SqlitePool) {
        seed_hives(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = HiveActions::new(&mut conn);

        let created = repo
            .create_many(&[action(1, "open", false), action(1, "done", true)], Utc::now())
            .await
            .unwrap();

        assert_eq!(created.len(), 2);
        assert!(created.iter().any(|a| a.action_text == "open" && a.completed_at.is_none()));
        assert!(created.iter().any(|a| a.action_text == "done" && a.completed && a.completed_at.is_some()));
        assert!(repo.create_many(&[], Utc::now()).await.unwrap().is_empty());
    }
}
