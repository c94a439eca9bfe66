use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::database::{ActivityStore, StoreResult};
use crate::models::{Activity, ActivityRow};

const SQL_LIST_ACTIVITIES: &str = r#"
SELECT
  id,
  name,
  description,
  schedule,
  max_participants,
  participants
FROM activities
ORDER BY id ASC
LIMIT ?1
"#;

const SQL_FIND_ACTIVITY_BY_NAME: &str = r#"
SELECT
  id,
  name,
  description,
  schedule,
  max_participants,
  participants
FROM activities
WHERE name = ?1
LIMIT 1
"#;

const SQL_PUSH_PARTICIPANT: &str = r#"
UPDATE activities
SET participants = json_insert(participants, '$[#]', ?2)
WHERE name = ?1
  AND NOT EXISTS (
    SELECT 1 FROM json_each(activities.participants) WHERE json_each.value = ?2
  )
"#;

const SQL_PULL_PARTICIPANT: &str = r#"
UPDATE activities
SET participants = json_remove(
  participants,
  '$[' || (
    SELECT MIN(json_each.key) FROM json_each(activities.participants) WHERE json_each.value = ?2
  ) || ']'
)
WHERE name = ?1
  AND EXISTS (
    SELECT 1 FROM json_each(activities.participants) WHERE json_each.value = ?2
  )
"#;

const SQL_DELETE_ALL_ACTIVITIES: &str = r#"
DELETE FROM activities
"#;

const SQL_INSERT_ACTIVITY: &str = r#"
INSERT INTO activities (
  name,
  description,
  schedule,
  max_participants,
  participants
) VALUES (?1, ?2, ?3, ?4, ?5)
"#;

#[derive(Debug, Clone)]
pub struct SqliteActivityStore {
    pool: SqlitePool,
}

impl SqliteActivityStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for SqliteActivityStore {
    async fn list(&self, limit: i64) -> StoreResult<Vec<Activity>> {
        let rows = sqlx::query_as::<_, ActivityRow>(SQL_LIST_ACTIVITIES)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let mut activities = Vec::with_capacity(rows.len());
        for row in rows {
            activities.push(Activity::try_from(row)?);
        }
        Ok(activities)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Activity>> {
        let row = sqlx::query_as::<_, ActivityRow>(SQL_FIND_ACTIVITY_BY_NAME)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Activity::try_from).transpose()?)
    }

    async fn push_participant(&self, name: &str, email: &str) -> StoreResult<u64> {
        let res = sqlx::query(SQL_PUSH_PARTICIPANT)
            .bind(name)
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn pull_participant(&self, name: &str, email: &str) -> StoreResult<u64> {
        let res = sqlx::query(SQL_PULL_PARTICIPANT)
            .bind(name)
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let res = sqlx::query(SQL_DELETE_ALL_ACTIVITIES)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn insert_many(&self, activities: &[Activity]) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for activity in activities {
            let participants = serde_json::to_string(&activity.participants)?;
            let res = sqlx::query(SQL_INSERT_ACTIVITY)
                .bind(&activity.name)
                .bind(&activity.description)
                .bind(&activity.schedule)
                .bind(activity.max_participants)
                .bind(participants)
                .execute(&mut *tx)
                .await?;
            inserted += res.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connect;

    async fn store_with(activities: &[Activity]) -> SqliteActivityStore {
        let pool = connect("sqlite::memory:").await.unwrap();
        let store = SqliteActivityStore::new(pool);
        store.insert_many(activities).await.unwrap();
        store
    }

    fn activity(name: &str, participants: &[&str]) -> Activity {
        Activity {
            name: name.to_string(),
            description: format!("{name} description"),
            schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
            max_participants: 12,
            participants: participants.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn list_returns_rows_in_insertion_order() {
        let store = store_with(&[
            activity("Chess Club", &["michael@x"]),
            activity("Art Workshop", &[]),
        ])
        .await;

        let listed = store.list(100).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Chess Club", "Art Workshop"]);
        assert_eq!(listed[0].participants, vec!["michael@x".to_string()]);
    }

    #[tokio::test]
    async fn list_respects_limit() {
        let store = store_with(&[
            activity("A", &[]),
            activity("B", &[]),
            activity("C", &[]),
        ])
        .await;

        assert_eq!(store.list(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn find_by_name_misses_unknown_activity() {
        let store = store_with(&[activity("Chess Club", &[])]).await;
        assert!(store.find_by_name("Chess").await.unwrap().is_none());
        assert!(store.find_by_name("Chess Club").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn push_appends_only_absent_emails() {
        let store = store_with(&[activity("Chess Club", &["michael@x", "daniel@x"])]).await;

        assert_eq!(store.push_participant("Chess Club", "new@x").await.unwrap(), 1);
        assert_eq!(store.push_participant("Chess Club", "new@x").await.unwrap(), 0);
        assert_eq!(store.push_participant("Nope", "new@x").await.unwrap(), 0);

        let chess = store.find_by_name("Chess Club").await.unwrap().unwrap();
        assert_eq!(chess.participants, ["michael@x", "daniel@x", "new@x"]);
    }

    #[tokio::test]
    async fn pull_removes_first_occurrence_only() {
        let store = store_with(&[activity("Chess Club", &["a@x", "b@x", "a@x"])]).await;

        assert_eq!(store.pull_participant("Chess Club", "a@x").await.unwrap(), 1);
        let chess = store.find_by_name("Chess Club").await.unwrap().unwrap();
        assert_eq!(chess.participants, ["b@x", "a@x"]);

        assert_eq!(store.pull_participant("Chess Club", "zzz@x").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insert_many_is_all_or_nothing() {
        let store = store_with(&[activity("Chess Club", &[])]).await;

        let err = store
            .insert_many(&[activity("Drama Club", &[]), activity("Chess Club", &[])])
            .await;
        assert!(err.is_err());
        assert!(store.find_by_name("Drama Club").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_all_empties_the_table() {
        let store = store_with(&[activity("A", &[]), activity("B", &[])]).await;
        assert_eq!(store.delete_all().await.unwrap(), 2);
        assert!(store.list(100).await.unwrap().is_empty());
    }
}
