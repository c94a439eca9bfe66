use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::{ActivityStore, StoreError, StoreResult};
use crate::models::Activity;

/// In-process activity collection with the same semantics as the SQLite store.
#[derive(Debug, Default)]
pub struct MemoryActivityStore {
    activities: RwLock<Vec<Activity>>,
}

impl MemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_activities(activities: Vec<Activity>) -> Self {
        Self {
            activities: RwLock::new(activities),
        }
    }
}

#[async_trait]
impl ActivityStore for MemoryActivityStore {
    async fn list(&self, limit: i64) -> StoreResult<Vec<Activity>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let activities = self.activities.read().await;
        Ok(activities.iter().take(limit).cloned().collect())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Activity>> {
        let activities = self.activities.read().await;
        Ok(activities.iter().find(|a| a.name == name).cloned())
    }

    async fn push_participant(&self, name: &str, email: &str) -> StoreResult<u64> {
        let mut activities = self.activities.write().await;
        let Some(activity) = activities.iter_mut().find(|a| a.name == name) else {
            return Ok(0);
        };
        if activity.has_participant(email) {
            return Ok(0);
        }
        activity.participants.push(email.to_string());
        Ok(1)
    }

    async fn pull_participant(&self, name: &str, email: &str) -> StoreResult<u64> {
        let mut activities = self.activities.write().await;
        let Some(activity) = activities.iter_mut().find(|a| a.name == name) else {
            return Ok(0);
        };
        let Some(pos) = activity.participants.iter().position(|p| p == email) else {
            return Ok(0);
        };
        activity.participants.remove(pos);
        Ok(1)
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let mut activities = self.activities.write().await;
        let removed = activities.len() as u64;
        activities.clear();
        Ok(removed)
    }

    async fn insert_many(&self, new_activities: &[Activity]) -> StoreResult<u64> {
        let mut activities = self.activities.write().await;
        for (i, activity) in new_activities.iter().enumerate() {
            let taken = activities.iter().any(|a| a.name == activity.name)
                || new_activities[..i].iter().any(|a| a.name == activity.name);
            if taken {
                return Err(StoreError::DuplicateName(activity.name.clone()));
            }
        }
        activities.extend(new_activities.iter().cloned());
        Ok(new_activities.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(name: &str, participants: &[&str]) -> Activity {
        Activity {
            name: name.to_string(),
            description: String::new(),
            schedule: String::new(),
            max_participants: 10,
            participants: participants.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn conditional_updates_match_sqlite_semantics() {
        let store = MemoryActivityStore::with_activities(vec![activity("Chess Club", &["a@x"])]);

        assert_eq!(store.push_participant("Chess Club", "a@x").await.unwrap(), 0);
        assert_eq!(store.push_participant("Chess Club", "b@x").await.unwrap(), 1);
        assert_eq!(store.pull_participant("Chess Club", "c@x").await.unwrap(), 0);
        assert_eq!(store.pull_participant("Missing", "a@x").await.unwrap(), 0);
        assert_eq!(store.pull_participant("Chess Club", "a@x").await.unwrap(), 1);

        let chess = store.find_by_name("Chess Club").await.unwrap().unwrap();
        assert_eq!(chess.participants, ["b@x"]);
    }

    #[tokio::test]
    async fn insert_many_rejects_duplicate_names_without_partial_writes() {
        let store = MemoryActivityStore::new();
        let err = store
            .insert_many(&[activity("A", &[]), activity("B", &[]), activity("A", &[])])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(name) if name == "A"));
        assert!(store.list(100).await.unwrap().is_empty());
    }
}
