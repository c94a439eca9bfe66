//! Activity storage.
//!
//! Callers never reach for a global connection: a store is constructed once
//! and handed to every operation, so tests can swap in [`MemoryActivityStore`].

pub mod activities_repo;
pub mod memory_repo;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::models::Activity;

pub use activities_repo::SqliteActivityStore;
pub use memory_repo::MemoryActivityStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database query failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("participants column is not a JSON list of emails: {0}")]
    Participants(#[from] serde_json::Error),
    #[error("activity {0:?} already exists")]
    DuplicateName(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Document-style access to the activity collection.
///
/// `push_participant` and `pull_participant` are conditional updates: they
/// only touch the record when the email is absent (push) or present (pull),
/// and report how many records were modified.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Up to `limit` activities in insertion order.
    async fn list(&self, limit: i64) -> StoreResult<Vec<Activity>>;

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Activity>>;

    /// Appends `email` unless it is already on the roster.
    async fn push_participant(&self, name: &str, email: &str) -> StoreResult<u64>;

    /// Removes the first occurrence of `email` from the roster.
    async fn pull_participant(&self, name: &str, email: &str) -> StoreResult<u64>;

    async fn delete_all(&self) -> StoreResult<u64>;

    /// Inserts all activities or none of them.
    async fn insert_many(&self, activities: &[Activity]) -> StoreResult<u64>;
}

/// Opens the pool and applies the embedded migrations.
pub async fn connect(database_url: &str) -> StoreResult<SqlitePool> {
    // Every connection to `:memory:` gets its own database.
    let max_connections = if database_url.contains(":memory:") {
        1
    } else {
        5
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}
