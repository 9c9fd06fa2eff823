//! Storage Boundary. Outbound ports implemented by persistence adapters.
//!
//! Live queries re-emit the whole current result set on every change to their
//! table, in primary-key order. Emission errors are `DomainError::Storage`;
//! a broken subscription is `DomainError::Stream`.

use super::records::{ExerciseRecord, SleepRecord, UserRecord};
use crate::domain::DomainError;
use futures::stream::BoxStream;

/// Live storage read. Ends only when the subscription itself fails.
pub type LiveQuery<T> = BoxStream<'static, Result<T, DomainError>>;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ExerciseStore: Send + Sync {
    /// Upsert by id (0 = assign a new one). Returns the row's id.
    async fn insert_or_update(&self, record: ExerciseRecord) -> Result<i64, DomainError>;

    fn live_query_all(&self) -> LiveQuery<Vec<ExerciseRecord>>;

    /// No-op when the row does not exist.
    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError>;
}

/// Sleep rows are read-only through this boundary.
#[cfg_attr(test, mockall::automock)]
pub trait SleepStore: Send + Sync {
    fn live_query_all(&self) -> LiveQuery<Vec<SleepRecord>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Upsert by id (0 = assign a new one). Returns the row's id.
    async fn insert_or_update(&self, record: UserRecord) -> Result<i64, DomainError>;

    fn live_query_by_id(&self, id: i64) -> LiveQuery<Option<UserRecord>>;

    /// No-op when the row does not exist.
    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError>;
}
