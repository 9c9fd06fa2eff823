//! Repository ports. What use cases see of the data layer.
//!
//! Only domain models and identifiers cross this boundary. Every payload
//! failure is a `DataResult::Error`; the one exception is `insert_user`.

use crate::domain::{DataResult, DomainError, Exercise, Sleep, StreamFault, User};
use futures::stream::BoxStream;

/// Live stream of envelopes. `Err` only when the subscription itself breaks.
pub type LiveResults<T> = BoxStream<'static, Result<DataResult<T>, StreamFault>>;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// All exercises in storage order, re-emitted on every change.
    fn all_exercises(&self) -> LiveResults<Vec<Exercise>>;

    /// Insert (or update, when `exercise.id` is set). Returns the row id.
    async fn add_exercise(&self, exercise: &Exercise) -> DataResult<i64>;

    /// Requires `exercise.id`. Succeeds whether or not the row existed.
    async fn delete_exercise(&self, exercise: &Exercise) -> DataResult<()>;
}

/// Read-only. There is no way to write sleep sessions through this port:
///
/// ```compile_fail
/// use wellness_tracker::domain::Sleep;
/// use wellness_tracker::ports::SleepRepository;
///
/// async fn log_night(repo: &dyn SleepRepository, sleep: Sleep) {
///     let _ = repo.insert_sleep(&sleep).await;
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait SleepRepository: Send + Sync {
    fn all_sleeps(&self) -> LiveResults<Vec<Sleep>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Live lookup. A missing row is `Success(None)`.
    fn user(&self, id: i64) -> LiveResults<Option<User>>;

    /// Upsert the profile with its password. Returns the id directly: storage
    /// faults come back as a plain `Err`, not as an envelope.
    async fn insert_user(&self, user: &User, password: &str) -> Result<i64, DomainError>;
}
