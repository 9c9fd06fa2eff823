//! Repositories. Wrap the storage ports, convert records to domain models and
//! fold every failure into the `DataResult` envelope.

pub mod exercise_repo;
pub mod sleep_repo;
pub mod user_repo;

pub use exercise_repo::ExerciseRepo;
pub use sleep_repo::SleepRepo;
pub use user_repo::UserRepo;

use crate::domain::{DataResult, DomainError, ErrorInfo};
use crate::ports::{LiveQuery, LiveResults};
use futures::StreamExt;
use tracing::warn;

/// Map a live query into a stream of envelopes.
///
/// Each failed emission becomes one `Error` carrying `failure` and the original
/// fault; the stream keeps going so a later change can recover it. Subscription
/// faults are passed through for the state holder to catch.
fn live_envelope<R, T, F>(query: LiveQuery<R>, failure: &'static str, convert: F) -> LiveResults<T>
where
    R: Send + 'static,
    T: Send + 'static,
    F: Fn(R) -> Result<T, DomainError> + Send + 'static,
{
    query
        .map(move |item| match item.and_then(&convert) {
            Ok(value) => Ok(DataResult::Success(value)),
            Err(DomainError::Stream(fault)) => Err(fault),
            Err(e) => {
                warn!(error = %e, "{}", failure);
                Ok(DataResult::Error(ErrorInfo::caused(failure, e)))
            }
        })
        .boxed()
}

/// Fold a one-shot outcome into the envelope, keeping the fault as the cause.
fn envelope<T>(outcome: Result<T, DomainError>, operation: &str) -> DataResult<T> {
    match outcome {
        Ok(value) => DataResult::Success(value),
        Err(e) => {
            warn!(operation, error = %e, "repository operation failed");
            DataResult::Error(ErrorInfo::from(e))
        }
    }
}
