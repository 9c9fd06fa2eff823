//! Exercise repository over an [`ExerciseStore`].

use super::{envelope, live_envelope};
use crate::domain::{DataResult, DomainError, Exercise};
use crate::ports::{ExerciseRecord, ExerciseRepository, ExerciseStore, LiveResults};
use std::sync::Arc;
use tracing::{debug, info};

const FETCH_FAILED: &str = "Failed to fetch exercises from database";

pub struct ExerciseRepo {
    store: Arc<dyn ExerciseStore>,
}

impl ExerciseRepo {
    pub fn new(store: Arc<dyn ExerciseStore>) -> Self {
        Self { store }
    }

    async fn insert(&self, exercise: &Exercise) -> Result<i64, DomainError> {
        let record = ExerciseRecord::from_domain(exercise)?;
        let id = self.store.insert_or_update(record).await?;
        info!(id, category = %exercise.category, "exercise saved");
        Ok(id)
    }

    async fn delete(&self, exercise: &Exercise) -> Result<(), DomainError> {
        let id = exercise.id.ok_or_else(|| {
            DomainError::Precondition("exercise id is required for deletion".into())
        })?;
        self.store.delete_by_id(id).await?;
        debug!(id, "exercise deleted");
        Ok(())
    }
}

#[async_trait::async_trait]
impl ExerciseRepository for ExerciseRepo {
    fn all_exercises(&self) -> LiveResults<Vec<Exercise>> {
        live_envelope(self.store.live_query_all(), FETCH_FAILED, |records| {
            records
                .into_iter()
                .map(Exercise::try_from)
                .collect::<Result<Vec<_>, _>>()
        })
    }

    async fn add_exercise(&self, exercise: &Exercise) -> DataResult<i64> {
        envelope(self.insert(exercise).await, "add_exercise")
    }

    async fn delete_exercise(&self, exercise: &Exercise) -> DataResult<()> {
        envelope(self.delete(exercise).await, "delete_exercise")
    }
}
