//! Remove a logged exercise by its id.

use crate::domain::{DataResult, Exercise};
use crate::ports::ExerciseRepository;
use std::sync::Arc;

pub struct DeleteExerciseUseCase {
    repo: Arc<dyn ExerciseRepository>,
}

impl DeleteExerciseUseCase {
    pub fn new(repo: Arc<dyn ExerciseRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, exercise: &Exercise) -> DataResult<()> {
        self.repo.delete_exercise(exercise).await
    }
}
