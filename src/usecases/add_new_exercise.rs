//! Log a new exercise (or overwrite one that already has an id).

use crate::domain::{DataResult, Exercise};
use crate::ports::ExerciseRepository;
use std::sync::Arc;

pub struct AddNewExerciseUseCase {
    repo: Arc<dyn ExerciseRepository>,
}

impl AddNewExerciseUseCase {
    pub fn new(repo: Arc<dyn ExerciseRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, exercise: &Exercise) -> DataResult<i64> {
        self.repo.add_exercise(exercise).await
    }
}
