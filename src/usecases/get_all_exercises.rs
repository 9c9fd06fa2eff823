//! Live list of every logged exercise.

use crate::domain::Exercise;
use crate::ports::{ExerciseRepository, LiveResults};
use std::sync::Arc;

pub struct GetAllExercisesUseCase {
    repo: Arc<dyn ExerciseRepository>,
}

impl GetAllExercisesUseCase {
    pub fn new(repo: Arc<dyn ExerciseRepository>) -> Self {
        Self { repo }
    }

    pub fn execute(&self) -> LiveResults<Vec<Exercise>> {
        self.repo.all_exercises()
    }
}
