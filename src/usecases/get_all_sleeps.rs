//! Live list of recorded sleep sessions.

use crate::domain::Sleep;
use crate::ports::{LiveResults, SleepRepository};
use std::sync::Arc;

pub struct GetAllSleepsUseCase {
    repo: Arc<dyn SleepRepository>,
}

impl GetAllSleepsUseCase {
    pub fn new(repo: Arc<dyn SleepRepository>) -> Self {
        Self { repo }
    }

    pub fn execute(&self) -> LiveResults<Vec<Sleep>> {
        self.repo.all_sleeps()
    }
}
