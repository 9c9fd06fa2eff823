//! Save the profile together with its password.

use crate::domain::{DomainError, User};
use crate::ports::UserRepository;
use std::sync::Arc;

pub struct InsertUserUseCase {
    repo: Arc<dyn UserRepository>,
}

impl InsertUserUseCase {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Not enveloped, like the repository method it forwards to.
    pub async fn execute(&self, user: &User, password: &str) -> Result<i64, DomainError> {
        self.repo.insert_user(user, password).await
    }
}
