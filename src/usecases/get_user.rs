//! Live lookup of the profile.

use crate::domain::User;
use crate::ports::{LiveResults, UserRepository};
use std::sync::Arc;

pub struct GetUserUseCase {
    repo: Arc<dyn UserRepository>,
}

impl GetUserUseCase {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub fn execute(&self, id: i64) -> LiveResults<Option<User>> {
        self.repo.user(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataResult, DomainError, ErrorInfo};
    use crate::ports::repositories::MockUserRepository;
    use futures::{StreamExt, stream};

    #[tokio::test]
    async fn forwards_id_and_emissions() {
        let user = User {
            id: 1,
            name: "Test User".into(),
            email: "test@example.com".into(),
        };
        let error = ErrorInfo::caused("User not found", DomainError::storage_msg("locked"));
        let upstream = vec![
            Ok(DataResult::Success(Some(user))),
            Ok(DataResult::Success(None)),
            Ok(DataResult::Error(error)),
        ];
        let emitted = upstream.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_user()
            .withf(|id| *id == 1)
            .times(1)
            .returning(move |_| stream::iter(emitted.clone()).boxed());

        let got: Vec<_> = GetUserUseCase::new(Arc::new(repo)).execute(1).collect().await;

        assert_eq!(got, upstream);
    }
}
