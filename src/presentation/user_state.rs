//! State of the profile screen.

use super::{Slots, ScreenScope, follow};
use crate::domain::User;
use crate::presentation::scope::lock;
use crate::usecases::GetUserUseCase;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::AbortHandle;

const LOAD_FAILED: &str = "Failed to load user";

pub struct UserStateHolder {
    scope: ScreenScope,
    slots: Arc<Slots<Option<User>>>,
    get_user: GetUserUseCase,
    user_id: i64,
    subscription: Mutex<Option<AbortHandle>>,
}

impl UserStateHolder {
    /// Follows user `user_id` right away. Needs a tokio runtime.
    pub fn new(get_user: GetUserUseCase, user_id: i64) -> Self {
        let holder = Self {
            scope: ScreenScope::new("user"),
            slots: Arc::new(Slots::new()),
            get_user,
            user_id,
            subscription: Mutex::new(None),
        };
        holder.refresh();
        holder
    }

    pub fn user(&self) -> Option<User> {
        self.slots.data()
    }

    pub fn status(&self) -> Option<String> {
        self.slots.status()
    }

    pub fn watch_user(&self) -> watch::Receiver<Option<User>> {
        self.slots.watch_data()
    }

    pub fn watch_status(&self) -> watch::Receiver<Option<String>> {
        self.slots.watch_status()
    }

    pub fn refresh(&self) {
        let mut current = lock(&self.subscription);
        if let Some(handle) = current.take() {
            handle.abort();
        }
        *current = follow(
            &self.scope,
            &self.slots,
            self.get_user.execute(self.user_id),
            LOAD_FAILED,
        );
    }

    pub fn cancel(&self) {
        self.slots.close();
        self.scope.cancel();
    }
}

impl Drop for UserStateHolder {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataResult, DomainError, ErrorInfo};
    use crate::ports::repositories::MockUserRepository;
    use crate::presentation::test_support::{idle, settle};
    use futures::channel::mpsc::unbounded;
    use futures::{StreamExt, stream};

    fn ada() -> User {
        User {
            id: 42,
            name: "Ada".into(),
            email: "ada@example.com".into(),
        }
    }

    #[tokio::test]
    async fn follows_the_configured_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_user()
            .withf(|id| *id == 42)
            .times(1)
            .returning(|_| {
                stream::iter(vec![Ok(DataResult::Success(Some(ada())))])
                    .chain(stream::pending())
                    .boxed()
            });
        let holder = UserStateHolder::new(GetUserUseCase::new(Arc::new(repo)), 42);
        let mut data = holder.watch_user();

        settle(&mut data, Option::is_some).await;
        assert_eq!(holder.user(), Some(ada()));
        assert_eq!(holder.status(), None);
    }

    #[tokio::test]
    async fn absent_user_is_not_an_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_user().returning(|_| {
            stream::iter(vec![Ok(DataResult::Success(None))])
                .chain(stream::pending())
                .boxed()
        });
        let holder = UserStateHolder::new(GetUserUseCase::new(Arc::new(repo)), 42);
        idle().await;

        assert_eq!(holder.user(), None);
        assert_eq!(holder.status(), None);
    }

    #[tokio::test]
    async fn lookup_error_clears_the_profile() {
        let (tx, rx) = unbounded();
        let mut repo = MockUserRepository::new();
        repo.expect_user().return_once(move |_| rx.boxed());
        let holder = UserStateHolder::new(GetUserUseCase::new(Arc::new(repo)), 42);
        let mut data = holder.watch_user();
        let mut status = holder.watch_status();

        tx.unbounded_send(Ok(DataResult::Success(Some(ada())))).unwrap();
        settle(&mut data, Option::is_some).await;
        tx.unbounded_send(Ok(DataResult::Error(ErrorInfo::caused(
            "User not found",
            DomainError::storage_msg("no such table: user"),
        ))))
        .unwrap();
        settle(&mut status, Option::is_some).await;

        assert_eq!(holder.status().as_deref(), Some("Failed to load user: User not found"));
        assert_eq!(holder.user(), None);
    }
}
