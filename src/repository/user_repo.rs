//! User repository. Keeps the password on the storage side of the boundary.

use super::live_envelope;
use crate::domain::{DomainError, User};
use crate::ports::{LiveResults, UserRecord, UserRepository, UserStore};
use std::sync::Arc;
use tracing::info;

const FETCH_FAILED: &str = "User not found";

pub struct UserRepo {
    store: Arc<dyn UserStore>,
}

impl UserRepo {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl UserRepository for UserRepo {
    fn user(&self, id: i64) -> LiveResults<Option<User>> {
        live_envelope(self.store.live_query_by_id(id), FETCH_FAILED, |record| {
            Ok(record.map(User::from))
        })
    }

    async fn insert_user(&self, user: &User, password: &str) -> Result<i64, DomainError> {
        let id = self
            .store
            .insert_or_update(UserRecord::with_password(user, password))
            .await?;
        info!(id, "user saved");
        Ok(id)
    }
}
