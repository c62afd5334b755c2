use std::sync::RwLock;

use mongodb::bson::oid::ObjectId;

use storegate_core::{StoreError, StoreResult, UserId};
use storegate_users::{User, UserFields};

use super::UserStore;

/// In-memory user collection for tests/dev.
///
/// Ids are real ObjectId hex strings so clients see the same shape as
/// with MongoDB; documents are kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::backend("users.memory", "lock poisoned")
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let users = self.inner.read().map_err(|_| poisoned())?;
        Ok(users.clone())
    }

    async fn get(&self, id: &UserId) -> StoreResult<Option<User>> {
        let users = self.inner.read().map_err(|_| poisoned())?;
        Ok(users.iter().find(|u| &u.id == id).cloned())
    }

    async fn create(&self, input: UserFields) -> StoreResult<User> {
        let user = User::new(UserId::new(ObjectId::new().to_hex()), input);
        let mut users = self.inner.write().map_err(|_| poisoned())?;
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: &UserId, input: UserFields) -> StoreResult<User> {
        let mut users = self.inner.write().map_err(|_| poisoned())?;
        let user = users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or(StoreError::NotFound)?;
        user.merge(input);
        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> StoreResult<()> {
        let mut users = self.inner.write().map_err(|_| poisoned())?;
        let before = users.len();
        users.retain(|u| &u.id != id);
        if users.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
