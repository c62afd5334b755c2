use storegate_core::{StoreResult, UserId};
use storegate_users::{User, UserFields};

/// CRUD over the user collection, keyed by the store-generated id.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Round-trip to the server; no data is read.
    async fn ping(&self) -> StoreResult<()>;

    async fn list(&self) -> StoreResult<Vec<User>>;

    /// `Ok(None)` both for unknown and for malformed ids.
    async fn get(&self, id: &UserId) -> StoreResult<Option<User>>;

    /// Persist every supplied field and return the stored document.
    async fn create(&self, fields: UserFields) -> StoreResult<User>;

    /// Partial merge of `fields` into the document; returns the result.
    ///
    /// Returns `StoreError::NotFound` when no document has this id.
    async fn update(&self, id: &UserId, fields: UserFields) -> StoreResult<User>;

    /// Returns `StoreError::NotFound` when no document has this id.
    async fn delete(&self, id: &UserId) -> StoreResult<()>;
}
