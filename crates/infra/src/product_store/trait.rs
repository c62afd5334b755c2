use storegate_core::{ProductId, StoreResult};
use storegate_products::{Product, ProductInput};

/// Single-table CRUD over `produto`.
///
/// Every method is one independent statement; nothing is cached and no
/// transaction spans two calls.
#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    /// Create the database and table if they do not exist.
    async fn init_schema(&self) -> StoreResult<()>;

    /// All rows, in storage order.
    async fn list(&self) -> StoreResult<Vec<Product>>;

    async fn get(&self, id: ProductId) -> StoreResult<Option<Product>>;

    /// Insert a row and return its generated identifier.
    async fn create(&self, input: ProductInput) -> StoreResult<ProductId>;

    /// Overwrite every column of an existing row.
    ///
    /// Returns `StoreError::NotFound` when no row has this id.
    async fn update(&self, id: ProductId, input: ProductInput) -> StoreResult<()>;

    /// Returns `StoreError::NotFound` when no row has this id.
    async fn delete(&self, id: ProductId) -> StoreResult<()>;
}
