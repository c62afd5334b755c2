use std::collections::BTreeMap;
use std::sync::RwLock;

use storegate_core::{ProductId, StoreError, StoreResult};
use storegate_products::{Product, ProductInput};

use super::ProductStore;

/// In-memory product table for tests/dev.
///
/// Mimics the MySQL table closely enough for the HTTP contract: ids start
/// at 1, are never reused, and prices are rounded to cents.
#[derive(Debug)]
pub struct InMemoryProductStore {
    inner: RwLock<Table>,
}

#[derive(Debug)]
struct Table {
    next_id: u64,
    rows: BTreeMap<ProductId, Product>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::backend("products.memory", "lock poisoned")
}

#[async_trait::async_trait]
impl ProductStore for InMemoryProductStore {
    async fn init_schema(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn create(&self, input: ProductInput) -> StoreResult<ProductId> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        let id = ProductId::new(table.next_id);
        table.next_id += 1;
        table.rows.insert(id, Product::from_input(id, input));
        Ok(id)
    }

    async fn update(&self, id: ProductId, input: ProductInput) -> StoreResult<()> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = Product::from_input(id, input);
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: ProductId) -> StoreResult<()> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        table.rows.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}
