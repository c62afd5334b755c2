//! MySQL-backed product store.
//!
//! All statements qualify the table with the configured database
//! (`` `db`.produto ``), so pooled connections never need a `USE`.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database (any code) | `Backend` (driver message kept for logs) |
//! | PoolTimedOut / PoolClosed / Io / Tls | `Backend` |
//! | ColumnDecode / Decode | `Backend` |
//!
//! A missing row is never an sqlx error here: reads use `fetch_optional`
//! and writes check `rows_affected()`.

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{FromRow, Row};
use tracing::instrument;

use storegate_core::{ProductId, StoreError, StoreResult};
use storegate_products::{Product, ProductInput};

use super::ProductStore;
use crate::config::MySqlConfig;

/// Product store over a MySQL connection pool.
#[derive(Debug, Clone)]
pub struct MySqlProductStore {
    pool: MySqlPool,
    database: String,
}

impl MySqlProductStore {
    /// Wrap an existing pool. `database` must already be a validated
    /// identifier (see `AppConfig`).
    pub fn new(pool: MySqlPool, database: impl Into<String>) -> Self {
        Self {
            pool,
            database: database.into(),
        }
    }

    /// Build a lazily-connecting pool: the first query opens the first
    /// connection, so the gateway boots even when MySQL is down.
    pub fn connect_lazy(config: &MySqlConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy_with(options);

        Self::new(pool, config.database.clone())
    }

    fn table(&self) -> String {
        qualified_table(&self.database)
    }
}

fn qualified_table(database: &str) -> String {
    format!("`{database}`.produto")
}

fn select_columns() -> &'static str {
    // Signed INT and DECIMAL are converted so they decode straight into
    // u64/f64. `+ 0e0` forces DOUBLE; `CAST(.. AS DOUBLE)` needs MySQL 8.0.17.
    "CAST(Id AS UNSIGNED) AS Id, Nome, Descricao, (Preco + 0e0) AS Preco"
}

struct ProductRow {
    id: u64,
    name: String,
    description: String,
    price: f64,
}

impl<'r> FromRow<'r, MySqlRow> for ProductRow {
    fn from_row(row: &'r MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRow {
            id: row.try_get("Id")?,
            name: row.try_get("Nome")?,
            description: row.try_get("Descricao")?,
            price: row.try_get("Preco")?,
        })
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
        }
    }
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.to_string()).unwrap_or_default();
            StoreError::backend(operation, format!("database error [{code}]: {}", db_err.message()))
        }
        sqlx::Error::PoolTimedOut => StoreError::backend(operation, "timed out acquiring a connection"),
        sqlx::Error::PoolClosed => StoreError::backend(operation, "connection pool closed"),
        other => StoreError::backend(operation, other),
    }
}

#[async_trait::async_trait]
impl ProductStore for MySqlProductStore {
    #[instrument(skip(self), fields(database = %self.database), err)]
    async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(&format!("CREATE DATABASE IF NOT EXISTS `{}`", self.database))
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("products.init_schema", e))?;

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                Id INT AUTO_INCREMENT PRIMARY KEY,
                Nome VARCHAR(255) NOT NULL,
                Descricao VARCHAR(255) NOT NULL,
                Preco DECIMAL(10,2) NOT NULL
            )
            "#,
            self.table()
        ))
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("products.init_schema", e))?;

        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query(&format!("SELECT {} FROM {}", select_columns(), self.table()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("products.list", e))?;

        let mut products = Vec::with_capacity(rows.len());
        for row in rows {
            let product = ProductRow::from_row(&row)
                .map_err(|e| map_sqlx_error("products.list", e))?;
            products.push(product.into());
        }
        Ok(products)
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn get(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM {} WHERE Id = ?",
            select_columns(),
            self.table()
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("products.get", e))?;

        match row {
            Some(row) => {
                let product = ProductRow::from_row(&row)
                    .map_err(|e| map_sqlx_error("products.get", e))?;
                Ok(Some(product.into()))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self, input), err)]
    async fn create(&self, input: ProductInput) -> StoreResult<ProductId> {
        let result = sqlx::query(&format!(
            "INSERT INTO {} (Nome, Descricao, Preco) VALUES (?, ?, ?)",
            self.table()
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("products.create", e))?;

        Ok(ProductId::new(result.last_insert_id()))
    }

    #[instrument(skip(self, input), fields(id = %id), err)]
    async fn update(&self, id: ProductId, input: ProductInput) -> StoreResult<()> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET Nome = ?, Descricao = ?, Preco = ? WHERE Id = ?",
            self.table()
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("products.update", e))?;

        // sqlx connects with CLIENT_FOUND_ROWS: matched rows count even when unchanged.
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn delete(&self, id: ProductId) -> StoreResult<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE Id = ?", self.table()))
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("products.delete", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_qualified_with_the_database() {
        assert_eq!(qualified_table("loja"), "`loja`.produto");
    }

    #[test]
    fn price_is_read_as_double_without_cast_as_double() {
        let columns = select_columns();
        assert!(columns.contains("(Preco + 0e0) AS Preco"));
        assert!(!columns.contains("AS DOUBLE"));
    }

    #[test]
    fn pool_errors_become_backend_errors() {
        let err = map_sqlx_error("products.list", sqlx::Error::PoolTimedOut);
        assert!(matches!(
            err,
            StoreError::Backend { operation: "products.list", .. }
        ));
    }

    #[tokio::test]
    async fn lazy_store_can_be_built_without_a_server() {
        let config = MySqlConfig {
            host: "127.0.0.1".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: "loja".to_string(),
            max_connections: 2,
        };
        let store = MySqlProductStore::connect_lazy(&config);
        assert_eq!(store.table(), "`loja`.produto");
    }
}
