use std::sync::Arc;

use anyhow::Context;

use storegate_infra::config::{AppConfig, StoreBackend};
use storegate_infra::{
    InMemoryObjectStorage, InMemoryProductStore, InMemoryUserStore, MongoUserStore,
    MySqlProductStore, ObjectStorage, ProductStore, S3ObjectStorage, UserStore,
};

/// Store clients shared by all handlers.
///
/// Built once at startup; every handler reaches it through
/// `Extension<Arc<AppServices>>`.
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<dyn ProductStore>,
    pub users: Arc<dyn UserStore>,
    pub objects: Arc<dyn ObjectStorage>,
}

impl AppServices {
    pub fn new(
        products: Arc<dyn ProductStore>,
        users: Arc<dyn UserStore>,
        objects: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            products,
            users,
            objects,
        }
    }

    /// Process-local fakes. Object storage starts without buckets.
    pub fn in_memory() -> Self {
        Self::in_memory_with_buckets(&[])
    }

    /// Process-local fakes with the given (empty) buckets already created.
    pub fn in_memory_with_buckets(buckets: &[String]) -> Self {
        let objects = InMemoryObjectStorage::new();
        for bucket in buckets {
            objects.create_bucket(bucket.as_str());
        }
        Self::new(
            Arc::new(InMemoryProductStore::new()),
            Arc::new(InMemoryUserStore::new()),
            Arc::new(objects),
        )
    }
}

/// Build the services selected by `STORE_BACKEND`.
///
/// Live clients connect lazily; a backend that is down at boot shows up as
/// 500s on its routes rather than a failed start.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!(
                buckets = ?config.memory_buckets,
                "STORE_BACKEND=memory; data is lost on restart and uploads only accept MEMORY_BUCKETS"
            );
            Ok(AppServices::in_memory_with_buckets(&config.memory_buckets))
        }
        StoreBackend::Live => {
            let products = MySqlProductStore::connect_lazy(&config.mysql);
            let users = MongoUserStore::connect(&config.mongo)
                .await
                .context("invalid MONGODB_URI")?;
            let objects = S3ObjectStorage::from_config(&config.s3).await;

            tracing::info!(
                mysql_host = %config.mysql.host,
                mysql_database = %config.mysql.database,
                mongo_database = %config.mongo.database,
                s3_region = %config.s3.region,
                "live store clients configured"
            );

            Ok(AppServices::new(
                Arc::new(products),
                Arc::new(users),
                Arc::new(objects),
            ))
        }
    }
}
