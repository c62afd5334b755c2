//! Infrastructure layer: configuration and the three backend accessors
//! (MySQL products, MongoDB users, S3 objects), each with an in-memory fake.

pub mod config;
pub mod object_store;
pub mod product_store;
pub mod user_store;

pub use config::{AppConfig, ConfigError, LogFormat, StoreBackend};
pub use object_store::{InMemoryObjectStorage, ObjectStorage, S3ObjectStorage};
pub use product_store::{InMemoryProductStore, MySqlProductStore, ProductStore};
pub use user_store::{InMemoryUserStore, MongoUserStore, UserStore};
