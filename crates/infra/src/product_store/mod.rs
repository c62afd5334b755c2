//! Relational product accessor: port, MySQL adapter and in-memory fake.

pub mod in_memory;
pub mod mysql;
pub mod r#trait;

pub use in_memory::InMemoryProductStore;
pub use mysql::MySqlProductStore;
pub use r#trait::ProductStore;
