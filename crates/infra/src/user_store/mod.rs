//! Document user accessor: port, MongoDB adapter and in-memory fake.

pub mod in_memory;
pub mod mongo;
pub mod r#trait;

pub use in_memory::InMemoryUserStore;
pub use mongo::MongoUserStore;
pub use r#trait::UserStore;
