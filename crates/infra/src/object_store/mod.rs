//! Object-storage accessor: port, S3 adapter and in-memory fake.

pub mod in_memory;
pub mod s3;
pub mod r#trait;

pub use in_memory::InMemoryObjectStorage;
pub use s3::S3ObjectStorage;
pub use r#trait::ObjectStorage;
