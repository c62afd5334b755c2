//! Buckets: listing and upload records returned by the object-storage
//! accessor. The provider owns all state; these are read-only views.

pub mod object;

pub use object::{BucketSummary, ObjectSummary, StoredObject};
