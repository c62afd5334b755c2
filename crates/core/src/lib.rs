//! `storegate-core`: shared building blocks for every backend accessor.
//!
//! This crate carries no IO: only the error taxonomy and the identifier
//! types that the ports in `storegate-infra` and the HTTP layer agree on.

pub mod error;
pub mod id;

pub use error::{StoreError, StoreResult};
pub use id::{ProductId, UserId};
