//! Users: schemaless documents of the user collection.
//!
//! `name` and `email` are the nominal fields; anything else a client sends
//! is stored and returned verbatim.

pub mod user;

pub use user::{User, UserFields};
