//! Products: the flat record stored in the relational `produto` table.
//!
//! Pure data plus the price normalisation the table's `DECIMAL(10,2)`
//! column applies; queries live in `storegate-infra`.

pub mod product;

pub use product::{Product, ProductInput, round_price};
