//! Product catalog module.
//!
//! Catalog records, their creation/patch inputs and the read-side helpers
//! (low-stock predicate, stock valuation, search). Pure domain logic; the
//! ledger in `quantumstock-inventory` owns the collection.

pub mod filter;
pub mod product;

pub use filter::ProductFilter;
pub use product::{NewProduct, Product, ProductId, ProductPatch};
