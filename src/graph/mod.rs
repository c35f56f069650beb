//! Graph store - the authoritative node and edge collections.
//!
//! ## Modules
//!
//! - `store` - `GraphStore` with node mutation, selection and spatial queries
//! - `edges` - Edge validation, creation and reconnection

mod edges;
mod store;

pub use edges::EdgeRules;
pub use store::{GraphStore, TypeRegistry};
