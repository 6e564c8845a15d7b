//! Documentation catalog model and loading.

mod loader;
mod types;

pub use loader::{expand_tilde, load_catalog};
pub use types::{
    Argument, Catalog, CatalogStats, ConstantEntry, MethodEntry, NAMESPACE_DELIMITER, TypeEntry,
};
