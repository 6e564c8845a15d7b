pub mod catalog_info;
pub mod load_catalog;
pub mod search;

pub use catalog_info::*;
pub use load_catalog::*;
pub use search::*;
