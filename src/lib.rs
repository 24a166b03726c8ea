//! Catalog: Category Tree Management
//!
//! Categories own an arbitrarily deep tree of subcategories, each optionally
//! holding products. A category is persisted as a single document; nested edits
//! read the whole document, change it in memory, and write it back.

pub mod catalog;
pub mod config;
pub mod error;
pub mod id;
pub mod logging;
pub mod seed;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;

pub use catalog::{Catalog, NewCategory, NewProduct, NewSubCategory};
pub use error::{CatalogError, StorageError};
pub use tree::mutate::{MutationPolicy, ProductPatch};
pub use tree::{Category, ContainerFlags, Product, SubCategory};
