//! Category Store
//!
//! Persistence port for category documents. Each category is one opaque document
//! keyed by id; every primitive is a single-document operation. Nested edits are
//! written back by overwriting the document's `subCategories` field as a whole.

pub mod memory;
pub mod persistence;

use crate::error::StorageError;
use crate::tree::{Category, SubCategory};

pub use memory::MemoryCategoryStore;
pub use persistence::SledCategoryStore;

/// Category document store interface
pub trait CategoryStore: Send + Sync {
    fn fetch_by_id(&self, id: &str) -> Result<Option<Category>, StorageError>;

    fn fetch_all(&self) -> Result<Vec<Category>, StorageError>;

    /// Insert a new document; an existing id fails with `DuplicateId`.
    fn insert(&self, category: &Category) -> Result<(), StorageError>;

    /// Overwrite the `subCategories` field of document `id`.
    ///
    /// Returns `false` when no document matched. The write is blind: it does not
    /// check what the caller read before computing `sub_categories`.
    fn replace_sub_categories(
        &self,
        id: &str,
        sub_categories: &[SubCategory],
    ) -> Result<bool, StorageError>;

    /// Overwrite the `name` field of document `id`. Returns `false` when no document matched.
    fn set_name(&self, id: &str, name: &str) -> Result<bool, StorageError>;

    /// Delete document `id`. Returns `false` when no document matched.
    fn delete(&self, id: &str) -> Result<bool, StorageError>;
}
