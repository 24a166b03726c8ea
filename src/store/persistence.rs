//! Sled-backed category store
//!
//! Documents are JSON-encoded under their id in the `categories` tree. Field
//! overwrites run through `update_and_fetch`, so each one is atomic for its
//! document.

use crate::error::StorageError;
use crate::store::CategoryStore;
use crate::tree::{Category, SubCategory};
use std::path::Path;

const CATEGORIES_TREE: &str = "categories";

pub struct SledCategoryStore {
    db: sled::Db,
    documents: sled::Tree,
}

impl SledCategoryStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    pub fn from_db(db: sled::Db) -> Result<Self, StorageError> {
        let documents = db.open_tree(CATEGORIES_TREE)?;
        Ok(Self { db, documents })
    }

    /// Flush pending writes to disk.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }

    fn decode(bytes: &[u8]) -> Result<Category, StorageError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Decode, edit, and re-encode one document atomically.
    fn patch_document(
        &self,
        id: &str,
        mut edit: impl FnMut(&mut Category),
    ) -> Result<bool, StorageError> {
        let mut failure: Option<serde_json::Error> = None;
        let updated = self.documents.update_and_fetch(id.as_bytes(), |current| {
            failure = None;
            let bytes = current?;
            let encoded = serde_json::from_slice::<Category>(bytes).and_then(|mut document| {
                edit(&mut document);
                serde_json::to_vec(&document)
            });
            match encoded {
                Ok(encoded) => Some(encoded),
                Err(e) => {
                    failure = Some(e);
                    Some(bytes.to_vec())
                }
            }
        })?;

        if let Some(e) = failure {
            return Err(StorageError::Encoding(e));
        }
        Ok(updated.is_some())
    }
}

impl CategoryStore for SledCategoryStore {
    fn fetch_by_id(&self, id: &str) -> Result<Option<Category>, StorageError> {
        self.documents
            .get(id.as_bytes())?
            .map(|bytes| Self::decode(&bytes))
            .transpose()
    }

    fn fetch_all(&self) -> Result<Vec<Category>, StorageError> {
        let mut categories = Vec::new();
        for entry in self.documents.iter() {
            let (_, bytes) = entry?;
            categories.push(Self::decode(&bytes)?);
        }
        Ok(categories)
    }

    fn insert(&self, category: &Category) -> Result<(), StorageError> {
        let encoded = serde_json::to_vec(category)?;
        self.documents
            .compare_and_swap(category.id.as_bytes(), None as Option<&[u8]>, Some(encoded))?
            .map_err(|_| StorageError::DuplicateId(category.id.clone()))
    }

    fn replace_sub_categories(
        &self,
        id: &str,
        sub_categories: &[SubCategory],
    ) -> Result<bool, StorageError> {
        self.patch_document(id, |document| {
            document.sub_categories = sub_categories.to_vec();
        })
    }

    fn set_name(&self, id: &str, name: &str) -> Result<bool, StorageError> {
        self.patch_document(id, |document| {
            document.name = name.to_string();
        })
    }

    fn delete(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.documents.remove(id.as_bytes())?.is_some())
    }
}
