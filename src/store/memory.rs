//! In-process category store.

use crate::error::StorageError;
use crate::store::CategoryStore;
use crate::tree::{Category, SubCategory};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Category store held in memory, ordered by id.
#[derive(Default)]
pub struct MemoryCategoryStore {
    documents: RwLock<BTreeMap<String, Category>>,
}

impl MemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

impl CategoryStore for MemoryCategoryStore {
    fn fetch_by_id(&self, id: &str) -> Result<Option<Category>, StorageError> {
        Ok(self.documents.read().get(id).cloned())
    }

    fn fetch_all(&self) -> Result<Vec<Category>, StorageError> {
        Ok(self.documents.read().values().cloned().collect())
    }

    fn insert(&self, category: &Category) -> Result<(), StorageError> {
        let mut documents = self.documents.write();
        if documents.contains_key(&category.id) {
            return Err(StorageError::DuplicateId(category.id.clone()));
        }
        documents.insert(category.id.clone(), category.clone());
        Ok(())
    }

    fn replace_sub_categories(
        &self,
        id: &str,
        sub_categories: &[SubCategory],
    ) -> Result<bool, StorageError> {
        match self.documents.write().get_mut(id) {
            Some(document) => {
                document.sub_categories = sub_categories.to_vec();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn set_name(&self, id: &str, name: &str) -> Result<bool, StorageError> {
        match self.documents.write().get_mut(id) {
            Some(document) => {
                document.name = name.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.documents.write().remove(id).is_some())
    }
}
