//! Catalog Service
//!
//! Composes the category store with the tree navigator. Every nested write reads
//! the whole category, edits it in memory, and writes the `subCategories` field
//! back in one replace.
//!
//! There is no coordination between concurrent writers: two requests editing the
//! same category each write back the tree they read, and the later replace wins.

mod products;

pub use products::NewProduct;

use crate::error::CatalogError;
use crate::id;
use crate::store::CategoryStore;
use crate::tree::mutate::{self, MutationPolicy};
use crate::tree::{navigator, Category, ContainerFlags, SubCategory};
use crate::types::{CategoryID, NodeKind, SubCategoryID};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Request to create a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    /// Caller-chosen id; generated when absent or blank
    #[serde(default)]
    pub id: Option<CategoryID>,
    pub name: String,
    /// Seeded subtree, stored as given
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
}

/// Request to create a subcategory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubCategory {
    /// Caller-chosen id; generated when absent or blank
    #[serde(default)]
    pub id: Option<SubCategoryID>,
    pub name: String,
    /// Insertion point; absent or blank appends at the category root
    #[serde(default)]
    pub parent_sub_category_id: Option<SubCategoryID>,
}

/// Catalog operations over a category store.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn CategoryStore>,
    policy: MutationPolicy,
}

impl Catalog {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self::with_policy(store, MutationPolicy::default())
    }

    pub fn with_policy(store: Arc<dyn CategoryStore>, policy: MutationPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &Arc<dyn CategoryStore> {
        &self.store
    }

    /// Fetch a category snapshot or fail with `NotFound`.
    fn load(&self, category_id: &str) -> Result<Category, CatalogError> {
        self.store.fetch_by_id(category_id)?.ok_or_else(|| {
            warn!(category_id, "category not found");
            CatalogError::not_found(NodeKind::Category, category_id)
        })
    }

    /// Write the edited tree back over the stored `subCategories`.
    fn commit(&self, category: &Category) -> Result<(), CatalogError> {
        if !self
            .store
            .replace_sub_categories(&category.id, &category.sub_categories)?
        {
            // Deleted between our fetch and this replace.
            warn!(category_id = %category.id, "category vanished before write-back");
            return Err(CatalogError::not_found(NodeKind::Category, &category.id));
        }
        Ok(())
    }

    /// Fetch, edit in memory, and write back one category.
    ///
    /// Nothing is written when `edit` fails.
    pub(crate) fn modify<T>(
        &self,
        category_id: &str,
        edit: impl FnOnce(&mut Category) -> Result<T, CatalogError>,
    ) -> Result<T, CatalogError> {
        let mut category = self.load(category_id)?;
        let outcome = edit(&mut category)?;
        self.commit(&category)?;
        Ok(outcome)
    }

    pub fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.store.fetch_all()?)
    }

    pub fn get_category(&self, category_id: &str) -> Result<Category, CatalogError> {
        self.load(category_id)
    }

    /// Create a category and return its id.
    ///
    /// A seeded subtree deeper than [`MAX_DEPTH`](crate::tree::MAX_DEPTH) is rejected.
    pub fn create_category(&self, request: NewCategory) -> Result<CategoryID, CatalogError> {
        let category = Category {
            id: id::id_or_generate(request.id.as_deref()),
            name: request.name,
            sub_categories: request.sub_categories,
        };
        mutate::ensure_depth(&category)?;
        self.store.insert(&category)?;
        info!(category_id = %category.id, name = %category.name, "category created");
        Ok(category.id)
    }

    pub fn rename_category(&self, category_id: &str, name: &str) -> Result<(), CatalogError> {
        if !self.store.set_name(category_id, name)? {
            return Err(CatalogError::not_found(NodeKind::Category, category_id));
        }
        info!(category_id, name, "category renamed");
        Ok(())
    }

    /// Delete a category and, with it, its whole subtree.
    pub fn delete_category(&self, category_id: &str) -> Result<(), CatalogError> {
        if !self.store.delete(category_id)? {
            return Err(CatalogError::not_found(NodeKind::Category, category_id));
        }
        info!(category_id, "category deleted");
        Ok(())
    }

    /// Add a subcategory and return its id.
    ///
    /// `flags` decide which containers the new node starts with.
    pub fn add_sub_category(
        &self,
        category_id: &str,
        request: NewSubCategory,
        flags: ContainerFlags,
    ) -> Result<SubCategoryID, CatalogError> {
        let node = SubCategory::new(
            id::id_or_generate(request.id.as_deref()),
            request.name,
            request.parent_sub_category_id,
            flags,
        );
        let sub_category_id = node.id.clone();
        let parent = node.parent_sub_category_id.clone();
        let policy = self.policy;

        self.modify(category_id, |category| {
            mutate::insert_sub_category(category, node, &policy)
        })?;

        info!(
            category_id,
            sub_category_id = %sub_category_id,
            parent = parent.as_deref().unwrap_or(category_id),
            has_products = flags.has_products,
            has_sub_categories = flags.has_sub_categories,
            "subcategory added"
        );
        Ok(sub_category_id)
    }

    /// Fetch one subcategory from anywhere in a category.
    pub fn get_sub_category(
        &self,
        category_id: &str,
        sub_category_id: &str,
    ) -> Result<SubCategory, CatalogError> {
        let category = self.load(category_id)?;
        navigator::find_sub_category(&category, sub_category_id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(NodeKind::SubCategory, sub_category_id))
    }

    /// Rename a subcategory and return the updated node.
    pub fn rename_sub_category(
        &self,
        category_id: &str,
        sub_category_id: &str,
        name: &str,
    ) -> Result<SubCategory, CatalogError> {
        let renamed = self.modify(category_id, |category| {
            mutate::rename_sub_category(category, sub_category_id, name).cloned()
        })?;
        info!(category_id, sub_category_id, name, "subcategory renamed");
        Ok(renamed)
    }

    /// Delete a subcategory together with its descendants and their products.
    pub fn delete_sub_category(
        &self,
        category_id: &str,
        sub_category_id: &str,
    ) -> Result<(), CatalogError> {
        let removed = self.modify(category_id, |category| {
            mutate::remove_sub_category(category, sub_category_id)
        })?;
        debug!(
            category_id,
            sub_category_id,
            children = removed.children().len(),
            "detached subtree"
        );
        info!(category_id, sub_category_id, "subcategory deleted");
        Ok(())
    }
}
