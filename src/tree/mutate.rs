//! In-memory tree mutations
//!
//! Each function locates its target with the navigator and edits the tree in
//! place. A failed locate returns before anything is touched, so callers can
//! skip the write-back entirely.

use crate::error::CatalogError;
use crate::tree::navigator::{self, ParentMut};
use crate::tree::{Category, Product, SubCategory, MAX_DEPTH};
use crate::types::NodeKind;
use serde::{Deserialize, Serialize};

/// Optional hardening applied when nodes are inserted.
///
/// Both checks are off by default, which accepts any shape the caller sends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationPolicy {
    /// Reject subcategories created with both a product and a child container
    #[serde(default)]
    pub reject_hybrid_containers: bool,

    /// Reject subcategories whose id already exists somewhere in the tree
    #[serde(default)]
    pub reject_duplicate_ids: bool,
}

impl MutationPolicy {
    pub fn strict() -> Self {
        Self {
            reject_hybrid_containers: true,
            reject_duplicate_ids: true,
        }
    }

    fn check_insert(&self, root: &Category, node: &SubCategory) -> Result<(), CatalogError> {
        if self.reject_hybrid_containers && node.is_hybrid() {
            return Err(CatalogError::InvalidStructure(format!(
                "subcategory {} cannot hold both products and subcategories",
                node.id
            )));
        }
        if self.reject_duplicate_ids && navigator::find_sub_category(root, &node.id).is_some() {
            return Err(CatalogError::InvalidStructure(format!(
                "subcategory id {} already exists in category {}",
                node.id, root.id
            )));
        }
        Ok(())
    }
}

/// Partial product update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub stock: Option<u32>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.stock.is_none()
    }

    fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

/// Insert a subcategory at the point named by its `parent_sub_category_id`.
///
/// A missing or blank parent id appends to the category's own list.
pub fn insert_sub_category(
    root: &mut Category,
    node: SubCategory,
    policy: &MutationPolicy,
) -> Result<(), CatalogError> {
    policy.check_insert(root, &node)?;

    let parent_id = node
        .parent_sub_category_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let (level, siblings) = match parent_id {
        None => (1, &mut root.sub_categories),
        Some(parent_id) => {
            let path = navigator::locate_sub_category(root, &parent_id)
                .ok_or_else(|| CatalogError::not_found(NodeKind::ParentSubCategory, &parent_id))?;
            let level = path.len() + 1;
            let children = navigator::resolve_mut(root, &path)
                .and_then(|parent| parent.child_sub_categories.as_mut())
                .ok_or_else(|| {
                    CatalogError::InvalidStructure(format!(
                        "subcategory {} does not hold subcategories",
                        parent_id
                    ))
                })?;
            (level, children)
        }
    };
    check_depth(level + navigator::height(&node) - 1, &node.id)?;
    siblings.push(node);
    Ok(())
}

fn check_depth(depth: usize, id: &str) -> Result<(), CatalogError> {
    if depth > MAX_DEPTH {
        return Err(CatalogError::InvalidStructure(format!(
            "subcategory {} would reach depth {} (limit {})",
            id, depth, MAX_DEPTH
        )));
    }
    Ok(())
}

/// Reject a whole tree that nests deeper than [`MAX_DEPTH`].
pub fn ensure_depth(root: &Category) -> Result<(), CatalogError> {
    let depth = navigator::depth(root);
    if depth > MAX_DEPTH {
        return Err(CatalogError::InvalidStructure(format!(
            "category {} nests {} levels deep (limit {})",
            root.id, depth, MAX_DEPTH
        )));
    }
    Ok(())
}

/// Rename a subcategory anywhere in the tree.
pub fn rename_sub_category<'a>(
    root: &'a mut Category,
    id: &str,
    name: &str,
) -> Result<&'a SubCategory, CatalogError> {
    let node = navigator::find_sub_category_mut(root, id)
        .ok_or_else(|| CatalogError::not_found(NodeKind::SubCategory, id))?;
    node.name = name.to_string();
    Ok(node)
}

/// Detach a subcategory, with its whole subtree, from its parent subcategory.
///
/// Only nested nodes can be removed. A root-level node, whose parent is the
/// category itself, is reported as not found and the tree is left untouched.
pub fn remove_sub_category(root: &mut Category, id: &str) -> Result<SubCategory, CatalogError> {
    match navigator::find_parent_of_sub_category_mut(root, id) {
        Some(mut parent @ ParentMut::SubCategory(_)) => parent.detach(id),
        _ => None,
    }
    .ok_or_else(|| CatalogError::not_found(NodeKind::SubCategory, id))
}

fn product_container<'a>(
    root: &'a mut Category,
    sub_category_id: &str,
) -> Result<&'a mut SubCategory, CatalogError> {
    navigator::find_sub_category_mut(root, sub_category_id)
        .ok_or_else(|| CatalogError::not_found(NodeKind::SubCategory, sub_category_id))
}

/// Append a product to a subcategory's product list.
pub fn insert_product(
    root: &mut Category,
    sub_category_id: &str,
    product: Product,
) -> Result<(), CatalogError> {
    let node = product_container(root, sub_category_id)?;
    let products = node.products.as_mut().ok_or_else(|| {
        CatalogError::InvalidStructure(format!(
            "subcategory {} does not hold products",
            sub_category_id
        ))
    })?;
    products.push(product);
    Ok(())
}

/// Remove a product from the named subcategory.
pub fn remove_product(
    root: &mut Category,
    sub_category_id: &str,
    product_id: &str,
) -> Result<Product, CatalogError> {
    let node = product_container(root, sub_category_id)?;
    let products = node
        .products
        .as_mut()
        .ok_or_else(|| CatalogError::not_found(NodeKind::Product, product_id))?;
    let index = products
        .iter()
        .position(|product| product.id == product_id)
        .ok_or_else(|| CatalogError::not_found(NodeKind::Product, product_id))?;
    Ok(products.remove(index))
}

/// Apply a partial update to a product in the named subcategory.
pub fn update_product<'a>(
    root: &'a mut Category,
    sub_category_id: &str,
    product_id: &str,
    patch: &ProductPatch,
) -> Result<&'a Product, CatalogError> {
    let node = product_container(root, sub_category_id)?;
    let product = node
        .products
        .as_mut()
        .and_then(|products| products.iter_mut().find(|product| product.id == product_id))
        .ok_or_else(|| CatalogError::not_found(NodeKind::Product, product_id))?;
    patch.apply(product);
    Ok(product)
}
