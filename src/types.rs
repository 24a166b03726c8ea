//! Core types shared across the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// CategoryID: id of a top-level category document
pub type CategoryID = String;

/// SubCategoryID: id of a subcategory, unique across its whole category tree
pub type SubCategoryID = String;

/// ProductID: id of a product, generated at creation
pub type ProductID = String;

/// Kind of node referenced by a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Category,
    SubCategory,
    /// The subcategory named as insertion point for a nested subcategory
    ParentSubCategory,
    Product,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeKind::Category => "category",
            NodeKind::SubCategory => "subcategory",
            NodeKind::ParentSubCategory => "parent subcategory",
            NodeKind::Product => "product",
        };
        f.write_str(label)
    }
}
