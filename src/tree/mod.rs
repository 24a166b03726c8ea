//! Category Tree
//!
//! Document shapes for a category and its embedded subtree. A category is the unit
//! of persistence: every subcategory and product below it lives inside the same
//! document and is rewritten with it.

pub mod mutate;
pub mod navigator;

use crate::types::{CategoryID, ProductID, SubCategoryID};
use serde::{Deserialize, Serialize};

/// Deepest subcategory level a stored category may reach (root-level nodes are 1).
///
/// Each level adds an object and a child array to the encoded document; at 62
/// levels a product object in the deepest node sits at the 127th nesting level,
/// the most `serde_json` decodes.
pub const MAX_DEPTH: usize = 62;

/// Top-level category document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryID,
    pub name: String,
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
}

/// Embedded subcategory node
///
/// `None` for a container means the node may not hold that kind of child; it is
/// kept distinct from an empty container through serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub id: SubCategoryID,
    pub name: String,
    /// Insertion point recorded at creation; never re-derived
    #[serde(default)]
    pub parent_sub_category_id: Option<SubCategoryID>,
    #[serde(default)]
    pub child_sub_categories: Option<Vec<SubCategory>>,
    #[serde(default)]
    pub products: Option<Vec<Product>>,
}

/// Product record held by a subcategory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductID,
    pub name: String,
    pub num_material: String,
    pub stock: u32,
}

/// Which containers a new subcategory starts with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerFlags {
    pub has_products: bool,
    pub has_sub_categories: bool,
}

impl ContainerFlags {
    pub fn products() -> Self {
        Self {
            has_products: true,
            has_sub_categories: false,
        }
    }

    pub fn sub_categories() -> Self {
        Self {
            has_products: false,
            has_sub_categories: true,
        }
    }

    pub fn leaf() -> Self {
        Self::default()
    }
}

impl Category {
    pub fn new(id: impl Into<CategoryID>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sub_categories: Vec::new(),
        }
    }

    pub fn with_sub_category(mut self, sub_category: SubCategory) -> Self {
        self.sub_categories.push(sub_category);
        self
    }
}

impl SubCategory {
    /// Build a node whose containers follow `flags`.
    pub fn new(
        id: impl Into<SubCategoryID>,
        name: impl Into<String>,
        parent_sub_category_id: Option<SubCategoryID>,
        flags: ContainerFlags,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_sub_category_id,
            child_sub_categories: flags.has_sub_categories.then(Vec::new),
            products: flags.has_products.then(Vec::new),
        }
    }

    /// Append a child, creating the child container if the node had none.
    pub fn with_child(mut self, child: SubCategory) -> Self {
        self.child_sub_categories
            .get_or_insert_with(Vec::new)
            .push(child);
        self
    }

    /// Append a product, creating the product container if the node had none.
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.get_or_insert_with(Vec::new).push(product);
        self
    }

    /// Children, treating an absent container as empty
    pub fn children(&self) -> &[SubCategory] {
        self.child_sub_categories.as_deref().unwrap_or(&[])
    }

    /// Products, treating an absent container as empty
    pub fn product_list(&self) -> &[Product] {
        self.products.as_deref().unwrap_or(&[])
    }

    pub fn holds_sub_categories(&self) -> bool {
        self.child_sub_categories.is_some()
    }

    pub fn holds_products(&self) -> bool {
        self.products.is_some()
    }

    /// Both containers present, which the catalog tolerates but never intends.
    pub fn is_hybrid(&self) -> bool {
        self.holds_sub_categories() && self.holds_products()
    }
}

impl Product {
    pub fn new(
        id: impl Into<ProductID>,
        name: impl Into<String>,
        num_material: impl Into<String>,
        stock: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            num_material: num_material.into(),
            stock,
        }
    }
}
