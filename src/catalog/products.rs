//! Product operations
//!
//! Products live inside a subcategory's product list, so every write here is a
//! nested write on the owning category.

use super::Catalog;
use crate::error::CatalogError;
use crate::id;
use crate::tree::mutate::{self, ProductPatch};
use crate::tree::{navigator, Product};
use crate::types::{NodeKind, ProductID};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Request to create a product. The id is always generated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub num_material: String,
    #[serde(default)]
    pub stock: u32,
}

impl Catalog {
    /// Find a product anywhere in a category.
    pub fn get_product(&self, category_id: &str, product_id: &str) -> Result<Product, CatalogError> {
        let category = self.load(category_id)?;
        navigator::find_product(&category, product_id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(NodeKind::Product, product_id))
    }

    /// Add a product to a subcategory and return its generated id.
    pub fn add_product(
        &self,
        category_id: &str,
        sub_category_id: &str,
        request: NewProduct,
    ) -> Result<ProductID, CatalogError> {
        let product = Product {
            id: id::generate_id(),
            name: request.name,
            num_material: request.num_material,
            stock: request.stock,
        };
        let product_id = product.id.clone();

        self.modify(category_id, |category| {
            mutate::insert_product(category, sub_category_id, product)
        })?;

        info!(category_id, sub_category_id, product_id = %product_id, "product added");
        Ok(product_id)
    }

    pub fn remove_product(
        &self,
        category_id: &str,
        sub_category_id: &str,
        product_id: &str,
    ) -> Result<(), CatalogError> {
        self.modify(category_id, |category| {
            mutate::remove_product(category, sub_category_id, product_id)
        })?;
        info!(category_id, sub_category_id, product_id, "product removed");
        Ok(())
    }

    /// Apply `patch` to a product and return the updated record.
    ///
    /// `numMaterial` is never changed here.
    pub fn update_product(
        &self,
        category_id: &str,
        sub_category_id: &str,
        product_id: &str,
        patch: ProductPatch,
    ) -> Result<Product, CatalogError> {
        let updated = self.modify(category_id, |category| {
            mutate::update_product(category, sub_category_id, product_id, &patch).cloned()
        })?;
        info!(
            category_id,
            sub_category_id,
            product_id,
            name = ?patch.name,
            stock = ?patch.stock,
            "product updated"
        );
        Ok(updated)
    }
}
