//! Preconfigured demo catalog
//!
//! Three categories with a two-level subtree each, inserted only into an empty
//! store. Subcategory ids are fixed; product ids are generated on every seed.

use crate::error::CatalogError;
use crate::id::generate_id;
use crate::store::CategoryStore;
use crate::tree::{Category, ContainerFlags, Product, SubCategory};
use tracing::info;

fn group(id: &str, name: &str) -> SubCategory {
    SubCategory::new(id, name, None, ContainerFlags::sub_categories())
}

fn shelf(id: &str, name: &str, parent: &str) -> SubCategory {
    SubCategory::new(id, name, Some(parent.to_string()), ContainerFlags::products())
}

fn product(name: &str, num_material: &str, stock: u32) -> Product {
    Product::new(generate_id(), name, num_material, stock)
}

/// The demo categories.
pub fn preconfigured_categories() -> Vec<Category> {
    vec![
        Category::new("1.1", "tecnología")
            .with_sub_category(
                group("1.1.1", "computación")
                    .with_child(shelf("1.1.1.1", "computadora de escritorio", "1.1.1"))
                    .with_child(
                        shelf("1.1.1.2", "computadora portátil", "1.1.1")
                            .with_product(product("Dell 4512", "AX-4342FD", 3)),
                    )
                    .with_child(shelf("1.1.1.3", "tablets", "1.1.1")),
            )
            .with_sub_category(
                group("1.1.2", "telefonía")
                    .with_child(
                        shelf("1.1.2.1", "celular", "1.1.2")
                            .with_product(product("Iphone X", "AD-4332EE", 10)),
                    )
                    .with_child(
                        shelf("1.1.2.2", "accesorios", "1.1.2")
                            .with_product(product("Correa", "AC-5545Q", 0)),
                    ),
            ),
        Category::new("1.2", "farmacia").with_sub_category(
            group("1.2.1", "medicamentos")
                .with_child(
                    shelf("1.2.1.1", "analgésicos", "1.2.1")
                        .with_product(product("Aspirina", "MD-7456AS", 22)),
                )
                .with_child(shelf("1.2.1.2", "estomacal", "1.2.1")),
        ),
        Category::new("1.3", "hogar").with_sub_category(
            group("1.3.1", "baño")
                .with_child(shelf("1.3.1.1", "toallas", "1.3.1"))
                .with_child(
                    shelf("1.3.1.2", "batas", "1.3.1")
                        .with_product(product("Bata hombre", "BN-18643", 1)),
                ),
        ),
    ]
}

/// Insert the demo categories if the store holds nothing yet.
///
/// Returns the number of categories inserted.
pub fn seed_if_empty(store: &dyn CategoryStore) -> Result<usize, CatalogError> {
    if !store.fetch_all()?.is_empty() {
        return Ok(0);
    }
    let categories = preconfigured_categories();
    for category in &categories {
        store.insert(category)?;
    }
    info!(count = categories.len(), "seeded empty store");
    Ok(categories.len())
}
