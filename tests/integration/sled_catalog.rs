//! Catalog operations over the sled store, including reopen

use catalog::seed;
use catalog::store::{CategoryStore, SledCategoryStore};
use catalog::tree::{navigator, MAX_DEPTH};
use catalog::{
    Catalog, CatalogError, ContainerFlags, NewCategory, NewProduct, NewSubCategory, ProductPatch,
};
use std::sync::Arc;
use tempfile::TempDir;

fn open(dir: &TempDir) -> Arc<SledCategoryStore> {
    Arc::new(SledCategoryStore::open(dir.path()).unwrap())
}

#[test]
fn nested_edits_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let product_id;
    {
        let store = open(&dir);
        assert_eq!(seed::seed_if_empty(store.as_ref()).unwrap(), 3);
        let catalog = Catalog::new(store.clone());

        catalog
            .add_sub_category(
                "1.3",
                NewSubCategory {
                    id: Some("1.3.1.3".to_string()),
                    name: "alfombras".to_string(),
                    parent_sub_category_id: Some("1.3.1".to_string()),
                },
                ContainerFlags::products(),
            )
            .unwrap();
        product_id = catalog
            .add_product(
                "1.3",
                "1.3.1.3",
                NewProduct {
                    name: "Alfombra baño".to_string(),
                    num_material: "AL-200".to_string(),
                    stock: 2,
                },
            )
            .unwrap();
        catalog
            .update_product(
                "1.3",
                "1.3.1.3",
                &product_id,
                ProductPatch {
                    name: None,
                    stock: Some(9),
                },
            )
            .unwrap();
        catalog.delete_sub_category("1.3", "1.3.1.2").unwrap();
        store.flush().unwrap();
    }

    let store = open(&dir);
    assert_eq!(seed::seed_if_empty(store.as_ref()).unwrap(), 0);
    let catalog = Catalog::new(store);

    let product = catalog.get_product("1.3", &product_id).unwrap();
    assert_eq!(product.stock, 9);
    assert_eq!(product.name, "Alfombra baño");

    let hogar = catalog.get_category("1.3").unwrap();
    assert!(navigator::find_sub_category(&hogar, "1.3.1.2").is_none());
    assert!(navigator::find_sub_category(&hogar, "1.3.1.1").is_some());
    assert_eq!(catalog.list_categories().unwrap().len(), 3);
}

#[test]
fn category_delete_is_persisted() {
    let dir = TempDir::new().unwrap();
    {
        let store = open(&dir);
        seed::seed_if_empty(store.as_ref()).unwrap();
        Catalog::new(store.clone()).delete_category("1.2").unwrap();
        store.flush().unwrap();
    }
    let store = open(&dir);
    assert!(store.fetch_by_id("1.2").unwrap().is_none());
    assert!(Catalog::new(store).get_category("1.2").unwrap_err().is_not_found());
}

fn level(n: usize) -> NewSubCategory {
    NewSubCategory {
        id: Some(format!("1.2.d{}", n)),
        name: format!("nivel {}", n),
        parent_sub_category_id: (n > 1).then(|| format!("1.2.d{}", n - 1)),
    }
}

#[test]
fn deepest_allowed_tree_reads_back_and_deeper_is_rejected() {
    let dir = TempDir::new().unwrap();
    {
        let store = open(&dir);
        seed::seed_if_empty(store.as_ref()).unwrap();
        store.delete("1.2").unwrap();
        let catalog = Catalog::new(store.clone());
        catalog
            .create_category(NewCategory {
                id: Some("1.2".to_string()),
                name: "farmacia".to_string(),
                sub_categories: Vec::new(),
            })
            .unwrap();

        for n in 1..MAX_DEPTH {
            catalog
                .add_sub_category("1.2", level(n), ContainerFlags::sub_categories())
                .unwrap();
        }
        // Deepest node holds both containers, the widest shape the encoding must carry.
        catalog
            .add_sub_category(
                "1.2",
                level(MAX_DEPTH),
                ContainerFlags {
                    has_products: true,
                    has_sub_categories: true,
                },
            )
            .unwrap();
        catalog
            .add_product(
                "1.2",
                &format!("1.2.d{}", MAX_DEPTH),
                NewProduct {
                    name: "Gasa".to_string(),
                    num_material: "GS-1".to_string(),
                    stock: 1,
                },
            )
            .unwrap();

        let err = catalog
            .add_sub_category("1.2", level(MAX_DEPTH + 1), ContainerFlags::leaf())
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidStructure(_)));
        assert!(catalog.get_category("1.2").is_ok());
        store.flush().unwrap();
    }

    let store = open(&dir);
    assert_eq!(seed::seed_if_empty(store.as_ref()).unwrap(), 0);
    let catalog = Catalog::new(store);
    let pharmacy = catalog.get_category("1.2").unwrap();
    assert_eq!(navigator::depth(&pharmacy), MAX_DEPTH);
    let deepest = navigator::find_sub_category(&pharmacy, &format!("1.2.d{}", MAX_DEPTH)).unwrap();
    assert_eq!(deepest.product_list()[0].name, "Gasa");
    assert_eq!(catalog.list_categories().unwrap().len(), 3);
}
