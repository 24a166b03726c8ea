//! Concurrent writers on one category: the later write-back wins.

use catalog::seed;
use catalog::store::{CategoryStore, MemoryCategoryStore};
use catalog::tree::{mutate, navigator};
use catalog::types::NodeKind;
use catalog::{Catalog, CatalogError, ContainerFlags, MutationPolicy, NewSubCategory, SubCategory};
use std::sync::Arc;
use std::thread;

use crate::integration::support::GatedStore;

fn request(id: &str) -> NewSubCategory {
    NewSubCategory {
        id: Some(id.to_string()),
        name: format!("added {}", id),
        parent_sub_category_id: Some("1.2.1".to_string()),
    }
}

#[test]
fn concurrent_additions_under_same_parent_lose_one() {
    let inner = MemoryCategoryStore::new();
    seed::seed_if_empty(&inner).unwrap();
    let store = Arc::new(GatedStore::new(inner, 2, 2));
    let catalog = Catalog::new(store.clone());

    let handles: Vec<_> = ["1.2.1.A", "1.2.1.B"]
        .into_iter()
        .map(|id| {
            let catalog = catalog.clone();
            thread::spawn(move || catalog.add_sub_category("1.2", request(id), ContainerFlags::leaf()))
        })
        .collect();

    for handle in handles {
        // Both writers succeed from their own point of view.
        assert!(handle.join().unwrap().is_ok());
    }
    assert_eq!(store.replace_count(), 2);

    let category = catalog.get_category("1.2").unwrap();
    let has_a = navigator::find_sub_category(&category, "1.2.1.A").is_some();
    let has_b = navigator::find_sub_category(&category, "1.2.1.B").is_some();
    assert!(
        has_a ^ has_b,
        "exactly one concurrent addition survives (a: {}, b: {})",
        has_a,
        has_b
    );

    let medicines = navigator::find_sub_category(&category, "1.2.1").unwrap();
    assert_eq!(medicines.children().len(), 3);
}

#[test]
fn later_replace_discards_earlier_change() {
    let store = MemoryCategoryStore::new();
    seed::seed_if_empty(&store).unwrap();
    let policy = MutationPolicy::default();

    let mut first = store.fetch_by_id("1.2").unwrap().unwrap();
    let mut second = store.fetch_by_id("1.2").unwrap().unwrap();

    let node = |id: &str| {
        SubCategory::new(id, id, Some("1.2.1".to_string()), ContainerFlags::leaf())
    };
    mutate::insert_sub_category(&mut first, node("A"), &policy).unwrap();
    mutate::insert_sub_category(&mut second, node("B"), &policy).unwrap();

    assert!(store
        .replace_sub_categories("1.2", &first.sub_categories)
        .unwrap());
    assert!(store
        .replace_sub_categories("1.2", &second.sub_categories)
        .unwrap());

    let stored = store.fetch_by_id("1.2").unwrap().unwrap();
    assert!(navigator::find_sub_category(&stored, "A").is_none());
    assert!(navigator::find_sub_category(&stored, "B").is_some());
}

#[test]
fn replace_after_delete_matches_nothing() {
    let store = MemoryCategoryStore::new();
    seed::seed_if_empty(&store).unwrap();

    let snapshot = store.fetch_by_id("1.3").unwrap().unwrap();
    assert!(store.delete("1.3").unwrap());
    assert!(!store
        .replace_sub_categories("1.3", &snapshot.sub_categories)
        .unwrap());
    assert!(store.fetch_by_id("1.3").unwrap().is_none());
}

#[test]
fn nested_write_after_concurrent_category_delete_is_not_found() {
    let inner = MemoryCategoryStore::new();
    seed::seed_if_empty(&inner).unwrap();
    let store = Arc::new(GatedStore::new(inner, 1, 2));
    let catalog = Catalog::new(store.clone());

    let writer = {
        let catalog = catalog.clone();
        thread::spawn(move || catalog.add_sub_category("1.2", request("1.2.1.C"), ContainerFlags::leaf()))
    };

    // The writer now holds a snapshot of 1.2 and is parked before its write-back.
    store.wait();
    catalog.delete_category("1.2").unwrap();
    store.wait();

    let err = writer.join().unwrap().unwrap_err();
    assert!(matches!(
        err,
        CatalogError::NotFound {
            kind: NodeKind::Category,
            ..
        }
    ));
    assert_eq!(store.replace_count(), 1);
    assert!(catalog.get_category("1.2").unwrap_err().is_not_found());
}
