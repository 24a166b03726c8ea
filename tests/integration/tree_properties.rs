//! Property tests over generated category trees.

use catalog::tree::{mutate, navigator};
use catalog::{Category, ContainerFlags, Product, SubCategory};
use proptest::prelude::*;
use proptest::sample::Index;

#[derive(Debug, Clone)]
enum Shape {
    Leaf { products: Option<u8> },
    Branch(Vec<Shape>),
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = proptest::option::of(0u8..4).prop_map(|products| Shape::Leaf { products });
    leaf.prop_recursive(5, 64, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Shape::Branch)
    })
}

fn forest() -> impl Strategy<Value = Vec<Shape>> {
    prop::collection::vec(shape(), 0..5)
}

struct Builder {
    next_node: usize,
    next_product: usize,
}

impl Builder {
    fn node(&mut self, shape: &Shape, parent: Option<&str>) -> SubCategory {
        let id = format!("s{}", self.next_node);
        self.next_node += 1;
        match shape {
            Shape::Leaf { products } => {
                let flags = if products.is_some() {
                    ContainerFlags::products()
                } else {
                    ContainerFlags::leaf()
                };
                let mut node = SubCategory::new(&id, &id, parent.map(str::to_string), flags);
                for _ in 0..products.unwrap_or(0) {
                    let product_id = format!("p{}", self.next_product);
                    self.next_product += 1;
                    node = node.with_product(Product::new(product_id, "product", "M-1", 1));
                }
                node
            }
            Shape::Branch(children) => {
                let mut node = SubCategory::new(
                    &id,
                    &id,
                    parent.map(str::to_string),
                    ContainerFlags::sub_categories(),
                );
                for child in children {
                    let child = self.node(child, Some(&id));
                    node = node.with_child(child);
                }
                node
            }
        }
    }
}

fn build(shapes: &[Shape]) -> Category {
    let mut builder = Builder {
        next_node: 0,
        next_product: 0,
    };
    let mut root = Category::new("root", "root");
    for shape in shapes {
        let node = builder.node(shape, None);
        root.sub_categories.push(node);
    }
    root
}

fn sub_category_ids(root: &Category) -> Vec<String> {
    navigator::walk(root).map(|node| node.id.clone()).collect()
}

fn product_ids(root: &Category) -> Vec<String> {
    navigator::walk(root)
        .flat_map(|node| node.product_list().iter().map(|product| product.id.clone()))
        .collect()
}

proptest! {
    #[test]
    fn absent_ids_are_never_found(shapes in forest(), suffix in "[a-z]{1,8}") {
        let root = build(&shapes);
        let absent = format!("absent-{}", suffix);

        prop_assert!(navigator::find_sub_category(&root, &absent).is_none());
        prop_assert!(navigator::find_parent_of_sub_category(&root, &absent).is_none());
        prop_assert!(navigator::find_product(&root, &absent).is_none());
        prop_assert!(navigator::find_sub_category_containing_product(&root, &absent).is_none());
    }

    #[test]
    fn every_node_is_found_with_its_parent(shapes in forest()) {
        let root = build(&shapes);
        for id in sub_category_ids(&root) {
            let node = navigator::find_sub_category(&root, &id);
            prop_assert_eq!(node.map(|n| n.id.as_str()), Some(id.as_str()));

            let parent = navigator::find_parent_of_sub_category(&root, &id).unwrap();
            prop_assert!(parent.children().iter().any(|child| child.id == id));
            let expected_parent = node.unwrap().parent_sub_category_id.as_deref().unwrap_or("root");
            prop_assert_eq!(parent.id(), expected_parent);
        }
        for id in product_ids(&root) {
            let owner = navigator::find_sub_category_containing_product(&root, &id).unwrap();
            prop_assert!(owner.product_list().iter().any(|product| product.id == id));
            prop_assert_eq!(navigator::find_product(&root, &id).map(|p| p.id.as_str()), Some(id.as_str()));
        }
    }

    #[test]
    fn delete_cascades_to_whole_subtree_of_nested_nodes(shapes in forest(), pick in any::<Index>()) {
        let mut root = build(&shapes);
        let ids = sub_category_ids(&root);
        prop_assume!(!ids.is_empty());
        let target = ids[pick.index(ids.len())].clone();

        if root.sub_categories.iter().any(|node| node.id == target) {
            let before = root.clone();
            prop_assert!(mutate::remove_sub_category(&mut root, &target).is_err());
            prop_assert_eq!(root, before);
            return Ok(());
        }

        let removed = mutate::remove_sub_category(&mut root, &target).unwrap();
        let detached = Category::new("detached", "detached").with_sub_category(removed);
        let gone_nodes = sub_category_ids(&detached);
        let gone_products = product_ids(&detached);

        for id in &gone_nodes {
            prop_assert!(navigator::find_sub_category(&root, id).is_none());
        }
        for id in &gone_products {
            prop_assert!(navigator::find_product(&root, id).is_none());
        }
        let survivors = sub_category_ids(&root);
        prop_assert_eq!(survivors.len() + gone_nodes.len(), ids.len());
        for id in survivors {
            prop_assert!(navigator::find_sub_category(&root, &id).is_some());
        }
    }
}
