//! Tree Navigator
//!
//! Pure lookups over an in-memory category tree. Every search walks the tree in
//! depth-first pre-order with an explicit stack, so depth is bounded only by the
//! document. Absent containers are walked as empty.
//!
//! Mutable access goes through a [`NodePath`]: a search records the index path to
//! its target, and [`resolve_mut`] follows that path on the same tree. Ids are
//! assumed unique within one category; with duplicates the first match in
//! pre-order wins.

use crate::tree::{Category, Product, SubCategory};

/// Index path from a category to a subcategory.
///
/// The first index selects from `Category::sub_categories`, each following index
/// from the previous node's `child_sub_categories`. An empty path denotes the
/// category itself.
pub type NodePath = Vec<usize>;

/// Position of a product: its owning subcategory and its index in `products`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPath {
    pub owner: NodePath,
    pub index: usize,
}

/// Container whose immediate child list holds a subcategory.
#[derive(Debug, Clone, Copy)]
pub enum Parent<'a> {
    Category(&'a Category),
    SubCategory(&'a SubCategory),
}

impl<'a> Parent<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Parent::Category(category) => &category.id,
            Parent::SubCategory(sub_category) => &sub_category.id,
        }
    }

    pub fn children(&self) -> &'a [SubCategory] {
        match self {
            Parent::Category(category) => &category.sub_categories,
            Parent::SubCategory(sub_category) => sub_category.children(),
        }
    }
}

/// Mutable counterpart of [`Parent`].
#[derive(Debug)]
pub enum ParentMut<'a> {
    Category(&'a mut Category),
    SubCategory(&'a mut SubCategory),
}

impl ParentMut<'_> {
    /// Child list of the container. `None` only for a subcategory without one.
    pub fn children_mut(&mut self) -> Option<&mut Vec<SubCategory>> {
        match self {
            ParentMut::Category(category) => Some(&mut category.sub_categories),
            ParentMut::SubCategory(sub_category) => sub_category.child_sub_categories.as_mut(),
        }
    }

    /// Remove the immediate child `id`, if this container holds it.
    pub fn detach(&mut self, id: &str) -> Option<SubCategory> {
        let children = self.children_mut()?;
        let index = children.iter().position(|child| child.id == id)?;
        Some(children.remove(index))
    }
}

/// Pre-order iterator over every subcategory of a category.
///
/// [`Walk::path`] reports the index path of the node most recently yielded.
pub struct Walk<'a> {
    stack: Vec<(usize, usize, &'a SubCategory)>,
    path: NodePath,
}

impl<'a> Walk<'a> {
    fn new(root: &'a Category) -> Self {
        let stack = root
            .sub_categories
            .iter()
            .enumerate()
            .rev()
            .map(|(index, node)| (0, index, node))
            .collect();
        Self {
            stack,
            path: NodePath::new(),
        }
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a SubCategory;

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, index, node) = self.stack.pop()?;
        self.path.truncate(depth);
        self.path.push(index);
        for (child_index, child) in node.children().iter().enumerate().rev() {
            self.stack.push((depth + 1, child_index, child));
        }
        Some(node)
    }
}

/// Walk every subcategory of `root` in depth-first pre-order.
pub fn walk(root: &Category) -> Walk<'_> {
    Walk::new(root)
}

/// Number of subcategory levels below `root`; 0 for an empty category.
pub fn depth(root: &Category) -> usize {
    let mut walk = walk(root);
    let mut deepest = 0;
    while walk.next().is_some() {
        deepest = deepest.max(walk.path().len());
    }
    deepest
}

/// Number of levels in the subtree rooted at `node`, counting `node` itself.
pub fn height(node: &SubCategory) -> usize {
    let mut stack = vec![(1, node)];
    let mut tallest = 0;
    while let Some((level, node)) = stack.pop() {
        tallest = tallest.max(level);
        stack.extend(node.children().iter().map(|child| (level + 1, child)));
    }
    tallest
}

fn locate_where(root: &Category, mut matches: impl FnMut(&SubCategory) -> bool) -> Option<NodePath> {
    let mut walk = walk(root);
    while let Some(node) = walk.next() {
        if matches(node) {
            return Some(walk.path().to_vec());
        }
    }
    None
}

fn holds_child(node: &SubCategory, id: &str) -> bool {
    node.children().iter().any(|child| child.id == id)
}

fn product_index(node: &SubCategory, product_id: &str) -> Option<usize> {
    node.product_list()
        .iter()
        .position(|product| product.id == product_id)
}

/// Find a subcategory anywhere in the tree.
pub fn find_sub_category<'a>(root: &'a Category, id: &str) -> Option<&'a SubCategory> {
    walk(root).find(|node| node.id == id)
}

/// Path to a subcategory anywhere in the tree.
pub fn locate_sub_category(root: &Category, id: &str) -> Option<NodePath> {
    locate_where(root, |node| node.id == id)
}

/// Find the container whose immediate child list holds `id`.
///
/// A root-level subcategory reports the category itself as its parent.
pub fn find_parent_of_sub_category<'a>(root: &'a Category, id: &str) -> Option<Parent<'a>> {
    if root.sub_categories.iter().any(|node| node.id == id) {
        return Some(Parent::Category(root));
    }
    walk(root)
        .find(|node| holds_child(node, id))
        .map(Parent::SubCategory)
}

/// Path to the container holding `id`; an empty path means the category.
pub fn locate_parent_of_sub_category(root: &Category, id: &str) -> Option<NodePath> {
    if root.sub_categories.iter().any(|node| node.id == id) {
        return Some(NodePath::new());
    }
    locate_where(root, |node| holds_child(node, id))
}

/// Find a product in any subcategory of the tree.
pub fn find_product<'a>(root: &'a Category, product_id: &str) -> Option<&'a Product> {
    walk(root).find_map(|node| {
        product_index(node, product_id).map(|index| &node.product_list()[index])
    })
}

/// Find the subcategory whose product list holds `product_id`.
pub fn find_sub_category_containing_product<'a>(
    root: &'a Category,
    product_id: &str,
) -> Option<&'a SubCategory> {
    walk(root).find(|node| product_index(node, product_id).is_some())
}

/// Position of a product anywhere in the tree.
pub fn locate_product(root: &Category, product_id: &str) -> Option<ProductPath> {
    let mut walk = walk(root);
    while let Some(node) = walk.next() {
        if let Some(index) = product_index(node, product_id) {
            return Some(ProductPath {
                owner: walk.path().to_vec(),
                index,
            });
        }
    }
    None
}

/// Follow `path` to a subcategory. Returns `None` for an empty or stale path.
pub fn resolve<'a>(root: &'a Category, path: &[usize]) -> Option<&'a SubCategory> {
    let (first, rest) = path.split_first()?;
    let mut node = root.sub_categories.get(*first)?;
    for &index in rest {
        node = node.child_sub_categories.as_ref()?.get(index)?;
    }
    Some(node)
}

/// Mutable [`resolve`].
pub fn resolve_mut<'a>(root: &'a mut Category, path: &[usize]) -> Option<&'a mut SubCategory> {
    let (first, rest) = path.split_first()?;
    let mut node = root.sub_categories.get_mut(*first)?;
    for &index in rest {
        node = node.child_sub_categories.as_mut()?.get_mut(index)?;
    }
    Some(node)
}

/// Mutable [`find_sub_category`].
pub fn find_sub_category_mut<'a>(root: &'a mut Category, id: &str) -> Option<&'a mut SubCategory> {
    let path = locate_sub_category(root, id)?;
    resolve_mut(root, &path)
}

/// Mutable [`find_parent_of_sub_category`].
pub fn find_parent_of_sub_category_mut<'a>(
    root: &'a mut Category,
    id: &str,
) -> Option<ParentMut<'a>> {
    let path = locate_parent_of_sub_category(root, id)?;
    if path.is_empty() {
        return Some(ParentMut::Category(root));
    }
    resolve_mut(root, &path).map(ParentMut::SubCategory)
}

/// Mutable [`find_product`].
pub fn find_product_mut<'a>(root: &'a mut Category, product_id: &str) -> Option<&'a mut Product> {
    let ProductPath { owner, index } = locate_product(root, product_id)?;
    resolve_mut(root, &owner)?.products.as_mut()?.get_mut(index)
}
