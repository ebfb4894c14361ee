use colored::Colorize;
use tracing::{debug, trace, Level};

use crate::{
    error::{Error, Result},
    iterator::{NodeIter, Order, Traverse},
    node::{self, Link, Node},
    IdGenerator, UniqueGenerator,
};

/// An in-memory binary search tree.
///
/// Every value in a node's left subtree compares less than the node's value,
/// every value in its right subtree compares greater. Values are unique:
/// inserting a value that is already present is rejected.
///
/// Structural operations are iterative, so a degenerate (list-shaped) tree
/// can be traversed, modified and dropped at any height.
///
/// # Examples
///
/// ```
/// use binarytree::{BinaryTree, Order};
///
/// let mut tree = BinaryTree::new();
/// tree.insert(5);
/// tree.insert(3);
/// tree.insert(8);
///
/// let values: Vec<i32> = tree.traverse(Order::InOrder).copied().collect();
/// assert_eq!(values, vec![3, 5, 8]);
/// ```
#[derive(Debug)]
pub struct BinaryTree<T, G = IdGenerator>
where
    G: UniqueGenerator,
{
    pub(crate) root: Link<T, G::Output>,
    len: usize,
    idgen: G,
}

impl<T> BinaryTree<T> {
    pub fn new() -> Self {
        Self::with_generator(IdGenerator::default())
    }
}

impl<T, G> Default for BinaryTree<T, G>
where
    G: UniqueGenerator + Default,
{
    fn default() -> Self {
        Self::with_generator(G::default())
    }
}

impl<T, G> BinaryTree<T, G>
where
    G: UniqueGenerator,
{
    /// Create an empty tree which draws node ids from `idgen`
    pub fn with_generator(idgen: G) -> Self {
        Self {
            root: None,
            len: 0,
            idgen,
        }
    }

    /// Assemble a tree from an already linked root. The caller guarantees `len`.
    pub(crate) fn from_parts(root: Link<T, G::Output>, len: usize, idgen: G) -> Self {
        Self { root, len, idgen }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&Node<T, G::Output>> {
        self.root.as_deref()
    }

    /// Remove every node
    pub fn clear(&mut self) {
        node::release(self.root.take());
        self.len = 0;
    }

    /// Visit nodes in the given order, with their depth
    pub fn nodes(&self, order: Order) -> NodeIter<'_, T, G::Output> {
        NodeIter::new(self.root(), order)
    }

    /// Visit values in the given order.
    ///
    /// Each call starts a fresh traversal.
    pub fn traverse(&self, order: Order) -> Traverse<'_, T, G::Output> {
        Traverse::new(self.nodes(order))
    }

    /// Values in ascending order
    pub fn iter(&self) -> Traverse<'_, T, G::Output> {
        self.traverse(Order::InOrder)
    }

    /// Number of levels. An empty tree has height 0, a lone root height 1.
    pub fn height(&self) -> usize {
        self.nodes(Order::LevelOrder)
            .map(|node| node.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes(Order::PreOrder)
            .filter(|node| node.is_leaf())
            .count()
    }

    /// Smallest value in the tree
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(node.value())
    }

    /// Largest value in the tree
    pub fn max(&self) -> Option<&T> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(node.value())
    }

    /// True when the subtrees of every node differ in height by at most one
    pub fn is_balanced(&self) -> bool {
        // Post-order sees both children before their parent, so heights can
        // be folded up with a value stack.
        let mut heights: Vec<usize> = Vec::new();

        for node in self.nodes(Order::PostOrder) {
            let right = if node.right().is_some() {
                heights.pop().unwrap_or(0)
            } else {
                0
            };
            let left = if node.left().is_some() {
                heights.pop().unwrap_or(0)
            } else {
                0
            };

            if left.abs_diff(right) > 1 {
                return false;
            }
            heights.push(left.max(right) + 1);
        }

        true
    }

    /// Relink every node into a height-balanced shape.
    ///
    /// The in-order sequence and node ids are unchanged.
    pub fn rebalance(&mut self) {
        let sorted = node::flatten(self.root.take(), self.len);
        let mut slots: Vec<_> = sorted.into_iter().map(Some).collect();
        self.root = node::build_balanced(&mut slots);

        // height() walks every node
        if tracing::enabled!(Level::DEBUG) {
            debug!(
                "{} {} nodes, height {}",
                "Rebalanced".bright_purple(),
                self.len,
                self.height()
            );
        }
    }
}

impl<T, G> BinaryTree<T, G>
where
    T: Ord,
    G: UniqueGenerator,
{
    /// Add `value` to the tree.
    ///
    /// Returns `false` and leaves the tree unchanged if an equal value is
    /// already present.
    pub fn insert(&mut self, value: T) -> bool {
        let slot = node::descend(&mut self.root, &value);
        if slot.is_some() {
            trace!("{} duplicate value", "Rejected".yellow());
            return false;
        }

        let id = self.idgen.generate();
        trace!("{} node {}", "Inserted".bright_green(), id);
        *slot = Some(Box::new(Node::new(id, value)));
        self.len += 1;
        true
    }

    /// Remove the node holding `value` and return the value.
    ///
    /// A node with two children is replaced by its in-order successor.
    /// Returns `None` if `value` is not present.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let slot = node::descend(&mut self.root, value);
        let mut removed = slot.take()?;
        *slot = node::unlink(&mut removed);
        self.len -= 1;

        trace!("{} node {}", "Removed".bright_red(), removed.id());
        Some((*removed).into_value())
    }

    /// Find the node holding `value`
    pub fn find(&self, value: &T) -> Option<&Node<T, G::Output>> {
        let mut current = self.root();
        while let Some(node) = current {
            current = match value.cmp(node.value()) {
                std::cmp::Ordering::Less => node.left(),
                std::cmp::Ordering::Greater => node.right(),
                std::cmp::Ordering::Equal => return Some(node),
            };
        }
        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Check that the in-order sequence is strictly increasing.
    ///
    /// Trees built through [`BinaryTree::insert`] always pass; shapes from the
    /// builder or a deserializer are checked with this before use.
    pub fn validate(&self) -> Result<()> {
        let mut previous: Option<&T> = None;

        for (position, value) in self.iter().enumerate() {
            if previous.is_some_and(|previous| previous >= value) {
                return Err(Error::Unordered { position });
            }
            previous = Some(value);
        }

        Ok(())
    }
}

impl<T, G> Drop for BinaryTree<T, G>
where
    G: UniqueGenerator,
{
    fn drop(&mut self) {
        node::release(self.root.take());
    }
}

impl<T, G> FromIterator<T> for BinaryTree<T, G>
where
    T: Ord,
    G: UniqueGenerator + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<T, G> Extend<T> for BinaryTree<T, G>
where
    T: Ord,
    G: UniqueGenerator,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T, G> IntoIterator for &'a BinaryTree<T, G>
where
    G: UniqueGenerator,
{
    type Item = &'a T;
    type IntoIter = Traverse<'a, T, G::Output>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, G> IntoIterator for BinaryTree<T, G>
where
    G: UniqueGenerator,
{
    type Item = T;
    type IntoIter = std::iter::Map<
        std::vec::IntoIter<Box<Node<T, G::Output>>>,
        fn(Box<Node<T, G::Output>>) -> T,
    >;

    /// Consume the tree, yielding values in ascending order
    fn into_iter(mut self) -> Self::IntoIter {
        let sorted = node::flatten(self.root.take(), self.len);
        let into_value: fn(Box<Node<T, G::Output>>) -> T = |node| (*node).into_value();
        sorted.into_iter().map(into_value)
    }
}
