use std::cmp::Ordering;

use crate::UniqueId;

/// An owned child slot. `None` is an empty slot.
pub(crate) type Link<T, Id> = Option<Box<Node<T, Id>>>;

/// A single element of a [`crate::BinaryTree`].
///
/// Each node exclusively owns its children. Nodes are only handed out by
/// shared reference; structural changes go through the tree.
#[derive(Debug)]
pub struct Node<T, Id = crate::NodeId>
where
    Id: UniqueId,
{
    id: Id,
    value: T,
    pub(crate) left: Link<T, Id>,
    pub(crate) right: Link<T, Id>,
}

impl<T, Id> Node<T, Id>
where
    Id: UniqueId,
{
    pub(crate) fn new(id: Id, value: T) -> Self {
        Self {
            id,
            value,
            left: None,
            right: None,
        }
    }

    pub fn id(&self) -> Id {
        self.id.clone()
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Return the number of child nodes for this node
    pub fn num_children(&self) -> usize {
        self.left.is_some() as usize + self.right.is_some() as usize
    }

    pub(crate) fn into_value(self) -> T {
        self.value
    }
}

/// Walk down from `link` following BST comparisons and return the slot that
/// either holds `value` or is the empty slot where it would be placed.
pub(crate) fn descend<'a, T, Id>(mut link: &'a mut Link<T, Id>, value: &T) -> &'a mut Link<T, Id>
where
    T: Ord,
    Id: UniqueId,
{
    loop {
        let ordering = match link.as_deref() {
            Some(node) => value.cmp(&node.value),
            None => return link,
        };

        if ordering == Ordering::Equal {
            return link;
        }

        match link {
            Some(node) => {
                link = if ordering == Ordering::Less {
                    &mut node.left
                } else {
                    &mut node.right
                }
            }
            None => return link,
        }
    }
}

/// Detach the minimum node below `link`. Its right subtree takes its place.
pub(crate) fn take_min<T, Id>(mut link: &mut Link<T, Id>) -> Link<T, Id>
where
    Id: UniqueId,
{
    while link.as_ref().is_some_and(|node| node.left.is_some()) {
        link = &mut link.as_mut()?.left;
    }

    let mut min = link.take()?;
    *link = min.right.take();
    Some(min)
}

/// Take the children off `node` and return the subtree that replaces it.
///
/// With two children the in-order successor is promoted and adopts both
/// remaining subtrees.
pub(crate) fn unlink<T, Id>(node: &mut Node<T, Id>) -> Link<T, Id>
where
    Id: UniqueId,
{
    match (node.left.take(), node.right.take()) {
        (left, None) => left,
        (None, right) => right,
        (Some(left), right) => {
            let mut right = right;
            match take_min(&mut right) {
                Some(mut successor) => {
                    successor.left = Some(left);
                    successor.right = right;
                    Some(successor)
                }
                None => Some(left),
            }
        }
    }
}

/// Drain a subtree without recursing, so list-shaped trees can be dropped
/// at any height.
pub(crate) fn release<T, Id>(link: Link<T, Id>)
where
    Id: UniqueId,
{
    let mut stack: Vec<Box<Node<T, Id>>> = link.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

/// Detach every node below `link` in ascending order, with children cleared.
pub(crate) fn flatten<T, Id>(link: Link<T, Id>, capacity: usize) -> Vec<Box<Node<T, Id>>>
where
    Id: UniqueId,
{
    let mut sorted = Vec::with_capacity(capacity);
    let mut stack = Vec::new();
    let mut current = link;

    loop {
        while let Some(mut node) = current {
            current = node.left.take();
            stack.push(node);
        }

        match stack.pop() {
            Some(mut node) => {
                current = node.right.take();
                sorted.push(node);
            }
            None => break,
        }
    }

    sorted
}

/// Link sorted, childless nodes into a height-balanced subtree.
pub(crate) fn build_balanced<T, Id>(slots: &mut [Option<Box<Node<T, Id>>>]) -> Link<T, Id>
where
    Id: UniqueId,
{
    if slots.is_empty() {
        return None;
    }

    let mid = slots.len() / 2;
    let (left, rest) = slots.split_at_mut(mid);
    let (pivot, right) = rest.split_first_mut()?;

    let mut node = pivot.take()?;
    node.left = build_balanced(left);
    node.right = build_balanced(right);
    Some(node)
}
