use std::{collections::VecDeque, ops::Deref};

use crate::{node::Node, UniqueId};

pub type NodeDepth = usize;

/// Visiting order of a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Node, then left subtree, then right subtree
    PreOrder,
    /// Left subtree, then node, then right subtree
    #[default]
    InOrder,
    /// Left subtree, then right subtree, then node
    PostOrder,
    /// Breadth first, left to right within a depth
    LevelOrder,
}

/// A node yielded from a traversal, along with its depth below the root
pub struct IterNode<'iter, T, Id>
where
    Id: UniqueId,
{
    depth: NodeDepth,
    node: &'iter Node<T, Id>,
}

impl<'iter, T, Id> IterNode<'iter, T, Id>
where
    Id: UniqueId,
{
    pub fn depth(&self) -> NodeDepth {
        self.depth
    }

    pub fn node(&self) -> &'iter Node<T, Id> {
        self.node
    }
}

impl<'iter, T, Id> Deref for IterNode<'iter, T, Id>
where
    Id: UniqueId,
{
    type Target = Node<T, Id>;

    fn deref(&self) -> &Self::Target {
        self.node
    }
}

struct Frame<'iter, T, Id>
where
    Id: UniqueId,
{
    depth: NodeDepth,
    node: &'iter Node<T, Id>,
    // Post-order: children have already been scheduled
    expanded: bool,
}

/// Lazy traversal over the nodes of a tree.
///
/// Holds only a frontier of pending nodes, so memory is bounded by tree
/// height (or width for level order).
pub struct NodeIter<'iter, T, Id>
where
    Id: UniqueId,
{
    order: Order,
    pending: VecDeque<Frame<'iter, T, Id>>,
    // In-order: next subtree whose left spine has not been pushed yet
    cursor: Option<(NodeDepth, &'iter Node<T, Id>)>,
}

impl<'iter, T, Id> NodeIter<'iter, T, Id>
where
    Id: UniqueId,
{
    pub(crate) fn new(root: Option<&'iter Node<T, Id>>, order: Order) -> Self {
        let mut iter = Self {
            order,
            pending: VecDeque::new(),
            cursor: None,
        };

        if let Some(root) = root {
            match order {
                Order::InOrder => iter.cursor = Some((0, root)),
                _ => iter.push(0, root),
            }
        }

        iter
    }

    fn push(&mut self, depth: NodeDepth, node: &'iter Node<T, Id>) {
        self.pending.push_back(Frame {
            depth,
            node,
            expanded: false,
        });
    }

    fn next_pre_order(&mut self) -> Option<IterNode<'iter, T, Id>> {
        let Frame { depth, node, .. } = self.pending.pop_back()?;

        // Right goes on first so left is popped first
        if let Some(right) = node.right() {
            self.push(depth + 1, right);
        }
        if let Some(left) = node.left() {
            self.push(depth + 1, left);
        }

        Some(IterNode { depth, node })
    }

    fn next_in_order(&mut self) -> Option<IterNode<'iter, T, Id>> {
        while let Some((depth, node)) = self.cursor.take() {
            self.push(depth, node);
            self.cursor = node.left().map(|left| (depth + 1, left));
        }

        let Frame { depth, node, .. } = self.pending.pop_back()?;
        self.cursor = node.right().map(|right| (depth + 1, right));

        Some(IterNode { depth, node })
    }

    fn next_post_order(&mut self) -> Option<IterNode<'iter, T, Id>> {
        loop {
            let mut frame = self.pending.pop_back()?;

            if frame.expanded {
                return Some(IterNode {
                    depth: frame.depth,
                    node: frame.node,
                });
            }

            let (depth, node) = (frame.depth, frame.node);
            frame.expanded = true;
            self.pending.push_back(frame);

            if let Some(right) = node.right() {
                self.push(depth + 1, right);
            }
            if let Some(left) = node.left() {
                self.push(depth + 1, left);
            }
        }
    }

    fn next_level_order(&mut self) -> Option<IterNode<'iter, T, Id>> {
        let Frame { depth, node, .. } = self.pending.pop_front()?;

        if let Some(left) = node.left() {
            self.push(depth + 1, left);
        }
        if let Some(right) = node.right() {
            self.push(depth + 1, right);
        }

        Some(IterNode { depth, node })
    }
}

impl<'iter, T, Id> Iterator for NodeIter<'iter, T, Id>
where
    Id: UniqueId,
{
    type Item = IterNode<'iter, T, Id>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.order {
            Order::PreOrder => self.next_pre_order(),
            Order::InOrder => self.next_in_order(),
            Order::PostOrder => self.next_post_order(),
            Order::LevelOrder => self.next_level_order(),
        }
    }
}

/// Lazy traversal over the values of a tree
pub struct Traverse<'iter, T, Id>
where
    Id: UniqueId,
{
    nodes: NodeIter<'iter, T, Id>,
}

impl<'iter, T, Id> Traverse<'iter, T, Id>
where
    Id: UniqueId,
{
    pub(crate) fn new(nodes: NodeIter<'iter, T, Id>) -> Self {
        Self { nodes }
    }
}

impl<'iter, T, Id> Iterator for Traverse<'iter, T, Id>
where
    Id: UniqueId,
{
    type Item = &'iter T;

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|node| node.node().value())
    }
}
