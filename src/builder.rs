//! Builders for constructing a tree with an explicit shape.
//!
//! The `TreeBuilder` and `NodeBuilder` types place every node by hand,
//! left or right, instead of by comparison. The finished shape is checked
//! against the ordering invariant in [`TreeBuilder::done`].
//!

use std::marker::PhantomData;

use tracing::{debug, debug_span};

use crate::{
    error::{Error, Side},
    iterator::NodeDepth,
    node::{Link, Node},
    BinaryTree, UniqueGenerator,
};

/// A builder for attaching children to a node.
///
/// Handed to the closures passed to [`TreeBuilder::root`],
/// [`NodeBuilder::left`] and [`NodeBuilder::right`].
pub struct NodeBuilder<'a, T, E = Error, G = crate::IdGenerator>
where
    G: UniqueGenerator,
{
    node: &'a mut Node<T, G::Output>,
    idgen: &'a mut G,
    // Nodes created so far by the whole build
    len: &'a mut usize,
    depth: NodeDepth,
    _phantom: PhantomData<E>,
}

impl<'a, T, E, G> NodeBuilder<'a, T, E, G>
where
    G: UniqueGenerator,
    E: From<Error>,
{
    /// Set the left child of the current node.
    ///
    /// # Arguments
    ///
    /// * `value`: The value of the new child.
    /// * `f`: A closure that takes the child's builder and adds its own children.
    pub fn left<F>(&mut self, value: T, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut NodeBuilder<'_, T, E, G>) -> Result<(), E>,
    {
        self.child(Side::Left, value, f)
    }

    /// Set the right child of the current node.
    ///
    /// See [`NodeBuilder::left`].
    pub fn right<F>(&mut self, value: T, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut NodeBuilder<'_, T, E, G>) -> Result<(), E>,
    {
        self.child(Side::Right, value, f)
    }

    fn child<F>(&mut self, side: Side, value: T, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut NodeBuilder<'_, T, E, G>) -> Result<(), E>,
    {
        let occupied = match side {
            Side::Left => self.node.left.is_some(),
            _ => self.node.right.is_some(),
        };
        if occupied {
            return Err(Error::SlotOccupied { side }.into());
        }

        let id = self.idgen.generate();
        debug!("Adding {} child {} at depth {}", side, id, self.depth + 1);

        let mut child = Box::new(Node::new(id, value));
        let mut child_builder = NodeBuilder::<T, E, G> {
            node: &mut *child,
            idgen: &mut *self.idgen,
            len: &mut *self.len,
            depth: self.depth + 1,
            _phantom: PhantomData,
        };

        // Call the supplied closure with the NodeBuilder to add this node's children
        f(&mut child_builder)?;

        *self.len += 1;
        match side {
            Side::Left => self.node.left = Some(child),
            _ => self.node.right = Some(child),
        }

        Ok(())
    }

    pub fn value(&self) -> &T {
        self.node.value()
    }

    pub fn depth(&self) -> NodeDepth {
        self.depth
    }
}

/// A builder for constructing trees.
///
/// There is a `root` method on the builder to add the root node, which calls
/// the provided closure with a NodeBuilder that can be used to recursively build children of
/// the node. The closures expect a Result<(), E> to be returned, where E is your defined error
/// type. This allows errors within your closures to propagate. `E` must be
/// convertible from this crate's [`Error`] so that builder failures can be
/// returned through it as well.
///
/// # Examples
///
/// ```
/// use binarytree::{Error, TreeBuilder};
///
/// let tree = TreeBuilder::<i32, Error>::new()
///     .root(5, |root| {
///         root.left(3, |three| three.right(4, |_| Ok(())))?;
///         root.right(8, |_| Ok(()))
///     })?
///     .done()?;
///
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5, 8]);
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug)]
pub struct TreeBuilder<T, E = Error, G = crate::IdGenerator>
where
    G: UniqueGenerator,
{
    idgen: G,
    root: Link<T, G::Output>,
    len: usize,
    debug_span: tracing::Span,
    _phantom: PhantomData<E>,
}

impl<T, E, G> TreeBuilder<T, E, G>
where
    G: UniqueGenerator + Default,
    E: From<Error>,
{
    /// Creates a new `TreeBuilder` instance.
    pub fn new() -> Self {
        Self::with_generator(G::default())
    }
}

impl<T, E, G> TreeBuilder<T, E, G>
where
    G: UniqueGenerator,
    E: From<Error>,
{
    /// Creates a builder whose nodes draw ids from `idgen`
    pub fn with_generator(idgen: G) -> Self {
        let debug_span = debug_span!("TreeBuilder");
        debug_span.in_scope(|| debug!("Created new TreeBuilder"));

        Self {
            idgen,
            root: None,
            len: 0,
            debug_span,
            _phantom: PhantomData,
        }
    }

    /// Adds a root node to the tree and returns the updated builder.
    ///
    /// # Arguments
    ///
    /// * `value`: The value of the root node.
    /// * `f`: A closure that takes the root builder and adds its own children.
    pub fn root<F>(mut self, value: T, f: F) -> Result<Self, E>
    where
        F: FnOnce(&mut NodeBuilder<'_, T, E, G>) -> Result<(), E>,
    {
        if self.root.is_some() {
            return Err(Error::SlotOccupied { side: Side::Root }.into());
        }

        let span = self.debug_span.clone();
        let _enter = span.enter();

        let id = self.idgen.generate();
        let mut root = Box::new(Node::new(id, value));

        let mut node_builder = NodeBuilder::<T, E, G> {
            node: &mut *root,
            idgen: &mut self.idgen,
            len: &mut self.len,
            depth: 0,
            _phantom: PhantomData,
        };

        // Call the supplied closure with the NodeBuilder to add this node's children
        f(&mut node_builder)?;

        debug!("Added root");
        self.len += 1;
        self.root = Some(root);

        Ok(self)
    }
}

impl<T, E, G> TreeBuilder<T, E, G>
where
    T: Ord,
    G: UniqueGenerator,
    E: From<Error>,
{
    /// Returns the constructed tree when finished building it.
    ///
    /// Fails with [`Error::Unordered`] if the shape breaks the search tree
    /// ordering. A builder without a root yields an empty tree.
    pub fn done(self) -> Result<BinaryTree<T, G>, E> {
        let _enter = self.debug_span.enter();
        let tree = BinaryTree::from_parts(self.root, self.len, self.idgen);
        tree.validate()?;

        debug!("Finished building tree of {} nodes", tree.len());
        Ok(tree)
    }
}
