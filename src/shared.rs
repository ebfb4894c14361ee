//! A tree behind a reader-writer lock, for sharing between threads.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::Serialize;

use crate::{error::Result, BinaryTree, IdGenerator, UniqueGenerator};

/// Cloneable handle to a [`BinaryTree`] guarded by a single lock.
///
/// Lookups take the lock shared, mutations take it exclusively. Each method
/// holds the lock for one operation only; use [`SharedTree::write`] to make
/// several changes atomically.
#[derive(Debug)]
pub struct SharedTree<T, G = IdGenerator>
where
    G: UniqueGenerator,
{
    inner: Arc<RwLock<BinaryTree<T, G>>>,
}

impl<T, G> Clone for SharedTree<T, G>
where
    G: UniqueGenerator,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> SharedTree<T> {
    pub fn new() -> Self {
        Self::from_tree(BinaryTree::new())
    }
}

impl<T, G> Default for SharedTree<T, G>
where
    G: UniqueGenerator + Default,
{
    fn default() -> Self {
        Self::from_tree(BinaryTree::default())
    }
}

impl<T, G> From<BinaryTree<T, G>> for SharedTree<T, G>
where
    G: UniqueGenerator,
{
    fn from(tree: BinaryTree<T, G>) -> Self {
        Self::from_tree(tree)
    }
}

impl<T, G> SharedTree<T, G>
where
    G: UniqueGenerator,
{
    pub fn from_tree(tree: BinaryTree<T, G>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    /// Lock the tree for reading
    pub fn read(&self) -> RwLockReadGuard<'_, BinaryTree<T, G>> {
        self.inner.read()
    }

    /// Lock the tree for writing
    pub fn write(&self) -> RwLockWriteGuard<'_, BinaryTree<T, G>> {
        self.inner.write()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl<T, G> SharedTree<T, G>
where
    T: Ord,
    G: UniqueGenerator,
{
    /// See [`BinaryTree::insert`]
    pub fn insert(&self, value: T) -> bool {
        self.inner.write().insert(value)
    }

    /// See [`BinaryTree::remove`]
    pub fn remove(&self, value: &T) -> Option<T> {
        self.inner.write().remove(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.inner.read().contains(value)
    }
}

impl<T, G> SharedTree<T, G>
where
    T: Serialize,
    G: UniqueGenerator,
{
    /// Serialize a consistent snapshot of the tree
    pub fn to_yaml(&self) -> Result<String> {
        self.inner.read().to_yaml()
    }
}
