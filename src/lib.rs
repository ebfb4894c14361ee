//! # binarytree
//!
//! A binary search tree with YAML integration.
//!
//! ## Overview
//!
//! [`BinaryTree`] keeps unique, ordered values and supports insertion,
//! removal, lookup and lazy traversal in pre-, in-, post- and level order.
//! Trees round-trip through YAML with [`BinaryTree::to_yaml`] and
//! [`BinaryTree::from_yaml`], or through any other serde format. Explicit
//! shapes can be assembled with [`TreeBuilder`], and [`SharedTree`] wraps a
//! tree in a lock for use from several threads.
//!
//! ```
//! use binarytree::{BinaryTree, Order};
//!
//! let mut tree = BinaryTree::new();
//! for value in [5, 3, 8] {
//!     tree.insert(value);
//! }
//!
//! let yaml = tree.to_yaml()?;
//! let reloaded = BinaryTree::<i32>::from_yaml(&yaml)?;
//! assert_eq!(reloaded, tree);
//! assert_eq!(reloaded.traverse(Order::InOrder).copied().collect::<Vec<_>>(), vec![3, 5, 8]);
//! # Ok::<(), binarytree::Error>(())
//! ```

mod builder;
mod compare;
mod display;
mod error;
mod hash;
mod id;
mod iterator;
mod shared;
mod tree;
mod yaml;

pub mod node;


pub use builder::*;
pub use error::{Error, Result, Side};
pub use id::*;
pub use iterator::{IterNode, NodeDepth, NodeIter, Order, Traverse};
pub use shared::SharedTree;
pub use tree::BinaryTree;
pub use yaml::MAX_DEPTH;

pub use node::Node;

pub type IdGenerator = id::AtomicU64Generator;
pub type NodeId = <IdGenerator as UniqueGenerator>::Output;
