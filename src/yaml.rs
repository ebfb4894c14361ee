//! Serde support and YAML persistence.
//!
//! A node serializes as a mapping with a `value` key and optional `left` and
//! `right` keys holding child mappings. An empty tree serializes as `null`.
//!
//! ```yaml
//! value: 5
//! left:
//!   value: 3
//! right:
//!   value: 8
//! ```
//!
//! Node ids are not part of the document; a deserialized tree draws fresh
//! ids from its generator.

use std::path::Path;

use colored::Colorize;
use serde::{
    de::Error as _,
    ser::{Error as _, SerializeStruct},
    Deserialize, Deserializer, Serialize, Serializer,
};
use tracing::debug;

use crate::{
    builder::{NodeBuilder, TreeBuilder},
    error::{Error, Result},
    node::Node,
    BinaryTree, UniqueGenerator, UniqueId,
};

/// Deepest tree, in levels, that is written to or read from a document.
///
/// Serializing a taller tree fails with [`Error::Serialization`] before any
/// output is produced by [`BinaryTree::to_yaml`] or [`BinaryTree::save`], so
/// every document written here can be read back. A tall tree can be brought
/// under the limit with [`BinaryTree::rebalance`].
pub const MAX_DEPTH: usize = 100;

fn too_deep() -> String {
    format!("tree is deeper than {MAX_DEPTH} levels")
}

/// A node serialized `level` levels below where serialization started
struct Subtree<'a, T, Id>
where
    Id: UniqueId,
{
    node: &'a Node<T, Id>,
    level: usize,
}

impl<T, Id> Subtree<'_, T, Id>
where
    Id: UniqueId,
{
    fn child<'a>(&self, node: &'a Node<T, Id>) -> Subtree<'a, T, Id> {
        Subtree {
            node,
            level: self.level + 1,
        }
    }
}

impl<T, Id> Serialize for Subtree<'_, T, Id>
where
    T: Serialize,
    Id: UniqueId,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.level > MAX_DEPTH {
            return Err(S::Error::custom(too_deep()));
        }

        let node = self.node;
        let mut state = serializer.serialize_struct("Node", 1 + node.num_children())?;
        state.serialize_field("value", node.value())?;

        match node.left() {
            Some(left) => state.serialize_field("left", &self.child(left))?,
            None => state.skip_field("left")?,
        }
        match node.right() {
            Some(right) => state.serialize_field("right", &self.child(right))?,
            None => state.skip_field("right")?,
        }

        state.end()
    }
}

impl<T, Id> Serialize for Node<T, Id>
where
    T: Serialize,
    Id: UniqueId,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Subtree {
            node: self,
            level: 1,
        }
        .serialize(serializer)
    }
}

impl<T, G> Serialize for BinaryTree<T, G>
where
    T: Serialize,
    G: UniqueGenerator,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root().serialize(serializer)
    }
}

/// Owned form of a node as it appears in a document
#[derive(Deserialize)]
#[serde(rename = "Node", deny_unknown_fields)]
struct NodeDoc<T> {
    value: T,
    left: Option<Box<NodeDoc<T>>>,
    right: Option<Box<NodeDoc<T>>>,
}

fn grow<T, G>(
    builder: &mut NodeBuilder<'_, T, Error, G>,
    left: Option<Box<NodeDoc<T>>>,
    right: Option<Box<NodeDoc<T>>>,
) -> Result<()>
where
    G: UniqueGenerator,
{
    if let Some(left) = left {
        let NodeDoc { value, left, right } = *left;
        builder.left(value, |child| grow(child, left, right))?;
    }
    if let Some(right) = right {
        let NodeDoc { value, left, right } = *right;
        builder.right(value, |child| grow(child, left, right))?;
    }
    Ok(())
}

impl<'de, T, G> Deserialize<'de> for BinaryTree<T, G>
where
    T: Deserialize<'de> + Ord,
    G: UniqueGenerator + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let doc: Option<NodeDoc<T>> = Option::deserialize(deserializer)?;

        let builder = TreeBuilder::<T, Error, G>::new();
        let builder = match doc {
            Some(NodeDoc { value, left, right }) => builder
                .root(value, |root| grow(root, left, right))
                .map_err(D::Error::custom)?,
            None => builder,
        };

        let tree = builder.done().map_err(D::Error::custom)?;
        if tree.height() > MAX_DEPTH {
            return Err(D::Error::custom(too_deep()));
        }
        Ok(tree)
    }
}

impl<T, G> BinaryTree<T, G>
where
    T: Serialize,
    G: UniqueGenerator,
{
    /// Serialize the tree to a YAML document.
    ///
    /// Fails with [`Error::Serialization`] if the tree is deeper than
    /// [`MAX_DEPTH`].
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the tree to `path` as YAML, replacing any existing file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_yaml()?;

        std::fs::write(path, text).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("{} {} nodes to {}", "Saved".bright_green(), self.len(), path.display());
        Ok(())
    }
}

impl<T, G> BinaryTree<T, G>
where
    T: for<'de> Deserialize<'de> + Ord,
    G: UniqueGenerator + Default,
{
    /// Parse a tree from a YAML document.
    ///
    /// Malformed text, unknown keys, shapes that break the ordering invariant
    /// and trees deeper than [`MAX_DEPTH`] all fail with
    /// [`Error::Serialization`]. No partial tree is returned.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let tree: Self = serde_yaml::from_str(text)?;
        debug!("{} tree of {} nodes", "Parsed".bright_green(), tree.len());
        Ok(tree)
    }

    /// Read a tree previously written with [`BinaryTree::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let tree = Self::from_yaml(&text)?;
        debug!("{} {} nodes from {}", "Loaded".bright_green(), tree.len(), path.display());
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use crate::{test::sample_tree, BinaryTree, Error, Order, TreeBuilder};

    use super::MAX_DEPTH;

    /// A document whose nodes each hold one right child, `levels` deep
    fn right_chain(levels: usize) -> String {
        let mut yaml = String::new();
        for level in 0..levels {
            if level > 0 {
                yaml.push_str(&"  ".repeat(level - 1));
                yaml.push_str("right:\n");
            }
            yaml.push_str(&"  ".repeat(level));
            yaml.push_str(&format!("value: {level}\n"));
        }
        yaml
    }

    #[test]
    fn test_to_yaml_shape() {
        let tree = sample_tree(&[5, 3, 8]);
        let yaml = tree.to_yaml().unwrap();
        assert_eq!(
            yaml,
            "value: 5\nleft:\n  value: 3\nright:\n  value: 8\n"
        );
    }

    #[test]
    fn test_empty_tree_is_null() {
        let tree: BinaryTree<i32> = BinaryTree::new();
        assert_eq!(tree.to_yaml().unwrap().trim(), "null");

        let parsed = BinaryTree::<i32>::from_yaml("null").unwrap();
        assert!(parsed.is_empty());
        let parsed = BinaryTree::<i32>::from_yaml("~").unwrap();
        assert!(parsed.is_empty());
    }

    #[traced_test]
    #[test]
    fn test_round_trip() {
        let tree = sample_tree(&[50, 30, 70, 20, 40, 60, 80, 35, 65]);
        let reloaded = BinaryTree::<i32>::from_yaml(&tree.to_yaml().unwrap()).unwrap();

        assert_eq!(reloaded, tree);
        assert_eq!(reloaded.len(), tree.len());
        assert!(reloaded
            .traverse(Order::PreOrder)
            .eq(tree.traverse(Order::PreOrder)));
        assert!(logs_contain("Parsed"));
    }

    #[test]
    fn test_round_trip_keeps_unbalanced_shape() {
        // Same values, different shapes: each must come back as it was
        let chain = sample_tree(&[1, 2, 3]);
        let bushy = sample_tree(&[2, 1, 3]);

        let chain_back = BinaryTree::<i32>::from_yaml(&chain.to_yaml().unwrap()).unwrap();
        let bushy_back = BinaryTree::<i32>::from_yaml(&bushy.to_yaml().unwrap()).unwrap();

        assert_eq!(chain_back, chain);
        assert_eq!(bushy_back, bushy);
        assert_ne!(chain_back, bushy_back);
        assert_eq!(chain_back.height(), 3);
    }

    #[test]
    fn test_string_values() {
        let mut tree = BinaryTree::new();
        for word in ["pear", "apple", "quince", "fig: dried", "- dash"] {
            tree.insert(word.to_string());
        }

        let reloaded = BinaryTree::<String>::from_yaml(&tree.to_yaml().unwrap()).unwrap();
        assert_eq!(reloaded, tree);
        assert!(reloaded.contains(&"fig: dried".to_string()));
    }

    #[test]
    fn test_hand_written_document() {
        let yaml = "
value: 10
left:
  value: 4
  right:
    value: 7
right:
  value: 12
";
        let tree = BinaryTree::<i32>::from_yaml(yaml).unwrap();
        let values: Vec<i32> = tree.iter().copied().collect();
        assert_eq!(values, vec![4, 7, 10, 12]);
        assert_eq!(tree.len(), 4);

        // Explicit nulls are the same as absent children
        let tree = BinaryTree::<i32>::from_yaml("value: 1\nleft: null\nright: ~\n").unwrap();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_malformed_yaml() {
        let result = BinaryTree::<i32>::from_yaml("not: valid: yaml: [");
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_schema_violations() {
        for bad in [
            // missing value
            "left:\n  value: 1\n",
            // unknown key
            "value: 1\ncolor: red\n",
            // wrong value type
            "value: one\n",
            // sequence instead of mapping
            "- 1\n- 2\n",
        ] {
            let result = BinaryTree::<i32>::from_yaml(bad);
            assert!(
                matches!(result, Err(Error::Serialization(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_unordered_document_rejected() {
        let result = BinaryTree::<i32>::from_yaml("value: 5\nleft:\n  value: 9\n");
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.to_string().contains("not ordered"));

        // Duplicates break strict ordering too
        let result = BinaryTree::<i32>::from_yaml("value: 5\nright:\n  value: 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_tree_serializes() {
        let tree = TreeBuilder::<i32>::new()
            .root(2, |root| {
                root.left(1, |_| Ok(()))?;
                root.right(3, |_| Ok(()))
            })
            .unwrap()
            .done()
            .unwrap();

        assert_eq!(tree.to_yaml().unwrap(), sample_tree(&[2, 1, 3]).to_yaml().unwrap());
    }

    #[test]
    fn test_tall_tree_round_trip() {
        let tree: BinaryTree<i32> = (0..MAX_DEPTH as i32).collect();
        assert_eq!(tree.height(), MAX_DEPTH);

        let reloaded = BinaryTree::<i32>::from_yaml(&tree.to_yaml().unwrap()).unwrap();
        assert_eq!(reloaded, tree);
        assert_eq!(reloaded.height(), MAX_DEPTH);

        let parsed = BinaryTree::<i32>::from_yaml(&right_chain(MAX_DEPTH)).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_too_deep_to_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep.yaml");

        let mut tree: BinaryTree<i32> = (0..5000).collect();
        assert_eq!(tree.height(), 5000);

        let err = tree.to_yaml().unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.to_string().contains("deeper than"));

        // One level over the limit is enough
        let just_over: BinaryTree<i32> = (0..=MAX_DEPTH as i32).collect();
        assert!(matches!(just_over.to_yaml(), Err(Error::Serialization(_))));

        // Nothing unreadable reaches the disk
        assert!(matches!(tree.save(&path), Err(Error::Serialization(_))));
        assert!(!path.exists());

        tree.rebalance();
        tree.save(&path).unwrap();
        let loaded = BinaryTree::<i32>::load(&path).unwrap();
        assert_eq!(loaded, tree);
        assert!(loaded.iter().copied().eq(0..5000));
    }

    #[test]
    fn test_too_deep_document_rejected() {
        let err = BinaryTree::<i32>::from_yaml(&right_chain(MAX_DEPTH + 1)).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.to_string().contains("deeper than"));

        // Past the parser's own nesting limit
        let result = BinaryTree::<i32>::from_yaml(&right_chain(1000));
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[traced_test]
    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.yaml");

        let tree = sample_tree(&[5, 3, 8]);
        tree.save(&path).unwrap();

        let loaded = BinaryTree::<i32>::load(&path).unwrap();
        assert_eq!(loaded, tree);
        assert_eq!(loaded.iter().copied().collect::<Vec<_>>(), vec![3, 5, 8]);
        assert!(logs_contain("Loaded"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        match BinaryTree::<i32>::load(&path) {
            Err(Error::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
