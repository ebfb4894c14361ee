//! Error types for tree construction and serialization

use std::path::PathBuf;

use thiserror::Error;

/// Which child slot of a node (or the root slot) an operation targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Root,
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Root => f.write_str("root"),
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Errors raised by the tree store.
///
/// A missing value is not an error: lookups and removals return `Option`.
#[derive(Error, Debug)]
pub enum Error {
    /// Text could not be parsed into a tree, or a tree could not be written out
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// The in-order sequence is not strictly increasing at `position`
    #[error("tree is not ordered: in-order position {position} does not exceed its predecessor")]
    Unordered { position: usize },

    /// A builder tried to fill a slot that already holds a node
    #[error("{side} slot is already occupied")]
    SlotOccupied { side: Side },

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for tree operations
pub type Result<T, E = Error> = std::result::Result<T, E>;
