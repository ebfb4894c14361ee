use std::hash::{Hash, Hasher};

use xxhash_rust::xxh64::Xxh64;

use crate::{iterator::Order, BinaryTree, UniqueGenerator};

// Marks written for each child slot, so that shape feeds into the hash
const ABSENT: u8 = 0;
const PRESENT: u8 = 1;

impl<T, G> BinaryTree<T, G>
where
    T: Hash,
    G: UniqueGenerator,
{
    /// Feed shape and values into `state` in pre-order.
    ///
    /// Every node contributes its value and one mark per child slot. Ids are
    /// not hashed, so structurally equal trees hash equally.
    fn hash_structure<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());

        for node in self.nodes(Order::PreOrder) {
            node.value().hash(state);
            for child in [node.left(), node.right()] {
                state.write_u8(if child.is_some() { PRESENT } else { ABSENT });
            }
        }
    }

    /// Compute a 64 bit fingerprint of the tree's shape and values
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh64::new(0);
        self.hash_structure(&mut hasher);
        hasher.finish()
    }
}

impl<T, G> Hash for BinaryTree<T, G>
where
    T: Hash,
    G: UniqueGenerator,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_structure(state)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::test::sample_tree;

    #[test]
    fn test_fingerprint_stable() {
        let a = sample_tree(&[5, 3, 8, 1]);
        let b = sample_tree(&[5, 8, 3, 1]);
        assert_eq!(a.fingerprint(), b.fingerprint());
        println!("fingerprint 0x{:X}", a.fingerprint());
    }

    #[test]
    fn test_fingerprint_shape_sensitive() {
        let right_leaning = sample_tree(&[1, 2]);
        let mut left_leaning = sample_tree(&[2, 1]);
        assert_ne!(right_leaning.fingerprint(), left_leaning.fingerprint());

        left_leaning.insert(3);
        assert_ne!(sample_tree(&[2, 1]).fingerprint(), left_leaning.fingerprint());
    }

    #[test]
    fn test_hash_set_dedup() {
        let mut set = HashSet::new();
        set.insert(sample_tree(&[2, 1, 3]));
        set.insert(sample_tree(&[2, 3, 1]));
        set.insert(sample_tree(&[1, 2, 3]));
        assert_eq!(set.len(), 2);
    }
}
