use crate::{BinaryTree, UniqueGenerator};

/// Tree Comparison
///
/// Two trees are equal when they have the same shape and the same value at
/// every position. Node ids are not compared.
impl<T, G> PartialEq for BinaryTree<T, G>
where
    T: PartialEq,
    G: UniqueGenerator,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        // Stack of node pairs at matching positions
        let mut pending = Vec::from([(self.root(), other.root())]);

        while let Some(pair) = pending.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    if a.value() != b.value() {
                        return false;
                    }
                    pending.push((a.right(), b.right()));
                    pending.push((a.left(), b.left()));
                }
                _ => return false,
            }
        }

        true
    }
}

impl<T, G> Eq for BinaryTree<T, G>
where
    T: Eq,
    G: UniqueGenerator,
{
}
