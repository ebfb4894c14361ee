use std::sync::atomic::AtomicU64;

/// Bounds required of a node id
pub trait UniqueId:
    Clone + Eq + std::hash::Hash + std::fmt::Debug + std::fmt::Display + 'static
{
}

impl<T> UniqueId for T where
    T: Clone + Eq + std::hash::Hash + std::fmt::Debug + std::fmt::Display + 'static
{
}

pub trait UniqueGenerator: std::fmt::Debug {
    type Output: UniqueId;
    /// Generate a unique value
    fn generate(&mut self) -> Self::Output;
}

/// Sequential ids, unique within a single tree
#[derive(Default, Debug)]
pub struct AtomicU64Generator {
    next_id: AtomicU64,
}

impl UniqueGenerator for AtomicU64Generator {
    type Output = u64;

    fn generate(&mut self) -> u64 {
        self.next_id
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed)
    }
}

/// Random v4 UUIDs, for ids that must not collide across trees
#[derive(Default, Debug)]
pub struct UuidGenerator;

impl UniqueGenerator for UuidGenerator {
    type Output = uuid::Uuid;

    fn generate(&mut self) -> uuid::Uuid {
        uuid::Uuid::new_v4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_sequence() {
        let mut gen = AtomicU64Generator::default();
        assert_eq!(gen.generate(), 0);
        assert_eq!(gen.generate(), 1);
        assert_eq!(gen.generate(), 2);
    }

    #[test]
    fn test_uuid_distinct() {
        let mut gen = UuidGenerator;
        assert_ne!(gen.generate(), gen.generate());
    }
}
