use std::hash::{Hash, Hasher};

use wyhash::WyHash;

/// Seed of the partitioning hash.
///
/// Any fixed value works, but it must never vary inside a run: reduce
/// and join rely on every operator routing the same key to the same
/// partition, no matter which worker computes the hash.
const PARTITIONER_SEED: u64 = 0x5fbb_a3b4_9e1b_6a42;

/// Deterministic assignment of a key to one of `N` partitions.
///
/// Two partitioners with the same number of partitions are
/// interchangeable, which is what `PartialEq` captures: a collection
/// already produced by an equal partitioner does not need a shuffle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashPartitioner {
    num_partitions: usize,
}

impl HashPartitioner {
    pub fn new(num_partitions: usize) -> HashPartitioner {
        assert!(num_partitions > 0, "at least one partition is required");
        HashPartitioner { num_partitions }
    }

    pub fn num_partitions(&self) -> usize {
        self.num_partitions
    }

    /// The index of the partition `key` belongs to, in `[0, N)`.
    pub fn partition<K: Hash + ?Sized>(&self, key: &K) -> usize {
        let mut hasher = WyHash::with_seed(PARTITIONER_SEED);
        key.hash(&mut hasher);
        (hasher.finish() % self.num_partitions as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::HashPartitioner;

    #[test]
    fn deterministic_across_instances() {
        let a = HashPartitioner::new(8);
        let b = HashPartitioner::new(8);
        for i in 0..1000 {
            let key = format!("page-{i}");
            assert_eq!(a.partition(&key), b.partition(&key));
        }
    }

    #[test]
    fn index_in_range() {
        let partitioner = HashPartitioner::new(7);
        for i in 0..1000 {
            let index = partitioner.partition(&format!("page-{i}"));
            assert!(index < 7);
        }
    }

    #[test]
    fn keys_spread_over_partitions() {
        let partitioner = HashPartitioner::new(4);
        let mut counts = [0usize; 4];
        for i in 0..1000 {
            counts[partitioner.partition(&format!("page-{i}"))] += 1;
        }
        // a well distributing hash should not leave any partition empty
        // with 1000 keys over 4 partitions
        assert!(counts.iter().all(|&c| c > 0), "skewed: {counts:?}");
    }

    #[test]
    fn equal_when_same_partition_count() {
        assert_eq!(HashPartitioner::new(4), HashPartitioner::new(4));
        assert_ne!(HashPartitioner::new(4), HashPartitioner::new(8));
    }
}
