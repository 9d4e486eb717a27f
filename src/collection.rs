use crate::dataset::Dataset;
use crate::operator::{Data, DataKey, KeyValue};
use crate::partitioner::HashPartitioner;

/// A disjoint shard of a collection, the unit of parallel work and of
/// the shuffle exchange. Insertion order inside a partition carries no
/// meaning.
pub type Partition<K, V> = Vec<KeyValue<K, V>>;

/// An ordered list of partitions of key-value records.
///
/// When the collection was produced by a shuffle (or placed by key at
/// load time) it also remembers the partitioner that did it: every
/// record with the same key is then guaranteed to live in a single
/// partition, and downstream reduce/join skip the exchange. Operators
/// that may rewrite keys clear the mark.
#[derive(Debug, Clone)]
pub struct PartitionedCollection<K: DataKey, V: Data> {
    partitions: Vec<Partition<K, V>>,
    partitioner: Option<HashPartitioner>,
}

impl<K: DataKey, V: Data> PartitionedCollection<K, V> {
    /// Build a collection by assigning every record to the partition
    /// its key hashes to. The result is co-located by construction.
    pub fn from_records<I>(records: I, partitioner: HashPartitioner) -> Self
    where
        I: IntoIterator<Item = KeyValue<K, V>>,
    {
        let mut partitions = vec![Vec::new(); partitioner.num_partitions()];
        for (key, value) in records {
            partitions[partitioner.partition(&key)].push((key, value));
        }
        Self {
            partitions,
            partitioner: Some(partitioner),
        }
    }

    /// A collection whose keys are not known to be co-located.
    pub(crate) fn unpartitioned(partitions: Vec<Partition<K, V>>) -> Self {
        Self {
            partitions,
            partitioner: None,
        }
    }

    /// A collection whose keys are co-located under `partitioner`.
    pub(crate) fn partitioned(partitions: Vec<Partition<K, V>>, partitioner: HashPartitioner) -> Self {
        debug_assert_eq!(partitions.len(), partitioner.num_partitions());
        Self {
            partitions,
            partitioner: Some(partitioner),
        }
    }

    pub fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    /// Total number of records, over all partitions.
    pub fn len(&self) -> usize {
        self.partitions.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.iter().all(Vec::is_empty)
    }

    /// The partitioner that produced this collection, if any.
    pub fn partitioner(&self) -> Option<&HashPartitioner> {
        self.partitioner.as_ref()
    }

    pub fn partitions(&self) -> &[Partition<K, V>] {
        &self.partitions
    }

    pub(crate) fn into_partitions(self) -> Vec<Partition<K, V>> {
        self.partitions
    }

    /// Iterate over every record, partition by partition.
    pub fn iter(&self) -> impl Iterator<Item = &KeyValue<K, V>> {
        self.partitions.iter().flatten()
    }

    /// Flatten the collection into a single vector of records.
    pub fn into_records(self) -> Vec<KeyValue<K, V>> {
        self.partitions.into_iter().flatten().collect()
    }

    /// Start a new lazy dataflow from a snapshot of this collection.
    ///
    /// The data is cloned so that the same materialized collection can
    /// seed more than one dataflow, which is exactly what the rank
    /// iteration does every round (neighbor snapshot + contributions
    /// from the same round input).
    pub fn dataset(&self) -> Dataset<K, V> {
        Dataset::from_collection(self.clone())
    }
}
