//! All-to-all redistribution of records by key.
//!
//! Reduce and join require every record of a key to be local to one
//! partition; this module provides the exchange that makes it so. One
//! channel per output partition, one sender thread per input
//! partition: any partition may send to any other, and the exchange
//! completes in full before the caller sees the result.

use std::thread;

use crate::collection::{Partition, PartitionedCollection};
use crate::operator::{Data, DataKey};
use crate::partitioner::HashPartitioner;

/// Make `collection` co-located under `partitioner`.
///
/// When the collection was already produced by an equal partitioner
/// this is a no-op, which is what lets reduce-after-reduce or
/// join-after-reduce pipelines skip redundant exchanges.
pub(crate) fn co_locate<K: DataKey, V: Data>(
    collection: PartitionedCollection<K, V>,
    partitioner: &HashPartitioner,
) -> PartitionedCollection<K, V> {
    if collection.partitioner() == Some(partitioner) {
        return collection;
    }
    let partitions = exchange(collection.into_partitions(), partitioner);
    PartitionedCollection::partitioned(partitions, partitioner.clone())
}

fn exchange<K: DataKey, V: Data>(
    partitions: Vec<Partition<K, V>>,
    partitioner: &HashPartitioner,
) -> Vec<Partition<K, V>> {
    debug!(
        "exchanging {} partitions into {}",
        partitions.len(),
        partitioner.num_partitions()
    );
    let (senders, receivers): (Vec<_>, Vec<_>) = (0..partitioner.num_partitions())
        .map(|_| flume::unbounded())
        .unzip();

    thread::scope(|scope| {
        for (index, partition) in partitions.into_iter().enumerate() {
            let senders = senders.clone();
            let partitioner = partitioner.clone();
            thread::Builder::new()
                .name(format!("rankflow-shuffle-{index}"))
                .spawn_scoped(scope, move || {
                    for (key, value) in partition {
                        let target = partitioner.partition(&key);
                        // the receivers outlive every sender clone
                        senders[target]
                            .send((key, value))
                            .expect("shuffle receiver hung up");
                    }
                })
                .expect("failed to spawn shuffle thread");
        }
        drop(senders);

        // each receiver drains until all input partitions have
        // finished emitting: this is the shuffle barrier
        receivers
            .into_iter()
            .map(|receiver| receiver.into_iter().collect())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::co_locate;
    use crate::collection::PartitionedCollection;
    use crate::partitioner::HashPartitioner;

    fn scattered_collection() -> PartitionedCollection<String, u32> {
        // records of the same key spread over different partitions
        let partitions = (0..4u32)
            .map(|p| {
                (0..25u32)
                    .map(|i| (format!("page-{}", i % 10), p * 100 + i))
                    .collect()
            })
            .collect();
        PartitionedCollection::unpartitioned(partitions)
    }

    #[test]
    fn every_key_lands_in_its_partition() {
        let partitioner = HashPartitioner::new(4);
        let shuffled = co_locate(scattered_collection(), &partitioner);

        assert_eq!(shuffled.len(), 100);
        assert_eq!(shuffled.partitioner(), Some(&partitioner));
        for (index, partition) in shuffled.partitions().iter().enumerate() {
            for (key, _) in partition {
                assert_eq!(partitioner.partition(key), index);
            }
        }
    }

    #[test]
    fn no_record_is_lost_or_duplicated() {
        let partitioner = HashPartitioner::new(4);
        let mut before: Vec<_> = scattered_collection().into_records();
        let mut after = co_locate(scattered_collection(), &partitioner).into_records();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn co_located_input_is_left_alone() {
        let partitioner = HashPartitioner::new(4);
        let records = (0..50).map(|i| (format!("page-{i}"), i));
        let collection = PartitionedCollection::from_records(records, partitioner.clone());
        let before: Vec<Vec<_>> = collection.partitions().to_vec();
        let shuffled = co_locate(collection, &partitioner);
        // same partitioner: the partitions must be untouched, order included
        assert_eq!(shuffled.partitions(), &before[..]);
    }

    #[test]
    fn exchange_can_grow_the_partition_count() {
        let partitioner = HashPartitioner::new(8);
        let shuffled = co_locate(scattered_collection(), &partitioner);
        assert_eq!(shuffled.num_partitions(), 8);
        assert_eq!(shuffled.len(), 100);
    }
}
