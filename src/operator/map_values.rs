use crate::collection::PartitionedCollection;
use crate::dataset::Dataset;
use crate::operator::{Data, DataKey};
use crate::worker;

impl<K: DataKey, V: Data> Dataset<K, V> {
    /// Transform the value of every record, leaving the key alone.
    ///
    /// Keys do not move, so co-location survives: a reduce or join
    /// downstream of a `map_values` will not shuffle again.
    pub fn map_values<V2: Data, F>(self, f: F) -> Dataset<K, V2>
    where
        F: Fn(V) -> V2 + Send + Clone + 'static,
    {
        let (repr, plan) = self.into_parts();
        let repr = format!(
            "{} -> MapValues<{} -> {}>",
            repr,
            std::any::type_name::<V>(),
            std::any::type_name::<V2>()
        );
        Dataset::new(
            repr,
            Box::new(move |engine| {
                let input = plan(engine)?;
                let partitioner = input.partitioner().cloned();
                let partitions =
                    worker::for_each_partition(input.into_partitions(), move |partition| {
                        partition
                            .into_iter()
                            .map(|(key, value)| (key, f(value)))
                            .collect()
                    });
                Ok(match partitioner {
                    Some(partitioner) => {
                        PartitionedCollection::partitioned(partitions, partitioner)
                    }
                    None => PartitionedCollection::unpartitioned(partitions),
                })
            }),
        )
    }
}
