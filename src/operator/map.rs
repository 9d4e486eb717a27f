use crate::collection::PartitionedCollection;
use crate::dataset::Dataset;
use crate::operator::{Data, DataKey, KeyValue};
use crate::worker;

impl<K: DataKey, V: Data> Dataset<K, V> {
    /// Map every record into exactly one new record, key included.
    ///
    /// Since `f` may rewrite the key, the result is not considered
    /// co-located anymore: a downstream reduce or join will shuffle
    /// it again.
    ///
    /// ## Example
    ///
    /// ```
    /// # use rankflow::{Engine, EngineConfig};
    /// let engine = Engine::new(EngineConfig::local(2));
    /// let mut res = engine
    ///     .collection(vec![("p1".to_string(), 2), ("p2".to_string(), 3)])
    ///     .map_to_pair(|(k, v)| (k, v * 10))
    ///     .collect_vec(&engine)
    ///     .unwrap();
    /// res.sort();
    /// assert_eq!(res, vec![("p1".to_string(), 20), ("p2".to_string(), 30)]);
    /// ```
    pub fn map_to_pair<K2: DataKey, V2: Data, F>(self, f: F) -> Dataset<K2, V2>
    where
        F: Fn(KeyValue<K, V>) -> KeyValue<K2, V2> + Send + Clone + 'static,
    {
        let (repr, plan) = self.into_parts();
        let repr = format!(
            "{} -> MapToPair<{} -> {}>",
            repr,
            std::any::type_name::<KeyValue<K, V>>(),
            std::any::type_name::<KeyValue<K2, V2>>()
        );
        Dataset::new(
            repr,
            Box::new(move |engine| {
                let input = plan(engine)?;
                let partitions =
                    worker::for_each_partition(input.into_partitions(), move |partition| {
                        partition.into_iter().map(&f).collect()
                    });
                Ok(PartitionedCollection::unpartitioned(partitions))
            }),
        )
    }
}
