use fxhash::FxHashMap;

use crate::collection::PartitionedCollection;
use crate::dataset::Dataset;
use crate::operator::{Data, DataKey};
use crate::shuffle;
use crate::worker;

impl<K: DataKey, V: Data> Dataset<K, V> {
    /// Fold all the values of every key with `f`, producing exactly
    /// one record per distinct key.
    ///
    /// The input is shuffled first unless it is already co-located
    /// under the run partitioner. `f` must be associative and
    /// commutative: the fold order depends on where the records came
    /// from and is not specified.
    ///
    /// ## Example
    ///
    /// ```
    /// # use rankflow::{Engine, EngineConfig};
    /// let engine = Engine::new(EngineConfig::local(2));
    /// let pairs = vec![
    ///     ("p1".to_string(), 1),
    ///     ("p2".to_string(), 10),
    ///     ("p1".to_string(), 2),
    /// ];
    /// let mut res = engine
    ///     .collection(pairs)
    ///     .reduce_by_key(|a, b| a + b)
    ///     .collect_vec(&engine)
    ///     .unwrap();
    /// res.sort();
    /// assert_eq!(res, vec![("p1".to_string(), 3), ("p2".to_string(), 10)]);
    /// ```
    pub fn reduce_by_key<F>(self, f: F) -> Dataset<K, V>
    where
        F: Fn(V, V) -> V + Send + Clone + 'static,
    {
        let (repr, plan) = self.into_parts();
        let repr = format!("{} -> ReduceByKey<{}>", repr, std::any::type_name::<K>());
        Dataset::new(
            repr,
            Box::new(move |engine| {
                let input = shuffle::co_locate(plan(engine)?, engine.partitioner());
                let partitioner = engine.partitioner().clone();
                let partitions =
                    worker::for_each_partition(input.into_partitions(), move |partition| {
                        let mut groups: FxHashMap<K, V> = FxHashMap::default();
                        for (key, value) in partition {
                            let folded = match groups.remove(&key) {
                                Some(acc) => f(acc, value),
                                None => value,
                            };
                            groups.insert(key, folded);
                        }
                        groups.into_iter().collect()
                    });
                Ok(PartitionedCollection::partitioned(partitions, partitioner))
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{Engine, EngineConfig};

    #[test]
    fn one_record_per_distinct_key() {
        let engine = Engine::new(EngineConfig::local(4));
        let records = (0..1000u32).map(|i| (format!("p{}", i % 7), 1));
        let res = engine
            .collection(records)
            .reduce_by_key(|a, b| a + b)
            .collect_vec(&engine)
            .unwrap();
        assert_eq!(res.len(), 7);
        assert!(res.iter().all(|(_, count)| *count > 0));
        assert_eq!(res.iter().map(|(_, count)| count).sum::<u32>(), 1000);
    }

    #[test]
    fn reduces_after_a_key_rewrite() {
        // map_to_pair cleared the co-location mark, the reduce has to
        // shuffle before folding
        let engine = Engine::new(EngineConfig::local(4));
        let records = (0..100u32).map(|i| (format!("p{i}"), i));
        let res = engine
            .collection(records)
            .map_to_pair(|(_, v)| (format!("bucket{}", v % 3), v))
            .reduce_by_key(|a, b| a + b)
            .collect_vec(&engine)
            .unwrap();
        let sorted = res.into_iter().sorted().collect_vec();
        let expected: u32 = (0..100).sum();
        assert_eq!(sorted.len(), 3);
        assert_eq!(sorted.iter().map(|(_, v)| v).sum::<u32>(), expected);
    }

    #[test]
    fn result_is_co_located() {
        let engine = Engine::new(EngineConfig::local(4));
        let records = (0..100u32).map(|i| (format!("p{}", i % 10), i));
        let collection = engine
            .collection(records)
            .reduce_by_key(|a, b| a + b)
            .collect(&engine)
            .unwrap();
        assert_eq!(collection.partitioner(), Some(engine.partitioner()));
    }
}
