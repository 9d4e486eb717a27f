use fxhash::FxHashMap;

use crate::collection::PartitionedCollection;
use crate::dataset::Dataset;
use crate::operator::{Data, DataKey};
use crate::shuffle;
use crate::worker;

impl<K: DataKey, V: Data> Dataset<K, V> {
    /// Inner equi-join on the key.
    ///
    /// Each side is shuffled unless already co-located, then every
    /// partition joins locally with a hash join (build the right side,
    /// probe with the left). The output carries one record per
    /// matching pair of values; a key present on only one side is
    /// dropped without notice. In the rank iteration this is what
    /// makes a page that received no contribution disappear from the
    /// next round.
    ///
    /// ## Example
    ///
    /// ```
    /// # use rankflow::{Engine, EngineConfig};
    /// let engine = Engine::new(EngineConfig::local(2));
    /// let ranks = engine.collection(vec![("p1".to_string(), 1.0)]);
    /// let neighbors = engine.collection(vec![
    ///     ("p1".to_string(), "p2".to_string()),
    ///     ("p3".to_string(), "p1".to_string()),
    /// ]);
    /// let res = ranks.join(neighbors).collect_vec(&engine).unwrap();
    /// // p3 only appears on the right side and is dropped
    /// assert_eq!(res, vec![("p1".to_string(), (1.0, "p2".to_string()))]);
    /// ```
    pub fn join<V2: Data>(self, right: Dataset<K, V2>) -> Dataset<K, (V, V2)> {
        let (left_repr, left_plan) = self.into_parts();
        let (right_repr, right_plan) = right.into_parts();
        let repr = format!("{left_repr} -> Join<with {right_repr}>");
        Dataset::new(
            repr,
            Box::new(move |engine| {
                let left = shuffle::co_locate(left_plan(engine)?, engine.partitioner());
                let right = shuffle::co_locate(right_plan(engine)?, engine.partitioner());
                let partitioner = engine.partitioner().clone();
                let zipped: Vec<_> = left
                    .into_partitions()
                    .into_iter()
                    .zip(right.into_partitions())
                    .collect();
                let partitions = worker::for_each_partition(
                    zipped,
                    |(left_partition, right_partition): (Vec<(K, V)>, Vec<(K, V2)>)| {
                        let mut build: FxHashMap<K, Vec<V2>> = FxHashMap::default();
                        for (key, value) in right_partition {
                            build.entry(key).or_default().push(value);
                        }
                        let mut output = Vec::new();
                        for (key, value) in left_partition {
                            if let Some(matches) = build.get(&key) {
                                for other in matches {
                                    output.push((key.clone(), (value.clone(), other.clone())));
                                }
                            }
                        }
                        output
                    },
                );
                Ok(PartitionedCollection::partitioned(partitions, partitioner))
            }),
        )
    }
}
