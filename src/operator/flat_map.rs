use crate::collection::PartitionedCollection;
use crate::dataset::Dataset;
use crate::operator::{Data, DataKey, KeyValue};
use crate::worker;

impl<K: DataKey, V: Data> Dataset<K, V> {
    /// Map every record into zero or more new records.
    ///
    /// A record mapped to an empty iterator simply produces nothing:
    /// this is how a page without outgoing links sheds its rank mass
    /// in the contribution stage, and it is deliberate.
    ///
    /// ## Example
    ///
    /// ```
    /// # use rankflow::{Engine, EngineConfig};
    /// let engine = Engine::new(EngineConfig::local(2));
    /// let mut res = engine
    ///     .collection(vec![("p1".to_string(), vec!["p2".to_string(), "p3".to_string()])])
    ///     .flat_map_to_pair(|(_, targets)| targets.into_iter().map(|t| (t, 1u32)))
    ///     .collect_vec(&engine)
    ///     .unwrap();
    /// res.sort();
    /// assert_eq!(res, vec![("p2".to_string(), 1), ("p3".to_string(), 1)]);
    /// ```
    pub fn flat_map_to_pair<K2, V2, It, F>(self, f: F) -> Dataset<K2, V2>
    where
        K2: DataKey,
        V2: Data,
        It: IntoIterator<Item = KeyValue<K2, V2>> + 'static,
        F: Fn(KeyValue<K, V>) -> It + Send + Clone + 'static,
    {
        let (repr, plan) = self.into_parts();
        let repr = format!(
            "{} -> FlatMapToPair<{} -> {}>",
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
                        partition.into_iter().flat_map(&f).collect()
                    });
                Ok(PartitionedCollection::unpartitioned(partitions))
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{Engine, EngineConfig, PageState};

    #[test]
    fn splits_rank_between_neighbors() {
        let engine = Engine::new(EngineConfig::local(2));
        let page = PageState {
            rank: 1.0,
            neighbors: vec!["p2".to_string(), "p3".to_string()],
        };
        let res = engine
            .collection(vec![("p1".to_string(), page)])
            .flat_map_to_pair(|(_, page): (String, PageState)| {
                let share = page.rank / page.neighbors.len() as f64;
                page.neighbors.into_iter().map(move |n| (n, share))
            })
            .collect_vec(&engine)
            .unwrap();
        let sorted = res.into_iter().sorted_by(|a, b| a.0.cmp(&b.0)).collect_vec();
        assert_eq!(
            sorted,
            vec![("p2".to_string(), 0.5), ("p3".to_string(), 0.5)]
        );
    }

    #[test]
    fn empty_output_drops_the_record() {
        let engine = Engine::new(EngineConfig::local(2));
        let res = engine
            .collection(vec![("dangling".to_string(), Vec::<String>::new())])
            .flat_map_to_pair(|(_, targets)| targets.into_iter().map(|t| (t, 1u32)))
            .collect_vec(&engine)
            .unwrap();
        assert!(res.is_empty());
    }
}
