use crate::collection::PartitionedCollection;
use crate::config::EngineConfig;
use crate::dataset::Dataset;
use crate::operator::{Data, DataKey, KeyValue};
use crate::partitioner::HashPartitioner;

/// The execution context of a run: the configuration plus the single
/// partitioner shared by every operator of the run.
///
/// ## Example
///
/// ```
/// # use rankflow::{Engine, EngineConfig};
/// let engine = Engine::new(EngineConfig::local(4));
/// let mut res = engine
///     .collection(vec![("p1".to_string(), 1), ("p2".to_string(), 2)])
///     .map_values(|n| n * 10)
///     .collect_vec(&engine)
///     .unwrap();
/// res.sort();
/// assert_eq!(res, vec![("p1".to_string(), 10), ("p2".to_string(), 20)]);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    partitioner: HashPartitioner,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Engine {
        Engine {
            partitioner: HashPartitioner::new(config.num_partitions),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The run-wide partitioner. Every shuffle of this run routes with
    /// this same instance, so co-location established once holds for
    /// all downstream operators.
    pub fn partitioner(&self) -> &HashPartitioner {
        &self.partitioner
    }

    /// Start a dataflow from in-memory records, placed by key.
    pub fn collection<K: DataKey, V: Data, I>(&self, records: I) -> Dataset<K, V>
    where
        I: IntoIterator<Item = KeyValue<K, V>>,
    {
        Dataset::from_collection(PartitionedCollection::from_records(
            records,
            self.partitioner.clone(),
        ))
    }
}
