use std::fmt::Display;

use crate::collection::PartitionedCollection;
use crate::engine::Engine;
use crate::error::Result;
use crate::operator::{Data, DataKey, KeyValue};

type Plan<K, V> = Box<dyn FnOnce(&Engine) -> Result<PartitionedCollection<K, V>> + Send>;

/// A lazy dataflow over a [`PartitionedCollection`].
///
/// Operators do not run when they are called: each one wraps the plan
/// built so far into a new plan, and nothing is materialized until
/// [`collect`](Dataset::collect). `Display` shows the chain of
/// operators the plan is made of.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Dataset<K: DataKey, V: Data> {
    #[derivative(Debug = "ignore")]
    plan: Plan<K, V>,
    repr: String,
}

impl<K: DataKey, V: Data> Dataset<K, V> {
    pub(crate) fn new(repr: String, plan: Plan<K, V>) -> Dataset<K, V> {
        Dataset { plan, repr }
    }

    /// Start a dataflow from an already materialized collection.
    pub fn from_collection(collection: PartitionedCollection<K, V>) -> Dataset<K, V> {
        Dataset::new("Collection".into(), Box::new(move |_| Ok(collection)))
    }

    pub(crate) fn into_parts(self) -> (String, Plan<K, V>) {
        (self.repr, self.plan)
    }

    /// Evaluate the plan and materialize the resulting collection.
    ///
    /// This is the only point where the operators actually run; it is
    /// also the synchronization barrier of the dataflow: when it
    /// returns, every shuffle the plan contains has completed in full.
    pub fn collect(self, engine: &Engine) -> Result<PartitionedCollection<K, V>> {
        debug!("materializing: {}", self.repr);
        (self.plan)(engine)
    }

    /// Evaluate the plan and flatten the result into a vector.
    ///
    /// The order of the records only reflects partition placement, it
    /// carries no meaning.
    pub fn collect_vec(self, engine: &Engine) -> Result<Vec<KeyValue<K, V>>> {
        Ok(self.collect(engine)?.into_records())
    }
}

impl<K: DataKey, V: Data> Display for Dataset<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.repr)
    }
}
