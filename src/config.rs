use std::num::NonZeroUsize;

/// Configuration of an [`Engine`](crate::Engine).
///
/// The number of partitions is fixed for the whole run: it is both the
/// fan-out of the shuffle exchange and the number of worker threads
/// spawned for the partition-local phases of each operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub num_partitions: usize,
}

impl EngineConfig {
    /// Build a config that splits every collection in `num_partitions`
    /// partitions, processed by as many local worker threads.
    pub fn local(num_partitions: usize) -> EngineConfig {
        assert!(num_partitions > 0, "at least one partition is required");
        EngineConfig { num_partitions }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        let cores = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        EngineConfig::local(cores)
    }
}
