use std::path::Path;
use std::time::Instant;

use crate::collection::PartitionedCollection;
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::Result;
use crate::record::PageState;
use crate::storage::{write_debug, TextFileSink, TextFileSource};

/// Hard cap on the number of rounds a job may request.
pub const MAX_ITERATIONS: usize = 100;

/// Fraction of a page's rank redistributed to its neighbors each
/// round; the remaining `1 - DAMPING` is granted to every page that
/// still receives contributions.
const DAMPING: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverState {
    Running(usize),
    Done,
}

/// The control loop of the computation.
///
/// The driver is the exclusive owner of the "current" collection: each
/// [`step`](IterationDriver::step) rebuilds the round's dataflow from
/// it, materializes the joined output and swaps it in. Nothing else
/// holds a collection across rounds, so the previous round's data is
/// reclaimed at the swap.
///
/// One round is:
///
/// 1. snapshot the neighbor lists from the round input;
/// 2. flat-map every page into `rank / degree` contributions, one per
///    neighbor (a page without neighbors contributes nothing, its rank
///    mass is dropped);
/// 3. sum the contributions per key;
/// 4. apply `0.15 + 0.85 * sum`;
/// 5. inner-join the new ranks with the neighbor snapshot (a page that
///    received no contribution disappears here);
/// 6. reassemble the per-page state for the next round.
///
/// The neighbor snapshot is re-derived from the round's own input
/// every time, keeping the dataflow stateless between rounds.
///
/// The driver trusts the iteration count it is given: clamping to
/// [`MAX_ITERATIONS`] is the job entry's duty, see [`run`].
#[derive(Debug)]
pub struct IterationDriver {
    engine: Engine,
    state: DriverState,
    iterations: usize,
    current: PartitionedCollection<String, PageState>,
}

impl IterationDriver {
    pub fn new(
        engine: Engine,
        initial: PartitionedCollection<String, PageState>,
        iterations: usize,
    ) -> IterationDriver {
        IterationDriver {
            engine,
            state: if iterations == 0 {
                DriverState::Done
            } else {
                DriverState::Running(0)
            },
            iterations,
            current: initial,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == DriverState::Done
    }

    /// Number of rounds fully executed so far.
    pub fn rounds_completed(&self) -> usize {
        match self.state {
            DriverState::Running(round) => round,
            DriverState::Done => self.iterations,
        }
    }

    /// The latest materialized collection.
    pub fn current(&self) -> &PartitionedCollection<String, PageState> {
        &self.current
    }

    pub fn into_collection(self) -> PartitionedCollection<String, PageState> {
        self.current
    }

    /// Execute one full round, or do nothing if the driver is done.
    /// Returns whether a round ran.
    pub fn step(&mut self) -> Result<bool> {
        let round = match self.state {
            DriverState::Running(round) => round,
            DriverState::Done => return Ok(false),
        };
        let start = Instant::now();

        let neighbors = self
            .current
            .dataset()
            .map_to_pair(|(key, page): (String, PageState)| (key, page.neighbors));
        let contributions =
            self.current
                .dataset()
                .flat_map_to_pair(|(_, page): (String, PageState)| {
                    let share = page.rank / page.neighbors.len() as f64;
                    page.neighbors.into_iter().map(move |target| (target, share))
                });
        let updated = contributions
            .reduce_by_key(|a, b| a + b)
            .map_values(|contribution| (1.0 - DAMPING) + DAMPING * contribution);
        let next = updated
            .join(neighbors)
            .map_values(|(rank, neighbors)| PageState { rank, neighbors });

        // materializing is the round barrier: the next round may only
        // start once every page's joined record exists
        self.current = next.collect(&self.engine)?;

        debug!(
            "round {} of {} done in {:?}, {} pages",
            round + 1,
            self.iterations,
            start.elapsed(),
            self.current.len()
        );
        self.state = if round + 1 >= self.iterations {
            DriverState::Done
        } else {
            DriverState::Running(round + 1)
        };
        Ok(true)
    }

    /// Run every remaining round.
    pub fn run_to_completion(&mut self) -> Result<()> {
        while self.step()? {}
        Ok(())
    }
}

/// The job entry point: load the graph, iterate, optionally dump the
/// result to stdout, persist it.
///
/// `iterations` is clamped to [`MAX_ITERATIONS`]; asking for more is
/// not an error. Any parse or storage error aborts the whole job, no
/// partial output is produced.
pub fn run(
    config: EngineConfig,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    iterations: usize,
    debug: bool,
) -> Result<PartitionedCollection<String, PageState>> {
    let requested = iterations;
    let iterations = iterations.min(MAX_ITERATIONS);
    if iterations < requested {
        warn!("requested {requested} iterations, clamping to {MAX_ITERATIONS}");
    }

    let engine = Engine::new(config);
    let mut records = Vec::new();
    for record in TextFileSource::new(input.as_ref()).load()? {
        records.push(record?.into_pair());
    }
    info!(
        "loaded {} pages from {}, running {} iterations on {} partitions",
        records.len(),
        input.as_ref().display(),
        iterations,
        engine.config().num_partitions
    );
    let initial = PartitionedCollection::from_records(records, engine.partitioner().clone());

    let mut driver = IterationDriver::new(engine, initial, iterations);
    driver.run_to_completion()?;
    let collection = driver.into_collection();

    if debug {
        write_debug(&collection, std::io::stdout().lock())?;
    }
    TextFileSink::new(output.as_ref()).save(&collection)?;
    Ok(collection)
}
