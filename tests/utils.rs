#![allow(dead_code)] // not all tests use all the members

use std::collections::BTreeMap;

use rankflow::{Engine, IterationDriver, PageState, PartitionedCollection};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn page(rank: f64, neighbors: &[&str]) -> PageState {
    PageState {
        rank,
        neighbors: neighbors.iter().map(|s| s.to_string()).collect(),
    }
}

/// Build the initial collection of a graph given as
/// `(key, rank, neighbors)` triples.
pub fn graph(
    engine: &Engine,
    pages: &[(&str, f64, &[&str])],
) -> PartitionedCollection<String, PageState> {
    PartitionedCollection::from_records(
        pages
            .iter()
            .map(|(key, rank, neighbors)| (key.to_string(), page(*rank, neighbors))),
        engine.partitioner().clone(),
    )
}

/// Run `rounds` full iterations and hand back the final collection.
pub fn run_rounds(
    engine: &Engine,
    initial: PartitionedCollection<String, PageState>,
    rounds: usize,
) -> PartitionedCollection<String, PageState> {
    let mut driver = IterationDriver::new(engine.clone(), initial, rounds);
    driver.run_to_completion().unwrap();
    driver.into_collection()
}

/// The rank of every page, keyed for ordered comparisons.
pub fn ranks_of(collection: &PartitionedCollection<String, PageState>) -> BTreeMap<String, f64> {
    collection
        .iter()
        .map(|(key, state)| (key.clone(), state.rank))
        .collect()
}

pub fn total_rank(collection: &PartitionedCollection<String, PageState>) -> f64 {
    collection.iter().map(|(_, state)| state.rank).sum()
}
