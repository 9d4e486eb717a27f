#[macro_use]
extern crate derivative;
#[macro_use]
extern crate log;

pub mod collection;
pub mod config;
pub mod dataset;
pub mod driver;
pub mod engine;
pub mod error;
pub mod operator;
pub mod partitioner;
pub mod record;
pub mod storage;

mod shuffle;
mod worker;

pub use collection::{Partition, PartitionedCollection};
pub use config::EngineConfig;
pub use dataset::Dataset;
pub use driver::{run, IterationDriver, MAX_ITERATIONS};
pub use engine::Engine;
pub use error::{Error, Result};
pub use record::{PageRecord, PageState};
