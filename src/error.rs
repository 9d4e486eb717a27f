use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The errors a job can fail with.
///
/// Parse and storage errors abort the whole run: there is no partial
/// or degraded output mode. A key receiving no contributions or a key
/// missing from one side of a join are not errors, they simply produce
/// no output record.
#[derive(Debug, Error)]
pub enum Error {
    /// A line of the input does not split into at least a key and a
    /// numeric rank.
    #[error("cannot parse input record at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// The input cannot be read or the output cannot be written.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The output path is already taken, refusing to overwrite it.
    #[error("output path {} already exists", .0.display())]
    OutputExists(PathBuf),

    /// The caller passed an invalid argument to the job entry point.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
