//! The storage adapter: reading the graph file and persisting (or
//! printing) the final collection. The engine never looks inside it.

mod sink;
mod source;

pub use sink::{write_debug, TextFileSink};
pub use source::TextFileSource;

use crate::error::Error;

/// Split a csv error into the crate's storage/parse kinds.
fn convert_error(err: csv::Error) -> Error {
    let line = err.position().map(|pos| pos.line()).unwrap_or(0);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io_err) => Error::Storage(io_err),
        _ => Error::Parse { line, message },
    }
}
