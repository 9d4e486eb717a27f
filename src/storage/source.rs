use std::path::PathBuf;

use crate::error::Result;
use crate::record::PageRecord;
use crate::storage::convert_error;

/// Reads a graph file one tab-separated line at a time.
///
/// Each line is `key \t rank \t neighbor...`, with zero or more
/// neighbors. Lines are decoded lazily, as the returned iterator
/// advances.
#[derive(Debug, Clone)]
pub struct TextFileSource {
    path: PathBuf,
}

impl TextFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> TextFileSource {
        TextFileSource { path: path.into() }
    }

    /// Open the file and return a lazy iterator over its records.
    ///
    /// A line with fewer than two fields, or whose rank field is not a
    /// number, surfaces as [`Error::Parse`](crate::Error::Parse)
    /// naming the line; an unreadable file as
    /// [`Error::Storage`](crate::Error::Storage).
    pub fn load(&self) -> Result<impl Iterator<Item = Result<PageRecord>>> {
        let reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(convert_error)?;
        Ok(reader
            .into_deserialize::<PageRecord>()
            .map(|record| record.map_err(convert_error)))
    }
}
