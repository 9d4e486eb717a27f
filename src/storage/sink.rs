use std::fs;
use std::io;
use std::path::PathBuf;

use crate::collection::PartitionedCollection;
use crate::error::{Error, Result};
use crate::record::PageState;
use crate::storage::convert_error;

/// Writes a collection back to durable storage as a directory of
/// tab-separated shards, one `part-NNNNN` file per partition.
#[derive(Debug, Clone)]
pub struct TextFileSink {
    path: PathBuf,
}

impl TextFileSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> TextFileSink {
        TextFileSink { path: path.into() }
    }

    /// Persist `collection` under a fresh directory.
    ///
    /// Fails with [`Error::OutputExists`] if the path is already
    /// taken. Line order inside and across shards is not guaranteed.
    pub fn save(&self, collection: &PartitionedCollection<String, PageState>) -> Result<()> {
        if self.path.exists() {
            return Err(Error::OutputExists(self.path.clone()));
        }
        fs::create_dir_all(&self.path)?;
        for (index, partition) in collection.partitions().iter().enumerate() {
            let shard = self.path.join(format!("part-{index:05}"));
            let mut writer = csv::WriterBuilder::new()
                .delimiter(b'\t')
                .flexible(true)
                .from_path(&shard)
                .map_err(convert_error)?;
            for (key, state) in partition {
                write_page(&mut writer, key, state)?;
            }
            writer.flush()?;
        }
        info!(
            "wrote {} records in {} shards to {}",
            collection.len(),
            collection.num_partitions(),
            self.path.display()
        );
        Ok(())
    }
}

/// Write every record of `collection` as a tab-separated line to an
/// arbitrary sink, e.g. stdout for the debug dump of a finished job.
pub fn write_debug<W: io::Write>(
    collection: &PartitionedCollection<String, PageState>,
    sink: W,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_writer(sink);
    for (key, state) in collection.iter() {
        write_page(&mut writer, key, state)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_page<W: io::Write>(
    writer: &mut csv::Writer<W>,
    key: &str,
    state: &PageState,
) -> Result<()> {
    let rank = state.rank.to_string();
    let fields = [key, rank.as_str()]
        .into_iter()
        .chain(state.neighbors.iter().map(String::as_str));
    writer.write_record(fields).map_err(convert_error)
}
