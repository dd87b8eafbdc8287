//! Timestamped CSV persistence sink

use bus::KeyedStore;
use chrono::Local;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;
use types::errors::DeskError;
use types::projection::Projection;

/// Appends every update of one stream to a timestamped CSV file
///
/// One instance per persisted stream (positions, risk, executions,
/// streaming, inquiries). Each row is `timestamp,field,field,...` with the
/// fields supplied by the value's `Projection`. The keyed store keeps the
/// latest value per key for read-back.
pub struct HistoricalDataService<V> {
    store: KeyedStore<V>,
    writer: BufWriter<File>,
    rows_written: u64,
}

impl<V: Projection + Clone + Default> HistoricalDataService<V> {
    /// Create the sink, truncating any existing file at `path`
    pub fn create(name: &'static str, path: impl AsRef<Path>) -> Result<Self, DeskError> {
        let file = File::create(path.as_ref())?;
        info!(sink = name, path = %path.as_ref().display(), "historical sink opened");
        Ok(Self {
            store: KeyedStore::new(name),
            writer: BufWriter::new(file),
            rows_written: 0,
        })
    }

    /// Append one row and retain the value under `key`
    pub fn persist(&mut self, key: impl Into<String>, value: V) -> Result<(), DeskError> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        writeln!(self.writer, "{},{}", timestamp, value.project().join(","))?;
        self.writer.flush()?;
        self.store.set(key, value);
        self.rows_written += 1;
        Ok(())
    }

    /// Latest persisted value for a key
    pub fn get(&self, key: &str) -> V {
        self.store.get(key)
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }
}
