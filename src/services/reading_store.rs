use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::StoreError;
use crate::models::Reading;

/// Append-only on-disk series of readings for one channel.
///
/// The whole series is held in memory and rewritten to the backing file on
/// every append. The rewrite goes through a temp file followed by a rename,
/// so a concurrent reader never observes a partially written series.
pub struct ReadingStore {
    path: PathBuf,
    series: Vec<Reading>,
    writes: u64,
}

impl ReadingStore {
    /// Load the series from `path`, creating the file with an empty series
    /// when it does not exist yet.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&path, "[]")?;

            return Ok(Self {
                path,
                series: Vec::new(),
                writes: 0,
            });
        }

        let raw = fs::read_to_string(&path)?;
        let series = serde_json::from_str(&raw).map_err(StoreError::CorruptData)?;

        Ok(Self {
            path,
            series,
            writes: 0,
        })
    }

    /// Append `reading` unless its timestamp equals the last entry's.
    /// Returns whether the series changed; on a change the backing file is
    /// rewritten synchronously before returning. A duplicate performs no I/O.
    pub fn append_if_new(&mut self, reading: Reading) -> Result<bool, StoreError> {
        if self.series.last().map(|last| last.timestamp) == Some(reading.timestamp) {
            return Ok(false);
        }

        self.series.push(reading);
        self.flush()?;

        Ok(true)
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.series).map_err(StoreError::Encode)?;
        let tmp_path = self.path.with_extension("tmp");

        fs::write(&tmp_path, raw)?;
        fs::rename(&tmp_path, &self.path)?;

        self.writes += 1;

        Ok(())
    }

    pub fn series(&self) -> &[Reading] {
        &self.series
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of file writes performed since load.
    pub fn write_count(&self) -> u64 {
        self.writes
    }
}
