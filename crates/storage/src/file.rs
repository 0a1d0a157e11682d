//! FileStore - append-only JSONL persistence

use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use contracts::{ContractError, FrequencyStore, NormalizedReading};

use crate::record::FrequencyRecord;

/// Store that appends one JSON document per reading to a file.
///
/// Shared across partition workers; the file handle sits behind an async
/// mutex so concurrent inserts serialize at the write, not in the pipeline.
pub struct FileStore {
    name: String,
    path: PathBuf,
    file: Mutex<File>,
}

impl FileStore {
    /// Open (or create) the store file in append mode.
    pub async fn open(name: impl Into<String>, path: &Path) -> Result<Self, ContractError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        Ok(Self {
            name: name.into(),
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// Store file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append_record(&self, record: &FrequencyRecord) -> Result<(), ContractError> {
        let mut line = serde_json::to_vec(record)
            .map_err(|e| ContractError::store_write(&self.name, e.to_string()))?;
        line.push(b'\n');

        let mut file = self.file.lock().await;
        file.write_all(&line)
            .await
            .map_err(|e| ContractError::store_write(&self.name, e.to_string()))?;
        Ok(())
    }
}

impl FrequencyStore for FileStore {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_store_insert",
        skip(self, reading),
        fields(store = %self.name, hertz = %reading)
    )]
    async fn insert(&self, reading: NormalizedReading) -> Result<(), ContractError> {
        let record = FrequencyRecord::stamp(reading);
        self.append_record(&record).await?;
        debug!(store = %self.name, frequency = record.frequency, "reading stored");
        Ok(())
    }

    #[instrument(name = "file_store_flush", skip(self))]
    async fn flush(&self) -> Result<(), ContractError> {
        let mut file = self.file.lock().await;
        file.flush()
            .await
            .map_err(|e| ContractError::store_write(&self.name, e.to_string()))?;
        Ok(())
    }

    #[instrument(name = "file_store_close", skip(self))]
    async fn close(&self) -> Result<(), ContractError> {
        let mut file = self.file.lock().await;
        file.sync_all()
            .await
            .map_err(|e| ContractError::store_write(&self.name, e.to_string()))?;
        debug!(store = %self.name, "FileStore closed");
        Ok(())
    }
}
