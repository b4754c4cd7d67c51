//! services/api/src/adapters/backup.rs
//!
//! File-backed implementation of the `BackupStore` port. Scripts the database
//! rejected are kept in one pretty-printed JSON file so users can recover
//! them later. All access is serialized through a mutex because append and
//! remove are read-modify-write operations on the whole file.

use async_trait::async_trait;
use scriptgo_core::domain::LocalBackupRecord;
use scriptgo_core::ports::{BackupStore, PortError, PortResult};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// A backup adapter that implements the `BackupStore` port on a JSON file.
pub struct JsonBackupAdapter {
    path: PathBuf,
    max_entries: Option<usize>,
    lock: Mutex<()>,
}

impl JsonBackupAdapter {
    /// Creates a new adapter. `max_entries` of `None` keeps the list unbounded;
    /// otherwise the oldest entries are dropped once the cap is exceeded.
    pub fn new(path: PathBuf, max_entries: Option<usize>) -> Self {
        Self {
            path,
            max_entries,
            lock: Mutex::new(()),
        }
    }

    async fn read_records(&self) -> PortResult<Vec<LocalBackupRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PortError::Unexpected(e.to_string())),
        };
        serde_json::from_slice(&bytes)
            .map_err(|e| PortError::Unexpected(format!("Backup file is corrupt: {}", e)))
    }

    async fn write_records(&self, records: &[LocalBackupRecord]) -> PortResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| PortError::Unexpected(e.to_string()))?;
            }
        }
        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl BackupStore for JsonBackupAdapter {
    async fn append(&self, record: &LocalBackupRecord) -> PortResult<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await?;
        records.push(record.clone());
        if let Some(max) = self.max_entries {
            if records.len() > max {
                let excess = records.len() - max;
                records.drain(..excess);
            }
        }
        self.write_records(&records).await
    }

    async fn list(&self) -> PortResult<Vec<LocalBackupRecord>> {
        let _guard = self.lock.lock().await;
        self.read_records().await
    }

    async fn remove(&self, local_id: &str) -> PortResult<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await?;
        let before = records.len();
        records.retain(|record| record.local_id != local_id);
        if records.len() == before {
            return Err(PortError::NotFound(format!("Backup {} not found", local_id)));
        }
        self.write_records(&records).await
    }

    async fn clear(&self) -> PortResult<()> {
        let _guard = self.lock.lock().await;
        self.write_records(&[]).await
    }
}
