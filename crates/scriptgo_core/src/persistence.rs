//! crates/scriptgo_core/src/persistence.rs
//!
//! The save cascade. Every write tries the store with the full column set
//! first, retries once with the core column set when the store reports
//! schema drift, and finally lands in the local backup list when the store
//! is unreachable. Callers learn where the write ended up from [`SaveOutcome`].

use crate::domain::{LocalBackupRecord, NewScript, ScriptUpdate};
use crate::ports::{BackupStore, ScriptStore, StoreErrorKind};
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Where a write finally landed after the fallback cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The store accepted the full metadata column set.
    RemoteFull,
    /// Schema drift was detected; the store accepted the core column set.
    RemoteCore,
    /// The store rejected both attempts; the script went to the backup list.
    LocalBackup,
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The script to update does not exist. Never backed up locally.
    #[error("Script {0} not found")]
    NotFound(Uuid),
    /// Every rung of the cascade failed, including the local backup.
    #[error("database save and local backup both failed: {remote}; {backup}")]
    Exhausted { remote: String, backup: String },
}

/// Identifier for a backup entry, derived from the capture time.
pub fn local_backup_id(now: DateTime<Utc>) -> String {
    format!("local_{}", now.timestamp_millis())
}

/// Saves a new script, falling back from full insert to core insert to the
/// local backup list.
pub async fn save_with_fallback(
    store: &dyn ScriptStore,
    backup: &dyn BackupStore,
    script: &NewScript,
) -> Result<SaveOutcome, PersistenceError> {
    let remote_error = match store.insert_script(script).await {
        Ok(()) => return Ok(SaveOutcome::RemoteFull),
        Err(error) => error,
    };

    // Schema drift earns exactly one retry with the drift-safe column set.
    let remote_error = if remote_error.kind == StoreErrorKind::SchemaDrift {
        match store.insert_script_core(&script.to_core()).await {
            Ok(()) => return Ok(SaveOutcome::RemoteCore),
            Err(core_error) => core_error,
        }
    } else {
        remote_error
    };

    let now = Utc::now();
    let record = LocalBackupRecord::from_new(script, local_backup_id(now), now);
    match backup.append(&record).await {
        Ok(()) => Ok(SaveOutcome::LocalBackup),
        Err(backup_error) => Err(PersistenceError::Exhausted {
            remote: remote_error.to_string(),
            backup: backup_error.to_string(),
        }),
    }
}

/// Updates an existing script through the same cascade. A missing script is
/// reported as [`PersistenceError::NotFound`] instead of being backed up.
pub async fn update_with_fallback(
    store: &dyn ScriptStore,
    backup: &dyn BackupStore,
    id: Uuid,
    update: &ScriptUpdate,
) -> Result<SaveOutcome, PersistenceError> {
    let remote_error = match store.update_script(id, update).await {
        Ok(()) => return Ok(SaveOutcome::RemoteFull),
        Err(error) => error,
    };

    if remote_error.kind == StoreErrorKind::NotFound {
        return Err(PersistenceError::NotFound(id));
    }

    let remote_error = if remote_error.kind == StoreErrorKind::SchemaDrift {
        match store.update_script_core(id, &update.topic, &update.content).await {
            Ok(()) => return Ok(SaveOutcome::RemoteCore),
            Err(core_error) => {
                if core_error.kind == StoreErrorKind::NotFound {
                    return Err(PersistenceError::NotFound(id));
                }
                core_error
            }
        }
    } else {
        remote_error
    };

    let now = Utc::now();
    let record = LocalBackupRecord::from_update(id, update, local_backup_id(now), now);
    match backup.append(&record).await {
        Ok(()) => Ok(SaveOutcome::LocalBackup),
        Err(backup_error) => Err(PersistenceError::Exhausted {
            remote: remote_error.to_string(),
            backup: backup_error.to_string(),
        }),
    }
}
