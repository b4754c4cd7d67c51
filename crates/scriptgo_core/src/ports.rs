//! crates/scriptgo_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use crate::domain::{
    CoreScript, GenerationConfig, LocalBackupRecord, NewScript, PlannedScript, ScriptRecord,
    ScriptUpdate,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., files, networks).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Provider request failed: {0}")]
    Provider(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Store Error Classification
//=========================================================================================

/// Classifies why a script store operation failed.
///
/// The save cascade branches on this kind: schema drift earns one retry with
/// the core column set, everything else goes straight to the local backup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The store rejected a column the application expected to exist.
    SchemaDrift,
    /// The store could not be reached.
    Connection,
    NotFound,
    Other,
}

/// An error from a script store operation, tagged with its classification.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn schema_drift(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::SchemaDrift, message)
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Connection, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::NotFound, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Other, message)
    }
}

/// A convenience type alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait ScriptStore: Send + Sync {
    // --- Writes ---
    async fn insert_script(&self, script: &NewScript) -> StoreResult<()>;

    /// Inserts only the columns that must survive schema drift.
    async fn insert_script_core(&self, script: &CoreScript) -> StoreResult<()>;

    /// Bulk insert for calendar plans. No fallback cascade applies here.
    async fn insert_scripts(&self, scripts: &[NewScript]) -> StoreResult<()>;

    async fn update_script(&self, id: Uuid, update: &ScriptUpdate) -> StoreResult<()>;

    /// Updates only topic and content, the drift-safe subset.
    async fn update_script_core(&self, id: Uuid, topic: &str, content: &str) -> StoreResult<()>;

    // --- Reads ---
    async fn get_script(&self, id: Uuid) -> StoreResult<ScriptRecord>;

    /// All scripts for a user, newest first.
    async fn list_scripts(&self, user_id: Uuid) -> StoreResult<Vec<ScriptRecord>>;

    /// Calendar entries for a user, ordered by scheduled date.
    async fn list_calendar_scripts(&self, user_id: Uuid) -> StoreResult<Vec<ScriptRecord>>;

    // --- Maintenance ---
    async fn delete_script(&self, id: Uuid) -> StoreResult<()>;

    /// A cheap connectivity check for the health endpoint.
    async fn probe(&self) -> StoreResult<()>;
}

#[async_trait]
pub trait BackupStore: Send + Sync {
    /// Appends one rejected script to the backup list.
    async fn append(&self, record: &LocalBackupRecord) -> PortResult<()>;

    async fn list(&self) -> PortResult<Vec<LocalBackupRecord>>;

    async fn remove(&self, local_id: &str) -> PortResult<()>;

    async fn clear(&self) -> PortResult<()>;
}

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generates one complete script for the given configuration.
    async fn generate(&self, config: &GenerationConfig) -> PortResult<String>;
}

#[async_trait]
pub trait BatchContentGenerator: Send + Sync {
    /// Generates a plan of `days` consecutive scripts starting at `start_date`.
    async fn generate_batch(
        &self,
        config: &GenerationConfig,
        days: u32,
        start_date: DateTime<Utc>,
    ) -> PortResult<Vec<PlannedScript>>;
}
