//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use scriptgo_core::ports::{BackupStore, BatchContentGenerator, ContentGenerator, ScriptStore};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ScriptStore>,
    pub backup: Arc<dyn BackupStore>,
    pub generator: Arc<dyn ContentGenerator>,
    pub batch_generator: Arc<dyn BatchContentGenerator>,
    pub config: Arc<Config>,
}
