pub mod credentials;
pub mod demo;
pub mod domain;
pub mod persistence;
pub mod ports;
pub mod prompts;

pub use credentials::{ProviderChoice, ProviderCredentials};
pub use domain::{
    normalize_stored_content, CoreScript, GenerationConfig, LocalBackupRecord, NewScript, Platform,
    PlannedScript, ScriptDuration, ScriptRecord, ScriptUpdate,
};
pub use persistence::{
    save_with_fallback, update_with_fallback, PersistenceError, SaveOutcome,
};
pub use ports::{
    BackupStore, BatchContentGenerator, ContentGenerator, PortError, PortResult, ScriptStore,
    StoreError, StoreErrorKind, StoreResult,
};
