pub mod generate;
pub mod health;
pub mod rest;
pub mod state;

// Re-export the handlers to make them easily accessible
// to the binary that will build the web server router.
pub use generate::{generate_batch_handler, generate_handler};
pub use health::health_handler;
pub use rest::{
    clear_backups_handler, delete_backup_handler, delete_script_handler, get_script_handler,
    list_backups_handler, list_scripts_handler, save_plan_handler, save_script_handler,
    update_script_handler,
};

/// Shared stand-ins for the handler tests: a store with scriptable failures,
/// an in-memory backup list, and ready-made application states.
#[cfg(test)]
pub(crate) mod testing {
    use super::state::AppState;
    use crate::adapters::DemoContentAdapter;
    use crate::config::Config;
    use async_trait::async_trait;
    use chrono::Utc;
    use scriptgo_core::domain::{
        CoreScript, GenerationConfig, LocalBackupRecord, NewScript, Platform, ScriptDuration,
        ScriptRecord, ScriptUpdate,
    };
    use scriptgo_core::ports::{
        BackupStore, ContentGenerator, PortError, PortResult, ScriptStore, StoreError, StoreResult,
    };
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tracing::Level;
    use uuid::Uuid;

    /// A store whose insert and update results are scripted per column set.
    #[derive(Default)]
    pub(crate) struct ScriptedStore {
        pub(crate) full_error: Option<StoreError>,
        pub(crate) core_error: Option<StoreError>,
        pub(crate) records: Vec<ScriptRecord>,
        pub(crate) full_calls: AtomicUsize,
        pub(crate) core_calls: AtomicUsize,
        pub(crate) bulk_inserted: AtomicUsize,
    }

    impl ScriptedStore {
        pub(crate) fn with_errors(
            full_error: Option<StoreError>,
            core_error: Option<StoreError>,
        ) -> Self {
            Self {
                full_error,
                core_error,
                ..Self::default()
            }
        }

        pub(crate) fn with_records(records: Vec<ScriptRecord>) -> Self {
            Self {
                records,
                ..Self::default()
            }
        }

        fn full_result(&self) -> StoreResult<()> {
            self.full_calls.fetch_add(1, Ordering::SeqCst);
            match &self.full_error {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }

        fn core_result(&self) -> StoreResult<()> {
            self.core_calls.fetch_add(1, Ordering::SeqCst);
            match &self.core_error {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ScriptStore for ScriptedStore {
        async fn insert_script(&self, _script: &NewScript) -> StoreResult<()> {
            self.full_result()
        }

        async fn insert_script_core(&self, _script: &CoreScript) -> StoreResult<()> {
            self.core_result()
        }

        async fn insert_scripts(&self, scripts: &[NewScript]) -> StoreResult<()> {
            if let Some(error) = &self.full_error {
                return Err(error.clone());
            }
            self.bulk_inserted.fetch_add(scripts.len(), Ordering::SeqCst);
            Ok(())
        }

        async fn update_script(&self, _id: Uuid, _update: &ScriptUpdate) -> StoreResult<()> {
            self.full_result()
        }

        async fn update_script_core(
            &self,
            _id: Uuid,
            _topic: &str,
            _content: &str,
        ) -> StoreResult<()> {
            self.core_result()
        }

        async fn get_script(&self, id: Uuid) -> StoreResult<ScriptRecord> {
            self.records
                .iter()
                .find(|record| record.id == id)
                .cloned()
                .ok_or_else(|| StoreError::not_found(format!("Script {} not found", id)))
        }

        async fn list_scripts(&self, user_id: Uuid) -> StoreResult<Vec<ScriptRecord>> {
            Ok(self
                .records
                .iter()
                .filter(|record| record.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn list_calendar_scripts(&self, user_id: Uuid) -> StoreResult<Vec<ScriptRecord>> {
            Ok(self
                .records
                .iter()
                .filter(|record| record.user_id == user_id && record.is_calendar_entry)
                .cloned()
                .collect())
        }

        async fn delete_script(&self, id: Uuid) -> StoreResult<()> {
            if self.records.iter().any(|record| record.id == id) {
                Ok(())
            } else {
                Err(StoreError::not_found(format!("Script {} not found", id)))
            }
        }

        async fn probe(&self) -> StoreResult<()> {
            Ok(())
        }
    }

    /// An in-memory backup list, optionally failing every append.
    #[derive(Default)]
    pub(crate) struct MemoryBackup {
        pub(crate) records: Mutex<Vec<LocalBackupRecord>>,
        pub(crate) fail: bool,
    }

    impl MemoryBackup {
        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl BackupStore for MemoryBackup {
        async fn append(&self, record: &LocalBackupRecord) -> PortResult<()> {
            if self.fail {
                return Err(PortError::Unexpected("backup file unwritable".to_string()));
            }
            self.records.lock().await.push(record.clone());
            Ok(())
        }

        async fn list(&self) -> PortResult<Vec<LocalBackupRecord>> {
            Ok(self.records.lock().await.clone())
        }

        async fn remove(&self, local_id: &str) -> PortResult<()> {
            let mut records = self.records.lock().await;
            let before = records.len();
            records.retain(|record| record.local_id != local_id);
            if records.len() == before {
                return Err(PortError::NotFound(format!("Backup {} not found", local_id)));
            }
            Ok(())
        }

        async fn clear(&self) -> PortResult<()> {
            self.records.lock().await.clear();
            Ok(())
        }
    }

    /// A generator that always fails with the configured provider message.
    pub(crate) struct FailingGenerator {
        pub(crate) message: String,
    }

    #[async_trait]
    impl ContentGenerator for FailingGenerator {
        async fn generate(&self, _config: &GenerationConfig) -> PortResult<String> {
            Err(PortError::Provider(self.message.clone()))
        }
    }

    pub(crate) fn script_record(
        user_id: Uuid,
        topic: &str,
        is_calendar_entry: bool,
    ) -> ScriptRecord {
        let now = Utc::now();
        ScriptRecord {
            id: Uuid::new_v4(),
            user_id,
            platform: Platform::Youtube,
            topic: topic.to_string(),
            tone: "professional".to_string(),
            language: "english".to_string(),
            framework: None,
            audience: None,
            duration: ScriptDuration::Standard,
            content: format!("Content about {}", topic),
            scheduled_date: is_calendar_entry.then_some(now),
            is_calendar_entry,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn new_script(user_id: Uuid) -> NewScript {
        NewScript {
            user_id,
            platform: Platform::Youtube,
            topic: "morning routine".to_string(),
            tone: "casual".to_string(),
            language: "english".to_string(),
            framework: None,
            audience: None,
            duration: ScriptDuration::Standard,
            content: "One small win before your phone unlocks.".to_string(),
            scheduled_date: None,
            is_calendar_entry: false,
        }
    }

    pub(crate) fn test_config() -> Config {
        Config {
            bind_address: "127.0.0.1:0".parse().unwrap(),
            database_url: "postgres://localhost/scriptgo_test".to_string(),
            log_level: Level::INFO,
            cors_origin: "http://localhost:3000".to_string(),
            environment: "test".to_string(),
            google_api_key: None,
            openai_api_key: None,
            gemini_model: "gemini-1.5-flash".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            openai_batch_model: "gpt-3.5-turbo-0125".to_string(),
            backup_path: PathBuf::from("./scriptgo_backups.json"),
            backup_max_entries: None,
        }
    }

    pub(crate) fn state_with(
        store: Arc<ScriptedStore>,
        backup: Arc<MemoryBackup>,
    ) -> Arc<AppState> {
        Arc::new(AppState {
            store,
            backup,
            generator: Arc::new(DemoContentAdapter),
            batch_generator: Arc::new(DemoContentAdapter),
            config: Arc::new(test_config()),
        })
    }

    pub(crate) fn demo_state() -> Arc<AppState> {
        state_with(
            Arc::new(ScriptedStore::default()),
            Arc::new(MemoryBackup::default()),
        )
    }

    pub(crate) fn state_with_generator(generator: Arc<dyn ContentGenerator>) -> Arc<AppState> {
        Arc::new(AppState {
            store: Arc::new(ScriptedStore::default()),
            backup: Arc::new(MemoryBackup::default()),
            generator,
            batch_generator: Arc::new(DemoContentAdapter),
            config: Arc::new(test_config()),
        })
    }
}
