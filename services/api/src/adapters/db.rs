//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `ScriptStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.
//!
//! Errors are classified into [`StoreErrorKind`] here, at the edge, so the save
//! cascade in the core crate never has to inspect database error strings itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scriptgo_core::domain::{
    normalize_stored_content, CoreScript, NewScript, Platform, ScriptDuration, ScriptRecord,
    ScriptUpdate,
};
use scriptgo_core::ports::{ScriptStore, StoreError, StoreResult};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `ScriptStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// Error Classification
//=========================================================================================

fn map_store_error(error: sqlx::Error) -> StoreError {
    match &error {
        sqlx::Error::RowNotFound => StoreError::not_found("Script not found"),
        sqlx::Error::Database(db_error) => {
            let code = db_error.code().map(|code| code.to_string());
            classify_database_error(db_error.message(), code.as_deref())
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::connection(error.to_string()),
        _ => StoreError::other(error.to_string()),
    }
}

/// Postgres reports a missing column as SQLSTATE 42703. The message checks
/// cover managed proxies that only relay the error text.
fn classify_database_error(message: &str, code: Option<&str>) -> StoreError {
    if code == Some("42703") {
        return StoreError::schema_drift(message);
    }
    let lowered = message.to_lowercase();
    if lowered.contains("column") || lowered.contains("schema cache") {
        return StoreError::schema_drift(message);
    }
    if code.is_some_and(|code| code.starts_with("08")) {
        return StoreError::connection(message);
    }
    StoreError::other(message)
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

/// Every column of the `scripts` table, in table order.
const SCRIPT_COLUMNS: &str = "id, user_id, platform, topic, tone, language, framework, audience, \
                              duration, content, scheduled_date, is_calendar_entry, created_at, \
                              updated_at";

const INSERT_FULL_SQL: &str = "INSERT INTO scripts \
    (id, user_id, platform, topic, tone, language, framework, audience, duration, content, \
     scheduled_date, is_calendar_entry) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)";

/// Rows written by the core-column fallback leave the metadata columns NULL,
/// so everything optional is read back as `Option` and defaulted in
/// `to_domain`.
#[derive(FromRow)]
struct ScriptRow {
    id: Uuid,
    user_id: Uuid,
    platform: String,
    topic: String,
    tone: Option<String>,
    language: Option<String>,
    framework: Option<String>,
    audience: Option<String>,
    duration: Option<String>,
    content: String,
    scheduled_date: Option<DateTime<Utc>>,
    is_calendar_entry: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ScriptRow {
    fn to_domain(self) -> ScriptRecord {
        ScriptRecord {
            id: self.id,
            user_id: self.user_id,
            platform: Platform::from_key(&self.platform),
            topic: self.topic,
            tone: self
                .tone
                .filter(|tone| !tone.trim().is_empty())
                .unwrap_or_else(|| "professional".to_string()),
            language: self
                .language
                .filter(|language| !language.trim().is_empty())
                .unwrap_or_else(|| "english".to_string()),
            framework: self.framework.filter(|framework| !framework.trim().is_empty()),
            audience: self.audience.filter(|audience| !audience.trim().is_empty()),
            duration: ScriptDuration::from_key(self.duration.as_deref().unwrap_or("standard")),
            content: normalize_stored_content(&self.content),
            scheduled_date: self.scheduled_date,
            is_calendar_entry: self.is_calendar_entry,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

//=========================================================================================
// `ScriptStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ScriptStore for DbAdapter {
    async fn insert_script(&self, script: &NewScript) -> StoreResult<()> {
        sqlx::query(INSERT_FULL_SQL)
            .bind(Uuid::new_v4())
            .bind(script.user_id)
            .bind(script.platform.as_str())
            .bind(&script.topic)
            .bind(&script.tone)
            .bind(&script.language)
            .bind(script.framework.as_deref())
            .bind(script.audience.as_deref())
            .bind(script.duration.as_str())
            .bind(&script.content)
            .bind(script.scheduled_date)
            .bind(script.is_calendar_entry)
            .execute(&self.pool)
            .await
            .map_err(map_store_error)?;
        Ok(())
    }

    async fn insert_script_core(&self, script: &CoreScript) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO scripts (id, user_id, platform, topic, content) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(script.user_id)
        .bind(script.platform.as_str())
        .bind(&script.topic)
        .bind(&script.content)
        .execute(&self.pool)
        .await
        .map_err(map_store_error)?;
        Ok(())
    }

    async fn insert_scripts(&self, scripts: &[NewScript]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_store_error)?;
        for script in scripts {
            sqlx::query(INSERT_FULL_SQL)
                .bind(Uuid::new_v4())
                .bind(script.user_id)
                .bind(script.platform.as_str())
                .bind(&script.topic)
                .bind(&script.tone)
                .bind(&script.language)
                .bind(script.framework.as_deref())
                .bind(script.audience.as_deref())
                .bind(script.duration.as_str())
                .bind(&script.content)
                .bind(script.scheduled_date)
                .bind(script.is_calendar_entry)
                .execute(&mut *tx)
                .await
                .map_err(map_store_error)?;
        }
        tx.commit().await.map_err(map_store_error)?;
        Ok(())
    }

    async fn update_script(&self, id: Uuid, update: &ScriptUpdate) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE scripts SET platform = $1, topic = $2, tone = $3, language = $4, \
             framework = $5, audience = $6, duration = $7, content = $8, updated_at = now() \
             WHERE id = $9",
        )
        .bind(update.platform.as_str())
        .bind(&update.topic)
        .bind(&update.tone)
        .bind(&update.language)
        .bind(update.framework.as_deref())
        .bind(update.audience.as_deref())
        .bind(update.duration.as_str())
        .bind(&update.content)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_store_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("Script {} not found", id)));
        }
        Ok(())
    }

    async fn update_script_core(&self, id: Uuid, topic: &str, content: &str) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE scripts SET topic = $1, content = $2, updated_at = now() WHERE id = $3",
        )
        .bind(topic)
        .bind(content)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_store_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("Script {} not found", id)));
        }
        Ok(())
    }

    async fn get_script(&self, id: Uuid) -> StoreResult<ScriptRecord> {
        let sql = format!("SELECT {} FROM scripts WHERE id = $1", SCRIPT_COLUMNS);
        let record = sqlx::query_as::<_, ScriptRow>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => {
                    StoreError::not_found(format!("Script {} not found", id))
                }
                other => map_store_error(other),
            })?;
        Ok(record.to_domain())
    }

    async fn list_scripts(&self, user_id: Uuid) -> StoreResult<Vec<ScriptRecord>> {
        let sql = format!(
            "SELECT {} FROM scripts WHERE user_id = $1 ORDER BY created_at DESC",
            SCRIPT_COLUMNS
        );
        let records = sqlx::query_as::<_, ScriptRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_store_error)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn list_calendar_scripts(&self, user_id: Uuid) -> StoreResult<Vec<ScriptRecord>> {
        let sql = format!(
            "SELECT {} FROM scripts WHERE user_id = $1 AND is_calendar_entry = TRUE \
             ORDER BY scheduled_date ASC",
            SCRIPT_COLUMNS
        );
        let records = sqlx::query_as::<_, ScriptRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_store_error)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn delete_script(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM scripts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_store_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("Script {} not found", id)));
        }
        Ok(())
    }

    async fn probe(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_store_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptgo_core::ports::StoreErrorKind;

    #[test]
    fn missing_column_code_classifies_as_schema_drift() {
        let error = classify_database_error(r#"column "framework" of relation "scripts" does not exist"#, Some("42703"));
        assert_eq!(error.kind, StoreErrorKind::SchemaDrift);
    }

    #[test]
    fn schema_cache_message_classifies_as_schema_drift() {
        let error = classify_database_error(
            "Could not find the 'audience' column of 'scripts' in the schema cache",
            None,
        );
        assert_eq!(error.kind, StoreErrorKind::SchemaDrift);
    }

    #[test]
    fn column_match_is_case_insensitive() {
        let error = classify_database_error("Column does not exist", None);
        assert_eq!(error.kind, StoreErrorKind::SchemaDrift);
    }

    #[test]
    fn connection_class_codes_classify_as_connection() {
        let error = classify_database_error("connection failure", Some("08006"));
        assert_eq!(error.kind, StoreErrorKind::Connection);
    }

    #[test]
    fn unrelated_errors_classify_as_other() {
        let error = classify_database_error("deadlock detected", Some("40P01"));
        assert_eq!(error.kind, StoreErrorKind::Other);
    }
}
