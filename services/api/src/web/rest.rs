//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the script and backup REST endpoints and
//! the master definition for the OpenAPI specification. Script writes go
//! through the persistence cascade, so a degraded database answers with a
//! successful status and an outcome describing where the data landed.

use crate::web::generate::{
    default_duration, default_language, default_platform, default_tone, GenerateBatchRequest,
    GenerateBatchResponse, GenerateRequest, GenerateResponse, PlannedScriptDto,
};
use crate::web::health::{HealthResponse, ProviderHealth, StoreHealth};
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use chrono::{DateTime, Utc};
use scriptgo_core::domain::{
    LocalBackupRecord, NewScript, Platform, ScriptDuration, ScriptRecord, ScriptUpdate,
};
use scriptgo_core::persistence::{
    save_with_fallback, update_with_fallback, PersistenceError, SaveOutcome,
};
use scriptgo_core::ports::{PortError, StoreError, StoreErrorKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::generate::generate_handler,
        crate::web::generate::generate_batch_handler,
        crate::web::health::health_handler,
        save_script_handler,
        update_script_handler,
        list_scripts_handler,
        get_script_handler,
        delete_script_handler,
        save_plan_handler,
        list_backups_handler,
        delete_backup_handler,
        clear_backups_handler,
    ),
    components(
        schemas(
            GenerateRequest,
            GenerateResponse,
            GenerateBatchRequest,
            GenerateBatchResponse,
            PlannedScriptDto,
            HealthResponse,
            StoreHealth,
            ProviderHealth,
            SaveScriptRequest,
            UpdateScriptRequest,
            SaveScriptResponse,
            ScriptDto,
            PlanEntry,
            SavePlanRequest,
            SavePlanResponse,
            BackupDto,
            ErrorBody
        )
    ),
    tags(
        (name = "ScriptGo API", description = "API endpoints for generating and managing short-form content scripts.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Error Envelope
//=========================================================================================

/// The error shape every endpoint answers with.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
    pub code: String,
}

pub fn error_body(
    status: StatusCode,
    error: &str,
    details: impl Into<String>,
    code: &str,
) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            details: details.into(),
            code: code.to_string(),
        }),
    )
}

fn require_user_id(headers: &HeaderMap) -> Result<Uuid, (StatusCode, Json<ErrorBody>)> {
    let raw = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            error_body(
                StatusCode::BAD_REQUEST,
                "Validation Failed",
                "x-user-id header is required",
                "INVALID_REQUEST",
            )
        })?;
    Uuid::parse_str(raw).map_err(|_| {
        error_body(
            StatusCode::BAD_REQUEST,
            "Validation Failed",
            "Invalid x-user-id format",
            "INVALID_REQUEST",
        )
    })
}

fn store_error_body(error: StoreError) -> (StatusCode, Json<ErrorBody>) {
    match error.kind {
        StoreErrorKind::NotFound => {
            error_body(StatusCode::NOT_FOUND, "Not Found", error.message, "NOT_FOUND")
        }
        _ => error_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Database Error",
            error.message,
            "STORE_ERROR",
        ),
    }
}

fn port_error_body(error: PortError) -> (StatusCode, Json<ErrorBody>) {
    match &error {
        PortError::NotFound(_) => error_body(
            StatusCode::NOT_FOUND,
            "Not Found",
            error.to_string(),
            "NOT_FOUND",
        ),
        _ => error_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Backup Error",
            error.to_string(),
            "BACKUP_ERROR",
        ),
    }
}

//=========================================================================================
// Script Persistence Structs
//=========================================================================================

/// The request payload for saving a new script.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveScriptRequest {
    #[serde(default = "default_platform")]
    pub platform: String,
    pub topic: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub framework: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default = "default_duration")]
    pub duration: String,
    pub content: String,
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_calendar_entry: bool,
}

impl SaveScriptRequest {
    fn into_new_script(self, user_id: Uuid) -> NewScript {
        NewScript {
            user_id,
            platform: Platform::from_key(&self.platform),
            topic: self.topic,
            tone: self.tone,
            language: self.language,
            framework: self.framework,
            audience: self.audience,
            duration: ScriptDuration::from_key(&self.duration),
            content: self.content,
            scheduled_date: self.scheduled_date,
            is_calendar_entry: self.is_calendar_entry,
        }
    }
}

/// The request payload for replacing an existing script.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateScriptRequest {
    #[serde(default = "default_platform")]
    pub platform: String,
    pub topic: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub framework: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default = "default_duration")]
    pub duration: String,
    pub content: String,
}

impl UpdateScriptRequest {
    fn into_update(self) -> ScriptUpdate {
        ScriptUpdate {
            platform: Platform::from_key(&self.platform),
            topic: self.topic,
            tone: self.tone,
            language: self.language,
            framework: self.framework,
            audience: self.audience,
            duration: ScriptDuration::from_key(&self.duration),
            content: self.content,
        }
    }
}

/// Reports where the persistence cascade landed a write.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaveScriptResponse {
    pub outcome: String,
    pub message: String,
}

fn outcome_response(outcome: SaveOutcome) -> SaveScriptResponse {
    let (outcome, message) = match outcome {
        SaveOutcome::RemoteFull => ("remote_full", "Saved to the database with full metadata."),
        SaveOutcome::RemoteCore => (
            "remote_core",
            "Schema drift detected; saved with core columns only.",
        ),
        SaveOutcome::LocalBackup => (
            "local_backup",
            "Database unavailable; saved to the local backup list.",
        ),
    };
    SaveScriptResponse {
        outcome: outcome.to_string(),
        message: message.to_string(),
    }
}

/// A stored script as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScriptDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub platform: String,
    pub topic: String,
    pub tone: String,
    pub language: String,
    pub framework: Option<String>,
    pub audience: Option<String>,
    pub duration: String,
    pub content: String,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub is_calendar_entry: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ScriptRecord> for ScriptDto {
    fn from(record: ScriptRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            platform: record.platform.as_str().to_string(),
            topic: record.topic,
            tone: record.tone,
            language: record.language,
            framework: record.framework,
            audience: record.audience,
            duration: record.duration.as_str().to_string(),
            content: record.content,
            scheduled_date: record.scheduled_date,
            is_calendar_entry: record.is_calendar_entry,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListScriptsParams {
    /// When true, only calendar entries are returned, ordered by date.
    #[serde(default)]
    pub calendar: bool,
}

//=========================================================================================
// Script Handlers
//=========================================================================================

/// Persist a script through the fallback cascade.
#[utoipa::path(
    post,
    path = "/api/scripts",
    request_body = SaveScriptRequest,
    params(
        ("x-user-id" = String, Header, description = "Identifier of the requesting user")
    ),
    responses(
        (status = 201, description = "Script persisted; the outcome names the tier that accepted it", body = SaveScriptResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 500, description = "Every persistence tier failed", body = ErrorBody)
    )
)]
pub async fn save_script_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<SaveScriptRequest>,
) -> Result<(StatusCode, Json<SaveScriptResponse>), (StatusCode, Json<ErrorBody>)> {
    let user_id = require_user_id(&headers)?;
    if request.topic.trim().is_empty() {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "Validation Failed",
            "topic must not be empty",
            "INVALID_REQUEST",
        ));
    }
    if request.content.trim().is_empty() {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "Validation Failed",
            "content must not be empty",
            "INVALID_REQUEST",
        ));
    }

    let script = request.into_new_script(user_id);
    match save_with_fallback(app_state.store.as_ref(), app_state.backup.as_ref(), &script).await {
        Ok(outcome) => {
            match outcome {
                SaveOutcome::RemoteFull => info!(topic = %script.topic, "Script saved"),
                SaveOutcome::RemoteCore => {
                    warn!(topic = %script.topic, "Schema drift detected; saved with core columns only")
                }
                SaveOutcome::LocalBackup => {
                    warn!(topic = %script.topic, "Database unavailable; script captured in the local backup list")
                }
            }
            Ok((StatusCode::CREATED, Json(outcome_response(outcome))))
        }
        Err(e) => {
            error!("Persistence cascade exhausted: {}", e);
            Err(error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Persistence Failed",
                format!("{}. Please copy your content manually.", e),
                "PERSISTENCE_FAILED",
            ))
        }
    }
}

/// Replace an existing script through the fallback cascade.
#[utoipa::path(
    put,
    path = "/api/scripts/{id}",
    request_body = UpdateScriptRequest,
    params(
        ("id" = Uuid, Path, description = "Identifier of the script to update")
    ),
    responses(
        (status = 200, description = "Script updated; the outcome names the tier that accepted it", body = SaveScriptResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "No script with this id", body = ErrorBody),
        (status = 500, description = "Every persistence tier failed", body = ErrorBody)
    )
)]
pub async fn update_script_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateScriptRequest>,
) -> Result<Json<SaveScriptResponse>, (StatusCode, Json<ErrorBody>)> {
    if request.topic.trim().is_empty() {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "Validation Failed",
            "topic must not be empty",
            "INVALID_REQUEST",
        ));
    }
    if request.content.trim().is_empty() {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "Validation Failed",
            "content must not be empty",
            "INVALID_REQUEST",
        ));
    }

    let update = request.into_update();
    match update_with_fallback(
        app_state.store.as_ref(),
        app_state.backup.as_ref(),
        id,
        &update,
    )
    .await
    {
        Ok(outcome) => {
            if outcome == SaveOutcome::RemoteCore {
                warn!(%id, "Schema drift detected; updated core columns only");
            }
            Ok(Json(outcome_response(outcome)))
        }
        Err(PersistenceError::NotFound(id)) => Err(error_body(
            StatusCode::NOT_FOUND,
            "Not Found",
            format!("Script {} not found", id),
            "NOT_FOUND",
        )),
        Err(e) => {
            error!(%id, "Persistence cascade exhausted: {}", e);
            Err(error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Persistence Failed",
                format!("{}. Please copy your content manually.", e),
                "PERSISTENCE_FAILED",
            ))
        }
    }
}

/// List the requesting user's scripts, newest first.
#[utoipa::path(
    get,
    path = "/api/scripts",
    params(
        ListScriptsParams,
        ("x-user-id" = String, Header, description = "Identifier of the requesting user")
    ),
    responses(
        (status = 200, description = "The user's scripts", body = [ScriptDto]),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 500, description = "The store rejected the query", body = ErrorBody)
    )
)]
pub async fn list_scripts_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<ListScriptsParams>,
    headers: HeaderMap,
) -> Result<Json<Vec<ScriptDto>>, (StatusCode, Json<ErrorBody>)> {
    let user_id = require_user_id(&headers)?;
    let result = if params.calendar {
        app_state.store.list_calendar_scripts(user_id).await
    } else {
        app_state.store.list_scripts(user_id).await
    };

    match result {
        Ok(records) => Ok(Json(records.into_iter().map(ScriptDto::from).collect())),
        Err(e) => {
            error!("Failed to list scripts: {}", e);
            Err(store_error_body(e))
        }
    }
}

/// Fetch one script by id.
#[utoipa::path(
    get,
    path = "/api/scripts/{id}",
    params(
        ("id" = Uuid, Path, description = "Identifier of the script to fetch")
    ),
    responses(
        (status = 200, description = "The requested script", body = ScriptDto),
        (status = 404, description = "No script with this id", body = ErrorBody),
        (status = 500, description = "The store rejected the query", body = ErrorBody)
    )
)]
pub async fn get_script_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScriptDto>, (StatusCode, Json<ErrorBody>)> {
    match app_state.store.get_script(id).await {
        Ok(record) => Ok(Json(ScriptDto::from(record))),
        Err(e) => Err(store_error_body(e)),
    }
}

/// Delete one script by id.
#[utoipa::path(
    delete,
    path = "/api/scripts/{id}",
    params(
        ("id" = Uuid, Path, description = "Identifier of the script to delete")
    ),
    responses(
        (status = 204, description = "Script deleted"),
        (status = 404, description = "No script with this id", body = ErrorBody),
        (status = 500, description = "The store rejected the delete", body = ErrorBody)
    )
)]
pub async fn delete_script_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ErrorBody>)> {
    match app_state.store.delete_script(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(store_error_body(e)),
    }
}

//=========================================================================================
// Plan Persistence
//=========================================================================================

/// One entry of a plan to persist.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlanEntry {
    pub topic: String,
    pub content: String,
    pub scheduled_date: DateTime<Utc>,
}

/// The request payload for saving a whole generated plan.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SavePlanRequest {
    pub scripts: Vec<PlanEntry>,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub framework: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SavePlanResponse {
    pub inserted: usize,
}

/// Persist a generated plan as calendar entries in one transaction.
#[utoipa::path(
    post,
    path = "/api/scripts/plan",
    request_body = SavePlanRequest,
    params(
        ("x-user-id" = String, Header, description = "Identifier of the requesting user")
    ),
    responses(
        (status = 201, description = "Plan persisted", body = SavePlanResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 500, description = "The store rejected the plan", body = ErrorBody)
    )
)]
pub async fn save_plan_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<SavePlanRequest>,
) -> Result<(StatusCode, Json<SavePlanResponse>), (StatusCode, Json<ErrorBody>)> {
    let user_id = require_user_id(&headers)?;
    let SavePlanRequest {
        scripts,
        platform,
        tone,
        language,
        framework,
        audience,
    } = request;
    if scripts.is_empty() {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "Validation Failed",
            "scripts must not be empty",
            "INVALID_REQUEST",
        ));
    }

    let platform = Platform::from_key(&platform);
    let new_scripts: Vec<NewScript> = scripts
        .into_iter()
        .map(|entry| NewScript {
            user_id,
            platform,
            topic: entry.topic,
            tone: tone.clone(),
            language: language.clone(),
            framework: framework.clone(),
            audience: audience.clone(),
            duration: ScriptDuration::Standard,
            content: entry.content,
            scheduled_date: Some(entry.scheduled_date),
            is_calendar_entry: true,
        })
        .collect();

    match app_state.store.insert_scripts(&new_scripts).await {
        Ok(()) => {
            info!(count = new_scripts.len(), "Calendar plan saved");
            Ok((
                StatusCode::CREATED,
                Json(SavePlanResponse {
                    inserted: new_scripts.len(),
                }),
            ))
        }
        Err(e) => {
            error!("Failed to save plan: {}", e);
            Err(store_error_body(e))
        }
    }
}

//=========================================================================================
// Backup Handlers
//=========================================================================================

/// A script held in the local backup list.
#[derive(Debug, Serialize, ToSchema)]
pub struct BackupDto {
    pub local_id: String,
    pub script_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub platform: String,
    pub topic: String,
    pub tone: String,
    pub language: String,
    pub framework: Option<String>,
    pub audience: Option<String>,
    pub duration: String,
    pub content: String,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub is_calendar_entry: bool,
    pub saved_at: DateTime<Utc>,
}

impl From<LocalBackupRecord> for BackupDto {
    fn from(record: LocalBackupRecord) -> Self {
        Self {
            local_id: record.local_id,
            script_id: record.script_id,
            user_id: record.user_id,
            platform: record.platform.as_str().to_string(),
            topic: record.topic,
            tone: record.tone,
            language: record.language,
            framework: record.framework,
            audience: record.audience,
            duration: record.duration.as_str().to_string(),
            content: record.content,
            scheduled_date: record.scheduled_date,
            is_calendar_entry: record.is_calendar_entry,
            saved_at: record.saved_at,
        }
    }
}

/// List every script captured in the local backup file.
#[utoipa::path(
    get,
    path = "/api/backups",
    responses(
        (status = 200, description = "All captured backups, oldest first", body = [BackupDto]),
        (status = 500, description = "The backup file could not be read", body = ErrorBody)
    )
)]
pub async fn list_backups_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<BackupDto>>, (StatusCode, Json<ErrorBody>)> {
    match app_state.backup.list().await {
        Ok(records) => Ok(Json(records.into_iter().map(BackupDto::from).collect())),
        Err(e) => {
            error!("Failed to list backups: {}", e);
            Err(port_error_body(e))
        }
    }
}

/// Remove one backup entry, typically after it was restored by hand.
#[utoipa::path(
    delete,
    path = "/api/backups/{local_id}",
    params(
        ("local_id" = String, Path, description = "Identifier of the backup entry to remove")
    ),
    responses(
        (status = 204, description = "Backup entry removed"),
        (status = 404, description = "No backup with this id", body = ErrorBody),
        (status = 500, description = "The backup file could not be written", body = ErrorBody)
    )
)]
pub async fn delete_backup_handler(
    State(app_state): State<Arc<AppState>>,
    Path(local_id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorBody>)> {
    match app_state.backup.remove(&local_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(port_error_body(e)),
    }
}

/// Drop every backup entry.
#[utoipa::path(
    delete,
    path = "/api/backups",
    responses(
        (status = 204, description = "Backup list cleared"),
        (status = 500, description = "The backup file could not be written", body = ErrorBody)
    )
)]
pub async fn clear_backups_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<StatusCode, (StatusCode, Json<ErrorBody>)> {
    match app_state.backup.clear().await {
        Ok(()) => {
            info!("Local backup list cleared");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            error!("Failed to clear backups: {}", e);
            Err(port_error_body(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::testing::{new_script, script_record, state_with, MemoryBackup, ScriptedStore};
    use scriptgo_core::persistence::local_backup_id;
    use std::sync::atomic::Ordering;

    fn user_headers(user_id: Uuid) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", user_id.to_string().parse().unwrap());
        headers
    }

    fn save_request() -> SaveScriptRequest {
        SaveScriptRequest {
            platform: "youtube".to_string(),
            topic: "morning routine".to_string(),
            tone: "casual".to_string(),
            language: "english".to_string(),
            framework: None,
            audience: None,
            duration: "standard".to_string(),
            content: "One small win before your phone unlocks.".to_string(),
            scheduled_date: None,
            is_calendar_entry: false,
        }
    }

    fn update_request() -> UpdateScriptRequest {
        UpdateScriptRequest {
            platform: "youtube".to_string(),
            topic: "morning routine".to_string(),
            tone: "casual".to_string(),
            language: "english".to_string(),
            framework: None,
            audience: None,
            duration: "standard".to_string(),
            content: "One small win before your phone unlocks.".to_string(),
        }
    }

    #[tokio::test]
    async fn saving_lands_on_the_full_insert_first() {
        let store = Arc::new(ScriptedStore::default());
        let backup = Arc::new(MemoryBackup::default());
        let app_state = state_with(store.clone(), backup);

        let (status, Json(body)) = save_script_handler(
            State(app_state),
            user_headers(Uuid::new_v4()),
            Json(save_request()),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.outcome, "remote_full");
        assert_eq!(store.full_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.core_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn schema_drift_retries_with_core_columns() {
        let store = Arc::new(ScriptedStore::with_errors(
            Some(StoreError::schema_drift("column \"framework\" does not exist")),
            None,
        ));
        let backup = Arc::new(MemoryBackup::default());
        let app_state = state_with(store.clone(), backup.clone());

        let (status, Json(body)) = save_script_handler(
            State(app_state),
            user_headers(Uuid::new_v4()),
            Json(save_request()),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.outcome, "remote_core");
        assert_eq!(store.full_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.core_calls.load(Ordering::SeqCst), 1);
        assert!(backup.records.lock().await.is_empty());
    }

    #[tokio::test]
    async fn connection_failures_land_in_the_backup_list() {
        let store = Arc::new(ScriptedStore::with_errors(
            Some(StoreError::connection("connection refused")),
            None,
        ));
        let backup = Arc::new(MemoryBackup::default());
        let app_state = state_with(store.clone(), backup.clone());

        let (status, Json(body)) = save_script_handler(
            State(app_state),
            user_headers(Uuid::new_v4()),
            Json(save_request()),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.outcome, "local_backup");
        assert_eq!(store.core_calls.load(Ordering::SeqCst), 0);
        assert_eq!(backup.records.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn an_exhausted_cascade_reports_500() {
        let store = Arc::new(ScriptedStore::with_errors(
            Some(StoreError::connection("connection refused")),
            None,
        ));
        let backup = Arc::new(MemoryBackup::failing());
        let app_state = state_with(store, backup);

        let (status, Json(body)) = save_script_handler(
            State(app_state),
            user_headers(Uuid::new_v4()),
            Json(save_request()),
        )
        .await
        .unwrap_err();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "PERSISTENCE_FAILED");
        assert!(body.details.contains("copy your content manually"));
    }

    #[tokio::test]
    async fn saving_requires_the_user_header() {
        let app_state = state_with(
            Arc::new(ScriptedStore::default()),
            Arc::new(MemoryBackup::default()),
        );

        let (status, Json(body)) =
            save_script_handler(State(app_state), HeaderMap::new(), Json(save_request()))
                .await
                .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_REQUEST");
        assert_eq!(body.details, "x-user-id header is required");
    }

    #[tokio::test]
    async fn updating_a_missing_script_is_404() {
        let store = Arc::new(ScriptedStore::with_errors(
            Some(StoreError::not_found("Script not found")),
            None,
        ));
        let backup = Arc::new(MemoryBackup::default());
        let app_state = state_with(store, backup.clone());

        let (status, Json(body)) =
            update_script_handler(State(app_state), Path(Uuid::new_v4()), Json(update_request()))
                .await
                .unwrap_err();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "NOT_FOUND");
        // A missing script never lands in the backup list.
        assert!(backup.records.lock().await.is_empty());
    }

    #[tokio::test]
    async fn the_calendar_flag_switches_the_listing() {
        let user_id = Uuid::new_v4();
        let store = Arc::new(ScriptedStore::with_records(vec![
            script_record(user_id, "daily vlog", false),
            script_record(user_id, "launch teaser", true),
            script_record(Uuid::new_v4(), "someone else's", false),
        ]));
        let app_state = state_with(store, Arc::new(MemoryBackup::default()));

        let Json(all) = list_scripts_handler(
            State(app_state.clone()),
            Query(ListScriptsParams { calendar: false }),
            user_headers(user_id),
        )
        .await
        .unwrap();
        assert_eq!(all.len(), 2);

        let Json(calendar) = list_scripts_handler(
            State(app_state),
            Query(ListScriptsParams { calendar: true }),
            user_headers(user_id),
        )
        .await
        .unwrap();
        assert_eq!(calendar.len(), 1);
        assert_eq!(calendar[0].topic, "launch teaser");
        assert!(calendar[0].is_calendar_entry);
    }

    #[tokio::test]
    async fn scripts_can_be_fetched_by_id() {
        let user_id = Uuid::new_v4();
        let record = script_record(user_id, "daily vlog", false);
        let id = record.id;
        let store = Arc::new(ScriptedStore::with_records(vec![record]));
        let app_state = state_with(store, Arc::new(MemoryBackup::default()));

        let Json(dto) = get_script_handler(State(app_state.clone()), Path(id))
            .await
            .unwrap();
        assert_eq!(dto.topic, "daily vlog");
        assert_eq!(dto.platform, "youtube");

        let (status, Json(body)) = get_script_handler(State(app_state), Path(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn plans_insert_every_entry_in_one_call() {
        let store = Arc::new(ScriptedStore::default());
        let app_state = state_with(store.clone(), Arc::new(MemoryBackup::default()));
        let request = SavePlanRequest {
            scripts: (1..=3)
                .map(|day| PlanEntry {
                    topic: format!("launch - Day {}", day),
                    content: format!("Script for day {}", day),
                    scheduled_date: Utc::now() + chrono::Duration::days(day),
                })
                .collect(),
            platform: "linkedin".to_string(),
            tone: "professional".to_string(),
            language: "english".to_string(),
            framework: None,
            audience: None,
        };

        let (status, Json(body)) =
            save_plan_handler(State(app_state), user_headers(Uuid::new_v4()), Json(request))
                .await
                .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.inserted, 3);
        assert_eq!(store.bulk_inserted.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn empty_plans_are_rejected() {
        let app_state = state_with(
            Arc::new(ScriptedStore::default()),
            Arc::new(MemoryBackup::default()),
        );
        let request = SavePlanRequest {
            scripts: Vec::new(),
            platform: "youtube".to_string(),
            tone: "professional".to_string(),
            language: "english".to_string(),
            framework: None,
            audience: None,
        };

        let (status, Json(body)) =
            save_plan_handler(State(app_state), user_headers(Uuid::new_v4()), Json(request))
                .await
                .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn backups_flow_through_list_delete_and_clear() {
        let backup = Arc::new(MemoryBackup::default());
        let now = Utc::now();
        for (index, script) in [new_script(Uuid::new_v4()), new_script(Uuid::new_v4())]
            .iter()
            .enumerate()
        {
            let record = LocalBackupRecord::from_new(
                script,
                format!("{}_{}", local_backup_id(now), index),
                now,
            );
            backup.records.lock().await.push(record);
        }
        let app_state = state_with(Arc::new(ScriptedStore::default()), backup.clone());

        let Json(listed) = list_backups_handler(State(app_state.clone())).await.unwrap();
        assert_eq!(listed.len(), 2);
        let first_id = listed[0].local_id.clone();

        let status = delete_backup_handler(State(app_state.clone()), Path(first_id))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(backup.records.lock().await.len(), 1);

        let (status, Json(body)) =
            delete_backup_handler(State(app_state.clone()), Path("local_unknown".to_string()))
                .await
                .unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "NOT_FOUND");

        let status = clear_backups_handler(State(app_state)).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(backup.records.lock().await.is_empty());
    }
}
