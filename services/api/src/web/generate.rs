//! services/api/src/web/generate.rs
//!
//! Contains the Axum handlers for single-script and multi-day batch
//! generation. Both translate loose request keys into domain types, call the
//! configured generator port, and map provider failures onto the error
//! envelope. Throttled providers are answered with a structured recovery
//! draft instead of an error.

use crate::web::rest::{error_body, ErrorBody};
use crate::web::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use scriptgo_core::demo;
use scriptgo_core::domain::{GenerationConfig, Platform, PlannedScript, ScriptDuration};
use scriptgo_core::ports::PortError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;

//=========================================================================================
// Request Defaults
//=========================================================================================

pub(crate) fn default_platform() -> String {
    "youtube".to_string()
}

pub(crate) fn default_tone() -> String {
    "professional".to_string()
}

pub(crate) fn default_language() -> String {
    "english".to_string()
}

pub(crate) fn default_duration() -> String {
    "standard".to_string()
}

//=========================================================================================
// API Request and Response Structs
//=========================================================================================

/// The request payload for single-script generation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateRequest {
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
}

impl GenerateRequest {
    fn into_config(self) -> GenerationConfig {
        GenerationConfig {
            platform: Platform::from_key(&self.platform),
            topic: self.topic,
            tone: self.tone,
            language: self.language,
            framework: self.framework,
            audience: self.audience,
            duration: ScriptDuration::from_key(&self.duration),
        }
    }
}

/// The response payload carrying one generated script.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateResponse {
    pub content: String,
}

/// The request payload for multi-day batch generation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateBatchRequest {
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
    /// How many consecutive days the plan should cover.
    pub days: u32,
}

impl GenerateBatchRequest {
    fn into_config(self) -> (GenerationConfig, u32) {
        let days = self.days;
        let config = GenerationConfig {
            platform: Platform::from_key(&self.platform),
            topic: self.topic,
            tone: self.tone,
            language: self.language,
            framework: self.framework,
            audience: self.audience,
            duration: ScriptDuration::Standard,
        };
        (config, days)
    }
}

/// One entry of a generated plan.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlannedScriptDto {
    pub topic: String,
    pub content: String,
    pub scheduled_date: DateTime<Utc>,
}

impl From<PlannedScript> for PlannedScriptDto {
    fn from(script: PlannedScript) -> Self {
        Self {
            topic: script.topic,
            content: script.content,
            scheduled_date: script.scheduled_date,
        }
    }
}

/// The response payload carrying a generated plan.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateBatchResponse {
    pub scripts: Vec<PlannedScriptDto>,
}

//=========================================================================================
// Generation Handlers
//=========================================================================================

/// Generate one complete script for the requested configuration.
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Script generated successfully", body = GenerateResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 502, description = "The provider rejected the request", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn generate_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, Json<ErrorBody>)> {
    if request.topic.trim().is_empty() {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "Validation Failed",
            "topic must not be empty",
            "INVALID_REQUEST",
        ));
    }

    let config = request.into_config();
    info!(topic = %config.topic, tone = %config.tone, "Generating content for {}", config.platform);

    match app_state.generator.generate(&config).await {
        Ok(content) => {
            info!("Content generation successful");
            Ok(Json(GenerateResponse { content }))
        }
        Err(PortError::Provider(details)) if demo::is_throttle_error(&details) => {
            // A throttled provider still answers 200, with a structured draft.
            warn!(details = %details, "Provider throttled; serving the recovery template");
            Ok(Json(GenerateResponse {
                content: demo::recovery_template(&config.topic),
            }))
        }
        Err(PortError::Provider(details)) => {
            error!(details = %details, "Content generation failed");
            Err(error_body(
                StatusCode::BAD_GATEWAY,
                "Generation Failed",
                details,
                "PROVIDER_ERROR",
            ))
        }
        Err(e) => {
            error!("Content generation failed: {:?}", e);
            Err(error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Generation Failed",
                e.to_string(),
                "UNKNOWN_ERROR",
            ))
        }
    }
}

/// Generate a plan of consecutive daily scripts for one topic.
#[utoipa::path(
    post,
    path = "/api/generate-batch",
    request_body = GenerateBatchRequest,
    responses(
        (status = 200, description = "Plan generated successfully", body = GenerateBatchResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 502, description = "The provider rejected the request", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn generate_batch_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<GenerateBatchRequest>,
) -> Result<Json<GenerateBatchResponse>, (StatusCode, Json<ErrorBody>)> {
    if request.topic.trim().is_empty() {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "Validation Failed",
            "topic must not be empty",
            "INVALID_REQUEST",
        ));
    }
    if request.days == 0 {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "Validation Failed",
            "days must be at least 1",
            "INVALID_REQUEST",
        ));
    }

    let (config, days) = request.into_config();
    info!(platform = %config.platform, topic = %config.topic, "Starting batch generation for {} days", days);

    let start_date = Utc::now();
    match app_state
        .batch_generator
        .generate_batch(&config, days, start_date)
        .await
    {
        Ok(scripts) => {
            info!("Batch generation successful for {} days", days);
            Ok(Json(GenerateBatchResponse {
                scripts: scripts.into_iter().map(PlannedScriptDto::from).collect(),
            }))
        }
        Err(PortError::Provider(details)) => {
            error!(details = %details, "Batch generation failed");
            Err(error_body(
                StatusCode::BAD_GATEWAY,
                "Batch Generation Failed",
                details,
                "PROVIDER_ERROR",
            ))
        }
        Err(e) => {
            error!("Batch generation failed: {:?}", e);
            Err(error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Batch Generation Failed",
                e.to_string(),
                "UNKNOWN_ERROR",
            ))
        }
    }
}
