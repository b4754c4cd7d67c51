//! services/api/src/web/health.rs
//!
//! Contains the diagnostics endpoint. It reports which pieces of the stack
//! are configured and reachable so a misbehaving deployment can be triaged
//! from one response instead of log archaeology.

use crate::web::state::AppState;
use axum::{extract::State, response::Json};
use scriptgo_core::credentials::ProviderChoice;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

//=========================================================================================
// API Response Structs
//=========================================================================================

/// Connectivity details for the script store.
#[derive(Serialize, ToSchema)]
pub struct StoreHealth {
    pub configured: bool,
    pub connection: String,
}

/// Presence details for one provider credential.
#[derive(Serialize, ToSchema)]
pub struct ProviderHealth {
    pub has_key: bool,
    /// First characters of the configured key, enough to recognize it
    /// without leaking it.
    pub key_prefix: Option<String>,
}

/// The full diagnostics snapshot.
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub store: StoreHealth,
    pub google: ProviderHealth,
    pub openai: ProviderHealth,
    pub demo_mode: bool,
    pub environment: String,
}

fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{}...", prefix)
}

fn provider_health(key: Option<&str>) -> ProviderHealth {
    ProviderHealth {
        has_key: key.is_some(),
        key_prefix: key.map(mask_key),
    }
}

//=========================================================================================
// Health Handler
//=========================================================================================

/// Report configuration presence and store connectivity.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Diagnostics snapshot", body = HealthResponse)
    )
)]
pub async fn health_handler(State(app_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let connection = match app_state.store.probe().await {
        Ok(()) => "Success".to_string(),
        Err(e) => format!("Error: {}", e),
    };

    let credentials = app_state.config.provider_credentials();
    let demo_mode = matches!(credentials.resolve(), ProviderChoice::Demo);

    Json(HealthResponse {
        store: StoreHealth {
            configured: !app_state.config.database_url.is_empty(),
            connection,
        },
        google: provider_health(app_state.config.google_api_key.as_deref()),
        openai: provider_health(app_state.config.openai_api_key.as_deref()),
        demo_mode,
        environment: app_state.config.environment.clone(),
    })
}
