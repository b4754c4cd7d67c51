//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{
        backup::JsonBackupAdapter, db::DbAdapter, demo::DemoContentAdapter,
        gemini_llm::GeminiContentAdapter, openai_llm::OpenAiContentAdapter,
    },
    config::Config,
    error::ApiError,
    web::{
        clear_backups_handler, delete_backup_handler, delete_script_handler,
        generate_batch_handler, generate_handler, get_script_handler, health_handler,
        list_backups_handler, list_scripts_handler, rest::ApiDoc, save_plan_handler,
        save_script_handler, state::AppState, update_script_handler,
    },
};
use async_openai::{config::OpenAIConfig, Client};
use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderName, HeaderValue, Method,
    },
    routing::{delete, get, post},
    Router,
};
use scriptgo_core::credentials::ProviderChoice;
use scriptgo_core::ports::{BatchContentGenerator, ContentGenerator};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let store = Arc::new(DbAdapter::new(db_pool));
    info!("Running database migrations...");
    store.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Initialize the Backup and Generation Adapters ---
    let backup = Arc::new(JsonBackupAdapter::new(
        config.backup_path.clone(),
        config.backup_max_entries,
    ));

    let credentials = config.provider_credentials();
    let generator: Arc<dyn ContentGenerator> = match credentials.resolve() {
        ProviderChoice::Google { api_key } => {
            info!("Using Google Gemini for generation");
            Arc::new(GeminiContentAdapter::new(
                api_key,
                config.gemini_model.clone(),
            ))
        }
        ProviderChoice::OpenAi { api_key } => {
            info!("Using OpenAI for generation");
            let client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));
            Arc::new(OpenAiContentAdapter::new(
                client,
                config.openai_model.clone(),
                config.openai_batch_model.clone(),
            ))
        }
        ProviderChoice::Demo => {
            warn!("No usable provider credentials found; generation runs in demo mode");
            Arc::new(DemoContentAdapter)
        }
    };

    let batch_generator: Arc<dyn BatchContentGenerator> = match credentials.resolve_batch() {
        ProviderChoice::OpenAi { api_key } => {
            info!("Using OpenAI for batch generation");
            let client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));
            Arc::new(OpenAiContentAdapter::new(
                client,
                config.openai_model.clone(),
                config.openai_batch_model.clone(),
            ))
        }
        _ => {
            warn!("Batch generation requires an OpenAI key; plans will use demo content");
            Arc::new(DemoContentAdapter)
        }
    };

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        store,
        backup,
        generator,
        batch_generator,
        config: config.clone(),
    });

    // --- 5. Configure CORS for the Browser Client ---
    let cors_origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|e| ApiError::Internal(format!("Invalid CORS origin '{}': {}", config.cors_origin, e)))?;
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, ACCEPT, HeaderName::from_static("x-user-id")]);

    // --- 6. Create the Web Router ---
    let api_router = Router::new()
        .route("/api/generate", post(generate_handler))
        .route("/api/generate-batch", post(generate_batch_handler))
        .route("/api/health", get(health_handler))
        .route(
            "/api/scripts",
            post(save_script_handler).get(list_scripts_handler),
        )
        .route("/api/scripts/plan", post(save_plan_handler))
        .route(
            "/api/scripts/{id}",
            get(get_script_handler)
                .put(update_script_handler)
                .delete(delete_script_handler),
        )
        .route(
            "/api/backups",
            get(list_backups_handler).delete(clear_backups_handler),
        )
        .route("/api/backups/{local_id}", delete(delete_backup_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 7. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
