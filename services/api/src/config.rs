//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use scriptgo_core::ProviderCredentials;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    pub cors_origin: String,
    pub environment: String,
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub gemini_model: String,
    pub openai_model: String,
    pub openai_batch_model: String,
    pub backup_path: PathBuf,
    pub backup_max_entries: Option<usize>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server and Database Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin =
            std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        // --- Load Provider Keys (as optional) ---
        let google_api_key = std::env::var("GOOGLE_GENERATIVE_AI_API_KEY").ok();
        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();

        // --- Load Generation Settings ---
        let gemini_model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());
        let openai_model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let openai_batch_model = std::env::var("OPENAI_BATCH_MODEL")
            .unwrap_or_else(|_| "gpt-3.5-turbo-0125".to_string());

        // --- Load Backup Settings ---
        let backup_path = std::env::var("BACKUP_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./scriptgo_backups.json"));

        let backup_max_entries = match std::env::var("BACKUP_MAX_ENTRIES") {
            Ok(raw) => {
                let value = raw.parse::<usize>().map_err(|_| {
                    ConfigError::InvalidValue(
                        "BACKUP_MAX_ENTRIES".to_string(),
                        format!("'{}' is not a valid entry count", raw),
                    )
                })?;
                if value == 0 {
                    return Err(ConfigError::InvalidValue(
                        "BACKUP_MAX_ENTRIES".to_string(),
                        "must be at least 1".to_string(),
                    ));
                }
                Some(value)
            }
            Err(_) => None,
        };

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            cors_origin,
            environment,
            google_api_key,
            openai_api_key,
            gemini_model,
            openai_model,
            openai_batch_model,
            backup_path,
            backup_max_entries,
        })
    }

    /// The raw provider keys, ready for provider selection.
    pub fn provider_credentials(&self) -> ProviderCredentials {
        ProviderCredentials {
            google_api_key: self.google_api_key.clone(),
            openai_api_key: self.openai_api_key.clone(),
        }
    }
}
