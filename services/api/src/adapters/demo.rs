//! services/api/src/adapters/demo.rs
//!
//! Offline implementations of the generation ports. Selected at startup when
//! no usable provider credentials are configured, so the whole pipeline stays
//! operable without a single external call.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scriptgo_core::demo;
use scriptgo_core::domain::{GenerationConfig, PlannedScript};
use scriptgo_core::ports::{BatchContentGenerator, ContentGenerator, PortResult};
use tracing::warn;

/// A generation adapter that serves curated demo content.
#[derive(Clone, Default)]
pub struct DemoContentAdapter;

#[async_trait]
impl ContentGenerator for DemoContentAdapter {
    async fn generate(&self, config: &GenerationConfig) -> PortResult<String> {
        warn!(
            language = %config.language,
            duration = %config.duration,
            "Using demo mode"
        );
        Ok(demo::demo_content(
            &config.topic,
            config.platform,
            &config.language,
            config.duration,
        ))
    }
}

#[async_trait]
impl BatchContentGenerator for DemoContentAdapter {
    async fn generate_batch(
        &self,
        config: &GenerationConfig,
        days: u32,
        start_date: DateTime<Utc>,
    ) -> PortResult<Vec<PlannedScript>> {
        warn!(days, "Batch generation running in demo mode");
        Ok(demo::demo_batch(
            &config.topic,
            config.platform,
            days,
            start_date,
        ))
    }
}
