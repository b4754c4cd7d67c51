//! services/api/src/adapters/openai_llm.rs
//!
//! This module contains the OpenAI-backed generation adapters. It implements
//! both the `ContentGenerator` port (one script per request) and the
//! `BatchContentGenerator` port (a multi-day JSON plan per request) from the
//! `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use scriptgo_core::{
    domain::{GenerationConfig, PlannedScript},
    ports::{BatchContentGenerator, ContentGenerator, PortError, PortResult},
    prompts,
};
use serde::Deserialize;

const MAX_TOKENS: u32 = 3000;
const TEMPERATURE: f32 = 0.7;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the generation ports using the OpenAI API.
#[derive(Clone)]
pub struct OpenAiContentAdapter {
    client: Client<OpenAIConfig>,
    model: String,
    batch_model: String,
}

impl OpenAiContentAdapter {
    /// Creates a new `OpenAiContentAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String, batch_model: String) -> Self {
        Self {
            client,
            model,
            batch_model,
        }
    }
}

//=========================================================================================
// `ContentGenerator` Trait Implementation
//=========================================================================================

#[async_trait]
impl ContentGenerator for OpenAiContentAdapter {
    /// Generates one complete script from the assembled system and user prompts.
    async fn generate(&self, config: &GenerationConfig) -> PortResult<String> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(prompts::assemble_system_prompt(config))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompts::assemble_user_prompt(config))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(MAX_TOKENS)
            .temperature(TEMPERATURE)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Provider(e.to_string()))?;

        // Extract the text content from the first choice in the response.
        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(content) = choice.message.content {
                Ok(content)
            } else {
                Err(PortError::Provider(
                    "Generation response contained no text content.".to_string(),
                ))
            }
        } else {
            Err(PortError::Provider(
                "Generation returned no choices in its response.".to_string(),
            ))
        }
    }
}

//=========================================================================================
// `BatchContentGenerator` Trait Implementation
//=========================================================================================

/// The JSON object the batch model is instructed to return.
#[derive(Deserialize)]
struct BatchPayload {
    #[serde(default)]
    scripts: Vec<RawPlannedScript>,
}

#[derive(Deserialize)]
struct RawPlannedScript {
    topic: String,
    content: String,
    #[serde(default)]
    scheduled_date: Option<String>,
}

/// Accepts both full timestamps and plain dates from the model. Entries the
/// model dated badly fall back to their position in the plan.
fn parse_scheduled_date(
    raw: Option<&str>,
    start_date: DateTime<Utc>,
    index: usize,
) -> DateTime<Utc> {
    if let Some(raw) = raw {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return parsed.with_timezone(&Utc);
        }
        if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            if let Some(naive) = parsed.and_hms_opt(0, 0, 0) {
                return DateTime::from_naive_utc_and_offset(naive, Utc);
            }
        }
    }
    start_date + Duration::days(index as i64)
}

#[async_trait]
impl BatchContentGenerator for OpenAiContentAdapter {
    /// Generates a multi-day plan in one JSON-mode request.
    async fn generate_batch(
        &self,
        config: &GenerationConfig,
        days: u32,
        start_date: DateTime<Utc>,
    ) -> PortResult<Vec<PlannedScript>> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(prompts::assemble_system_prompt(config))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompts::assemble_batch_user_prompt(config, days, start_date))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.batch_model)
            .messages(messages)
            .response_format(ResponseFormat::JsonObject)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Provider(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Provider("Batch generation returned no content.".to_string())
            })?;

        let payload: BatchPayload = serde_json::from_str(&content).map_err(|e| {
            PortError::Provider(format!("Batch response was not valid JSON: {}", e))
        })?;

        Ok(payload
            .scripts
            .into_iter()
            .enumerate()
            .map(|(index, raw)| PlannedScript {
                scheduled_date: parse_scheduled_date(
                    raw.scheduled_date.as_deref(),
                    start_date,
                    index,
                ),
                topic: raw.topic,
                content: raw.content,
            })
            .collect())
    }
}
