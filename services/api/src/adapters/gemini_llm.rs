//! services/api/src/adapters/gemini_llm.rs
//!
//! This module implements the `ContentGenerator` port against the Google
//! Gemini REST API. Gemini has no official Rust client, so the adapter
//! speaks the generateContent wire format directly over `reqwest`.

use async_trait::async_trait;
use scriptgo_core::domain::GenerationConfig;
use scriptgo_core::ports::{ContentGenerator, PortError, PortResult};
use scriptgo_core::prompts;
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";
const MAX_OUTPUT_TOKENS: u32 = 3000;
const TEMPERATURE: f32 = 0.7;

/// A content generation adapter backed by the Gemini REST API.
#[derive(Clone)]
pub struct GeminiContentAdapter {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiContentAdapter {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
        }
    }
}

//=========================================================================================
// Wire Format
//=========================================================================================

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationSettings,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationSettings {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

fn extract_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .unwrap_or_else(|| "No content generated".to_string())
}

//=========================================================================================
// `ContentGenerator` Trait Implementation
//=========================================================================================

#[async_trait]
impl ContentGenerator for GeminiContentAdapter {
    async fn generate(&self, config: &GenerationConfig) -> PortResult<String> {
        let system_prompt = prompts::assemble_system_prompt(config);
        let user_prompt = prompts::assemble_user_prompt(config);
        // The v1 API has no separate system role; both prompts travel in one part.
        let combined = format!("{}\n\nTask: {}", system_prompt, user_prompt);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: &combined }],
            }],
            generation_config: GenerationSettings {
                max_output_tokens: MAX_OUTPUT_TOKENS,
                temperature: TEMPERATURE,
            },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            BASE_URL, self.model, self.api_key
        );
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| PortError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let body = response
                .json::<ErrorBody>()
                .await
                .unwrap_or(ErrorBody { error: None });
            let message = body
                .error
                .and_then(|detail| detail.message)
                .unwrap_or_else(|| "Gemini API Error".to_string());
            return Err(PortError::Provider(message));
        }

        let body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| PortError::Provider(e.to_string()))?;
        Ok(extract_text(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_candidate_text_is_extracted() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"parts": [{"text": "A generated script."}]}},
                    {"content": {"parts": [{"text": "A second candidate."}]}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(extract_text(response), "A generated script.");
    }

    #[test]
    fn empty_candidates_fall_back_to_the_placeholder() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(extract_text(response), "No content generated");

        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": []}}]}"#).unwrap();
        assert_eq!(extract_text(response), "No content generated");
    }

    #[test]
    fn error_bodies_surface_their_message() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"error": {"code": 429, "message": "Resource has been exhausted"}}"#,
        )
        .unwrap();
        let message = body.error.and_then(|detail| detail.message);
        assert_eq!(message.as_deref(), Some("Resource has been exhausted"));
    }
}
