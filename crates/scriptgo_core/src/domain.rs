//! crates/scriptgo_core/src/domain.rs
//!
//! Defines the core data structures for the application.
//! These structs are independent of any database schema; the serde derives
//! exist so backup files and enum keys serialize with stable lowercase names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The publishing platform a script is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Linkedin,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Linkedin => "linkedin",
        }
    }

    /// Parses a platform key, falling back to YouTube for unknown values.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "linkedin" => Platform::Linkedin,
            _ => Platform::Youtube,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The requested length band for a generated script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptDuration {
    Short,
    #[default]
    Standard,
    Long,
}

impl ScriptDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptDuration::Short => "short",
            ScriptDuration::Standard => "standard",
            ScriptDuration::Long => "long",
        }
    }

    /// Parses a duration key, falling back to the standard band.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "short" => ScriptDuration::Short,
            "long" => ScriptDuration::Long,
            _ => ScriptDuration::Standard,
        }
    }
}

impl fmt::Display for ScriptDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the prompt assembler needs to describe one generation request.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub platform: Platform,
    pub topic: String,
    pub tone: String,
    pub language: String,
    pub framework: Option<String>,
    pub audience: Option<String>,
    pub duration: ScriptDuration,
}

/// A script as it exists in the store.
#[derive(Debug, Clone)]
pub struct ScriptRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub platform: Platform,
    pub topic: String,
    pub tone: String,
    pub language: String,
    pub framework: Option<String>,
    pub audience: Option<String>,
    pub duration: ScriptDuration,
    pub content: String,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub is_calendar_entry: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The full payload for inserting a new script.
#[derive(Debug, Clone)]
pub struct NewScript {
    pub user_id: Uuid,
    pub platform: Platform,
    pub topic: String,
    pub tone: String,
    pub language: String,
    pub framework: Option<String>,
    pub audience: Option<String>,
    pub duration: ScriptDuration,
    pub content: String,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub is_calendar_entry: bool,
}

impl NewScript {
    /// The reduced column set used when the full insert hits schema drift.
    pub fn to_core(&self) -> CoreScript {
        CoreScript {
            user_id: self.user_id,
            platform: self.platform,
            topic: self.topic.clone(),
            content: self.content.clone(),
        }
    }
}

/// The minimal set of columns that must survive any schema drift.
#[derive(Debug, Clone)]
pub struct CoreScript {
    pub user_id: Uuid,
    pub platform: Platform,
    pub topic: String,
    pub content: String,
}

/// The full payload for updating an existing script.
#[derive(Debug, Clone)]
pub struct ScriptUpdate {
    pub platform: Platform,
    pub topic: String,
    pub tone: String,
    pub language: String,
    pub framework: Option<String>,
    pub audience: Option<String>,
    pub duration: ScriptDuration,
    pub content: String,
}

/// One entry of a multi-day content plan.
#[derive(Debug, Clone)]
pub struct PlannedScript {
    pub topic: String,
    pub content: String,
    pub scheduled_date: DateTime<Utc>,
}

/// A script captured in the local backup file after the store rejected it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalBackupRecord {
    pub local_id: String,
    /// Set when the backup captures an update of an existing script.
    pub script_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub platform: Platform,
    pub topic: String,
    pub tone: String,
    pub language: String,
    pub framework: Option<String>,
    pub audience: Option<String>,
    pub duration: ScriptDuration,
    pub content: String,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub is_calendar_entry: bool,
    pub saved_at: DateTime<Utc>,
}

impl LocalBackupRecord {
    /// Captures a failed insert.
    pub fn from_new(script: &NewScript, local_id: String, saved_at: DateTime<Utc>) -> Self {
        Self {
            local_id,
            script_id: None,
            user_id: Some(script.user_id),
            platform: script.platform,
            topic: script.topic.clone(),
            tone: script.tone.clone(),
            language: script.language.clone(),
            framework: script.framework.clone(),
            audience: script.audience.clone(),
            duration: script.duration,
            content: script.content.clone(),
            scheduled_date: script.scheduled_date,
            is_calendar_entry: script.is_calendar_entry,
            saved_at,
        }
    }

    /// Captures a failed update of the script identified by `script_id`.
    pub fn from_update(
        script_id: Uuid,
        update: &ScriptUpdate,
        local_id: String,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            local_id,
            script_id: Some(script_id),
            user_id: None,
            platform: update.platform,
            topic: update.topic.clone(),
            tone: update.tone.clone(),
            language: update.language.clone(),
            framework: update.framework.clone(),
            audience: update.audience.clone(),
            duration: update.duration,
            content: update.content.clone(),
            scheduled_date: None,
            is_calendar_entry: false,
            saved_at,
        }
    }
}

/// Renders legacy object-shaped content back into plain text.
///
/// Early clients sometimes stored the model's raw JSON object instead of
/// plain text. Each key becomes an uppercased label followed by its value,
/// with a blank line between entries. Anything that is not a JSON object
/// passes through untouched.
pub fn normalize_stored_content(raw: &str) -> String {
    let trimmed = raw.trim_start();
    if !trimmed.starts_with('{') {
        return raw.to_string();
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => map
            .iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(text) => format!("{}: {}", key.to_uppercase(), text),
                other => format!("{}: {}", key.to_uppercase(), other),
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_key_parsing_defaults_to_youtube() {
        assert_eq!(Platform::from_key("linkedin"), Platform::Linkedin);
        assert_eq!(Platform::from_key("LinkedIn"), Platform::Linkedin);
        assert_eq!(Platform::from_key("youtube"), Platform::Youtube);
        assert_eq!(Platform::from_key("tiktok"), Platform::Youtube);
        assert_eq!(Platform::from_key(""), Platform::Youtube);
    }

    #[test]
    fn duration_key_parsing_defaults_to_standard() {
        assert_eq!(ScriptDuration::from_key("short"), ScriptDuration::Short);
        assert_eq!(ScriptDuration::from_key("LONG"), ScriptDuration::Long);
        assert_eq!(ScriptDuration::from_key("standard"), ScriptDuration::Standard);
        assert_eq!(ScriptDuration::from_key("epic"), ScriptDuration::Standard);
    }

    #[test]
    fn object_content_is_rendered_as_labeled_text() {
        let raw = r#"{"hook": "Start strong", "outro": "See you soon"}"#;
        let normalized = normalize_stored_content(raw);
        assert!(normalized.contains("HOOK: Start strong"));
        assert!(normalized.contains("OUTRO: See you soon"));
        assert!(normalized.contains("\n\n"));
    }

    #[test]
    fn plain_text_content_passes_through() {
        let raw = "Just a plain script.\n\nWith two paragraphs.";
        assert_eq!(normalize_stored_content(raw), raw);
    }

    #[test]
    fn non_object_json_passes_through() {
        assert_eq!(normalize_stored_content("[1, 2, 3]"), "[1, 2, 3]");
        assert_eq!(normalize_stored_content("{not valid json"), "{not valid json");
    }

    #[test]
    fn enum_keys_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Platform::Youtube).unwrap(), "\"youtube\"");
        assert_eq!(serde_json::to_string(&ScriptDuration::Long).unwrap(), "\"long\"");
    }
}
