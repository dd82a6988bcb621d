//! Wire shapes for the backend plus the codecs that sit at the client
//! boundary. Nothing outside `api` sees a stored tag string or an unparsed
//! date.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{Category, EntrySource, LogEntry, Mood};

use super::ApiError;

/// Splits comma-separated editor input into trimmed, non-empty tags.
pub fn split_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`split_tags`] for re-display in the editor.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Decodes the stored tag string. Rows written by older builds used a
/// bracketed, single-quoted list, so anything that is not a JSON array is
/// read leniently.
pub fn decode_tags(stored: Option<&str>) -> Vec<String> {
    let Some(raw) = stored.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(tags) => tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => {
            let inner = raw.trim_start_matches('[').trim_end_matches(']');
            split_tags(inner)
                .into_iter()
                .map(|tag| tag.trim_matches(|c| c == '\'' || c == '"').trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect()
        }
    }
}

pub fn parse_entry_date(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| ApiError::Decode(format!("invalid entry_date '{value}': {err}")))
}

/// Accepts `HH:MM:SS`, fractional seconds, or the `HH:MM` a time picker sends.
pub fn parse_entry_time(value: &str) -> Result<NaiveTime, ApiError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|err| ApiError::Decode(format!("invalid entry_time '{value}': {err}")))
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogEntryRecord {
    pub id: i64,
    pub content: String,
    pub entry_date: String,
    pub entry_time: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl TryFrom<LogEntryRecord> for LogEntry {
    type Error = ApiError;

    fn try_from(record: LogEntryRecord) -> Result<Self, Self::Error> {
        Ok(LogEntry {
            id: record.id,
            entry_date: parse_entry_date(&record.entry_date)?,
            entry_time: parse_entry_time(&record.entry_time)?,
            tags: decode_tags(record.tags.as_deref()),
            category: record
                .category
                .as_deref()
                .map(Category::parse)
                .unwrap_or_default(),
            mood: record.mood.as_deref().and_then(Mood::parse),
            source: record
                .source
                .as_deref()
                .map(EntrySource::parse)
                .unwrap_or_default(),
            created_at: record.created_at,
            content: record.content,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PolishRequest<'a> {
    pub draft_content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct PolishResponse {
    pub polished_content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub user_message: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Settings as the server reports them. The key itself is never part of
/// this shape, so a server that echoes it cannot leak it into state.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SettingsRecord {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub ai_model_name: String,
    #[serde(default)]
    pub is_api_key_set: bool,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub ai_provider: Option<String>,
    #[serde(default)]
    pub use_local_ai: Option<bool>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub username: String,
    pub ai_model_name: String,
    /// Empty keeps the stored key.
    pub ai_api_key: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct GithubConfigRecord {
    #[serde(default)]
    pub repo_name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_token_set: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GithubConfigUpdate {
    pub repo_name: String,
    /// Empty keeps the stored token.
    pub token: String,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn split_trims_and_drops_blanks() {
        assert_eq!(split_tags("a, b ,, c"), vec!["a", "b", "c"]);
        assert!(split_tags(" , ,").is_empty());
        assert!(split_tags("").is_empty());
    }

    #[test]
    fn stored_tags_survive_redisplay_and_resplit() {
        let stored = serde_json::to_string(&split_tags("coding, github , ideas")).unwrap();
        let decoded = decode_tags(Some(stored.as_str()));
        assert_eq!(split_tags(&join_tags(&decoded)), decoded);
        assert_eq!(decoded, vec!["coding", "github", "ideas"]);
    }

    #[test]
    fn decode_reads_legacy_single_quoted_lists() {
        assert_eq!(decode_tags(Some("['ide', 'kerja']")), vec!["ide", "kerja"]);
        assert!(decode_tags(None).is_empty());
        assert!(decode_tags(Some("  ")).is_empty());
        assert!(decode_tags(Some("[]")).is_empty());
    }

    #[test]
    fn entry_time_accepts_minutes_or_seconds() {
        assert_eq!(
            parse_entry_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_entry_time("09:30:15").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 15).unwrap()
        );
        assert!(parse_entry_time("half past nine").is_err());
    }

    #[test]
    fn record_decodes_into_entry() {
        let record: LogEntryRecord = serde_json::from_value(serde_json::json!({
            "id": 7,
            "content": "**GitHub Update:** fix",
            "entry_date": "2026-02-01",
            "entry_time": "10:00:00",
            "created_at": "2026-02-01 10:00:01",
            "tags": "[\"coding\", \"github\"]",
            "category": "Development",
            "mood": "Neutral",
            "source": "GitHub"
        }))
        .unwrap();

        let entry = LogEntry::try_from(record).unwrap();
        assert_eq!(entry.tags, vec!["coding", "github"]);
        assert_eq!(entry.category, Category::Other("Development".into()));
        assert_eq!(entry.mood, Some(Mood::Neutral));
        assert!(entry.is_from_github());
    }

    #[test]
    fn settings_record_ignores_echoed_secret() {
        let record: SettingsRecord = serde_json::from_value(serde_json::json!({
            "username": "ana",
            "ai_model_name": "gemini-2.5-pro",
            "ai_api_key": "leaked",
            "is_api_key_set": true
        }))
        .unwrap();

        assert_eq!(record.username, "ana");
        assert!(record.is_api_key_set);
        assert!(!format!("{record:?}").contains("leaked"));
    }
}
