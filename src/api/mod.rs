//! Resource client: one call per (resource, verb) against the logbook
//! backend. No business rules live here, only request and response shaping.

pub mod http;
#[cfg(test)]
pub(crate) mod mock;
pub mod wire;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{LogEntry, NewEntry, Persona};

pub use http::HttpApi;
pub use wire::{GithubConfigRecord, GithubConfigUpdate, SettingsRecord, SettingsUpdate};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not reach the logbook server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response from server: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Optional filters for the entry list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryQuery {
    pub date: Option<NaiveDate>,
}

#[async_trait]
pub trait LogbookApi: Send + Sync {
    async fn list_entries(&self, query: EntryQuery) -> ApiResult<Vec<LogEntry>>;

    async fn create_entry(&self, entry: &NewEntry) -> ApiResult<()>;

    async fn delete_entry(&self, id: i64) -> ApiResult<()>;

    /// Returns the rewritten draft.
    async fn polish(&self, draft_content: &str) -> ApiResult<String>;

    async fn list_personas(&self) -> ApiResult<Vec<Persona>>;

    async fn activate_persona(&self, id: i64) -> ApiResult<()>;

    async fn get_settings(&self) -> ApiResult<SettingsRecord>;

    async fn save_settings(&self, update: &SettingsUpdate) -> ApiResult<()>;

    async fn get_github_config(&self) -> ApiResult<GithubConfigRecord>;

    async fn save_github_config(&self, update: &GithubConfigUpdate) -> ApiResult<()>;

    async fn chat(&self, user_message: &str) -> ApiResult<String>;
}
