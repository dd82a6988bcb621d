use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::models::{LogEntry, NewEntry, Persona};

use super::wire::{
    ChatRequest, ChatResponse, GithubConfigRecord, GithubConfigUpdate, LogEntryRecord,
    PolishRequest, PolishResponse, SettingsRecord, SettingsUpdate,
};
use super::{ApiError, ApiResult, EntryQuery, LogbookApi};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error, log_warn};

/// `LogbookApi` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("noty/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and returns the body text of a 2xx response.
    async fn send(&self, request: RequestBuilder) -> ApiResult<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_server_error() {
            log_error!("logbook server error {}: {}", status.as_u16(), body.trim());
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.send(self.client.get(self.url(path))).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Write calls answer with a status message the client has no use for.
    async fn send_ignoring_body(&self, request: RequestBuilder) -> ApiResult<()> {
        let body = self.send(request).await?;
        log_debug!("server acknowledged: {}", body.trim());
        Ok(())
    }
}

#[async_trait]
impl LogbookApi for HttpApi {
    async fn list_entries(&self, query: EntryQuery) -> ApiResult<Vec<LogEntry>> {
        let mut request = self.client.get(self.url("/api/logs"));
        if let Some(date) = query.date {
            request = request.query(&[("date", date.format("%Y-%m-%d").to_string())]);
        }

        let body = self.send(request).await?;
        let records: Vec<LogEntryRecord> = serde_json::from_str(&body)?;

        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            let id = record.id;
            match LogEntry::try_from(record) {
                Ok(entry) => entries.push(entry),
                Err(err) => log_warn!("skipping entry {id}: {err}"),
            }
        }
        Ok(entries)
    }

    async fn create_entry(&self, entry: &NewEntry) -> ApiResult<()> {
        self.send_ignoring_body(self.client.post(self.url("/api/logs")).json(entry))
            .await
    }

    async fn delete_entry(&self, id: i64) -> ApiResult<()> {
        self.send_ignoring_body(self.client.delete(self.url(&format!("/api/logs/{id}"))))
            .await
    }

    async fn polish(&self, draft_content: &str) -> ApiResult<String> {
        let request = self
            .client
            .post(self.url("/api/ai/polish"))
            .json(&PolishRequest { draft_content });
        let body = self.send(request).await?;
        let response: PolishResponse = serde_json::from_str(&body)?;
        Ok(response.polished_content)
    }

    async fn list_personas(&self) -> ApiResult<Vec<Persona>> {
        self.get_json("/api/personas").await
    }

    async fn activate_persona(&self, id: i64) -> ApiResult<()> {
        self.send_ignoring_body(
            self.client
                .post(self.url(&format!("/api/personas/{id}/activate"))),
        )
        .await
    }

    async fn get_settings(&self) -> ApiResult<SettingsRecord> {
        self.get_json("/api/settings").await
    }

    async fn save_settings(&self, update: &SettingsUpdate) -> ApiResult<()> {
        self.send_ignoring_body(self.client.post(self.url("/api/settings")).json(update))
            .await
    }

    async fn get_github_config(&self) -> ApiResult<GithubConfigRecord> {
        self.get_json("/api/integrations/github").await
    }

    async fn save_github_config(&self, update: &GithubConfigUpdate) -> ApiResult<()> {
        self.send_ignoring_body(
            self.client
                .post(self.url("/api/integrations/github"))
                .json(update),
        )
        .await
    }

    async fn chat(&self, user_message: &str) -> ApiResult<String> {
        let request = self
            .client
            .post(self.url("/api/chat"))
            .json(&ChatRequest { user_message });
        let body = self.send(request).await?;
        let response: ChatResponse = serde_json::from_str(&body)?;
        Ok(response.reply)
    }
}
