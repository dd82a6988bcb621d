//! In-memory backend for controller tests. It mimics the server contract
//! (ids, exclusive activation, keep-secret-on-empty) and records every call.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use tokio::sync::Notify;

use crate::models::{Category, EntrySource, LogEntry, NewEntry, Persona};

use super::{
    ApiError, ApiResult, EntryQuery, GithubConfigRecord, GithubConfigUpdate, LogbookApi,
    SettingsRecord, SettingsUpdate,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListEntries,
    CreateEntry,
    DeleteEntry,
    Polish,
    ListPersonas,
    ActivatePersona,
    GetSettings,
    SaveSettings,
    GetGithub,
    SaveGithub,
    Chat,
}

#[derive(Default)]
struct Backend {
    entries: Vec<LogEntry>,
    next_id: i64,
    personas: Vec<Persona>,
    username: String,
    ai_model_name: String,
    api_key: String,
    repo_name: String,
    token: String,
    github_active: bool,
    created: Vec<NewEntry>,
    settings_saves: Vec<SettingsUpdate>,
    github_saves: Vec<GithubConfigUpdate>,
    calls: Vec<Op>,
    failing: HashSet<Op>,
    gates: HashMap<Op, Arc<Notify>>,
}

#[derive(Clone, Default)]
pub struct MockApi {
    inner: Arc<Mutex<Backend>>,
}

pub fn entry(id: i64, content: &str) -> LogEntry {
    LogEntry {
        id,
        content: content.to_string(),
        entry_date: NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
        entry_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        tags: vec![],
        category: Category::General,
        mood: None,
        source: EntrySource::Manual,
        created_at: None,
    }
}

pub fn persona(id: i64, name: &str, is_active: bool) -> Persona {
    Persona {
        id,
        name: name.to_string(),
        description: None,
        is_active,
        is_custom: false,
    }
}

impl MockApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.with(|b| b.next_id = 1);
        api
    }

    fn with<R>(&self, f: impl FnOnce(&mut Backend) -> R) -> R {
        let mut guard = self.inner.lock().unwrap();
        f(&mut guard)
    }

    pub fn set_entries(&self, entries: Vec<LogEntry>) {
        self.with(|b| {
            b.next_id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
            b.entries = entries;
        });
    }

    pub fn set_personas(&self, personas: Vec<Persona>) {
        self.with(|b| b.personas = personas);
    }

    pub fn set_settings(&self, username: &str, model: &str, api_key: &str) {
        self.with(|b| {
            b.username = username.to_string();
            b.ai_model_name = model.to_string();
            b.api_key = api_key.to_string();
        });
    }

    pub fn set_github(&self, repo_name: &str, token: &str, is_active: bool) {
        self.with(|b| {
            b.repo_name = repo_name.to_string();
            b.token = token.to_string();
            b.github_active = is_active;
        });
    }

    pub fn stored_api_key(&self) -> String {
        self.with(|b| b.api_key.clone())
    }

    pub fn stored_token(&self) -> String {
        self.with(|b| b.token.clone())
    }

    pub fn created(&self) -> Vec<NewEntry> {
        self.with(|b| b.created.clone())
    }

    pub fn settings_saves(&self) -> Vec<SettingsUpdate> {
        self.with(|b| b.settings_saves.clone())
    }

    pub fn github_saves(&self) -> Vec<GithubConfigUpdate> {
        self.with(|b| b.github_saves.clone())
    }

    pub fn count(&self, op: Op) -> usize {
        self.with(|b| b.calls.iter().filter(|call| **call == op).count())
    }

    pub fn calls(&self) -> Vec<Op> {
        self.with(|b| b.calls.clone())
    }

    pub fn fail(&self, op: Op) {
        self.with(|b| b.failing.insert(op));
    }

    pub fn recover(&self, op: Op) {
        self.with(|b| b.failing.remove(&op));
    }

    /// Holds the next `op` call after it has captured its response until the
    /// returned handle is notified.
    pub fn hold_next(&self, op: Op) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.with(|b| b.gates.insert(op, gate.clone()));
        gate
    }

    /// Records the call, then either fails or runs `respond` against the backend.
    async fn call<R>(&self, op: Op, respond: impl FnOnce(&mut Backend) -> R) -> ApiResult<R> {
        let (result, gate) = self.with(|b| {
            b.calls.push(op);
            let gate = b.gates.remove(&op);
            let result = if b.failing.contains(&op) {
                Err(ApiError::Status {
                    status: 500,
                    body: format!("{op:?} failed"),
                })
            } else {
                Ok(respond(b))
            };
            (result, gate)
        });

        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }
}

#[async_trait]
impl LogbookApi for MockApi {
    async fn list_entries(&self, query: EntryQuery) -> ApiResult<Vec<LogEntry>> {
        self.call(Op::ListEntries, |b| {
            b.entries
                .iter()
                .filter(|entry| query.date.map_or(true, |date| entry.entry_date == date))
                .cloned()
                .collect()
        })
        .await
    }

    async fn create_entry(&self, new_entry: &NewEntry) -> ApiResult<()> {
        let new_entry = new_entry.clone();
        self.call(Op::CreateEntry, move |b| {
            let id = b.next_id;
            b.next_id += 1;
            b.entries.insert(
                0,
                LogEntry {
                    id,
                    content: new_entry.content.clone(),
                    entry_date: new_entry.entry_date,
                    entry_time: new_entry.entry_time,
                    tags: new_entry.tags.clone(),
                    category: new_entry.category.clone(),
                    mood: Some(new_entry.mood),
                    source: EntrySource::Manual,
                    created_at: None,
                },
            );
            b.created.push(new_entry);
        })
        .await
    }

    async fn delete_entry(&self, id: i64) -> ApiResult<()> {
        self.call(Op::DeleteEntry, |b| b.entries.retain(|entry| entry.id != id))
            .await
    }

    async fn polish(&self, draft_content: &str) -> ApiResult<String> {
        let polished = format!("**Polished:** {}", draft_content.trim());
        self.call(Op::Polish, |_| polished).await
    }

    async fn list_personas(&self) -> ApiResult<Vec<Persona>> {
        self.call(Op::ListPersonas, |b| b.personas.clone()).await
    }

    async fn activate_persona(&self, id: i64) -> ApiResult<()> {
        self.call(Op::ActivatePersona, |b| {
            for persona in &mut b.personas {
                persona.is_active = persona.id == id;
            }
        })
        .await
    }

    async fn get_settings(&self) -> ApiResult<SettingsRecord> {
        self.call(Op::GetSettings, |b| SettingsRecord {
            username: b.username.clone(),
            ai_model_name: b.ai_model_name.clone(),
            is_api_key_set: !b.api_key.is_empty(),
            theme: Some("dark".into()),
            ai_provider: Some("gemini".into()),
            use_local_ai: Some(false),
        })
        .await
    }

    async fn save_settings(&self, update: &SettingsUpdate) -> ApiResult<()> {
        let update = update.clone();
        self.call(Op::SaveSettings, move |b| {
            b.username = update.username.clone();
            b.ai_model_name = update.ai_model_name.clone();
            if !update.ai_api_key.trim().is_empty() {
                b.api_key = update.ai_api_key.clone();
            }
            b.settings_saves.push(update);
        })
        .await
    }

    async fn get_github_config(&self) -> ApiResult<GithubConfigRecord> {
        self.call(Op::GetGithub, |b| GithubConfigRecord {
            repo_name: b.repo_name.clone(),
            is_active: b.github_active,
            is_token_set: !b.token.is_empty(),
        })
        .await
    }

    async fn save_github_config(&self, update: &GithubConfigUpdate) -> ApiResult<()> {
        let update = update.clone();
        self.call(Op::SaveGithub, move |b| {
            b.repo_name = update.repo_name.clone();
            b.github_active = update.is_active;
            if !update.token.trim().is_empty() {
                b.token = update.token.clone();
            }
            b.github_saves.push(update);
        })
        .await
    }

    async fn chat(&self, user_message: &str) -> ApiResult<String> {
        let reply = format!("You said: {user_message}");
        self.call(Op::Chat, |_| reply).await
    }
}
