use std::sync::Arc;

use log::{info, warn};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::api::{EntryQuery, LogbookApi};
use crate::error::ActionError;
use crate::models::LogEntry;
use crate::sync::{refresh, FetchOutcome, Snapshot};

/// What the timeline should show right now.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineView {
    /// First load still pending.
    Loading,
    /// Loaded, nothing recorded. Not an error.
    Empty,
    Entries(Vec<LogEntry>),
}

/// Owns the entry list snapshot.
#[derive(Clone)]
pub struct TimelineController {
    entries: Arc<Mutex<Snapshot<Vec<LogEntry>>>>,
    query: Arc<Mutex<EntryQuery>>,
    api: Arc<dyn LogbookApi>,
}

impl TimelineController {
    pub fn new(api: Arc<dyn LogbookApi>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Snapshot::default())),
            query: Arc::new(Mutex::new(EntryQuery::default())),
            api,
        }
    }

    pub async fn set_query(&self, query: EntryQuery) {
        *self.query.lock().await = query;
    }

    pub async fn load(&self, cancel: &CancellationToken) -> FetchOutcome {
        let query = *self.query.lock().await;
        refresh(
            &self.entries,
            cancel,
            "entries",
            self.api.list_entries(query),
            |entries| entries,
        )
        .await
    }

    pub async fn view(&self) -> TimelineView {
        match self.entries.lock().await.value() {
            None => TimelineView::Loading,
            Some(entries) if entries.is_empty() => TimelineView::Empty,
            Some(entries) => TimelineView::Entries(entries.clone()),
        }
    }

    pub async fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .await
            .value()
            .cloned()
            .unwrap_or_default()
    }

    /// Deletes by id, then reloads the list. Confirmation is the caller's job.
    pub async fn delete(&self, id: i64, cancel: &CancellationToken) -> Result<(), ActionError> {
        if let Err(err) = self.api.delete_entry(id).await {
            warn!("Failed to delete entry {id}: {err}");
            return Err(err.into());
        }
        info!("Entry {id} deleted");
        self.load(cancel).await;
        Ok(())
    }
}
