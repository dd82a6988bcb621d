use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use log::{info, warn};
use tokio::sync::Mutex;

use crate::api::LogbookApi;
use crate::error::ActionError;

use super::{Completion, DraftEdit, DraftState, EditorMode};

/// Source of "now" for default draft stamps.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

pub fn local_clock() -> Clock {
    Arc::new(|| Local::now().naive_local())
}

/// Drives the draft through polish and submit. The lock is never held while
/// a request is in flight; the in-flight marker in `DraftState` blocks a
/// second action instead.
#[derive(Clone)]
pub struct DraftController {
    state: Arc<Mutex<DraftState>>,
    api: Arc<dyn LogbookApi>,
    clock: Clock,
}

impl DraftController {
    pub fn new(api: Arc<dyn LogbookApi>, clock: Clock) -> Self {
        let now = clock();
        Self {
            state: Arc::new(Mutex::new(DraftState::new(now))),
            api,
            clock,
        }
    }

    pub async fn get_state(&self) -> DraftState {
        self.state.lock().await.clone()
    }

    pub async fn edit(&self, edit: DraftEdit) {
        self.state.lock().await.edit(edit);
    }

    pub async fn set_mode(&self, mode: EditorMode) {
        self.state.lock().await.set_mode(mode);
    }

    /// Sends the draft for polishing. `Discarded` means the draft was reset
    /// before the answer came back.
    pub async fn polish(&self) -> Result<Completion, ActionError> {
        let (ticket, content) = self.state.lock().await.begin_polish()?;

        let result = self.api.polish(&content).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(polished) => Ok(state.finish_polish(ticket, Ok(polished))),
            Err(err) => {
                warn!("AI polish failed: {err}");
                match state.finish_polish(ticket, Err(err.to_string())) {
                    Completion::Applied => Err(err.into()),
                    Completion::Discarded => Ok(Completion::Discarded),
                }
            }
        }
    }

    /// Issues exactly one create request. The caller refreshes the timeline.
    pub async fn submit(&self) -> Result<Completion, ActionError> {
        let (ticket, body) = self.state.lock().await.begin_submit()?;

        let result = self.api.create_entry(&body).await;

        let now = (self.clock)();
        let mut state = self.state.lock().await;
        match result {
            Ok(()) => {
                info!("Entry for {} recorded", body.entry_date);
                Ok(state.finish_submit(ticket, Ok(()), now))
            }
            Err(err) => {
                warn!("Failed to record entry: {err}");
                match state.finish_submit(ticket, Err(err.to_string()), now) {
                    Completion::Applied => Err(err.into()),
                    Completion::Discarded => Ok(Completion::Discarded),
                }
            }
        }
    }

    pub async fn cancel(&self) {
        let now = (self.clock)();
        self.state.lock().await.cancel(now);
    }
}
