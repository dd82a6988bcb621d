use std::{sync::Arc, time::Instant};

use log::{debug, info};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::{
    api::LogbookApi,
    chat::ChatController,
    draft::{Clock, Completion, DraftController},
    error::ActionError,
    personas::PersonaController,
    settings::SettingsController,
    sync::FetchOutcome,
    timeline::TimelineController,
};

use super::{Notice, View};

struct ViewState {
    current: View,
    /// Child of the mount token; replaced on every navigation.
    visit: CancellationToken,
    notice: Option<Notice>,
}

/// Owns every resource controller for one mount and sequences the
/// multi-step user actions across them.
#[derive(Clone)]
pub struct ViewController {
    state: Arc<Mutex<ViewState>>,
    mount: CancellationToken,
    timeline: TimelineController,
    drafts: DraftController,
    personas: PersonaController,
    settings: SettingsController,
    chat: ChatController,
}

impl ViewController {
    pub fn new(api: Arc<dyn LogbookApi>, clock: Clock) -> Self {
        let mount = CancellationToken::new();
        Self {
            state: Arc::new(Mutex::new(ViewState {
                current: View::default(),
                visit: mount.child_token(),
                notice: None,
            })),
            timeline: TimelineController::new(api.clone()),
            drafts: DraftController::new(api.clone(), clock),
            personas: PersonaController::new(api.clone()),
            settings: SettingsController::new(api.clone()),
            chat: ChatController::new(api),
            mount,
        }
    }

    pub fn timeline(&self) -> &TimelineController {
        &self.timeline
    }

    pub fn drafts(&self) -> &DraftController {
        &self.drafts
    }

    pub fn personas(&self) -> &PersonaController {
        &self.personas
    }

    pub fn settings(&self) -> &SettingsController {
        &self.settings
    }

    pub async fn current(&self) -> View {
        self.state.lock().await.current
    }

    async fn visit_token(&self) -> CancellationToken {
        self.state.lock().await.visit.clone()
    }

    /// Initial loads: entries and personas.
    pub async fn mount(&self) {
        info!("Mounting logbook views");
        tokio::join!(self.timeline.load(&self.mount), self.personas.load(&self.mount));
    }

    /// Cancels every load still in flight. The controller is unusable after.
    pub fn unmount(&self) {
        info!("Unmounting logbook views");
        self.mount.cancel();
    }

    /// Re-reads the entry list under the current visit.
    pub async fn refresh_entries(&self) -> FetchOutcome {
        let visit = self.visit_token().await;
        self.timeline.load(&visit).await
    }

    pub async fn refresh_personas(&self) -> FetchOutcome {
        let visit = self.visit_token().await;
        self.personas.load(&visit).await
    }

    /// Leaves the current view (cancelling its loads) and enters `view`.
    pub async fn navigate(&self, view: View) {
        let visit = {
            let mut state = self.state.lock().await;
            state.visit.cancel();
            state.visit = self.mount.child_token();
            debug!("View {:?} -> {:?}", state.current, view);
            state.current = view;
            state.visit.clone()
        };

        if view == View::Settings {
            tokio::join!(
                self.settings.load_settings(&visit),
                self.settings.load_github(&visit)
            );
        }
    }

    /// Submits the draft; on success returns to the timeline and re-reads it.
    /// An answer for a draft the user already cancelled changes nothing.
    pub async fn submit_draft(&self) -> Result<Completion, ActionError> {
        let result = self.drafts.submit().await;
        if result.as_ref().is_ok_and(|c| *c == Completion::Discarded) {
            return result;
        }
        self.report(&result, "Entry recorded").await;
        result?;

        self.navigate(View::Timeline).await;
        self.refresh_entries().await;
        Ok(Completion::Applied)
    }

    pub async fn polish_draft(&self) -> Result<Completion, ActionError> {
        let result = self.drafts.polish().await;
        if result.as_ref().is_ok_and(|c| *c == Completion::Discarded) {
            return result;
        }
        self.report(&result, "Draft polished").await;
        result
    }

    pub async fn cancel_draft(&self) {
        self.drafts.cancel().await;
        self.navigate(View::Timeline).await;
    }

    /// Deletes an entry the user has already confirmed.
    pub async fn delete_entry(&self, id: i64) -> Result<(), ActionError> {
        let visit = self.visit_token().await;
        let result = self.timeline.delete(id, &visit).await;
        self.report(&result, "Entry deleted").await;
        result
    }

    pub async fn activate_persona(&self, id: i64) -> Result<(), ActionError> {
        let visit = self.visit_token().await;
        let result = self.personas.activate(id, &visit).await;
        self.report(&result, "Persona activated").await;
        result
    }

    pub async fn save_settings(&self) -> Result<(), ActionError> {
        let visit = self.visit_token().await;
        let result = self.settings.save_settings(&visit).await;
        self.report(&result, "Settings saved").await;
        result
    }

    pub async fn save_github(&self) -> Result<(), ActionError> {
        let visit = self.visit_token().await;
        let result = self.settings.save_github(&visit).await;
        self.report(&result, "GitHub integration saved").await;
        result
    }

    pub async fn chat(&self, message: &str) -> Result<String, ActionError> {
        let result = self.chat.send(message).await;
        if let Err(err) = &result {
            self.set_notice(Notice::error(err.to_string())).await;
        }
        result
    }

    /// The latest notice, unless it has outlived its TTL.
    pub async fn notice(&self) -> Option<Notice> {
        let mut state = self.state.lock().await;
        if state
            .notice
            .as_ref()
            .is_some_and(|notice| notice.is_expired(Instant::now()))
        {
            state.notice = None;
        }
        state.notice.clone()
    }

    async fn set_notice(&self, notice: Notice) {
        self.state.lock().await.notice = Some(notice);
    }

    async fn report<T>(&self, result: &Result<T, ActionError>, success: &str) {
        let notice = match result {
            Ok(_) => Notice::success(success),
            Err(err) => Notice::error(err.to_string()),
        };
        self.set_notice(notice).await;
    }
}
