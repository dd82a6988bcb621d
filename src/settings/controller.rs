use std::sync::{atomic::AtomicBool, Arc};

use log::{info, warn};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::api::LogbookApi;
use crate::error::ActionError;
use crate::sync::{refresh, BusyGuard, FetchOutcome, Snapshot};

use super::{GithubEdit, GithubForm, SettingsEdit, SettingsForm};

/// Settings and GitHub config forms. Both follow the same cycle: load,
/// edit locally, save, then reload so server-derived flags stay truthful.
#[derive(Clone)]
pub struct SettingsController {
    settings: Arc<Mutex<Snapshot<SettingsForm>>>,
    github: Arc<Mutex<Snapshot<GithubForm>>>,
    saving: Arc<AtomicBool>,
    api: Arc<dyn LogbookApi>,
}

impl SettingsController {
    pub fn new(api: Arc<dyn LogbookApi>) -> Self {
        Self {
            settings: Arc::new(Mutex::new(Snapshot::default())),
            github: Arc::new(Mutex::new(Snapshot::default())),
            saving: Arc::new(AtomicBool::new(false)),
            api,
        }
    }

    pub async fn load_settings(&self, cancel: &CancellationToken) -> FetchOutcome {
        refresh(
            &self.settings,
            cancel,
            "settings",
            self.api.get_settings(),
            SettingsForm::from,
        )
        .await
    }

    pub async fn load_github(&self, cancel: &CancellationToken) -> FetchOutcome {
        refresh(
            &self.github,
            cancel,
            "github config",
            self.api.get_github_config(),
            GithubForm::from,
        )
        .await
    }

    pub async fn settings(&self) -> Option<SettingsForm> {
        self.settings.lock().await.value().cloned()
    }

    pub async fn github(&self) -> Option<GithubForm> {
        self.github.lock().await.value().cloned()
    }

    pub async fn edit_settings(&self, edit: SettingsEdit) -> Result<(), ActionError> {
        let mut guard = self.settings.lock().await;
        let form = guard.value_mut().ok_or(ActionError::NotLoaded)?;
        form.apply(edit)
    }

    pub async fn edit_github(&self, edit: GithubEdit) -> Result<(), ActionError> {
        let mut guard = self.github.lock().await;
        let form = guard.value_mut().ok_or(ActionError::NotLoaded)?;
        form.apply(edit);
        Ok(())
    }

    /// Saves settings; an empty key input keeps the stored key. On failure
    /// the form is left as the user typed it.
    pub async fn save_settings(&self, cancel: &CancellationToken) -> Result<(), ActionError> {
        let update = self
            .settings
            .lock()
            .await
            .value()
            .map(SettingsForm::to_update)
            .ok_or(ActionError::NotLoaded)?;

        let result = {
            let _busy = BusyGuard::acquire(&self.saving).ok_or(ActionError::Busy)?;
            self.api.save_settings(&update).await
        };

        if let Err(err) = result {
            warn!("Failed to save settings: {err}");
            return Err(err.into());
        }
        info!(
            "Settings saved (api key {})",
            if update.ai_api_key.is_empty() { "unchanged" } else { "replaced" }
        );
        self.load_settings(cancel).await;
        Ok(())
    }

    /// Saves the GitHub config; an empty token input keeps the stored token.
    pub async fn save_github(&self, cancel: &CancellationToken) -> Result<(), ActionError> {
        let update = {
            let guard = self.github.lock().await;
            guard.value().ok_or(ActionError::NotLoaded)?.to_update()?
        };

        let result = {
            let _busy = BusyGuard::acquire(&self.saving).ok_or(ActionError::Busy)?;
            self.api.save_github_config(&update).await
        };

        if let Err(err) = result {
            warn!("Failed to save GitHub config: {err}");
            return Err(err.into());
        }
        info!(
            "GitHub config saved for '{}' (active: {})",
            update.repo_name, update.is_active
        );
        self.load_github(cancel).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{MockApi, Op};
    use pretty_assertions::assert_eq;

    async fn loaded(api: &MockApi) -> (SettingsController, CancellationToken) {
        let controller = SettingsController::new(Arc::new(api.clone()));
        let token = CancellationToken::new();
        controller.load_settings(&token).await;
        controller.load_github(&token).await;
        (controller, token)
    }

    #[tokio::test]
    async fn fetched_key_input_is_always_empty() {
        let api = MockApi::new();
        api.set_settings("ana", "gemini-2.5-flash", "sk-stored");
        let (settings, _token) = loaded(&api).await;

        let form = settings.settings().await.unwrap();
        assert_eq!(form.ai_api_key.input(), "");
        assert!(form.is_key_set());
        assert_eq!(form.username, "ana");
    }

    #[tokio::test]
    async fn saving_with_empty_key_keeps_server_secret() {
        let api = MockApi::new();
        api.set_settings("ana", "gemini-2.5-flash", "sk-stored");
        let (settings, token) = loaded(&api).await;

        settings
            .edit_settings(SettingsEdit::Username("ana b".into()))
            .await
            .unwrap();
        settings.save_settings(&token).await.unwrap();

        assert_eq!(api.settings_saves()[0].ai_api_key, "");
        assert_eq!(api.stored_api_key(), "sk-stored");
        let form = settings.settings().await.unwrap();
        assert!(form.is_key_set());
        assert_eq!(form.username, "ana b");
        assert_eq!(api.count(Op::GetSettings), 2);
    }

    #[tokio::test]
    async fn new_key_replaces_and_is_cleared_after_reload() {
        let api = MockApi::new();
        api.set_settings("ana", "", "");
        let (settings, token) = loaded(&api).await;
        assert!(!settings.settings().await.unwrap().is_key_set());

        settings
            .edit_settings(SettingsEdit::ApiKey("sk-new".into()))
            .await
            .unwrap();
        settings.save_settings(&token).await.unwrap();

        assert_eq!(api.stored_api_key(), "sk-new");
        let form = settings.settings().await.unwrap();
        assert!(form.is_key_set());
        assert_eq!(form.ai_api_key.input(), "");
    }

    #[tokio::test]
    async fn failed_save_keeps_typed_values() {
        let api = MockApi::new();
        api.set_settings("ana", "gemini-2.5-flash", "");
        let (settings, token) = loaded(&api).await;
        api.fail(Op::SaveSettings);

        settings
            .edit_settings(SettingsEdit::ApiKey("sk-typed".into()))
            .await
            .unwrap();
        assert!(settings.save_settings(&token).await.is_err());

        let form = settings.settings().await.unwrap();
        assert_eq!(form.ai_api_key.input(), "sk-typed");
        assert_eq!(api.count(Op::GetSettings), 1);
        api.recover(Op::SaveSettings);
        settings.save_settings(&token).await.unwrap();
        assert_eq!(api.stored_api_key(), "sk-typed");
    }

    #[tokio::test]
    async fn abandoned_save_does_not_block_the_next_one() {
        let api = MockApi::new();
        let (settings, token) = loaded(&api).await;

        let _gate = api.hold_next(Op::SaveSettings);
        let abandoned = {
            let settings = settings.clone();
            let token = token.clone();
            tokio::spawn(async move { settings.save_settings(&token).await })
        };
        while api.count(Op::SaveSettings) == 0 {
            tokio::task::yield_now().await;
        }
        assert!(matches!(settings.save_github(&token).await, Err(ActionError::Busy)));

        abandoned.abort();
        assert!(abandoned.await.unwrap_err().is_cancelled());

        settings.save_github(&token).await.unwrap();
        assert_eq!(api.count(Op::SaveGithub), 1);
    }

    #[tokio::test]
    async fn github_toggle_save_keeps_existing_token() {
        let api = MockApi::new();
        api.set_github("", "ghp_stored", false);
        let (settings, token) = loaded(&api).await;
        assert!(settings.github().await.unwrap().is_token_set());

        settings
            .edit_github(GithubEdit::RepoName("owner/repo".into()))
            .await
            .unwrap();
        settings.edit_github(GithubEdit::ToggleActive).await.unwrap();
        settings.save_github(&token).await.unwrap();

        let form = settings.github().await.unwrap();
        assert!(form.is_active);
        assert_eq!(form.repo_name, "owner/repo");
        assert!(form.is_token_set());
        assert_eq!(form.token.input(), "");
        assert_eq!(api.stored_token(), "ghp_stored");
        assert_eq!(api.github_saves()[0].token, "");
    }

    #[tokio::test]
    async fn edits_before_load_are_rejected() {
        let api = MockApi::new();
        let settings = SettingsController::new(Arc::new(api.clone()));
        let err = settings.edit_github(GithubEdit::ToggleActive).await.unwrap_err();
        assert!(matches!(err, ActionError::NotLoaded));
        assert!(settings.save_settings(&CancellationToken::new()).await.is_err());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn malformed_repo_is_rejected_locally() {
        let api = MockApi::new();
        let (settings, token) = loaded(&api).await;
        settings
            .edit_github(GithubEdit::RepoName("just-a-name".into()))
            .await
            .unwrap();

        let err = settings.save_github(&token).await.unwrap_err();
        assert!(err.is_local());
        assert_eq!(api.count(Op::SaveGithub), 0);
    }
}
