use crate::api::{GithubConfigRecord, GithubConfigUpdate, SettingsRecord, SettingsUpdate};
use crate::error::ActionError;
use crate::models::ai_model::model_or_default;
use crate::models::AiModel;
use crate::secret::RedactedSecret;

/// Editable copy of the user/AI settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub username: String,
    pub ai_model_name: String,
    pub ai_api_key: RedactedSecret,
    pub theme: Option<String>,
    pub ai_provider: Option<String>,
    pub use_local_ai: bool,
}

impl From<SettingsRecord> for SettingsForm {
    fn from(record: SettingsRecord) -> Self {
        Self {
            username: record.username,
            ai_model_name: model_or_default(&record.ai_model_name),
            ai_api_key: RedactedSecret::from_server(record.is_api_key_set),
            theme: record.theme,
            ai_provider: record.ai_provider,
            use_local_ai: record.use_local_ai.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEdit {
    Username(String),
    Model(String),
    ApiKey(String),
}

impl SettingsForm {
    pub fn is_key_set(&self) -> bool {
        self.ai_api_key.is_set()
    }

    pub fn apply(&mut self, edit: SettingsEdit) -> Result<(), ActionError> {
        match edit {
            SettingsEdit::Username(username) => self.username = username,
            SettingsEdit::Model(model) => {
                let model = model.trim();
                if AiModel::find(model).is_none() {
                    return Err(ActionError::InvalidInput(format!(
                        "unknown AI model '{model}'"
                    )));
                }
                self.ai_model_name = model.to_string();
            }
            SettingsEdit::ApiKey(key) => self.ai_api_key.edit(key),
        }
        Ok(())
    }

    pub fn to_update(&self) -> SettingsUpdate {
        SettingsUpdate {
            username: self.username.clone(),
            ai_model_name: self.ai_model_name.clone(),
            ai_api_key: self.ai_api_key.wire_value(),
        }
    }
}

/// Editable copy of the GitHub integration config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubForm {
    pub repo_name: String,
    pub token: RedactedSecret,
    pub is_active: bool,
}

impl From<GithubConfigRecord> for GithubForm {
    fn from(record: GithubConfigRecord) -> Self {
        Self {
            repo_name: record.repo_name,
            token: RedactedSecret::from_server(record.is_token_set),
            is_active: record.is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GithubEdit {
    RepoName(String),
    Token(String),
    SetActive(bool),
    ToggleActive,
}

impl GithubForm {
    pub fn is_token_set(&self) -> bool {
        self.token.is_set()
    }

    pub fn apply(&mut self, edit: GithubEdit) {
        match edit {
            GithubEdit::RepoName(repo_name) => self.repo_name = repo_name,
            GithubEdit::Token(token) => self.token.edit(token),
            GithubEdit::SetActive(active) => self.is_active = active,
            GithubEdit::ToggleActive => self.is_active = !self.is_active,
        }
    }

    /// Fails on a repo name that is neither empty nor `owner/repo`.
    pub fn to_update(&self) -> Result<GithubConfigUpdate, ActionError> {
        let repo_name = self.repo_name.trim();
        if !repo_name.is_empty() && !is_owner_repo(repo_name) {
            return Err(ActionError::InvalidInput(format!(
                "repository must look like owner/repo, got '{repo_name}'"
            )));
        }
        Ok(GithubConfigUpdate {
            repo_name: repo_name.to_string(),
            token: self.token.wire_value(),
            is_active: self.is_active,
        })
    }
}

fn is_owner_repo(value: &str) -> bool {
    let mut parts = value.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) => {
            !owner.is_empty()
                && !repo.is_empty()
                && !value.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_AI_MODEL;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_to_form_masks_key_and_defaults_model() {
        let form = SettingsForm::from(SettingsRecord {
            username: "ana".into(),
            ai_model_name: "".into(),
            is_api_key_set: true,
            ..SettingsRecord::default()
        });
        assert_eq!(form.ai_api_key.input(), "");
        assert!(form.is_key_set());
        assert_eq!(form.ai_model_name, DEFAULT_AI_MODEL);
    }

    #[test]
    fn unknown_model_is_rejected() {
        let mut form = SettingsForm::from(SettingsRecord::default());
        assert!(form.apply(SettingsEdit::Model("gpt-9".into())).is_err());
        form.apply(SettingsEdit::Model("gemini-2.5-pro".into())).unwrap();
        assert_eq!(form.to_update().ai_model_name, "gemini-2.5-pro");
    }

    #[test]
    fn repo_name_shape() {
        assert!(is_owner_repo("owner/repo"));
        assert!(!is_owner_repo("owner"));
        assert!(!is_owner_repo("owner/"));
        assert!(!is_owner_repo("a/b/c"));
        assert!(!is_owner_repo("own er/repo"));
    }

    #[test]
    fn github_update_keeps_token_empty_unless_edited() {
        let mut form = GithubForm::from(GithubConfigRecord {
            repo_name: "".into(),
            is_active: false,
            is_token_set: true,
        });
        form.apply(GithubEdit::RepoName(" owner/repo ".into()));
        form.apply(GithubEdit::ToggleActive);

        assert_eq!(
            form.to_update().unwrap(),
            GithubConfigUpdate {
                repo_name: "owner/repo".into(),
                token: "".into(),
                is_active: true,
            }
        );
    }
}
