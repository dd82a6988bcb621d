pub mod controller;
pub mod form;

pub use controller::SettingsController;
pub use form::{GithubEdit, GithubForm, SettingsEdit, SettingsForm};
