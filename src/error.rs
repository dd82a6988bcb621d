use thiserror::Error;

use crate::api::ApiError;

/// Why a user action did not go through.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Write something first")]
    EmptyContent,

    #[error("Another request is still in progress")]
    Busy,

    #[error("Persona {0} is already active")]
    AlreadyActive(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Nothing loaded yet; open the view first")]
    NotLoaded,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ActionError {
    /// Rejections decided locally, before any request went out.
    pub fn is_local(&self) -> bool {
        !matches!(self, ActionError::Api(_))
    }
}

pub type Result<T> = std::result::Result<T, ActionError>;
