use std::sync::{atomic::AtomicBool, Arc};

use log::warn;
use tokio::sync::Mutex;

use crate::api::LogbookApi;
use crate::error::ActionError;
use crate::sync::BusyGuard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

/// Conversation with the active persona. Turns are only recorded once the
/// server has replied.
#[derive(Clone)]
pub struct ChatController {
    transcript: Arc<Mutex<Vec<ChatTurn>>>,
    sending: Arc<AtomicBool>,
    api: Arc<dyn LogbookApi>,
}

impl ChatController {
    pub fn new(api: Arc<dyn LogbookApi>) -> Self {
        Self {
            transcript: Arc::new(Mutex::new(Vec::new())),
            sending: Arc::new(AtomicBool::new(false)),
            api,
        }
    }

    pub async fn transcript(&self) -> Vec<ChatTurn> {
        self.transcript.lock().await.clone()
    }

    pub async fn send(&self, message: &str) -> Result<String, ActionError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ActionError::EmptyContent);
        }
        let result = {
            let _busy = BusyGuard::acquire(&self.sending).ok_or(ActionError::Busy)?;
            self.api.chat(message).await
        };

        let reply = result.map_err(|err| {
            warn!("Chat request failed: {err}");
            ActionError::from(err)
        })?;

        let mut transcript = self.transcript.lock().await;
        transcript.push(ChatTurn {
            role: ChatRole::User,
            text: message.to_string(),
        });
        transcript.push(ChatTurn {
            role: ChatRole::Assistant,
            text: reply.clone(),
        });
        Ok(reply)
    }
}
