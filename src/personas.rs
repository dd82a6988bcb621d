use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use log::{info, warn};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::api::LogbookApi;
use crate::error::ActionError;
use crate::models::Persona;
use crate::sync::{refresh, BusyGuard, FetchOutcome, Snapshot};

/// Persona list plus the activation transition.
///
/// Exclusivity is the server's job: activation flips every other persona off
/// in the same request. The client only asks for one id and then re-reads
/// the list, so what it shows is always what the server holds.
#[derive(Clone)]
pub struct PersonaController {
    personas: Arc<Mutex<Snapshot<Vec<Persona>>>>,
    activating: Arc<AtomicBool>,
    api: Arc<dyn LogbookApi>,
}

impl PersonaController {
    pub fn new(api: Arc<dyn LogbookApi>) -> Self {
        Self {
            personas: Arc::new(Mutex::new(Snapshot::default())),
            activating: Arc::new(AtomicBool::new(false)),
            api,
        }
    }

    pub async fn load(&self, cancel: &CancellationToken) -> FetchOutcome {
        refresh(
            &self.personas,
            cancel,
            "personas",
            self.api.list_personas(),
            |personas| personas,
        )
        .await
    }

    pub async fn personas(&self) -> Vec<Persona> {
        self.personas
            .lock()
            .await
            .value()
            .cloned()
            .unwrap_or_default()
    }

    pub async fn active(&self) -> Option<Persona> {
        self.personas().await.into_iter().find(|p| p.is_active)
    }

    /// False for the persona that is already active, or while another
    /// activation is in flight.
    pub async fn can_activate(&self, id: i64) -> bool {
        if self.activating.load(Ordering::SeqCst) {
            return false;
        }
        !self
            .personas()
            .await
            .iter()
            .any(|persona| persona.id == id && persona.is_active)
    }

    /// Requests activation, then reloads the list whatever the outcome.
    pub async fn activate(&self, id: i64, cancel: &CancellationToken) -> Result<(), ActionError> {
        if !self.can_activate(id).await {
            if self.activating.load(Ordering::SeqCst) {
                return Err(ActionError::Busy);
            }
            return Err(ActionError::AlreadyActive(id));
        }
        let _busy = BusyGuard::acquire(&self.activating).ok_or(ActionError::Busy)?;

        let result = self.api.activate_persona(id).await;
        match &result {
            Ok(()) => info!("Persona {id} activated"),
            Err(err) => warn!("Failed to activate persona {id}: {err}"),
        }

        self.load(cancel).await;

        result.map_err(ActionError::from)
    }
}
