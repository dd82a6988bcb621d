//! Last-fetched snapshots with request generations.
//!
//! Every fetch for a resource takes a new generation before it goes out. A
//! response is applied only while its generation is still the newest one
//! issued, so a slow early request can never overwrite a later answer.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiError, ApiResult};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_warn};

pub type Generation = u64;

#[derive(Debug)]
pub struct Snapshot<T> {
    value: Option<T>,
    issued: Generation,
    settled: Generation,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            value: None,
            issued: 0,
            settled: 0,
        }
    }
}

impl<T> Snapshot<T> {
    /// Registers a new request and returns its generation.
    pub fn begin(&mut self) -> Generation {
        self.issued += 1;
        self.issued
    }

    pub fn is_latest(&self, generation: Generation) -> bool {
        generation == self.issued
    }

    /// Stores `value` if `generation` is still current. Returns whether it was applied.
    pub fn apply(&mut self, generation: Generation, value: T) -> bool {
        if !self.is_latest(generation) {
            return false;
        }
        self.value = Some(value);
        self.settled = generation;
        true
    }

    /// Marks the current request finished without a value; prior data stays.
    pub fn settle(&mut self, generation: Generation) {
        if self.is_latest(generation) {
            self.settled = generation;
        }
    }

    pub fn is_loading(&self) -> bool {
        self.settled != self.issued
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    pub fn issued(&self) -> Generation {
        self.issued
    }
}

/// How a refresh ended.
#[derive(Debug)]
pub enum FetchOutcome {
    Applied,
    /// A newer request was issued while this one was in flight.
    Stale,
    /// The owning view went away first.
    Cancelled,
    Failed(ApiError),
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied)
    }
}

/// Runs one fetch for `slot`, racing it against `cancel`, and applies the
/// converted result only if it is still the newest request. Failures are
/// logged and leave the previous snapshot untouched.
pub async fn refresh<T, V, F>(
    slot: &Mutex<Snapshot<T>>,
    cancel: &CancellationToken,
    resource: &'static str,
    fetch: F,
    convert: impl FnOnce(V) -> T,
) -> FetchOutcome
where
    F: Future<Output = ApiResult<V>>,
{
    let generation = slot.lock().await.begin();

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            slot.lock().await.settle(generation);
            log_debug!("{resource} fetch #{generation} cancelled");
            return FetchOutcome::Cancelled;
        }
        result = fetch => result,
    };

    let mut guard = slot.lock().await;
    match result {
        Ok(value) => {
            if guard.apply(generation, convert(value)) {
                FetchOutcome::Applied
            } else {
                log_debug!(
                    "discarding stale {resource} response #{generation} (latest #{})",
                    guard.issued()
                );
                FetchOutcome::Stale
            }
        }
        Err(err) if guard.is_latest(generation) => {
            guard.settle(generation);
            log_warn!("failed to load {resource}: {err}");
            FetchOutcome::Failed(err)
        }
        Err(err) => {
            log_debug!("ignoring failed stale {resource} response #{generation}: {err}");
            FetchOutcome::Stale
        }
    }
}

/// Holds a busy flag for one user action and clears it when dropped, so a
/// caller abandoning the action mid-request cannot leave it stuck.
#[derive(Debug)]
pub struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    /// `None` when another action already holds the flag.
    pub fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
