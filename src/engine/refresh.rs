// src/engine/refresh.rs
//
// Refresh Coordinator - the single writer of one Record Store
//
// State machine:
//   Idle --request--> Loading{pending: false}
//   Loading --request--> Loading{pending: true}      (coalesced, no new fetch)
//   Loading{pending: true}  --pass done--> Loading{pending: false} (one more pass)
//   Loading{pending: false} --pass done--> Idle
//   Loading{pending: true}  --fetch error--> Loading{pending: false} (queued pass still runs)
//   Loading{pending: false} --fetch error--> Idle
//   Loading --driver dropped--> Idle
//
// Fetches never overlap. Any number of requests arriving during a pass
// collapse into exactly one follow-up pass. There is no retry.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::domain::Record;
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, RecordsReloaded, ReloadFailed};
use crate::repositories::DocumentCollection;

use super::store::{decode_documents, SharedStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum RefreshState {
    Idle,
    Loading { pending: bool },
}

impl RefreshState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RefreshState::Loading { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// This call drove the fetch loop to completion
    Reloaded { passes: usize, record_count: usize },
    /// A reload was already running; it will make one more pass
    Coalesced,
}

pub struct RefreshCoordinator<R: Record> {
    collection: Arc<dyn DocumentCollection>,
    store: SharedStore<R>,
    event_bus: Arc<EventBus>,
    state: Mutex<RefreshState>,
}

impl<R: Record> RefreshCoordinator<R> {
    pub fn new(
        collection: Arc<dyn DocumentCollection>,
        store: SharedStore<R>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            collection,
            store,
            event_bus,
            state: Mutex::new(RefreshState::Idle),
        }
    }

    pub fn state(&self) -> RefreshState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn store(&self) -> &SharedStore<R> {
        &self.store
    }

    /// Request a full refetch of the collection.
    ///
    /// When a reload is already in flight this only marks it pending and
    /// returns `Coalesced`. Otherwise the caller runs fetch passes until no
    /// request is pending. A queued pass runs even when the pass before it
    /// failed; the result of the last pass is returned.
    pub async fn request_reload(&self) -> AppResult<ReloadOutcome> {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.is_loading() {
                log::debug!("Reload of {} already running, marking pending", R::COLLECTION);
                *state = RefreshState::Loading { pending: true };
                return Ok(ReloadOutcome::Coalesced);
            }
            *state = RefreshState::Loading { pending: false };
        }
        let guard = LoadingGuard::new(&self.state, R::COLLECTION);

        let mut passes = 0;
        loop {
            passes += 1;

            let result = self.fetch_once().await;
            if let Ok(record_count) = &result {
                self.event_bus
                    .emit(RecordsReloaded::new(R::COLLECTION, *record_count));
            }
            let again = self.finish_pass();

            match result {
                Ok(_) if again => continue,
                Ok(record_count) => {
                    guard.disarm();
                    log::info!(
                        "Reloaded {} ({} records, {} passes)",
                        R::COLLECTION,
                        record_count,
                        passes
                    );
                    return Ok(ReloadOutcome::Reloaded {
                        passes,
                        record_count,
                    });
                }
                Err(e) => {
                    let error = e.into_fetch();
                    log::error!("Reload of {} failed: {}", R::COLLECTION, error);
                    self.event_bus
                        .emit(ReloadFailed::new(R::COLLECTION, error.to_string()));
                    if again {
                        log::debug!("Running queued reload of {}", R::COLLECTION);
                        continue;
                    }
                    guard.disarm();
                    return Err(error);
                }
            }
        }
    }

    /// Empty the store, e.g. when the owning session ends
    pub fn clear(&self) {
        self.store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.event_bus.emit(RecordsReloaded::new(R::COLLECTION, 0));
    }

    /// One fetch, decode and store replacement. Returns the new record count.
    async fn fetch_once(&self) -> AppResult<usize> {
        let documents = self
            .collection
            .fetch_all(R::COLLECTION, R::fetch_order())
            .await?;
        let records = decode_documents::<R>(documents);
        let count = records.len();

        self.store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .load(records)
            .map_err(AppError::from)?;

        Ok(count)
    }

    /// Close a pass. True when another pass is owed.
    fn finish_pass(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match *state {
            RefreshState::Loading { pending: true } => {
                *state = RefreshState::Loading { pending: false };
                true
            }
            _ => {
                *state = RefreshState::Idle;
                false
            }
        }
    }
}

/// Puts the state back to `Idle` when the driving future is dropped mid-pass
struct LoadingGuard<'a> {
    state: &'a Mutex<RefreshState>,
    collection: &'static str,
    armed: bool,
}

impl<'a> LoadingGuard<'a> {
    fn new(state: &'a Mutex<RefreshState>, collection: &'static str) -> Self {
        Self {
            state,
            collection,
            armed: true,
        }
    }

    /// The loop reached `Idle` on its own
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            log::warn!("Reload of {} was cancelled mid-pass", self.collection);
            *self.state.lock().unwrap_or_else(PoisonError::into_inner) = RefreshState::Idle;
        }
    }
}
