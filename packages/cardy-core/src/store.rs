//! The application state store.
//!
//! One [`BankStore`] lives for the whole process. Every change goes through
//! [`BankStore::dispatch`], which runs the reducer under the channel's lock
//! so two dispatches never interleave. Views subscribe to a watch channel
//! and re-render on change.

use std::sync::{Arc, OnceLock};

use tokio::sync::watch;
use tracing::{debug, trace};

use crate::state::{BankAction, BankReducer, BankState, Reducer};

static GLOBAL_STORE: OnceLock<Arc<BankStore>> = OnceLock::new();

/// Install the process-wide store. Call this once at startup.
///
/// Returns the rejected store if one was already installed.
pub fn install(store: Arc<BankStore>) -> Result<(), Arc<BankStore>> {
    GLOBAL_STORE.set(store)
}

/// The process-wide store, if [`install`] has run.
pub fn global() -> Option<Arc<BankStore>> {
    GLOBAL_STORE.get().cloned()
}

pub struct BankStore {
    state: watch::Sender<BankState>,
    reducer: BankReducer,
}

impl BankStore {
    pub fn new() -> Self {
        Self::with_reducer(BankReducer::new())
    }

    pub fn with_reducer(reducer: BankReducer) -> Self {
        let (state, _) = watch::channel(BankState::default());
        Self { state, reducer }
    }

    /// Apply an action and return the resulting state.
    pub fn dispatch(&self, action: BankAction) -> BankState {
        let mut next = BankState::default();
        self.state.send_modify(|state| {
            *state = self.reducer.reduce(state, &action);
            next = state.clone();
        });
        trace!(action = action.name(), generation = next.generation, "Dispatched");
        next
    }

    /// Apply an action on behalf of a flow that started in `generation`.
    ///
    /// Session-scoped actions are dropped when the generation has moved on
    /// (logout, login, chat cleared). Returns the new state, or `None` when
    /// the action was dropped.
    pub fn dispatch_for(&self, generation: u64, action: BankAction) -> Option<BankState> {
        let mut next = None;
        self.state.send_if_modified(|state| {
            if action.is_session_scoped() && state.generation != generation {
                return false;
            }
            *state = self.reducer.reduce(state, &action);
            next = Some(state.clone());
            true
        });

        if next.is_none() {
            debug!(action = action.name(), generation, "Dropped stale action");
        }
        next
    }

    /// Dispatch `set` now and `reset` when the returned guard drops.
    ///
    /// The reset runs on every exit path, including early returns and
    /// unwinding.
    pub fn hold(&self, set: BankAction, reset: BankAction) -> FlagGuard<'_> {
        self.dispatch(set);
        FlagGuard {
            store: self,
            reset: Some(reset),
        }
    }

    pub fn snapshot(&self) -> BankState {
        self.state.borrow().clone()
    }

    pub fn generation(&self) -> u64 {
        self.state.borrow().generation
    }

    pub fn subscribe(&self) -> watch::Receiver<BankState> {
        self.state.subscribe()
    }
}

impl Default for BankStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatches its reset action when dropped.
#[must_use = "the reset runs as soon as the guard is dropped"]
pub struct FlagGuard<'a> {
    store: &'a BankStore,
    reset: Option<BankAction>,
}

impl FlagGuard<'_> {
    /// Run the reset now.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        if let Some(reset) = self.reset.take() {
            self.store.dispatch(reset);
        }
    }
}
