use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use charge_core::SessionDefaults;
use charge_engine::{Engine, SessionHistory, VisitorCounter};

/// Shared state handed to every handler.
///
/// The engine and the defaults are immutable after startup, the history and
/// the visitor counter are the only mutable parts.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub session_defaults: Arc<SessionDefaults>,
    pub history: Arc<Mutex<SessionHistory>>,
    pub visitors: Arc<VisitorCounter>,
}

impl AppState {
    pub fn new(
        engine: Engine,
        session_defaults: SessionDefaults,
        history: SessionHistory,
        visitors: VisitorCounter,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            session_defaults: Arc::new(session_defaults),
            history: Arc::new(Mutex::new(history)),
            visitors: Arc::new(visitors),
        }
    }

    /// Lock the history, a panic in another handler does not lose it.
    pub fn history(&self) -> MutexGuard<'_, SessionHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
