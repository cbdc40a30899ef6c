use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use encounter_core::catalog::Catalog;
use encounter_pricing::{Encounter, Pricer};

/// Session limit when none is configured.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Shared application state, injected into all route handlers via Axum state.
///
/// The catalog and pricer are read-only and shared by every session. Each
/// encounter is owned by exactly one entry of `encounters`, which never
/// holds more than `max_sessions` entries.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub pricer: Arc<Pricer>,
    pub encounters: Arc<Mutex<HashMap<Uuid, Encounter>>>,
    pub max_sessions: usize,
}

impl AppState {
    pub fn new(catalog: Catalog, pricer: Pricer) -> Self {
        Self {
            catalog: Arc::new(catalog),
            pricer: Arc::new(pricer),
            encounters: Arc::new(Mutex::new(HashMap::new())),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }
}
