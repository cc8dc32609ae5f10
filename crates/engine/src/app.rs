//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::autosave::Autosave;
use crate::infrastructure::ports::{history_timestamp, ClockPort, PersistenceError, PersistencePort};
use crate::stores::{GameStore, RoleRegistry};

/// Main application state.
///
/// Holds the canonical document, the role registry and the ports.
/// Passed to HTTP/WebSocket handlers via Axum state.
pub struct App {
    pub store: Arc<GameStore>,
    pub roles: Arc<RoleRegistry>,
    pub clock: Arc<dyn ClockPort>,
    pub persistence: Arc<dyn PersistencePort>,
    pub autosave: Autosave,
}

impl App {
    pub fn new(
        store: Arc<GameStore>,
        roles: Arc<RoleRegistry>,
        clock: Arc<dyn ClockPort>,
        persistence: Arc<dyn PersistencePort>,
        autosave: Autosave,
    ) -> Self {
        Self {
            store,
            roles,
            clock,
            persistence,
            autosave,
        }
    }

    /// Timestamp for a new history entry.
    pub fn timestamp(&self) -> i64 {
        history_timestamp(self.clock.as_ref())
    }

    /// Persist the current document immediately.
    pub async fn save_now(&self) -> Result<(), PersistenceError> {
        let document = self.store.snapshot().await;
        self.persistence.save(&document).await
    }
}
