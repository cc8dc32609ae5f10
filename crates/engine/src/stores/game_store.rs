//! Canonical document storage.

use tokio::sync::{Mutex, MutexGuard};

use skirmish_domain::GameState;

/// Owns the single mutable [`GameState`].
///
/// Handlers hold the guard from read through mutation to broadcast, so every
/// mutation and its fan-out are atomic with respect to other handlers and
/// each connection observes changes in the order they were applied.
pub struct GameStore {
    state: Mutex<GameState>,
}

impl GameStore {
    pub fn new(initial: GameState) -> Self {
        Self {
            state: Mutex::new(initial),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, GameState> {
        self.state.lock().await
    }

    /// Detached copy for persistence.
    pub async fn snapshot(&self) -> GameState {
        self.state.lock().await.clone()
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new(GameState::default())
    }
}
