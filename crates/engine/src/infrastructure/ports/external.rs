//! Document persistence port.

use async_trait::async_trait;
use skirmish_domain::GameState;

use super::error::PersistenceError;

/// Durable storage for the whole document.
///
/// Failures are logged by callers and never interrupt synchronization; a
/// failed load means starting from an empty document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersistencePort: Send + Sync {
    async fn save(&self, document: &GameState) -> Result<(), PersistenceError>;

    /// `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<GameState>, PersistenceError>;
}
