//! Debounced background autosave.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::infrastructure::ports::PersistencePort;
use crate::stores::GameStore;

/// Handle used by mutating handlers to request a save.
///
/// Requests are fire-and-forget: they never wait for the save, and bursts of
/// requests inside the debounce window collapse into a single write.
#[derive(Clone, Default)]
pub struct Autosave {
    notify: Option<Arc<Notify>>,
}

impl Autosave {
    /// A handle whose requests do nothing.
    pub fn disabled() -> Self {
        Self { notify: None }
    }

    /// Start the save worker.
    pub fn spawn(
        store: Arc<GameStore>,
        persistence: Arc<dyn PersistencePort>,
        debounce: Duration,
    ) -> (Self, JoinHandle<()>) {
        let notify = Arc::new(Notify::new());
        let worker = notify.clone();
        let handle = tokio::spawn(async move {
            loop {
                worker.notified().await;
                tokio::time::sleep(debounce).await;

                let document = store.snapshot().await;
                match persistence.save(&document).await {
                    Ok(()) => tracing::debug!(
                        characters = document.characters.len(),
                        "Autosaved game state"
                    ),
                    Err(e) => tracing::warn!(error = %e, "Autosave failed"),
                }
            }
        });
        (
            Self {
                notify: Some(notify),
            },
            handle,
        )
    }

    pub fn request(&self) {
        if let Some(notify) = &self.notify {
            notify.notify_one();
        }
    }
}
