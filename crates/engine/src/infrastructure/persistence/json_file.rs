//! JSON file storage for the game document.

use std::path::PathBuf;

use async_trait::async_trait;
use skirmish_domain::GameState;

use crate::infrastructure::ports::{PersistenceError, PersistencePort};

/// Stores the whole document as pretty-printed JSON in a single file.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-save never leaves a truncated document behind.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl PersistencePort for JsonFileStore {
    async fn save(&self, document: &GameState) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec_pretty(document).map_err(PersistenceError::serialization)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PersistenceError::io("create state directory", e))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes)
            .await
            .map_err(|e| PersistenceError::io("write state file", e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| PersistenceError::io("replace state file", e))?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Saved game state");
        Ok(())
    }

    async fn load(&self) -> Result<Option<GameState>, PersistenceError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistenceError::io("read state file", e)),
        };
        let document = serde_json::from_slice(&bytes).map_err(PersistenceError::serialization)?;
        Ok(Some(document))
    }
}
