use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::models::entry::MoodEntry;

/// Local persistence port. One blob holds the full serialized entry list;
/// it is read once at startup and rewritten on every working-set change.
#[async_trait]
pub trait EntryCache: Send + Sync {
    /// `Ok(None)` means "no usable cache" — absent or malformed.
    async fn load(&self) -> CoreResult<Option<Vec<MoodEntry>>>;
    async fn store(&self, entries: &[MoodEntry]) -> CoreResult<()>;
}

/// File-backed cache: the whole entry list as one JSON document.
pub struct JsonFileCache {
    path: PathBuf,
}

impl JsonFileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EntryCache for JsonFileCache {
    async fn load(&self) -> CoreResult<Option<Vec<MoodEntry>>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(Some(entries)),
            Err(e) => {
                // Malformed cache is treated as absence, not a fatal error.
                tracing::warn!(error = %e, path = %self.path.display(), "Discarding malformed entry cache");
                Ok(None)
            }
        }
    }

    async fn store(&self, entries: &[MoodEntry]) -> CoreResult<()> {
        let raw = serde_json::to_string(entries)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}
