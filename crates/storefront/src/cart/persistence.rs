//! Where the cart survives between runs.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::shopify::types::Cart;

/// Fixed name of the persisted cart entry.
pub const CART_STORE_NAME: &str = "goldsabertooth-cart";

/// Errors from reading or writing the persisted cart.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid persisted cart: {0}")]
    Serde(#[from] serde_json::Error),
}

/// The persisted subset of the cart store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedCart {
    pub cart: Option<Cart>,
}

/// Storage backend for the persisted cart.
#[async_trait]
pub trait CartPersistence: Send + Sync {
    /// Load the persisted entry, `None` if nothing was saved yet.
    async fn load(&self) -> Result<Option<PersistedCart>, PersistenceError>;

    /// Replace the persisted entry.
    async fn save(&self, entry: &PersistedCart) -> Result<(), PersistenceError>;

    /// Delete the persisted entry. Deleting a missing entry succeeds.
    async fn clear(&self) -> Result<(), PersistenceError>;
}

// =============================================================================
// File storage
// =============================================================================

/// JSON file at `{dir}/goldsabertooth-cart.json`.
///
/// Writes go to a temporary file that is then renamed into place, so a
/// crash never leaves a half-written cart behind.
#[derive(Debug, Clone)]
pub struct FileCartStorage {
    path: PathBuf,
}

impl FileCartStorage {
    /// Storage rooted at `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{CART_STORE_NAME}.json")),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CartPersistence for FileCartStorage {
    async fn load(&self) -> Result<Option<PersistedCart>, PersistenceError> {
        match tokio::fs::read(&self.path).await {
            Ok(data) => Ok(Some(serde_json::from_slice(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, entry: &PersistedCart) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec_pretty(entry)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &data).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        debug!(path = %self.path.display(), "saved cart");
        Ok(())
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "deleted persisted cart");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// In-memory storage
// =============================================================================

/// Storage that lives as long as the process. Used by tests and library callers.
#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    entry: Mutex<Option<PersistedCart>>,
}

impl MemoryCartStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with an entry.
    #[must_use]
    pub fn with_entry(entry: PersistedCart) -> Self {
        Self {
            entry: Mutex::new(Some(entry)),
        }
    }

    /// Current stored entry.
    pub async fn stored(&self) -> Option<PersistedCart> {
        self.entry.lock().await.clone()
    }
}

#[async_trait]
impl CartPersistence for MemoryCartStorage {
    async fn load(&self) -> Result<Option<PersistedCart>, PersistenceError> {
        Ok(self.entry.lock().await.clone())
    }

    async fn save(&self, entry: &PersistedCart) -> Result<(), PersistenceError> {
        *self.entry.lock().await = Some(entry.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        *self.entry.lock().await = None;
        Ok(())
    }
}
