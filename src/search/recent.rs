//! Recently submitted logins.
//!
//! The list is kept most-recent-first, holds no duplicates and never grows
//! past [`MAX_RECENT`]. Every change rewrites the whole list through the
//! injected [`RecentStorage`] and is broadcast to subscribers.

use crate::error::{GhseekError, Result};
use std::path::PathBuf;
use tokio::sync::watch;

pub const MAX_RECENT: usize = 5;

pub trait RecentStorage: Send {
    /// Returns the raw persisted payload, or `None` if nothing was saved yet.
    fn read(&self) -> Result<Option<String>>;
    fn write(&mut self, payload: &str) -> Result<()>;
}

/// Stores the list as a JSON array in a single file.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RecentStorage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, payload: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // temp file + rename keeps a crash from leaving half a file behind
        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, payload)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage {
    pub payload: Option<String>,
}

#[cfg(test)]
impl RecentStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.payload.clone())
    }

    fn write(&mut self, payload: &str) -> Result<()> {
        self.payload = Some(payload.to_string());
        Ok(())
    }
}

/// Reads as empty and rejects every write.
#[cfg(test)]
pub struct FailingStorage;

#[cfg(test)]
impl RecentStorage for FailingStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn write(&mut self, _payload: &str) -> Result<()> {
        Err(GhseekError::Storage("disk full".to_string()))
    }
}

pub struct RecentSearches {
    storage: Box<dyn RecentStorage>,
    tx: watch::Sender<Vec<String>>,
}

impl RecentSearches {
    /// Reads the persisted list. Missing, unreadable or malformed content
    /// yields an empty list instead of an error.
    pub fn load(storage: Box<dyn RecentStorage>) -> Self {
        let entries = match storage.read() {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) => normalize(list),
                Err(e) => {
                    tracing::warn!(error = %e, "recent searches malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read recent searches, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = entries.len(), "recent searches loaded");

        let (tx, _) = watch::channel(entries);
        Self { storage, tx }
    }

    /// Moves `login` to the front, then persists the full list. The
    /// in-memory list is updated even when persisting fails.
    pub fn add(&mut self, login: &str) -> Result<()> {
        let login = login.trim();
        if login.is_empty() {
            return Ok(());
        }

        let mut entries = self.entries();
        entries.retain(|l| l != login);
        entries.insert(0, login.to_string());
        entries.truncate(MAX_RECENT);

        let payload = serde_json::to_string(&entries)?;
        self.tx.send_replace(entries);
        self.storage
            .write(&payload)
            .map_err(|e| GhseekError::Storage(format!("saving recent searches: {e}")))
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.tx.subscribe()
    }

    pub fn entries(&self) -> Vec<String> {
        self.tx.borrow().clone()
    }
}

fn normalize(list: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(MAX_RECENT);
    for login in list {
        let login = login.trim();
        if login.is_empty() || out.iter().any(|l| l == login) {
            continue;
        }
        out.push(login.to_string());
        if out.len() == MAX_RECENT {
            break;
        }
    }
    out
}
