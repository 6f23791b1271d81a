use crate::{error::AppError, models::paste::Paste};
use sled::Db;
use std::sync::Arc;

/// Pastes tree: key is the paste id, value is the JSON-encoded record.
pub struct PasteDb {
    tree: sled::Tree,
}

impl PasteDb {
    pub fn new(db: Arc<Db>) -> Result<Self, AppError> {
        let tree = db.open_tree("pastes")?;
        Ok(Self { tree })
    }

    pub fn insert(&self, paste: &Paste) -> Result<(), AppError> {
        let value = serde_json::to_vec(paste)?;
        self.tree.insert(paste.id.as_bytes(), value)?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<Paste>, AppError> {
        Ok(self
            .tree
            .get(id.as_bytes())?
            .map(|v| serde_json::from_slice(&v))
            .transpose()?)
    }

    /// Point lookup used by id allocation. Check-then-act: a concurrent
    /// creation can still slip in between probe and insert.
    pub fn contains(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.tree.contains_key(id.as_bytes())?)
    }

    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.tree.remove(id.as_bytes())?.is_some())
    }

    /// Increment the view counter via sled's read-modify-write primitive and
    /// return the updated record. `None` if the paste vanished meanwhile.
    pub fn increment_views(&self, id: &str) -> Result<Option<Paste>, AppError> {
        let previous = self.tree.fetch_and_update(id.as_bytes(), |old| {
            old.map(|bytes| match serde_json::from_slice::<Paste>(bytes) {
                Ok(mut paste) => {
                    paste.views += 1;
                    serde_json::to_vec(&paste).unwrap_or_else(|_| bytes.to_vec())
                }
                // keep undecodable records intact; the caller surfaces the error
                Err(_) => bytes.to_vec(),
            })
        })?;

        match previous {
            Some(bytes) => {
                let mut paste: Paste = serde_json::from_slice(&bytes)?;
                paste.views += 1;
                Ok(Some(paste))
            }
            None => Ok(None),
        }
    }

    /// Best-effort cleanup of expired records, the stand-in for a
    /// provider-managed TTL. The lazy check on read stays authoritative.
    ///
    /// # Returns
    /// Number of records removed.
    pub fn sweep_expired(&self, now_ms: i64) -> Result<usize, AppError> {
        let mut removed = 0;
        for item in self.tree.iter() {
            let (key, value) = item?;
            let paste: Paste = match serde_json::from_slice(&value) {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!("Skipping undecodable paste record during sweep: {}", e);
                    continue;
                }
            };
            if paste.is_expired(now_ms) {
                self.tree.remove(key)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
