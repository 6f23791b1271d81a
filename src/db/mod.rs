//! sled-backed key-value layer.

/// Paste storage helpers.
pub mod paste;

use crate::error::AppError;
use sled::Db;
use std::sync::Arc;

/// Database handle with access to the underlying sled trees.
pub struct Database {
    pub db: Arc<Db>,
    pub pastes: paste::PasteDb,
}

#[cfg(test)]
mod tests;

impl Database {
    /// Open the database and initialize trees.
    ///
    /// # Errors
    /// Returns an error if sled cannot open the database, including when
    /// another process still holds the lock.
    pub fn new(path: &str) -> Result<Self, AppError> {
        // Ensure the data directory exists
        if let Some(parent) = std::path::Path::new(path).parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let db = match sled::open(path) {
            Ok(db) => Arc::new(db),
            Err(e) if e.to_string().contains("could not acquire lock") => {
                return Err(AppError::DatabaseError(format!(
                    "Database at {} is locked; is another quickpaste instance running?",
                    path
                )));
            }
            Err(e) => return Err(AppError::DatabaseError(e.to_string())),
        };

        Ok(Self {
            pastes: paste::PasteDb::new(db.clone())?,
            db,
        })
    }

    /// Flush all pending writes to disk.
    ///
    /// # Errors
    /// Returns an error if sled fails to flush.
    pub fn flush(&self) -> Result<(), AppError> {
        self.db.flush()?;
        Ok(())
    }
}
