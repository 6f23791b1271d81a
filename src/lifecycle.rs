//! Paste lifecycle manager: id allocation, expiration bookkeeping, and
//! view counting over the key-value store.

use crate::{
    config::Config,
    db::Database,
    error::AppError,
    ids,
    models::paste::{now_ms, CreatePasteRequest, ExpirationPolicy, Paste},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct Lifecycle {
    db: Arc<Database>,
    config: Arc<Config>,
}

impl Lifecycle {
    pub fn new(db: Arc<Database>, config: Arc<Config>) -> Self {
        Self { db, config }
    }

    /// Create a paste: validate input, allocate an id, compute the expiry
    /// deadline, and persist the record.
    ///
    /// # Errors
    /// - [`AppError::Validation`] for empty or oversized content, or a
    ///   malformed custom id.
    /// - [`AppError::Conflict`] when the custom id is already taken. The
    ///   existence check is a point lookup, not an atomic reservation.
    /// - [`AppError::IdExhausted`] when random allocation keeps colliding.
    pub fn create(&self, req: CreatePasteRequest) -> Result<Paste, AppError> {
        if req.content.trim().is_empty() {
            return Err(AppError::Validation("Content is required".to_string()));
        }
        if req.content.len() > self.config.max_paste_size {
            return Err(AppError::Validation(format!(
                "Content too large (max {} bytes)",
                self.config.max_paste_size
            )));
        }

        let id = match req.custom_id.as_deref().filter(|s| !s.is_empty()) {
            Some(custom) => {
                if !ids::is_valid_custom_id(custom) {
                    return Err(AppError::Validation(
                        "Custom ID can only contain letters, numbers, hyphens, and underscores"
                            .to_string(),
                    ));
                }
                if self.db.pastes.contains(custom)? {
                    return Err(AppError::Conflict("Custom ID already taken".to_string()));
                }
                custom.to_string()
            }
            None => ids::allocate_id(|id| self.db.pastes.contains(id), ids::MAX_ID_ATTEMPTS)?,
        };

        let policy = ExpirationPolicy::parse(req.expiration.as_deref().unwrap_or("never"));
        let expires_at = policy.expires_at(now_ms());

        // Content is stored verbatim; only the emptiness check trims.
        let paste = Paste::new(id, req.title, req.content, req.language, expires_at);
        self.db.pastes.insert(&paste)?;

        tracing::info!(id = %paste.id, expires = ?paste.expires_at, "Created paste");
        Ok(paste)
    }

    /// Look up a paste for the HTML view. Increments the view counter on
    /// success and returns the updated record.
    pub fn fetch(&self, id: &str) -> Result<Paste, AppError> {
        let paste = self.lookup_active(id)?;
        match self.db.pastes.increment_views(&paste.id)? {
            Some(updated) => Ok(updated),
            // deleted between lookup and increment
            None => Err(AppError::NotFound),
        }
    }

    /// Look up a paste for the raw view. Same expiry semantics as [`fetch`]
    /// but never touches the view counter; raw reads are not counted.
    ///
    /// [`fetch`]: Lifecycle::fetch
    pub fn fetch_raw(&self, id: &str) -> Result<Paste, AppError> {
        self.lookup_active(id)
    }

    /// Shared lookup with the lazy-expiry tombstone check.
    fn lookup_active(&self, id: &str) -> Result<Paste, AppError> {
        if !ids::is_valid_custom_id(id) {
            return Err(AppError::NotFound);
        }

        let paste = self.db.pastes.get(id)?.ok_or(AppError::NotFound)?;

        if paste.is_expired(now_ms()) {
            // Best-effort cleanup; the paste is logically gone either way.
            if let Err(e) = self.db.pastes.delete(id) {
                tracing::warn!(id, "Failed to delete expired paste: {}", e);
            }
            return Err(AppError::Expired);
        }

        Ok(paste)
    }
}
