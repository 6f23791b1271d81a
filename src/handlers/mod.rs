//! HTTP request handlers.

/// Paste creation and retrieval endpoints.
pub mod paste;
