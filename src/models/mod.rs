//! Data models for API requests and persistence.

/// Paste data types and expiration policies.
pub mod paste;
