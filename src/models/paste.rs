use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A stored paste. Serialized camelCase because the persisted record and the
/// API share this JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paste {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Epoch milliseconds, set once at creation.
    pub created_at: i64,
    /// Epoch milliseconds; `None` means the paste never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub views: u64,
}

impl Paste {
    pub fn new(
        id: String,
        title: Option<String>,
        content: String,
        language: Option<String>,
        expires_at: Option<i64>,
    ) -> Self {
        Self {
            id,
            title: title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Untitled".to_string()),
            content,
            language: language
                .filter(|l| !l.trim().is_empty())
                .or_else(|| Some("plaintext".to_string())),
            created_at: now_ms(),
            expires_at,
            views: 0,
        }
    }

    /// Lazy-expiry check: a paste past its deadline is logically deleted even
    /// while still physically present in the store.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        matches!(self.expires_at, Some(deadline) if now_ms > deadline)
    }
}

/// Current time as epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePasteRequest {
    pub content: String,
    pub title: Option<String>,
    pub language: Option<String>,
    pub custom_id: Option<String>,
    pub expiration: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePasteResponse {
    pub success: bool,
    pub id: String,
    pub url: String,
    pub created_at: i64,
}

/// Enumerated expiration policy from the create form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationPolicy {
    Never,
    OneHour,
    OneDay,
    OneWeek,
    OneMonth,
}

impl ExpirationPolicy {
    /// Parse a policy tag. Unknown values degrade to `Never` rather than to a
    /// zero duration; immediate expiry is never a useful outcome.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "never" => Self::Never,
            "1h" => Self::OneHour,
            "1d" => Self::OneDay,
            "1w" => Self::OneWeek,
            "1m" => Self::OneMonth,
            other => {
                tracing::warn!("Unknown expiration policy '{}', treating as never", other);
                Self::Never
            }
        }
    }

    /// Absolute expiry deadline for a paste created at `now_ms`.
    pub fn expires_at(&self, now_ms: i64) -> Option<i64> {
        const HOUR_MS: i64 = 60 * 60 * 1000;
        match self {
            Self::Never => None,
            Self::OneHour => Some(now_ms + HOUR_MS),
            Self::OneDay => Some(now_ms + 24 * HOUR_MS),
            Self::OneWeek => Some(now_ms + 7 * 24 * HOUR_MS),
            Self::OneMonth => Some(now_ms + 30 * 24 * HOUR_MS),
        }
    }
}
