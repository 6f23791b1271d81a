use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub db_path: String,
    pub port: u16,
    pub max_paste_size: usize,
    /// External base URL used in create responses. Falls back to the
    /// request's Host header when unset.
    pub public_url: Option<String>,
    /// Seconds between expired-paste sweeps.
    pub sweep_interval: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("DB_PATH").unwrap_or_else(|_| "./data/quickpaste.db".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            max_paste_size: env::var("MAX_PASTE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB default
            public_url: env::var("PUBLIC_URL")
                .ok()
                .map(|u| u.trim_end_matches('/').to_string()),
            sweep_interval: env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|i| i.parse().ok())
                .unwrap_or(3600), // hourly
        }
    }
}
