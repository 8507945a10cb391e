//! Runtime settings for the console.
//!
//! Loaded from the environment (with `.env` support via dotenvy). Every
//! setting has a workable default so `docket` runs against a local
//! `docket serve` with no configuration at all.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the case record store.
    pub api_url: String,
    /// Firm whose board this console operates on.
    pub firm_id: String,
    /// Author attached to notes and tasks created from the console.
    pub user_id: String,
    /// SQLite path used by `docket serve`.
    pub db_path: PathBuf,
}

impl Settings {
    /// Load settings from the process environment, reading `.env` first.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Split out so tests can inject
    /// values without mutating the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: lookup("DOCKET_API_URL")
                .unwrap_or_else(|| "http://127.0.0.1:8420".to_string()),
            firm_id: lookup("DOCKET_FIRM_ID").unwrap_or_else(|| "demo-firm-1".to_string()),
            user_id: lookup("DOCKET_USER_ID").unwrap_or_else(|| "demo-user-1".to_string()),
            db_path: lookup("DOCKET_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".docket/docket.db")),
        }
    }
}
