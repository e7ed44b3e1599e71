use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_LOG_FILE: &str = "budget-panel.log";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL for login and the budget document.
    pub api_url: String,
    /// When set, the document lives in this SQLite database and login is skipped.
    pub database_url: Option<String>,
    pub log_file: PathBuf,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            database_url: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_url: non_empty("BUDGET_API_URL").unwrap_or(defaults.api_url),
            database_url: non_empty("DATABASE_URL"),
            log_file: non_empty("BUDGET_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            log_filter: non_empty("RUST_LOG").unwrap_or(defaults.log_filter),
        }
    }

    pub fn is_local(&self) -> bool {
        self.database_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = Config::from_lookup(|_| None);
        assert_eq!(cfg, Config::default());
        assert!(!cfg.is_local());
    }

    #[test]
    fn reads_overrides_and_ignores_blank_values() {
        let vars: HashMap<&str, &str> = [
            ("BUDGET_API_URL", "http://budget.local:8080"),
            ("DATABASE_URL", "sqlite://./budget.db"),
            ("BUDGET_LOG_FILE", "  "),
        ]
        .into_iter()
        .collect();
        let cfg = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.api_url, "http://budget.local:8080");
        assert_eq!(cfg.database_url.as_deref(), Some("sqlite://./budget.db"));
        assert_eq!(cfg.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert!(cfg.is_local());
    }
}
