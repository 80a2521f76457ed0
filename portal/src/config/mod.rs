//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the backend base URL, the request timeout, and the location of the durable
//! token store.

use std::env;
use std::path::PathBuf;

/// Runtime configuration for the portal core.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Base URL of the journal backend.
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// File the session tokens are persisted to.
    pub token_store_path: PathBuf,
}

impl Default for PortalConfig {
    fn default() -> Self {
        let home = env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir);
        Self {
            api_base_url: "http://localhost:8000/api".to_owned(),
            request_timeout_secs: 30,
            token_store_path: home.join(".journal-portal").join("tokens.json"),
        }
    }
}

impl PortalConfig {
    /// Reads configuration from `PORTAL_API_URL`, `PORTAL_TIMEOUT_SECS` and
    /// `PORTAL_TOKEN_PATH`, falling back to the defaults for anything unset
    /// or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("PORTAL_API_URL").unwrap_or(defaults.api_base_url),
            request_timeout_secs: env::var("PORTAL_TIMEOUT_SECS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            token_store_path: env::var_os("PORTAL_TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.token_store_path),
        }
    }
}
