//! Configuration module
//!
//! Environment-driven settings for the wizard: where submissions go, where
//! the recovery snapshot lives, and composition limits.

use std::env;

use crate::error::AppError;

// Defaults
const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_API_VERSION: &str = "v0";
const DEFAULT_SNAPSHOT_DIR: &str = ".souk";
const DEFAULT_SNAPSHOT_KEY: &str = "ad-draft";
const DEFAULT_MAX_IMAGES: usize = 8;
const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 60;

/// Wizard configuration, read from the environment with defaults.
#[derive(Clone, Debug)]
pub struct WizardConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    /// API version segment of the submission endpoint path (`/api/{version}`).
    pub api_version: String,
    /// Directory for the durable recovery snapshot.
    pub snapshot_dir: String,
    /// Fixed storage key the current draft is snapshotted under.
    pub snapshot_key: String,
    pub max_images: usize,
    pub submit_timeout_secs: u64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        WizardConfig {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            snapshot_dir: DEFAULT_SNAPSHOT_DIR.to_string(),
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
            max_images: DEFAULT_MAX_IMAGES,
            submit_timeout_secs: DEFAULT_SUBMIT_TIMEOUT_SECS,
        }
    }
}

impl WizardConfig {
    /// Load configuration from the environment (`SOUK_*` variables), falling
    /// back to defaults. A `.env` file is honored when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        WizardConfig {
            api_url: env_or("SOUK_API_URL", DEFAULT_API_URL),
            api_key: env::var("SOUK_API_KEY").ok(),
            api_version: env_or("SOUK_API_VERSION", DEFAULT_API_VERSION),
            snapshot_dir: env_or("SOUK_SNAPSHOT_DIR", DEFAULT_SNAPSHOT_DIR),
            snapshot_key: env_or("SOUK_SNAPSHOT_KEY", DEFAULT_SNAPSHOT_KEY),
            max_images: parse_or("SOUK_MAX_IMAGES", DEFAULT_MAX_IMAGES),
            submit_timeout_secs: parse_or("SOUK_SUBMIT_TIMEOUT_SECS", DEFAULT_SUBMIT_TIMEOUT_SECS),
        }
    }

    /// Validate the loaded configuration.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.api_url.trim().is_empty() {
            return Err(AppError::InvalidInput("SOUK_API_URL is empty".to_string()));
        }
        if self.api_version.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "SOUK_API_VERSION is empty".to_string(),
            ));
        }
        if self.snapshot_key.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "SOUK_SNAPSHOT_KEY is empty".to_string(),
            ));
        }
        if self.max_images == 0 {
            return Err(AppError::InvalidInput(
                "SOUK_MAX_IMAGES must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
