//! # Configuration Loader
//!
//! Reads `config.toml` and maps it onto [`AppConfig`]. Secrets may also come
//! from the environment (or a `.env` file), which wins over the file.
//!
//! Pure data loading only: no validation and no default values here. Empty
//! values are facts; the wiring layer decides what they mean.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rw_core::config::AppConfig;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

pub const ENV_REST_API_KEY: &str = "RW_REST_API_KEY";
pub const ENV_EMAILJS_PUBLIC_KEY: &str = "RW_EMAILJS_PUBLIC_KEY";
pub const ENV_EMAILJS_SERVICE_ID: &str = "RW_EMAILJS_SERVICE_ID";
pub const ENV_EMAILJS_TEMPLATE_ID: &str = "RW_EMAILJS_TEMPLATE_ID";

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read, is not valid TOML, or carries a
/// value of the wrong type.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Resolve the configuration for this run.
///
/// An explicit path must exist. Without one, `config.toml` in the working
/// directory is used when present, otherwise every value is empty.
pub fn resolve_config(explicit: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let mut config = match explicit {
        Some(path) => load_config(&path)?,
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if fallback.exists() {
                load_config(&fallback)?
            } else {
                debug!("no {DEFAULT_CONFIG_FILE} found, starting from empty config");
                AppConfig::default()
            }
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    info!(
        storage_backend = %config.storage_backend,
        confirmation_enabled = config.confirmation_enabled,
        "configuration resolved"
    );
    Ok(config)
}

/// Overwrite secret values with environment variables that are set and
/// non-empty.
pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let overrides: [(&str, &mut String); 4] = [
        (ENV_REST_API_KEY, &mut config.rest_api_key),
        (ENV_EMAILJS_PUBLIC_KEY, &mut config.emailjs_public_key),
        (ENV_EMAILJS_SERVICE_ID, &mut config.emailjs_service_id),
        (ENV_EMAILJS_TEMPLATE_ID, &mut config.emailjs_template_id),
    ];

    for (key, slot) in overrides {
        if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
            debug!(key, "config value taken from environment");
            *slot = value;
        }
    }
}
