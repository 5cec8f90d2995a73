//! # Pure Data Module - Data Transfer Objects Only
//!
//! Maps a parsed TOML document onto [`AppConfig`]. Missing keys become empty
//! values; deciding what an empty value means is left to the wiring layer.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Console layout name (`wide` / `compact`), may be empty
    pub layout: String,

    /// Directory for the log file; empty disables file logging
    pub log_dir: PathBuf,

    /// Storage backend name (`memory` / `sqlite` / `rest`), may be empty
    pub storage_backend: String,

    /// SQLite database path (path info only, no existence check)
    pub database_path: PathBuf,

    pub rest_base_url: String,
    pub rest_api_key: String,
    pub rest_table: String,

    /// Per-request timeout for the record store, 0 when unset
    pub request_timeout_ms: u64,

    /// Reject implausible email addresses on the personal info step
    pub require_email_format: bool,

    pub confirmation_enabled: bool,
    pub emailjs_endpoint: String,
    pub emailjs_service_id: String,
    pub emailjs_template_id: String,
    pub emailjs_public_key: String,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// This method must NOT contain any validation or default value logic.
    /// Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let bool_at = |section: &str, key: &str| -> bool {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
        };

        let request_timeout_ms = match toml_value
            .get("submission")
            .and_then(|s| s.get("request_timeout_ms"))
        {
            Some(value) => {
                let raw = value.as_integer().ok_or_else(|| {
                    anyhow::anyhow!("submission.request_timeout_ms must be an integer")
                })?;
                u64::try_from(raw).map_err(|_| {
                    anyhow::anyhow!("submission.request_timeout_ms must not be negative")
                })?
            }
            None => 0,
        };

        Ok(Self {
            layout: str_at("general", "layout"),
            log_dir: PathBuf::from(str_at("general", "log_dir")),
            storage_backend: str_at("storage", "backend"),
            database_path: PathBuf::from(str_at("storage", "database_path")),
            rest_base_url: str_at("rest", "base_url"),
            rest_api_key: str_at("rest", "api_key"),
            rest_table: str_at("rest", "table"),
            request_timeout_ms,
            require_email_format: bool_at("submission", "require_email_format"),
            confirmation_enabled: bool_at("confirmation", "enabled"),
            emailjs_endpoint: str_at("confirmation", "endpoint"),
            emailjs_service_id: str_at("confirmation", "service_id"),
            emailjs_template_id: str_at("confirmation", "template_id"),
            emailjs_public_key: str_at("confirmation", "public_key"),
        })
    }
}
