//! # Dependency Injection
//!
//! Turns an [`AppConfig`] into the ports the wizard needs. This is the only
//! place that depends on `rw-app`, `rw-core` and `rw-infra` together, and it
//! only assembles: empty config values are mapped to defaults here, nothing
//! else is decided.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rw_app::{WizardDeps, WizardSettings};
use rw_core::config::AppConfig;
use rw_core::ports::{
    ConfirmationNotifierPort, RegistrationRepositoryPort, WizardEventPort,
};
use rw_core::ValidationPolicy;
use rw_infra::db::{init_db_pool, DieselRegistrationRepository, DieselSqliteExecutor, RegistrationRowMapper};
use rw_infra::notifier::DEFAULT_EMAILJS_ENDPOINT;
use rw_infra::{
    EmailJsConfig, EmailJsNotifier, InMemoryRegistrationRepository, NoopNotifier, RestConfig,
    RestRegistrationRepository, SystemClock,
};
use tracing::{info, warn};

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_REST_TABLE: &str = "registrations";
const DEFAULT_DATABASE_FILE: &str = "registrations.db";
const APP_DIR_NAME: &str = "registration-wizard";

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Unknown storage backend: {0}")]
    UnknownBackend(String),

    #[error("Missing configuration value: {0}")]
    MissingValue(&'static str),

    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),
}

/// Resolves behaviour switches, applying defaults for empty values.
pub fn build_settings(config: &AppConfig) -> WizardSettings {
    let timeout_ms = if config.request_timeout_ms == 0 {
        DEFAULT_REQUEST_TIMEOUT_MS
    } else {
        config.request_timeout_ms
    };

    WizardSettings {
        policy: ValidationPolicy {
            require_email_format: config.require_email_format,
        },
        request_timeout: Duration::from_millis(timeout_ms),
        send_confirmation: config.confirmation_enabled,
    }
}

/// Builds every port the orchestrator depends on.
pub fn wire_dependencies(
    config: &AppConfig,
    events: Arc<dyn WizardEventPort>,
) -> WiringResult<WizardDeps> {
    Ok(WizardDeps {
        registrations: build_registrations(config)?,
        notifier: build_notifier(config)?,
        events,
        clock: Arc::new(SystemClock),
    })
}

fn build_registrations(config: &AppConfig) -> WiringResult<Arc<dyn RegistrationRepositoryPort>> {
    match config.storage_backend.as_str() {
        "" | "memory" => {
            warn!("registrations are kept in memory and lost on exit");
            Ok(Arc::new(InMemoryRegistrationRepository::new()))
        }
        "sqlite" => {
            let path = database_path(config)?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| WiringError::DatabaseInit(e.to_string()))?;
            }
            let pool = init_db_pool(&path.to_string_lossy())
                .map_err(|e| WiringError::DatabaseInit(format!("{e:#}")))?;
            info!(path = %path.display(), "sqlite record store ready");
            Ok(Arc::new(DieselRegistrationRepository::new(
                DieselSqliteExecutor::new(pool),
                RegistrationRowMapper,
            )))
        }
        "rest" => {
            if config.rest_base_url.is_empty() {
                return Err(WiringError::MissingValue("rest.base_url"));
            }
            if config.rest_api_key.is_empty() {
                return Err(WiringError::MissingValue("rest.api_key"));
            }
            let table = if config.rest_table.is_empty() {
                DEFAULT_REST_TABLE.to_string()
            } else {
                config.rest_table.clone()
            };
            let repo = RestRegistrationRepository::new(RestConfig {
                base_url: config.rest_base_url.clone(),
                api_key: config.rest_api_key.clone(),
                table,
            })
            .map_err(|e| WiringError::HttpClientInit(e.to_string()))?;
            info!(base_url = %config.rest_base_url, "rest record store ready");
            Ok(Arc::new(repo))
        }
        other => Err(WiringError::UnknownBackend(other.to_string())),
    }
}

fn build_notifier(config: &AppConfig) -> WiringResult<Arc<dyn ConfirmationNotifierPort>> {
    if !config.confirmation_enabled {
        return Ok(Arc::new(NoopNotifier));
    }

    let required = [
        ("confirmation.service_id", &config.emailjs_service_id),
        ("confirmation.template_id", &config.emailjs_template_id),
        ("confirmation.public_key", &config.emailjs_public_key),
    ];
    if let Some((name, _)) = required.iter().find(|(_, value)| value.is_empty()) {
        return Err(WiringError::MissingValue(*name));
    }

    let endpoint = if config.emailjs_endpoint.is_empty() {
        DEFAULT_EMAILJS_ENDPOINT.to_string()
    } else {
        config.emailjs_endpoint.clone()
    };
    let notifier = EmailJsNotifier::new(EmailJsConfig {
        endpoint,
        service_id: config.emailjs_service_id.clone(),
        template_id: config.emailjs_template_id.clone(),
        public_key: config.emailjs_public_key.clone(),
    })
    .map_err(|e| WiringError::HttpClientInit(e.to_string()))?;
    Ok(Arc::new(notifier))
}

fn database_path(config: &AppConfig) -> WiringResult<PathBuf> {
    if !config.database_path.as_os_str().is_empty() {
        return Ok(config.database_path.clone());
    }
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(DEFAULT_DATABASE_FILE))
        .ok_or(WiringError::MissingValue("storage.database_path"))
}
