//! Tracing configuration for the registration wizard.
//!
//! - **Console-safe**: human output goes to stderr, stdout belongs to the wizard
//! - **Environment-aware**: debug level in development builds, info in release
//! - **Optional sinks**: a log file when `general.log_dir` is set, Sentry when
//!   `SENTRY_DSN` is set

use std::path::Path;
use std::{fs, io, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static SENTRY_GUARD: OnceLock<sentry::ClientInitGuard> = OnceLock::new();

const LOG_FILE_NAME: &str = "registration-wizard.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default filter directives, used when `RUST_LOG` is not set.
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let app_level = if is_dev { "debug" } else { "info" };
    vec![
        "warn".to_string(),
        format!("registration_wizard={app_level}"),
        format!("rw_app={app_level}"),
        format!("rw_core={app_level}"),
        format!("rw_infra={app_level}"),
        "diesel=warn".to_string(),
        "hyper=off".to_string(), // Connection pool chatter from reqwest
    ]
}

/// Initialize the global tracing subscriber.
///
/// Call once in `main`, after the configuration is resolved and before the
/// wizard is wired.
///
/// # Errors
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber(log_dir: &Path) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let sentry_layer = match std::env::var("SENTRY_DSN") {
        Ok(dsn) if !dsn.is_empty() => {
            let guard = sentry::init((
                dsn,
                sentry::ClientOptions {
                    release: sentry::release_name!(),
                    traces_sample_rate: 1.0,
                    ..Default::default()
                },
            ));
            if SENTRY_GUARD.set(guard).is_err() {
                eprintln!("Sentry guard already initialized");
            }
            Some(sentry_tracing::layer())
        }
        _ => None,
    };

    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(BoxMakeWriter::new(io::stderr));

    let file_layer = if log_dir.as_os_str().is_empty() {
        None
    } else {
        match build_file_writer(log_dir) {
            Ok(writer) => Some(
                fmt::layer()
                    .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
                    .with_level(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(writer),
            ),
            Err(err) => {
                eprintln!("Failed to initialize file logging, continuing without it: {err}");
                None
            }
        }
    };

    registry()
        .with(env_filter)
        .with(sentry_layer)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer(log_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true);
        assert!(dev_directives.contains(&"rw_app=debug".to_string()));
        assert!(dev_directives.contains(&"rw_infra=debug".to_string()));
        assert!(dev_directives.contains(&"hyper=off".to_string()));

        let prod_directives = build_filter_directives(false);
        assert!(prod_directives.contains(&"registration_wizard=info".to_string()));
        assert!(prod_directives.contains(&"rw_core=info".to_string()));
        assert!(!prod_directives.iter().any(|d| d.ends_with("=debug")));
    }

    #[test]
    fn test_file_writer_creates_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");

        // The guard slot is process-wide; only the directory side effect is
        // asserted here.
        let _ = build_file_writer(&log_dir);

        assert!(log_dir.is_dir());
    }
}
