pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{apply_env_overrides, load_config, resolve_config};
pub use wiring::{build_settings, wire_dependencies, WiringError, WiringResult};
