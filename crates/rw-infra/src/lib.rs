pub mod db;
pub mod memory;
pub mod notifier;
pub mod rest;
pub mod time;

pub use memory::InMemoryRegistrationRepository;
pub use notifier::{EmailJsConfig, EmailJsNotifier, NoopNotifier};
pub use rest::{RestConfig, RestRegistrationRepository};
pub use time::SystemClock;
