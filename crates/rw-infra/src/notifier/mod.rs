mod emailjs;
mod noop;

pub use emailjs::{EmailJsConfig, EmailJsNotifier, DEFAULT_EMAILJS_ENDPOINT};
pub use noop::NoopNotifier;
