//! ID type wrappers for type safety.

pub mod registration_id;

pub use registration_id::RegistrationId;
