mod registration_row;

pub use registration_row::{NewRegistrationRow, RegistrationRow};
