pub mod registration_mapper;

pub use registration_mapper::RegistrationRowMapper;
