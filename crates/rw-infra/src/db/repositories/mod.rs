mod registration_repo;

pub use registration_repo::DieselRegistrationRepository;
