mod registration_repo;

pub use registration_repo::InMemoryRegistrationRepository;
