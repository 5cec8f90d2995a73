use async_trait::async_trait;
use thiserror::Error;

use crate::ids::RegistrationId;
use crate::registration::RegistrationRecord;

#[derive(Debug, Error)]
pub enum RegistrationRepositoryError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("record rejected: {0}")]
    Rejected(String),

    #[error("record store did not answer in time")]
    Timeout,
}

/// Persistence service for completed registrations.
#[async_trait]
pub trait RegistrationRepositoryPort: Send + Sync {
    /// Ids of stored registrations whose email equals `email` exactly.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<RegistrationId>, RegistrationRepositoryError>;

    async fn insert(&self, record: &RegistrationRecord) -> Result<(), RegistrationRepositoryError>;
}
