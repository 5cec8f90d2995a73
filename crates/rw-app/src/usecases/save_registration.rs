use std::sync::Arc;
use std::time::Duration;

use rw_core::ports::{RegistrationRepositoryError, RegistrationRepositoryPort};
use rw_core::RegistrationRecord;
use tracing::{info, warn};

/// Use case for persisting a completed registration.
pub struct SaveRegistration {
    registrations: Arc<dyn RegistrationRepositoryPort>,
    timeout: Duration,
}

impl SaveRegistration {
    pub fn new(registrations: Arc<dyn RegistrationRepositoryPort>, timeout: Duration) -> Self {
        Self {
            registrations,
            timeout,
        }
    }

    pub async fn execute(&self, record: &RegistrationRecord) -> Result<(), RegistrationRepositoryError> {
        tokio::time::timeout(self.timeout, self.registrations.insert(record))
            .await
            .map_err(|_| {
                warn!(registration_id = %record.id, "registration insert timed out");
                RegistrationRepositoryError::Timeout
            })??;

        info!(registration_id = %record.id, events = record.selected_events.len(), "registration saved");
        Ok(())
    }
}
