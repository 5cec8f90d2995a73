use std::sync::Arc;
use std::time::Duration;

use rw_core::ports::{RegistrationRepositoryError, RegistrationRepositoryPort};
use rw_core::RegistrationId;
use tracing::{debug, warn};

/// Use case for the pre-insert existence query keyed on email.
pub struct CheckDuplicateEmail {
    registrations: Arc<dyn RegistrationRepositoryPort>,
    timeout: Duration,
}

impl CheckDuplicateEmail {
    pub fn new(registrations: Arc<dyn RegistrationRepositoryPort>, timeout: Duration) -> Self {
        Self {
            registrations,
            timeout,
        }
    }

    /// Returns the ids of existing registrations using `email`.
    ///
    /// An elapsed timeout is reported as [`RegistrationRepositoryError::Timeout`].
    pub async fn execute(
        &self,
        email: &str,
    ) -> Result<Vec<RegistrationId>, RegistrationRepositoryError> {
        let existing = tokio::time::timeout(self.timeout, self.registrations.find_by_email(email))
            .await
            .map_err(|_| {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "duplicate check timed out");
                RegistrationRepositoryError::Timeout
            })??;

        debug!(matches = existing.len(), "duplicate check completed");
        Ok(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rw_core::RegistrationRecord;

    struct SlowRepository;

    #[async_trait]
    impl RegistrationRepositoryPort for SlowRepository {
        async fn find_by_email(
            &self,
            _email: &str,
        ) -> Result<Vec<RegistrationId>, RegistrationRepositoryError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }

        async fn insert(
            &self,
            _record: &RegistrationRecord,
        ) -> Result<(), RegistrationRepositoryError> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_store_reports_timeout() {
        let use_case = CheckDuplicateEmail::new(Arc::new(SlowRepository), Duration::from_millis(50));

        let result = use_case.execute("a@x.com").await;

        assert!(matches!(result, Err(RegistrationRepositoryError::Timeout)));
    }
}
