//! In-memory registration store.
//!
//! Used by the console when no backend is configured and by tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use rw_core::ports::{RegistrationRepositoryError, RegistrationRepositoryPort};
use rw_core::{RegistrationId, RegistrationRecord};

#[derive(Default)]
pub struct InMemoryRegistrationRepository {
    records: Mutex<Vec<RegistrationRecord>>,
}

impl InMemoryRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<RegistrationRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub async fn records(&self) -> Vec<RegistrationRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl RegistrationRepositoryPort for InMemoryRegistrationRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<RegistrationId>, RegistrationRepositoryError> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|r| r.email == email)
            .map(|r| r.id.clone())
            .collect())
    }

    async fn insert(&self, record: &RegistrationRecord) -> Result<(), RegistrationRepositoryError> {
        let mut records = self.records.lock().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(RegistrationRepositoryError::Rejected(format!(
                "duplicate id {}",
                record.id
            )));
        }
        records.push(record.clone());
        Ok(())
    }
}
