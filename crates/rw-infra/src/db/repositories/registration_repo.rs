use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use rw_core::ports::{RegistrationRepositoryError, RegistrationRepositoryPort};
use rw_core::{RegistrationId, RegistrationRecord};

use crate::db::models::NewRegistrationRow;
use crate::db::ports::{DbError, DbExecutor, InsertMapper};
use crate::db::schema::t_registration::dsl::*;

pub struct DieselRegistrationRepository<E, M> {
    executor: E,
    mapper: M,
}

impl<E, M> DieselRegistrationRepository<E, M> {
    pub fn new(executor: E, mapper: M) -> Self {
        Self { executor, mapper }
    }
}

impl<E, M> DieselRegistrationRepository<E, M>
where
    E: DbExecutor + Clone + 'static,
{
    /// Runs `f` on the blocking pool. Diesel calls block, and a statement run
    /// inline would keep the caller's timeout from ever firing.
    async fn run_blocking<T, F>(&self, f: F) -> Result<T, RegistrationRepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> anyhow::Result<T> + Send + 'static,
    {
        let executor = self.executor.clone();
        tokio::task::spawn_blocking(move || executor.run(f))
            .await
            .map_err(|e| RegistrationRepositoryError::Unavailable(format!("sqlite task aborted: {e}")))?
            .map_err(into_port_error)
    }
}

#[async_trait]
impl<E, M> RegistrationRepositoryPort for DieselRegistrationRepository<E, M>
where
    E: DbExecutor + Clone + 'static,
    M: InsertMapper<RegistrationRecord, NewRegistrationRow> + Send + Sync,
{
    async fn find_by_email(
        &self,
        email_value: &str,
    ) -> Result<Vec<RegistrationId>, RegistrationRepositoryError> {
        let email_str = email_value.to_string();
        self.run_blocking(move |conn| {
            let ids = t_registration
                .filter(email.eq(&email_str))
                .select(id)
                .load::<String>(conn)?;
            Ok(ids.into_iter().map(RegistrationId::from).collect())
        })
        .await
    }

    async fn insert(&self, record: &RegistrationRecord) -> Result<(), RegistrationRepositoryError> {
        let row = self
            .mapper
            .to_row(record)
            .map_err(|e| RegistrationRepositoryError::Rejected(e.to_string()))?;

        self.run_blocking(move |conn| {
            diesel::insert_into(t_registration)
                .values(&row)
                .execute(conn)?;
            Ok(())
        })
        .await
    }
}

/// A missing connection is worth retrying, a failed statement is not.
fn into_port_error(err: DbError) -> RegistrationRepositoryError {
    match err {
        DbError::Connection(msg) => RegistrationRepositoryError::Unavailable(msg),
        DbError::Query(e) => RegistrationRepositoryError::Storage(format!("{e:#}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::db::executor::DieselSqliteExecutor;
    use crate::db::mappers::RegistrationRowMapper;
    use crate::db::models::RegistrationRow;
    use crate::db::pool::init_db_pool;
    use crate::db::ports::RowMapper;
    use chrono::{TimeZone, Utc};
    use rw_core::EventSlot;
    use tempfile::TempDir;

    impl DieselRegistrationRepository<DieselSqliteExecutor, RegistrationRowMapper> {
        fn get_by_id(&self, id_value: &RegistrationId) -> Option<RegistrationRecord> {
            let id_str = id_value.as_str().to_string();
            self.executor
                .run(move |conn| {
                    let row = t_registration
                        .filter(id.eq(&id_str))
                        .first::<RegistrationRow>(conn)
                        .optional()?;
                    Ok(row)
                })
                .unwrap()
                .map(|row| self.mapper.to_domain(&row).unwrap())
        }
    }

    /// Holds the calling thread like a statement waiting on a locked database.
    #[derive(Clone)]
    struct StalledExecutor;

    impl DbExecutor for StalledExecutor {
        fn run<T>(
            &self,
            _f: impl FnOnce(&mut SqliteConnection) -> anyhow::Result<T>,
        ) -> Result<T, DbError> {
            std::thread::sleep(Duration::from_millis(500));
            Err(DbError::Connection("database is locked".into()))
        }
    }

    fn record(id_value: &str, email_value: &str) -> RegistrationRecord {
        RegistrationRecord {
            id: RegistrationId::from(id_value),
            email: email_value.to_string(),
            full_name: "Ada Lovelace".into(),
            contact_number: "+44 20 7946 0000".into(),
            address: "12 St James's Square".into(),
            company: "Analytical Engines Ltd".into(),
            designation: "Programmer".into(),
            first_time_attendee: true,
            selected_events: vec![EventSlot::Event2],
            submitted_at: Utc.timestamp_millis_opt(1_756_771_200_123).unwrap(),
        }
    }

    fn repo(
        dir: &TempDir,
    ) -> DieselRegistrationRepository<DieselSqliteExecutor, RegistrationRowMapper> {
        let db_path = dir.path().join("registrations.db");
        let pool = init_db_pool(db_path.to_str().unwrap()).expect("Failed to init db");
        DieselRegistrationRepository::new(DieselSqliteExecutor::new(pool), RegistrationRowMapper)
    }

    #[tokio::test]
    async fn insert_then_find_by_email() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = repo(&dir);

        assert!(repo.find_by_email("a@x.com").await.unwrap().is_empty());

        repo.insert(&record("r-1", "a@x.com")).await.unwrap();

        let found = repo.find_by_email("a@x.com").await.unwrap();
        assert_eq!(found, vec![RegistrationId::from("r-1")]);
        assert!(repo.find_by_email("b@x.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn email_match_is_case_sensitive() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = repo(&dir);

        repo.insert(&record("r-1", "a@x.com")).await.unwrap();

        assert!(repo.find_by_email("A@X.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stored_record_reads_back_intact() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = repo(&dir);
        let original = record("r-7", "grace@navy.mil");

        repo.insert(&original).await.unwrap();
        let loaded = repo
            .get_by_id(&RegistrationId::from("r-7"))
            .expect("record should exist");

        assert_eq!(loaded, original);
    }

    #[tokio::test]
    async fn duplicate_primary_key_is_a_storage_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = repo(&dir);

        repo.insert(&record("r-1", "a@x.com")).await.unwrap();
        let err = repo.insert(&record("r-1", "b@x.com")).await.unwrap_err();

        assert!(matches!(err, RegistrationRepositoryError::Storage(_)));
    }

    #[tokio::test]
    async fn stalled_statement_does_not_hold_the_caller() {
        let repo = DieselRegistrationRepository::new(StalledExecutor, RegistrationRowMapper);

        let result =
            tokio::time::timeout(Duration::from_millis(50), repo.find_by_email("a@x.com")).await;

        assert!(result.is_err(), "timeout should fire while the statement is blocked");
    }

    #[tokio::test]
    async fn checkout_failure_is_unavailable() {
        let repo = DieselRegistrationRepository::new(StalledExecutor, RegistrationRowMapper);

        let err = repo.find_by_email("a@x.com").await.unwrap_err();

        assert!(matches!(err, RegistrationRepositoryError::Unavailable(_)));
    }
}
