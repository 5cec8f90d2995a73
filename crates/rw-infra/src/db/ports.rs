//! Seams between the Diesel repositories and their collaborators.
//!
//! Repositories are generic over how they get a connection and how rows are
//! converted, so each side can be replaced in tests.

use diesel::SqliteConnection;

/// Failure while running work against the database.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// No connection could be checked out of the pool.
    #[error("no database connection available: {0}")]
    Connection(String),

    /// The closure itself failed (query, constraint, mapping).
    #[error(transparent)]
    Query(#[from] anyhow::Error),
}

pub trait DbExecutor: Send + Sync {
    /// Runs `f` with a pooled connection.
    fn run<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> anyhow::Result<T>,
    ) -> Result<T, DbError>;
}

/// Domain value -> insertable row.
pub trait InsertMapper<D, R>: Send + Sync {
    fn to_row(&self, domain: &D) -> anyhow::Result<R>;
}

/// Loaded row -> domain value.
pub trait RowMapper<R, D>: Send + Sync {
    fn to_domain(&self, row: &R) -> anyhow::Result<D>;
}
