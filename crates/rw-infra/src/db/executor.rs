use diesel::SqliteConnection;
use tracing::warn;

use crate::db::pool::DbPool;
use crate::db::ports::{DbError, DbExecutor};

/// Executes closures on connections from the shared r2d2 pool.
#[derive(Clone)]
pub struct DieselSqliteExecutor {
    pool: DbPool,
}

impl DieselSqliteExecutor {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl DbExecutor for DieselSqliteExecutor {
    fn run<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> anyhow::Result<T>,
    ) -> Result<T, DbError> {
        let mut conn = self.pool.get().map_err(|e| {
            warn!(error = %e, "sqlite connection checkout failed");
            DbError::Connection(e.to_string())
        })?;
        f(&mut conn).map_err(DbError::Query)
    }
}
