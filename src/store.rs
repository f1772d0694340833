//! Storage accessor: a thin wrapper over a single SQLite connection.
//!
//! Every statement that reaches the database goes through the primitives
//! here, and every user-supplied value is bound as a parameter — values
//! never enter statement text.

use std::path::Path;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::FromRow;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violation")]
    UniqueViolation(#[source] sqlx::Error),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    /// Classify by the driver's structured error kind, never by message text.
    fn classify(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::UniqueViolation(err)
            }
            _ => StoreError::Database(err),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation(_))
    }
}

/// A value bound into a statement. Covers the column types of the
/// daily_logs table; `None` binds SQL NULL.
#[derive(Debug, Clone)]
pub enum SqlParam {
    Int(i64),
    Real(Option<f64>),
    Text(Option<String>),
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Int(value)
    }
}

impl From<Option<f64>> for SqlParam {
    fn from(value: Option<f64>) -> Self {
        SqlParam::Real(value)
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(Some(value))
    }
}

impl From<Option<String>> for SqlParam {
    fn from(value: Option<String>) -> Self {
        SqlParam::Text(value)
    }
}

/// Outcome of a mutating statement.
#[derive(Debug, Clone, Copy)]
pub struct ExecOutcome {
    pub last_insert_id: i64,
    pub rows_affected: u64,
}

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

/// One connection, held for the life of the process. Idle and lifetime
/// recycling are disabled: a reopened connection would be a fresh, empty
/// database when the store is `:memory:`.
fn pool_options() -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
}

impl Store {
    /// Open the store at `db_file` (a path, or `:memory:`). All operations
    /// share a single pinned connection, opened here and released only by
    /// [`Store::close`].
    pub async fn connect(db_file: &str) -> Result<Self, StoreError> {
        let url = resolve_db_url(db_file);
        let pool = pool_options()
            .connect(&url)
            .await
            .map_err(StoreError::classify)?;
        Ok(Self { pool })
    }

    /// Idempotently create the schema; safe on every start.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS daily_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                log_date TEXT NOT NULL UNIQUE,
                location TEXT,
                temp_c REAL,
                condition TEXT,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await
        .map_err(StoreError::classify)?;
        Ok(())
    }

    /// Run a mutating statement; reports the last inserted rowid and the
    /// number of rows the statement touched.
    pub async fn execute(&self, sql: &str, params: Vec<SqlParam>) -> Result<ExecOutcome, StoreError> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                SqlParam::Int(v) => query.bind(v),
                SqlParam::Real(v) => query.bind(v),
                SqlParam::Text(v) => query.bind(v),
            };
        }
        let result = query
            .execute(&self.pool)
            .await
            .map_err(StoreError::classify)?;
        Ok(ExecOutcome {
            last_insert_id: result.last_insert_rowid(),
            rows_affected: result.rows_affected(),
        })
    }

    /// Fetch at most one row; absence is an explicit `None`, not an error.
    pub async fn fetch_one<T>(&self, sql: &str, params: Vec<SqlParam>) -> Result<Option<T>, StoreError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, T>(sql);
        for param in params {
            query = match param {
                SqlParam::Int(v) => query.bind(v),
                SqlParam::Real(v) => query.bind(v),
                SqlParam::Text(v) => query.bind(v),
            };
        }
        query
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::classify)
    }

    /// Fetch all matching rows in statement order.
    pub async fn fetch_all<T>(&self, sql: &str, params: Vec<SqlParam>) -> Result<Vec<T>, StoreError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, T>(sql);
        for param in params {
            query = match param {
                SqlParam::Int(v) => query.bind(v),
                SqlParam::Real(v) => query.bind(v),
                SqlParam::Text(v) => query.bind(v),
            };
        }
        query
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::classify)
    }

    /// Drain and close the underlying connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Turn a storage location into a sqlx URL, creating the file and its
/// parent directory when needed so a fresh checkout starts clean.
fn resolve_db_url(db_file: &str) -> String {
    if db_file == ":memory:" {
        return "sqlite://:memory:".to_string();
    }
    let path = Path::new(db_file);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }
    let _ = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path);
    format!("sqlite://{}", db_file)
}
