//! # Database Error Types
//!
//! Two error layers, matching the two kinds of operation this crate runs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sqlx::Error ──► DbError        plain reads: repositories, pool        │
//! │                      │                                                  │
//! │  CoreError ──────────┼──► StoreError    validated writes and reports:  │
//! │  (validation,        │        │         bookkeeper, ledger, reports    │
//! │   business rules)────┘        ▼                                        │
//! │                      caller matches on Db(..) / Core(..)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Plain repository reads only touch the database, so they return
//! [`DbResult`]. Bookkeeper writes and report queries also run validation
//! and ledger math from `trimbook-core`, so they return [`StoreResult`].

use thiserror::Error;
use trimbook_core::{CoreError, ValidationError};

/// Storage-level failures, categorized from raw sqlx errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// A row the caller named does not exist. Raised when `fetch_optional`
    /// comes back empty for a required reference, and when an UPDATE or
    /// DELETE affects zero rows.
    #[error("{entity} not found: {id}")]
    NotFound {
        entity: String,
        id: String,
    },

    /// A UNIQUE index rejected the write. The interesting cases here are a
    /// duplicate currency code within a salon and a second default currency.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation {
        field: String,
        value: String,
    },

    /// A foreign key rejected the write: a dangling reference on insert, or
    /// deleting a shave that still has item uses hanging off it.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation {
        message: String,
    },

    /// The database could not be opened or reached.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// An embedded migration failed to apply.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// The query itself failed: bad SQL, CHECK constraint, runtime error.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A transaction could not commit.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Every pooled connection is busy and the acquire timed out.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Anything sqlx reports that fits none of the above, including row
    /// decode failures.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Categorizes sqlx errors.
///
/// SQLite reports constraint failures as database errors with a message
/// prefix rather than distinct codes, so the mapping inspects the message:
/// `"UNIQUE constraint failed: <table>.<column>"` and
/// `"FOREIGN KEY constraint failed"` are the two shapes we split out.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors from operations that mix storage with business rules.
///
/// The bookkeeper validates and recomputes balances while it writes, and
/// reports run ledger math over fetched rows. Either side can fail, so
/// both error families are carried without flattening them into strings.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage-level failure (connection, constraint, missing row).
    #[error(transparent)]
    Db(#[from] DbError),

    /// Business-rule failure (validation, stock, salon mismatch).
    #[error(transparent)]
    Core(#[from] CoreError),
}

// sqlx errors surface inside bookkeeper transactions where the return
// type is StoreResult, so route them through DbError here.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Db(DbError::from(err))
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for bookkeeper and report operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = DbError::not_found("Barber", "abc-123");
        assert_eq!(err.to_string(), "Barber not found: abc-123");
    }

    #[test]
    fn test_duplicate_display() {
        let err = DbError::duplicate("currency code", "USD");
        assert_eq!(err.to_string(), "Duplicate currency code: 'USD' already exists");
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err = StoreError::from(DbError::PoolExhausted);
        assert_eq!(err.to_string(), "Connection pool exhausted");

        let err = StoreError::from(ValidationError::Required {
            field: "name".to_string(),
        });
        assert_eq!(err.to_string(), "Validation error: name is required");
    }
}
