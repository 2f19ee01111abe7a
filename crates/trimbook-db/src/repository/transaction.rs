//! # Transaction Repository
//!
//! Read access to manual register transactions (one-off income and
//! expense entries). Writes go through [`crate::bookkeeper::Bookkeeper`].

use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::error::DbResult;
use trimbook_core::Transaction;

/// Read-side repository for manual transactions.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Gets a transaction by ID.
    pub async fn get(&self, id: &str) -> DbResult<Option<Transaction>> {
        let mut conn = self.pool.acquire().await?;
        fetch_transaction(&mut conn, id).await
    }

    /// Lists a register's transactions, newest first.
    pub async fn for_register(&self, register_id: &str) -> DbResult<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, salon_id, cash_register_id, name,
                   amount_cents, currency_id, exchange_rate_micros, amount_default_cents,
                   kind, occurred_on, created_at, updated_at
            FROM transactions
            WHERE cash_register_id = ?1
            ORDER BY occurred_on DESC
            "#,
        )
        .bind(register_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }
}

/// Fetches a transaction inside an existing transaction or connection.
pub(crate) async fn fetch_transaction(
    conn: &mut SqliteConnection,
    id: &str,
) -> DbResult<Option<Transaction>> {
    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        SELECT id, salon_id, cash_register_id, name,
               amount_cents, currency_id, exchange_rate_micros, amount_default_cents,
               kind, occurred_on, created_at, updated_at
        FROM transactions
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(transaction)
}

/// Helper to generate a new transaction ID.
pub fn generate_transaction_id() -> String {
    Uuid::new_v4().to_string()
}
