//! # Payment Repository
//!
//! Read access to barber payment records. Writes go through
//! [`crate::bookkeeper::Bookkeeper`] so the paying register's balance is
//! recomputed in the same transaction.

use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::error::DbResult;
use trimbook_core::Payment;

/// Read-side repository for payment records.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PaymentRepository { pool }
    }

    /// Gets a payment by ID.
    pub async fn get(&self, id: &str) -> DbResult<Option<Payment>> {
        let mut conn = self.pool.acquire().await?;
        fetch_payment(&mut conn, id).await
    }

    /// Lists a barber's payments, newest first.
    pub async fn for_barber(&self, barber_id: &str) -> DbResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, salon_id, barber_id, cash_register_id,
                   amount_cents, currency_id, exchange_rate_micros, amount_default_cents,
                   period_start, period_end, paid_on, created_at, updated_at
            FROM payments
            WHERE barber_id = ?1
            ORDER BY paid_on DESC
            "#,
        )
        .bind(barber_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Lists the payments made from a register, newest first.
    pub async fn for_register(&self, register_id: &str) -> DbResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, salon_id, barber_id, cash_register_id,
                   amount_cents, currency_id, exchange_rate_micros, amount_default_cents,
                   period_start, period_end, paid_on, created_at, updated_at
            FROM payments
            WHERE cash_register_id = ?1
            ORDER BY paid_on DESC
            "#,
        )
        .bind(register_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}

/// Fetches a payment inside an existing transaction or connection.
pub(crate) async fn fetch_payment(
    conn: &mut SqliteConnection,
    id: &str,
) -> DbResult<Option<Payment>> {
    let payment = sqlx::query_as::<_, Payment>(
        r#"
        SELECT id, salon_id, barber_id, cash_register_id,
               amount_cents, currency_id, exchange_rate_micros, amount_default_cents,
               period_start, period_end, paid_on, created_at, updated_at
        FROM payments
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(payment)
}

/// Helper to generate a new payment ID.
pub fn generate_payment_id() -> String {
    Uuid::new_v4().to_string()
}
