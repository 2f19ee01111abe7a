//! # Shave Repository
//!
//! Read access to shave records.
//!
//! Shaves are financial records: every write moves a register balance, so
//! creation, update and deletion live on [`crate::bookkeeper::Bookkeeper`]
//! where they share a transaction with the balance recompute. This
//! repository only reads.

use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::error::DbResult;
use trimbook_core::{DateRange, Shave};

/// Read-side repository for shave records.
#[derive(Debug, Clone)]
pub struct ShaveRepository {
    pool: SqlitePool,
}

impl ShaveRepository {
    /// Creates a new ShaveRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShaveRepository { pool }
    }

    /// Gets a shave by ID.
    pub async fn get(&self, id: &str) -> DbResult<Option<Shave>> {
        let mut conn = self.pool.acquire().await?;
        fetch_shave(&mut conn, id).await
    }

    /// Lists a register's shaves, newest first.
    pub async fn for_register(&self, register_id: &str) -> DbResult<Vec<Shave>> {
        let shaves = sqlx::query_as::<_, Shave>(
            r#"
            SELECT id, salon_id, barber_id, hairstyle_id, client_id, cash_register_id,
                   amount_cents, currency_id, exchange_rate_micros, amount_default_cents,
                   status, performed_at, created_at, updated_at
            FROM shaves
            WHERE cash_register_id = ?1
            ORDER BY performed_at DESC
            "#,
        )
        .bind(register_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(shaves)
    }

    /// Lists a barber's completed shaves inside a date range, oldest first.
    ///
    /// An open range bound skips that side of the filter, so
    /// [`DateRange::UNBOUNDED`] returns the full history.
    pub async fn completed_for_barber(
        &self,
        barber_id: &str,
        range: &DateRange,
    ) -> DbResult<Vec<Shave>> {
        let shaves = sqlx::query_as::<_, Shave>(
            r#"
            SELECT id, salon_id, barber_id, hairstyle_id, client_id, cash_register_id,
                   amount_cents, currency_id, exchange_rate_micros, amount_default_cents,
                   status, performed_at, created_at, updated_at
            FROM shaves
            WHERE barber_id = ?1
              AND status = 'COMPLETED'
              AND (?2 IS NULL OR performed_at >= ?2)
              AND (?3 IS NULL OR performed_at <= ?3)
            ORDER BY performed_at
            "#,
        )
        .bind(barber_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(shaves)
    }
}

/// Fetches a shave inside an existing transaction or connection.
pub(crate) async fn fetch_shave(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Shave>> {
    let shave = sqlx::query_as::<_, Shave>(
        r#"
        SELECT id, salon_id, barber_id, hairstyle_id, client_id, cash_register_id,
               amount_cents, currency_id, exchange_rate_micros, amount_default_cents,
               status, performed_at, created_at, updated_at
        FROM shaves
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(shave)
}

/// Helper to generate a new shave ID.
pub fn generate_shave_id() -> String {
    Uuid::new_v4().to_string()
}
