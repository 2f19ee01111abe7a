//! # Barber Repository
//!
//! Database operations for barbers and their commission rules.
//!
//! ## Dated Commission Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │           How Commission Rules Apply Over Time                          │
//! │                                                                         │
//! │  commission_rules for barber b-1:                                      │
//! │                                                                         │
//! │   effective_at      percent_bps   fixed_cents                          │
//! │   2024-01-01        1000 (10%)         0        ◄─ rule A              │
//! │   2024-06-01        1500 (15%)       500        ◄─ rule B              │
//! │                                                                         │
//! │  Shave on 2024-03-01 ──► rule A applies (latest rule ≤ that date)      │
//! │  Shave on 2024-07-01 ──► rule B applies                                │
//! │  Shave on 2023-12-01 ──► no rule, zero commission                      │
//! │                                                                         │
//! │  Selection happens in trimbook-core (active_rule); this repository     │
//! │  only stores and returns the rule rows in effective order.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult, StoreResult};
use trimbook_core::validation::{validate_commission_rule, validate_employment, validate_name};
use trimbook_core::{Barber, CommissionRule, Money};

/// Repository for barber operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = BarberRepository::new(pool);
///
/// let barber = repo.create(&salon_id, "Ali Hassan", started_on).await?;
/// repo.add_commission_rule(&barber.id, 1000, Money::zero(), effective_at).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BarberRepository {
    pool: SqlitePool,
}

impl BarberRepository {
    /// Creates a new BarberRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BarberRepository { pool }
    }

    /// Creates a barber.
    pub async fn create(
        &self,
        salon_id: &str,
        full_name: &str,
        started_on: NaiveDate,
    ) -> StoreResult<Barber> {
        validate_name(full_name)?;

        debug!(salon_id = %salon_id, full_name = %full_name, "Creating barber");

        let now = Utc::now();
        let barber = Barber {
            id: generate_barber_id(),
            salon_id: salon_id.to_string(),
            full_name: full_name.trim().to_string(),
            phone: None,
            address: None,
            started_on,
            ended_on: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO barbers (
                id, salon_id, full_name, phone, address,
                started_on, ended_on, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&barber.id)
        .bind(&barber.salon_id)
        .bind(&barber.full_name)
        .bind(&barber.phone)
        .bind(&barber.address)
        .bind(barber.started_on)
        .bind(barber.ended_on)
        .bind(barber.is_active)
        .bind(barber.created_at)
        .bind(barber.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(barber)
    }

    /// Gets a barber by ID.
    pub async fn get(&self, id: &str) -> DbResult<Option<Barber>> {
        let mut conn = self.pool.acquire().await?;
        fetch_barber(&mut conn, id).await
    }

    /// Lists a salon's active barbers, sorted by name.
    pub async fn list(&self, salon_id: &str) -> DbResult<Vec<Barber>> {
        let barbers = sqlx::query_as::<_, Barber>(
            r#"
            SELECT id, salon_id, full_name, phone, address,
                   started_on, ended_on, is_active, created_at, updated_at
            FROM barbers
            WHERE salon_id = ?1 AND is_active = 1
            ORDER BY full_name
            "#,
        )
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(barbers)
    }

    /// Updates a barber's name and contact details.
    pub async fn update(&self, barber: &Barber) -> StoreResult<()> {
        validate_name(&barber.full_name)?;

        debug!(id = %barber.id, "Updating barber");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE barbers SET
                full_name = ?2,
                phone = ?3,
                address = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&barber.id)
        .bind(barber.full_name.trim())
        .bind(&barber.phone)
        .bind(&barber.address)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Barber", &barber.id).into());
        }

        Ok(())
    }

    /// Records a barber's last working day and deactivates them.
    ///
    /// ## Returns
    /// * `Err(ValidationError::InvalidPeriod)` - `ended_on` precedes the
    ///   barber's `started_on`
    pub async fn end_employment(&self, id: &str, ended_on: NaiveDate) -> StoreResult<()> {
        let barber = self
            .get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Barber", id))?;

        validate_employment(barber.started_on, Some(ended_on))?;

        debug!(id = %id, ended_on = %ended_on, "Ending barber employment");

        let now = Utc::now();
        sqlx::query(
            "UPDATE barbers SET ended_on = ?2, is_active = 0, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(ended_on)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ========================================================================
    // Commission Rules
    // ========================================================================

    /// Adds a commission rule for a barber, effective from `effective_at`.
    ///
    /// Existing rules are never edited; a correction is a new rule with a
    /// later effective date. This keeps historical commission reproducible.
    pub async fn add_commission_rule(
        &self,
        barber_id: &str,
        percent_bps: i64,
        fixed: Money,
        effective_at: DateTime<Utc>,
    ) -> StoreResult<CommissionRule> {
        validate_commission_rule(percent_bps, fixed)?;

        let barber = self
            .get(barber_id)
            .await?
            .ok_or_else(|| DbError::not_found("Barber", barber_id))?;

        debug!(
            barber_id = %barber.id,
            percent_bps = percent_bps,
            fixed_cents = fixed.cents(),
            "Adding commission rule"
        );

        let now = Utc::now();
        let rule = CommissionRule {
            id: generate_commission_rule_id(),
            barber_id: barber.id,
            percent_bps,
            fixed_cents: fixed.cents(),
            effective_at,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO commission_rules (
                id, barber_id, percent_bps, fixed_cents, effective_at, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&rule.id)
        .bind(&rule.barber_id)
        .bind(rule.percent_bps)
        .bind(rule.fixed_cents)
        .bind(rule.effective_at)
        .bind(rule.created_at)
        .bind(rule.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(rule)
    }

    /// Lists a barber's commission rules in effective order.
    pub async fn commission_rules(&self, barber_id: &str) -> DbResult<Vec<CommissionRule>> {
        let rules = sqlx::query_as::<_, CommissionRule>(
            r#"
            SELECT id, barber_id, percent_bps, fixed_cents,
                   effective_at, created_at, updated_at
            FROM commission_rules
            WHERE barber_id = ?1
            ORDER BY effective_at
            "#,
        )
        .bind(barber_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }
}

/// Fetches a barber inside an existing transaction or connection.
pub(crate) async fn fetch_barber(
    conn: &mut SqliteConnection,
    id: &str,
) -> DbResult<Option<Barber>> {
    let barber = sqlx::query_as::<_, Barber>(
        r#"
        SELECT id, salon_id, full_name, phone, address,
               started_on, ended_on, is_active, created_at, updated_at
        FROM barbers
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(barber)
}

/// Helper to generate a new barber ID.
pub fn generate_barber_id() -> String {
    Uuid::new_v4().to_string()
}

/// Helper to generate a new commission rule ID.
pub fn generate_commission_rule_id() -> String {
    Uuid::new_v4().to_string()
}
