//! # Catalog Repository
//!
//! Database operations for hairstyles and their tariff history.
//!
//! The hairstyle row carries the CURRENT tariff for quick display;
//! `hairstyle_tariffs` keeps every tariff ever set, each with its
//! effective instant. `tariff_at` answers "what did this style cost when
//! that shave happened", with the same latest-rule-not-after selection as
//! commission rules.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult, StoreResult};
use trimbook_core::validation::{validate_name, validate_tariff};
use trimbook_core::{Hairstyle, HairstyleTariff, Money};

/// Repository for hairstyle and tariff operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CatalogRepository::new(pool);
///
/// let style = repo.create_hairstyle(&salon_id, "Classic Cut", tariff, &usd.id).await?;
/// repo.set_tariff(&style.id, new_tariff, Utc::now()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Creates a hairstyle with its opening tariff.
    ///
    /// The opening tariff is also written to the history table, effective
    /// from creation, so `tariff_at` never has a gap before the first
    /// explicit change.
    pub async fn create_hairstyle(
        &self,
        salon_id: &str,
        name: &str,
        tariff: Money,
        currency_id: &str,
    ) -> StoreResult<Hairstyle> {
        validate_name(name)?;
        validate_tariff(tariff)?;

        debug!(salon_id = %salon_id, name = %name, tariff_cents = tariff.cents(), "Creating hairstyle");

        let now = Utc::now();
        let hairstyle = Hairstyle {
            id: generate_hairstyle_id(),
            salon_id: salon_id.to_string(),
            name: name.trim().to_string(),
            tariff_cents: tariff.cents(),
            currency_id: currency_id.to_string(),
            created_at: now,
            updated_at: now,
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO hairstyles (id, salon_id, name, tariff_cents, currency_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&hairstyle.id)
        .bind(&hairstyle.salon_id)
        .bind(&hairstyle.name)
        .bind(hairstyle.tariff_cents)
        .bind(&hairstyle.currency_id)
        .bind(hairstyle.created_at)
        .bind(hairstyle.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO hairstyle_tariffs (id, hairstyle_id, tariff_cents, effective_at, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(generate_tariff_id())
        .bind(&hairstyle.id)
        .bind(hairstyle.tariff_cents)
        .bind(now)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(hairstyle)
    }

    /// Gets a hairstyle by ID.
    pub async fn get_hairstyle(&self, id: &str) -> DbResult<Option<Hairstyle>> {
        let mut conn = self.pool.acquire().await?;
        fetch_hairstyle(&mut conn, id).await
    }

    /// Lists a salon's hairstyles, sorted by name.
    pub async fn hairstyles(&self, salon_id: &str) -> DbResult<Vec<Hairstyle>> {
        let hairstyles = sqlx::query_as::<_, Hairstyle>(
            r#"
            SELECT id, salon_id, name, tariff_cents, currency_id, created_at, updated_at
            FROM hairstyles
            WHERE salon_id = ?1
            ORDER BY name
            "#,
        )
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(hairstyles)
    }

    /// Sets a new tariff for a hairstyle, effective from `effective_at`.
    ///
    /// Updates the current tariff on the hairstyle row AND appends a
    /// history entry, in one transaction.
    pub async fn set_tariff(
        &self,
        hairstyle_id: &str,
        tariff: Money,
        effective_at: DateTime<Utc>,
    ) -> StoreResult<HairstyleTariff> {
        validate_tariff(tariff)?;

        debug!(hairstyle_id = %hairstyle_id, tariff_cents = tariff.cents(), "Setting tariff");

        let now = Utc::now();
        let entry = HairstyleTariff {
            id: generate_tariff_id(),
            hairstyle_id: hairstyle_id.to_string(),
            tariff_cents: tariff.cents(),
            effective_at,
            created_at: now,
            updated_at: now,
        };

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE hairstyles SET tariff_cents = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(hairstyle_id)
        .bind(entry.tariff_cents)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Hairstyle", hairstyle_id).into());
        }

        sqlx::query(
            r#"
            INSERT INTO hairstyle_tariffs (id, hairstyle_id, tariff_cents, effective_at, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.hairstyle_id)
        .bind(entry.tariff_cents)
        .bind(entry.effective_at)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(entry)
    }

    /// Lists a hairstyle's tariff history in effective order.
    pub async fn tariff_history(&self, hairstyle_id: &str) -> DbResult<Vec<HairstyleTariff>> {
        let history = sqlx::query_as::<_, HairstyleTariff>(
            r#"
            SELECT id, hairstyle_id, tariff_cents, effective_at, created_at, updated_at
            FROM hairstyle_tariffs
            WHERE hairstyle_id = ?1
            ORDER BY effective_at
            "#,
        )
        .bind(hairstyle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(history)
    }

    /// The tariff in force at a given instant: the entry with the greatest
    /// `effective_at` not after `at`, or `None` before the first entry.
    pub async fn tariff_at(
        &self,
        hairstyle_id: &str,
        at: DateTime<Utc>,
    ) -> DbResult<Option<HairstyleTariff>> {
        let entry = sqlx::query_as::<_, HairstyleTariff>(
            r#"
            SELECT id, hairstyle_id, tariff_cents, effective_at, created_at, updated_at
            FROM hairstyle_tariffs
            WHERE hairstyle_id = ?1 AND effective_at <= ?2
            ORDER BY effective_at DESC
            LIMIT 1
            "#,
        )
        .bind(hairstyle_id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }
}

/// Fetches a hairstyle inside an existing transaction or connection.
pub(crate) async fn fetch_hairstyle(
    conn: &mut SqliteConnection,
    id: &str,
) -> DbResult<Option<Hairstyle>> {
    let hairstyle = sqlx::query_as::<_, Hairstyle>(
        r#"
        SELECT id, salon_id, name, tariff_cents, currency_id, created_at, updated_at
        FROM hairstyles
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(hairstyle)
}

/// Helper to generate a new hairstyle ID.
pub fn generate_hairstyle_id() -> String {
    Uuid::new_v4().to_string()
}

/// Helper to generate a new tariff history ID.
pub fn generate_tariff_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::TimeZone;

    async fn seed_style(db: &Database) -> Hairstyle {
        let salon = db
            .salons()
            .create("Clipper Club", None, None, None, None)
            .await
            .unwrap();
        let usd = db
            .salons()
            .add_currency(&salon.id, "USD", "US Dollar", true)
            .await
            .unwrap();
        db.catalog()
            .create_hairstyle(&salon.id, "Classic Cut", Money::from_cents(2500), &usd.id)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_tariff_history_selection() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let style = seed_style(&db).await;
        let repo = db.catalog();

        let raise_at = Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap();
        repo.set_tariff(&style.id, Money::from_cents(3000), raise_at)
            .await
            .unwrap();

        // Before the raise the opening tariff applies
        let before = Utc.with_ymd_and_hms(2030, 5, 1, 0, 0, 0).unwrap();
        let entry = repo.tariff_at(&style.id, before).await.unwrap().unwrap();
        assert_eq!(entry.tariff_cents, 2500);

        // On and after the raise the new tariff applies
        let entry = repo.tariff_at(&style.id, raise_at).await.unwrap().unwrap();
        assert_eq!(entry.tariff_cents, 3000);

        // The hairstyle row shows the latest write
        let current = repo.get_hairstyle(&style.id).await.unwrap().unwrap();
        assert_eq!(current.tariff_cents, 3000);

        assert_eq!(repo.tariff_history(&style.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_set_tariff_on_missing_hairstyle() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let _ = seed_style(&db).await;

        let err = db
            .catalog()
            .set_tariff("no-such-style", Money::from_cents(100), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::StoreError::Db(DbError::NotFound { .. })
        ));
    }
}
