//! # Salon Repository
//!
//! Database operations for salons and their currencies.
//!
//! ## The Default Currency Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              One Default Currency Per Salon                             │
//! │                                                                         │
//! │  currencies                                                            │
//! │  ┌──────┬──────────┬──────┬────────────┐                               │
//! │  │ id   │ salon_id │ code │ is_default │                               │
//! │  ├──────┼──────────┼──────┼────────────┤                               │
//! │  │ c-1  │ s-1      │ USD  │     1      │ ← reference currency          │
//! │  │ c-2  │ s-1      │ EUR  │     0      │                               │
//! │  │ c-3  │ s-1      │ PKR  │     0      │                               │
//! │  └──────┴──────────┴──────┴────────────┘                               │
//! │                                                                         │
//! │  Every amount_default_cents in the store is expressed in c-1.          │
//! │  A second default would make those sums meaningless, so the rule       │
//! │  is enforced twice:                                                    │
//! │    1. add_currency checks for an existing default before inserting     │
//! │    2. a partial unique index (idx_currencies_one_default) backs it up  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult, StoreResult};
use trimbook_core::validation::{validate_currency_code, validate_name};
use trimbook_core::{Currency, Salon};

/// Repository for salon and currency operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = SalonRepository::new(pool);
///
/// let salon = repo.create("Main Street Cuts", None, None, None, None).await?;
/// let usd = repo.add_currency(&salon.id, "USD", "US Dollar", true).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SalonRepository {
    pool: SqlitePool,
}

impl SalonRepository {
    /// Creates a new SalonRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SalonRepository { pool }
    }

    // ========================================================================
    // Salons
    // ========================================================================

    /// Creates a salon.
    ///
    /// ## Arguments
    /// * `name` - Display name (required, trimmed, max length enforced)
    /// * `description`, `address`, `phone`, `email` - Optional details
    pub async fn create(
        &self,
        name: &str,
        description: Option<String>,
        address: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> StoreResult<Salon> {
        validate_name(name)?;

        debug!(name = %name, "Creating salon");

        let now = Utc::now();
        let salon = Salon {
            id: generate_salon_id(),
            name: name.trim().to_string(),
            description,
            address,
            phone,
            email,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO salons (
                id, name, description, address, phone, email,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&salon.id)
        .bind(&salon.name)
        .bind(&salon.description)
        .bind(&salon.address)
        .bind(&salon.phone)
        .bind(&salon.email)
        .bind(salon.is_active)
        .bind(salon.created_at)
        .bind(salon.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(salon)
    }

    /// Gets a salon by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Salon))` - Salon found
    /// * `Ok(None)` - Salon not found
    pub async fn get(&self, id: &str) -> DbResult<Option<Salon>> {
        let salon = sqlx::query_as::<_, Salon>(
            r#"
            SELECT id, name, description, address, phone, email,
                   is_active, created_at, updated_at
            FROM salons
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(salon)
    }

    /// Lists active salons, sorted by name.
    pub async fn list_active(&self) -> DbResult<Vec<Salon>> {
        let salons = sqlx::query_as::<_, Salon>(
            r#"
            SELECT id, name, description, address, phone, email,
                   is_active, created_at, updated_at
            FROM salons
            WHERE is_active = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(salons)
    }

    /// Updates a salon's details.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Salon doesn't exist
    pub async fn update(&self, salon: &Salon) -> StoreResult<()> {
        validate_name(&salon.name)?;

        debug!(id = %salon.id, "Updating salon");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE salons SET
                name = ?2,
                description = ?3,
                address = ?4,
                phone = ?5,
                email = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&salon.id)
        .bind(salon.name.trim())
        .bind(&salon.description)
        .bind(&salon.address)
        .bind(&salon.phone)
        .bind(&salon.email)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Salon", &salon.id).into());
        }

        Ok(())
    }

    /// Soft-deletes a salon by setting is_active = false.
    ///
    /// Historical records keep referencing it; nothing cascades.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deactivating salon");

        let now = Utc::now();
        let result = sqlx::query("UPDATE salons SET is_active = 0, updated_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(now)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Salon", id));
        }

        Ok(())
    }

    // ========================================================================
    // Currencies
    // ========================================================================

    /// Registers a currency for a salon.
    ///
    /// ## Default Enforcement
    /// When `is_default` is set and the salon already has a default
    /// currency, this fails with [`DbError::UniqueViolation`] before
    /// touching the table. The partial unique index catches anything that
    /// slips past (e.g. concurrent inserts).
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - Duplicate code or second default
    pub async fn add_currency(
        &self,
        salon_id: &str,
        code: &str,
        name: &str,
        is_default: bool,
    ) -> StoreResult<Currency> {
        validate_currency_code(code)?;
        validate_name(name)?;

        debug!(salon_id = %salon_id, code = %code, is_default = is_default, "Adding currency");

        if is_default && self.default_currency(salon_id).await?.is_some() {
            return Err(DbError::duplicate("default currency", code).into());
        }

        let now = Utc::now();
        let currency = Currency {
            id: generate_currency_id(),
            salon_id: salon_id.to_string(),
            code: code.to_string(),
            name: name.trim().to_string(),
            is_default,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO currencies (id, salon_id, code, name, is_default, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&currency.id)
        .bind(&currency.salon_id)
        .bind(&currency.code)
        .bind(&currency.name)
        .bind(currency.is_default)
        .bind(currency.created_at)
        .bind(currency.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(currency)
    }

    /// Lists a salon's currencies, sorted by code.
    pub async fn currencies(&self, salon_id: &str) -> DbResult<Vec<Currency>> {
        let currencies = sqlx::query_as::<_, Currency>(
            r#"
            SELECT id, salon_id, code, name, is_default, created_at, updated_at
            FROM currencies
            WHERE salon_id = ?1
            ORDER BY code
            "#,
        )
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(currencies)
    }

    /// Gets a currency by ID.
    pub async fn get_currency(&self, id: &str) -> DbResult<Option<Currency>> {
        let mut conn = self.pool.acquire().await?;
        fetch_currency(&mut conn, id).await
    }

    /// Gets the salon's default (reference) currency, if one is set.
    pub async fn default_currency(&self, salon_id: &str) -> DbResult<Option<Currency>> {
        let currency = sqlx::query_as::<_, Currency>(
            r#"
            SELECT id, salon_id, code, name, is_default, created_at, updated_at
            FROM currencies
            WHERE salon_id = ?1 AND is_default = 1
            "#,
        )
        .bind(salon_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(currency)
    }

    /// Makes `currency_id` the salon's default, clearing the previous
    /// default in the same transaction.
    ///
    /// The clear must land before the set or the partial unique index
    /// rejects the overlap.
    pub async fn set_default_currency(&self, salon_id: &str, currency_id: &str) -> DbResult<()> {
        debug!(salon_id = %salon_id, currency_id = %currency_id, "Switching default currency");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE currencies SET is_default = 0, updated_at = ?2 WHERE salon_id = ?1 AND is_default = 1",
        )
        .bind(salon_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query(
            "UPDATE currencies SET is_default = 1, updated_at = ?3 WHERE id = ?1 AND salon_id = ?2",
        )
        .bind(currency_id)
        .bind(salon_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Currency", currency_id));
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }
}

/// Fetches a currency inside an existing transaction or connection.
pub(crate) async fn fetch_currency(
    conn: &mut SqliteConnection,
    id: &str,
) -> DbResult<Option<Currency>> {
    let currency = sqlx::query_as::<_, Currency>(
        r#"
        SELECT id, salon_id, code, name, is_default, created_at, updated_at
        FROM currencies
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(currency)
}

/// Helper to generate a new salon ID.
pub fn generate_salon_id() -> String {
    Uuid::new_v4().to_string()
}

/// Helper to generate a new currency ID.
pub fn generate_currency_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_second_default_currency_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.salons();

        let salon = repo
            .create("Main Street Cuts", None, None, None, None)
            .await
            .unwrap();
        repo.add_currency(&salon.id, "USD", "US Dollar", true)
            .await
            .unwrap();

        let err = repo
            .add_currency(&salon.id, "EUR", "Euro", true)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Db(DbError::UniqueViolation { .. })
        ));

        // A non-default second currency is fine
        repo.add_currency(&salon.id, "EUR", "Euro", false)
            .await
            .unwrap();
        assert_eq!(repo.currencies(&salon.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected_by_unique_index() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.salons();

        let salon = repo.create("Shear Bliss", None, None, None, None).await.unwrap();
        repo.add_currency(&salon.id, "USD", "US Dollar", true)
            .await
            .unwrap();

        let err = repo
            .add_currency(&salon.id, "USD", "US Dollar again", false)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Db(DbError::UniqueViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_switch_default_currency() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.salons();

        let salon = repo.create("Fade Factory", None, None, None, None).await.unwrap();
        let usd = repo
            .add_currency(&salon.id, "USD", "US Dollar", true)
            .await
            .unwrap();
        let eur = repo
            .add_currency(&salon.id, "EUR", "Euro", false)
            .await
            .unwrap();

        repo.set_default_currency(&salon.id, &eur.id).await.unwrap();

        let current = repo.default_currency(&salon.id).await.unwrap().unwrap();
        assert_eq!(current.id, eur.id);

        let old = repo.get_currency(&usd.id).await.unwrap().unwrap();
        assert!(!old.is_default);
    }

    #[tokio::test]
    async fn test_deactivate_missing_salon_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.salons().deactivate("no-such-id").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
