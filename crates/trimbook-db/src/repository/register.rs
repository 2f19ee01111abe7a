//! # Cash Register Repository
//!
//! Database operations for cash registers.
//!
//! Registers are created with zero balances. The stored `balance_profit_cents`
//! and `balance_cash_cents` columns are derived figures owned by
//! [`crate::ledger::RegisterLedger`]; nothing here writes them.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult, StoreResult};
use trimbook_core::validation::validate_name;
use trimbook_core::CashRegister;

/// Repository for cash register operations.
#[derive(Debug, Clone)]
pub struct RegisterRepository {
    pool: SqlitePool,
}

impl RegisterRepository {
    /// Creates a new RegisterRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RegisterRepository { pool }
    }

    /// Creates a cash register with zero balances.
    pub async fn create(
        &self,
        salon_id: &str,
        name: &str,
        currency_id: &str,
    ) -> StoreResult<CashRegister> {
        validate_name(name)?;

        debug!(salon_id = %salon_id, name = %name, "Creating cash register");

        let now = Utc::now();
        let register = CashRegister {
            id: generate_register_id(),
            salon_id: salon_id.to_string(),
            name: name.trim().to_string(),
            currency_id: currency_id.to_string(),
            balance_profit_cents: 0,
            balance_cash_cents: 0,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO cash_registers (
                id, salon_id, name, currency_id,
                balance_profit_cents, balance_cash_cents, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&register.id)
        .bind(&register.salon_id)
        .bind(&register.name)
        .bind(&register.currency_id)
        .bind(register.balance_profit_cents)
        .bind(register.balance_cash_cents)
        .bind(register.created_at)
        .bind(register.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(register)
    }

    /// Gets a cash register by ID.
    pub async fn get(&self, id: &str) -> DbResult<Option<CashRegister>> {
        let mut conn = self.pool.acquire().await?;
        fetch_register(&mut conn, id).await
    }

    /// Lists a salon's cash registers, sorted by name.
    pub async fn list(&self, salon_id: &str) -> DbResult<Vec<CashRegister>> {
        let registers = sqlx::query_as::<_, CashRegister>(
            r#"
            SELECT id, salon_id, name, currency_id,
                   balance_profit_cents, balance_cash_cents, created_at, updated_at
            FROM cash_registers
            WHERE salon_id = ?1
            ORDER BY name
            "#,
        )
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(registers)
    }

    /// Renames a cash register.
    pub async fn rename(&self, id: &str, name: &str) -> StoreResult<()> {
        validate_name(name)?;

        let result = sqlx::query("UPDATE cash_registers SET name = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(name.trim())
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("CashRegister", id).into());
        }

        Ok(())
    }
}

/// Fetches a cash register inside an existing transaction or connection.
pub(crate) async fn fetch_register(
    conn: &mut SqliteConnection,
    id: &str,
) -> DbResult<Option<CashRegister>> {
    let register = sqlx::query_as::<_, CashRegister>(
        r#"
        SELECT id, salon_id, name, currency_id,
               balance_profit_cents, balance_cash_cents, created_at, updated_at
        FROM cash_registers
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(register)
}

/// Helper to generate a new cash register ID.
pub fn generate_register_id() -> String {
    Uuid::new_v4().to_string()
}
