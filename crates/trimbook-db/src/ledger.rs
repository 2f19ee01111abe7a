//! # Register Ledger
//!
//! Recomputes and reads the derived balance columns on `cash_registers`.
//!
//! ## How a Recompute Works
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ recompute(register)                                          │
//! │                                                              │
//! │   1. SUM completed shaves ──────────┐                        │
//! │   2. SUM income transactions ───────┤                        │
//! │   3. SUM payments ──────────────────┼─► RegisterTotals       │
//! │   4. SUM expense transactions ──────┤    (trimbook-core)     │
//! │   5. SUM purchases ─────────────────┤                        │
//! │   6. usage cost per item ───────────┘                        │
//! │                                                              │
//! │   totals.balances()? ─► UPDATE cash_registers                │
//! │                         SET balance_profit_cents,            │
//! │                             balance_cash_cents               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every sum reads normalized amounts (`amount_default_cents`), so the
//! balances come out in the salon's default currency no matter what mix
//! of currencies the underlying records carry. The arithmetic itself
//! lives in `trimbook_core::ledger`; this module only feeds it rows and
//! stores the result.
//!
//! The bookkeeper calls [`recompute`] inside its own write transaction.
//! External callers refresh through [`RegisterLedger`], which takes the
//! write lock and opens a transaction of its own.

use std::sync::Arc;

use sqlx::{SqliteConnection, SqlitePool};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{DbError, DbResult, StoreResult};
use trimbook_core::ledger::{total_usage_cost, ItemUsage, RegisterBalances, RegisterTotals};

/// Sums one side of the register ledger inside the caller's transaction.
async fn sum_cents(conn: &mut SqliteConnection, sql: &str, register_id: &str) -> DbResult<i64> {
    let total = sqlx::query_scalar::<_, Option<i64>>(sql)
        .bind(register_id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(total.unwrap_or(0))
}

/// Collects the six ledger inputs for a register.
pub(crate) async fn register_totals(
    conn: &mut SqliteConnection,
    register_id: &str,
) -> DbResult<RegisterTotals> {
    let shave_income_cents = sum_cents(
        conn,
        "SELECT SUM(amount_default_cents) FROM shaves \
         WHERE cash_register_id = ?1 AND status = 'COMPLETED'",
        register_id,
    )
    .await?;

    let income_tx_cents = sum_cents(
        conn,
        "SELECT SUM(amount_default_cents) FROM transactions \
         WHERE cash_register_id = ?1 AND kind = 'INCOME'",
        register_id,
    )
    .await?;

    let payment_cents = sum_cents(
        conn,
        "SELECT SUM(amount_default_cents) FROM payments WHERE cash_register_id = ?1",
        register_id,
    )
    .await?;

    let expense_tx_cents = sum_cents(
        conn,
        "SELECT SUM(amount_default_cents) FROM transactions \
         WHERE cash_register_id = ?1 AND kind = 'EXPENSE'",
        register_id,
    )
    .await?;

    let purchase_cents = sum_cents(
        conn,
        "SELECT SUM(amount_default_cents) FROM item_purchases WHERE cash_register_id = ?1",
        register_id,
    )
    .await?;

    // Per item consumed during this register's completed shaves: the
    // item's full purchase history (for the average unit cost) and the
    // quantity used here.
    let usage_rows = sqlx::query_as::<_, (i64, i64, i64)>(
        r#"
        SELECT (SELECT COALESCE(SUM(p.amount_default_cents), 0)
                FROM item_purchases p WHERE p.item_id = u.item_id),
               (SELECT COALESCE(SUM(p.quantity), 0)
                FROM item_purchases p WHERE p.item_id = u.item_id),
               SUM(u.quantity)
        FROM item_uses u
        INNER JOIN shaves s ON s.id = u.shave_id
        WHERE s.cash_register_id = ?1 AND s.status = 'COMPLETED'
        GROUP BY u.item_id
        "#,
    )
    .bind(register_id)
    .fetch_all(&mut *conn)
    .await?;

    let items_used_cost = total_usage_cost(usage_rows.into_iter().map(
        |(purchased_total_cents, purchased_quantity, used_quantity)| ItemUsage {
            purchased_total_cents,
            purchased_quantity,
            used_quantity,
        },
    ));

    Ok(RegisterTotals {
        shave_income_cents,
        income_tx_cents,
        payment_cents,
        expense_tx_cents,
        purchase_cents,
        items_used_cost,
    })
}

/// Recomputes a register's balances from scratch and stores them, inside
/// the caller's transaction.
///
/// Errors with `NotFound` when the register does not exist; a recompute
/// that cannot land must never pass silently.
pub(crate) async fn recompute(
    conn: &mut SqliteConnection,
    register_id: &str,
) -> StoreResult<RegisterBalances> {
    let totals = register_totals(conn, register_id).await?;
    let balances = totals.balances()?;

    let result = sqlx::query(
        r#"
        UPDATE cash_registers
        SET balance_profit_cents = ?2, balance_cash_cents = ?3, updated_at = ?4
        WHERE id = ?1
        "#,
    )
    .bind(register_id)
    .bind(balances.profit.cents())
    .bind(balances.cash.cents())
    .bind(chrono::Utc::now())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("CashRegister", register_id).into());
    }

    debug!(
        register_id = %register_id,
        profit_cents = balances.profit.cents(),
        cash_cents = balances.cash.cents(),
        "Recomputed register balances"
    );

    Ok(balances)
}

/// Public handle for refreshing and reading register balances.
///
/// ## Usage
/// ```rust,ignore
/// let ledger = db.ledger();
///
/// // After restoring a backup or suspecting drift:
/// let balances = ledger.update_balance(&register_id).await?;
///
/// // Trusting the stored figures:
/// let balances = ledger.balances(&register_id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RegisterLedger {
    pool: SqlitePool,
    write_lock: Arc<Mutex<()>>,
}

impl RegisterLedger {
    /// Creates a new RegisterLedger.
    pub fn new(pool: SqlitePool, write_lock: Arc<Mutex<()>>) -> Self {
        RegisterLedger { pool, write_lock }
    }

    /// Recomputes one register's balances from its records and stores them.
    ///
    /// The bookkeeper already does this after every mutation; calling it
    /// by hand is for recovery, imports, and tests.
    pub async fn update_balance(&self, register_id: &str) -> StoreResult<RegisterBalances> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let balances = recompute(&mut tx, register_id).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(balances)
    }

    /// Reads the stored balances without recomputing.
    pub async fn balances(&self, register_id: &str) -> StoreResult<RegisterBalances> {
        let row = sqlx::query_as::<_, (i64, i64)>(
            "SELECT balance_profit_cents, balance_cash_cents FROM cash_registers WHERE id = ?1",
        )
        .bind(register_id)
        .fetch_optional(&self.pool)
        .await?;

        let (profit_cents, cash_cents) =
            row.ok_or_else(|| DbError::not_found("CashRegister", register_id))?;

        Ok(RegisterBalances {
            profit: trimbook_core::Money::from_cents(profit_cents),
            cash: trimbook_core::Money::from_cents(cash_cents),
        })
    }

    /// Recomputes first, then returns the fresh figures. For callers that
    /// want a guaranteed-current read in one call.
    pub async fn refreshed_balances(&self, register_id: &str) -> StoreResult<RegisterBalances> {
        self.update_balance(register_id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::pool::{Database, DbConfig};
    use trimbook_core::Money;

    #[tokio::test]
    async fn test_empty_register_recomputes_to_zero() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let salon = db
            .salons()
            .create("Fade Factory", None, None, None, None)
            .await
            .unwrap();
        let usd = db
            .salons()
            .add_currency(&salon.id, "USD", "US Dollar", true)
            .await
            .unwrap();
        let register = db
            .registers()
            .create(&salon.id, "Front Desk", &usd.id)
            .await
            .unwrap();

        let ledger = db.ledger();
        let balances = ledger.update_balance(&register.id).await.unwrap();
        assert_eq!(balances.profit, Money::zero());
        assert_eq!(balances.cash, Money::zero());

        // Recompute is idempotent
        let again = ledger.update_balance(&register.id).await.unwrap();
        assert_eq!(again, balances);
        assert_eq!(ledger.balances(&register.id).await.unwrap(), balances);
    }

    #[tokio::test]
    async fn test_recompute_missing_register_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.ledger().update_balance("no-such-register").await.unwrap_err();
        assert!(matches!(err, StoreError::Db(DbError::NotFound { .. })));

        let err = db.ledger().balances("no-such-register").await.unwrap_err();
        assert!(matches!(err, StoreError::Db(DbError::NotFound { .. })));
    }
}
