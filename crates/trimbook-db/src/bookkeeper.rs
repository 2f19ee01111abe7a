//! # Bookkeeper
//!
//! The single write path for financial records.
//!
//! ## Unit of Work
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ Bookkeeper operation                                        │
//! │                                                             │
//! │   write lock ──► BEGIN                                      │
//! │                    │                                        │
//! │                    ├── fetch referenced entities            │
//! │                    ├── validate (trimbook-core)             │
//! │                    ├── derive normalized amounts            │
//! │                    ├── INSERT / UPDATE / DELETE the record  │
//! │                    ├── stock delta (purchases and uses)     │
//! │                    └── ledger recompute of the register     │
//! │                    │                                        │
//! │                  COMMIT ──► release lock                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The record write, the stock adjustment, and the balance recompute land
//! together or not at all. A validation failure, a missing reference, or
//! a constraint violation rolls the whole unit back, so stored balances
//! and stock always describe the records that actually exist.
//!
//! Shave updates recompute only when the NEW status is COMPLETED. A
//! COMPLETED shave edited to CANCELLED therefore leaves its register's
//! stored balances untouched until the next write (or a manual
//! [`crate::ledger::RegisterLedger::update_balance`]). Long-standing
//! behavior; callers that need the refresh trigger it themselves.

use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{DbError, StoreResult};
use crate::ledger;
use crate::repository::barber::fetch_barber;
use crate::repository::catalog::fetch_hairstyle;
use crate::repository::client::fetch_client;
use crate::repository::item::{
    adjust_stock, fetch_item, fetch_purchase, fetch_use, generate_item_id,
    generate_item_purchase_id, generate_item_use_id,
};
use crate::repository::payment::{fetch_payment, generate_payment_id};
use crate::repository::register::fetch_register;
use crate::repository::salon::fetch_currency;
use crate::repository::shave::{fetch_shave, generate_shave_id};
use crate::repository::transaction::{fetch_transaction, generate_transaction_id};
use trimbook_core::validation::{
    validate_in_salon, validate_new_item, validate_new_item_purchase, validate_new_item_use,
    validate_new_payment, validate_new_shave, validate_new_transaction,
};
use trimbook_core::{
    CoreError, Item, ItemPurchase, ItemUsed, NewItem, NewItemPurchase, NewItemUsed, NewPayment,
    NewShave, NewTransaction, Payment, Shave, Transaction,
};

/// Executes financial mutations as atomic units of work.
///
/// ## Usage
/// ```rust,ignore
/// let bookkeeper = db.bookkeeper();
///
/// let shave = bookkeeper.create_shave(new_shave).await?;
/// // The register's stored balances already include this shave.
/// ```
#[derive(Debug, Clone)]
pub struct Bookkeeper {
    pool: SqlitePool,
    write_lock: Arc<Mutex<()>>,
}

impl Bookkeeper {
    /// Creates a new Bookkeeper.
    pub fn new(pool: SqlitePool, write_lock: Arc<Mutex<()>>) -> Self {
        Bookkeeper { pool, write_lock }
    }

    // ===== Shaves =====

    /// Records a shave. If it is COMPLETED, the register's balances are
    /// recomputed in the same transaction.
    pub async fn create_shave(&self, input: NewShave) -> StoreResult<Shave> {
        debug!(salon_id = %input.salon_id, barber_id = %input.barber_id, "Creating shave");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let barber = fetch_barber(&mut tx, &input.barber_id)
            .await?
            .ok_or_else(|| DbError::not_found("Barber", &input.barber_id))?;
        let hairstyle = fetch_hairstyle(&mut tx, &input.hairstyle_id)
            .await?
            .ok_or_else(|| DbError::not_found("Hairstyle", &input.hairstyle_id))?;
        let register = fetch_register(&mut tx, &input.cash_register_id)
            .await?
            .ok_or_else(|| DbError::not_found("CashRegister", &input.cash_register_id))?;
        let client = match &input.client_id {
            Some(client_id) => Some(
                fetch_client(&mut tx, client_id)
                    .await?
                    .ok_or_else(|| DbError::not_found("Client", client_id))?,
            ),
            None => None,
        };
        let currency = fetch_currency(&mut tx, &input.currency_id)
            .await?
            .ok_or_else(|| DbError::not_found("Currency", &input.currency_id))?;

        validate_new_shave(&input, &barber, &hairstyle, &register, client.as_ref())?;
        validate_in_salon(&currency, "currency", &input.currency_id, &input.salon_id)?;

        let normalized = input.amount.convert(input.exchange_rate)?;
        let now = Utc::now();
        let shave = Shave {
            id: generate_shave_id(),
            salon_id: input.salon_id.clone(),
            barber_id: input.barber_id.clone(),
            hairstyle_id: input.hairstyle_id.clone(),
            client_id: input.client_id.clone(),
            cash_register_id: input.cash_register_id.clone(),
            amount_cents: input.amount.cents(),
            currency_id: input.currency_id.clone(),
            exchange_rate_micros: input.exchange_rate.micros(),
            amount_default_cents: normalized.cents(),
            status: input.status,
            performed_at: input.performed_at,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO shaves (
                id, salon_id, barber_id, hairstyle_id, client_id, cash_register_id,
                amount_cents, currency_id, exchange_rate_micros, amount_default_cents,
                status, performed_at, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
        )
        .bind(&shave.id)
        .bind(&shave.salon_id)
        .bind(&shave.barber_id)
        .bind(&shave.hairstyle_id)
        .bind(&shave.client_id)
        .bind(&shave.cash_register_id)
        .bind(shave.amount_cents)
        .bind(&shave.currency_id)
        .bind(shave.exchange_rate_micros)
        .bind(shave.amount_default_cents)
        .bind(shave.status)
        .bind(shave.performed_at)
        .bind(shave.created_at)
        .bind(shave.updated_at)
        .execute(&mut *tx)
        .await?;

        if shave.status.is_completed() {
            ledger::recompute(&mut tx, &shave.cash_register_id).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(shave)
    }

    /// Replaces a shave's data. Recomputes the (new) register only when
    /// the new status is COMPLETED; see the module notes.
    pub async fn update_shave(&self, id: &str, input: NewShave) -> StoreResult<Shave> {
        debug!(shave_id = %id, "Updating shave");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let existing = fetch_shave(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Shave", id))?;
        ensure_same_salon(&existing.salon_id, &input.salon_id, "shave", id)?;

        let barber = fetch_barber(&mut tx, &input.barber_id)
            .await?
            .ok_or_else(|| DbError::not_found("Barber", &input.barber_id))?;
        let hairstyle = fetch_hairstyle(&mut tx, &input.hairstyle_id)
            .await?
            .ok_or_else(|| DbError::not_found("Hairstyle", &input.hairstyle_id))?;
        let register = fetch_register(&mut tx, &input.cash_register_id)
            .await?
            .ok_or_else(|| DbError::not_found("CashRegister", &input.cash_register_id))?;
        let client = match &input.client_id {
            Some(client_id) => Some(
                fetch_client(&mut tx, client_id)
                    .await?
                    .ok_or_else(|| DbError::not_found("Client", client_id))?,
            ),
            None => None,
        };
        let currency = fetch_currency(&mut tx, &input.currency_id)
            .await?
            .ok_or_else(|| DbError::not_found("Currency", &input.currency_id))?;

        validate_new_shave(&input, &barber, &hairstyle, &register, client.as_ref())?;
        validate_in_salon(&currency, "currency", &input.currency_id, &input.salon_id)?;

        let normalized = input.amount.convert(input.exchange_rate)?;
        let now = Utc::now();
        let shave = Shave {
            id: existing.id.clone(),
            salon_id: existing.salon_id.clone(),
            barber_id: input.barber_id.clone(),
            hairstyle_id: input.hairstyle_id.clone(),
            client_id: input.client_id.clone(),
            cash_register_id: input.cash_register_id.clone(),
            amount_cents: input.amount.cents(),
            currency_id: input.currency_id.clone(),
            exchange_rate_micros: input.exchange_rate.micros(),
            amount_default_cents: normalized.cents(),
            status: input.status,
            performed_at: input.performed_at,
            created_at: existing.created_at,
            updated_at: now,
        };

        sqlx::query(
            r#"
            UPDATE shaves
            SET barber_id = ?2, hairstyle_id = ?3, client_id = ?4, cash_register_id = ?5,
                amount_cents = ?6, currency_id = ?7, exchange_rate_micros = ?8,
                amount_default_cents = ?9, status = ?10, performed_at = ?11, updated_at = ?12
            WHERE id = ?1
            "#,
        )
        .bind(&shave.id)
        .bind(&shave.barber_id)
        .bind(&shave.hairstyle_id)
        .bind(&shave.client_id)
        .bind(&shave.cash_register_id)
        .bind(shave.amount_cents)
        .bind(&shave.currency_id)
        .bind(shave.exchange_rate_micros)
        .bind(shave.amount_default_cents)
        .bind(shave.status)
        .bind(shave.performed_at)
        .bind(shave.updated_at)
        .execute(&mut *tx)
        .await?;

        if shave.status.is_completed() {
            ledger::recompute(&mut tx, &shave.cash_register_id).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(shave)
    }

    /// Deletes a shave and, if it was COMPLETED, recomputes its former
    /// register. Fails with a foreign key violation while item uses still
    /// reference the shave.
    pub async fn delete_shave(&self, id: &str) -> StoreResult<()> {
        debug!(shave_id = %id, "Deleting shave");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let existing = fetch_shave(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Shave", id))?;

        sqlx::query("DELETE FROM shaves WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if existing.status.is_completed() {
            ledger::recompute(&mut tx, &existing.cash_register_id).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    // ===== Payments =====

    /// Records a payment to a barber and recomputes the paying register.
    pub async fn create_payment(&self, input: NewPayment) -> StoreResult<Payment> {
        debug!(salon_id = %input.salon_id, barber_id = %input.barber_id, "Creating payment");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let barber = fetch_barber(&mut tx, &input.barber_id)
            .await?
            .ok_or_else(|| DbError::not_found("Barber", &input.barber_id))?;
        let register = fetch_register(&mut tx, &input.cash_register_id)
            .await?
            .ok_or_else(|| DbError::not_found("CashRegister", &input.cash_register_id))?;
        let currency = fetch_currency(&mut tx, &input.currency_id)
            .await?
            .ok_or_else(|| DbError::not_found("Currency", &input.currency_id))?;

        validate_new_payment(&input, &barber, &register)?;
        validate_in_salon(&currency, "currency", &input.currency_id, &input.salon_id)?;

        let normalized = input.amount.convert(input.exchange_rate)?;
        let now = Utc::now();
        let payment = Payment {
            id: generate_payment_id(),
            salon_id: input.salon_id.clone(),
            barber_id: input.barber_id.clone(),
            cash_register_id: input.cash_register_id.clone(),
            amount_cents: input.amount.cents(),
            currency_id: input.currency_id.clone(),
            exchange_rate_micros: input.exchange_rate.micros(),
            amount_default_cents: normalized.cents(),
            period_start: input.period_start,
            period_end: input.period_end,
            paid_on: input.paid_on,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO payments (
                id, salon_id, barber_id, cash_register_id,
                amount_cents, currency_id, exchange_rate_micros, amount_default_cents,
                period_start, period_end, paid_on, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&payment.id)
        .bind(&payment.salon_id)
        .bind(&payment.barber_id)
        .bind(&payment.cash_register_id)
        .bind(payment.amount_cents)
        .bind(&payment.currency_id)
        .bind(payment.exchange_rate_micros)
        .bind(payment.amount_default_cents)
        .bind(payment.period_start)
        .bind(payment.period_end)
        .bind(payment.paid_on)
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(&mut *tx)
        .await?;

        ledger::recompute(&mut tx, &payment.cash_register_id).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(payment)
    }

    /// Replaces a payment's data and recomputes its register.
    pub async fn update_payment(&self, id: &str, input: NewPayment) -> StoreResult<Payment> {
        debug!(payment_id = %id, "Updating payment");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let existing = fetch_payment(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Payment", id))?;
        ensure_same_salon(&existing.salon_id, &input.salon_id, "payment", id)?;

        let barber = fetch_barber(&mut tx, &input.barber_id)
            .await?
            .ok_or_else(|| DbError::not_found("Barber", &input.barber_id))?;
        let register = fetch_register(&mut tx, &input.cash_register_id)
            .await?
            .ok_or_else(|| DbError::not_found("CashRegister", &input.cash_register_id))?;
        let currency = fetch_currency(&mut tx, &input.currency_id)
            .await?
            .ok_or_else(|| DbError::not_found("Currency", &input.currency_id))?;

        validate_new_payment(&input, &barber, &register)?;
        validate_in_salon(&currency, "currency", &input.currency_id, &input.salon_id)?;

        let normalized = input.amount.convert(input.exchange_rate)?;
        let now = Utc::now();
        let payment = Payment {
            id: existing.id.clone(),
            salon_id: existing.salon_id.clone(),
            barber_id: input.barber_id.clone(),
            cash_register_id: input.cash_register_id.clone(),
            amount_cents: input.amount.cents(),
            currency_id: input.currency_id.clone(),
            exchange_rate_micros: input.exchange_rate.micros(),
            amount_default_cents: normalized.cents(),
            period_start: input.period_start,
            period_end: input.period_end,
            paid_on: input.paid_on,
            created_at: existing.created_at,
            updated_at: now,
        };

        sqlx::query(
            r#"
            UPDATE payments
            SET barber_id = ?2, cash_register_id = ?3, amount_cents = ?4, currency_id = ?5,
                exchange_rate_micros = ?6, amount_default_cents = ?7,
                period_start = ?8, period_end = ?9, paid_on = ?10, updated_at = ?11
            WHERE id = ?1
            "#,
        )
        .bind(&payment.id)
        .bind(&payment.barber_id)
        .bind(&payment.cash_register_id)
        .bind(payment.amount_cents)
        .bind(&payment.currency_id)
        .bind(payment.exchange_rate_micros)
        .bind(payment.amount_default_cents)
        .bind(payment.period_start)
        .bind(payment.period_end)
        .bind(payment.paid_on)
        .bind(payment.updated_at)
        .execute(&mut *tx)
        .await?;

        ledger::recompute(&mut tx, &payment.cash_register_id).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(payment)
    }

    /// Deletes a payment and recomputes its register.
    pub async fn delete_payment(&self, id: &str) -> StoreResult<()> {
        debug!(payment_id = %id, "Deleting payment");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let existing = fetch_payment(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Payment", id))?;

        sqlx::query("DELETE FROM payments WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        ledger::recompute(&mut tx, &existing.cash_register_id).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    // ===== Transactions =====

    /// Records a manual income or expense and recomputes its register.
    pub async fn create_transaction(&self, input: NewTransaction) -> StoreResult<Transaction> {
        debug!(salon_id = %input.salon_id, kind = ?input.kind, "Creating transaction");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let register = fetch_register(&mut tx, &input.cash_register_id)
            .await?
            .ok_or_else(|| DbError::not_found("CashRegister", &input.cash_register_id))?;
        let currency = fetch_currency(&mut tx, &input.currency_id)
            .await?
            .ok_or_else(|| DbError::not_found("Currency", &input.currency_id))?;

        validate_new_transaction(&input, &register)?;
        validate_in_salon(&currency, "currency", &input.currency_id, &input.salon_id)?;

        let normalized = input.amount.convert(input.exchange_rate)?;
        let now = Utc::now();
        let transaction = Transaction {
            id: generate_transaction_id(),
            salon_id: input.salon_id.clone(),
            cash_register_id: input.cash_register_id.clone(),
            name: input.name.trim().to_string(),
            amount_cents: input.amount.cents(),
            currency_id: input.currency_id.clone(),
            exchange_rate_micros: input.exchange_rate.micros(),
            amount_default_cents: normalized.cents(),
            kind: input.kind,
            occurred_on: input.occurred_on,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, salon_id, cash_register_id, name,
                amount_cents, currency_id, exchange_rate_micros, amount_default_cents,
                kind, occurred_on, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&transaction.id)
        .bind(&transaction.salon_id)
        .bind(&transaction.cash_register_id)
        .bind(&transaction.name)
        .bind(transaction.amount_cents)
        .bind(&transaction.currency_id)
        .bind(transaction.exchange_rate_micros)
        .bind(transaction.amount_default_cents)
        .bind(transaction.kind)
        .bind(transaction.occurred_on)
        .bind(transaction.created_at)
        .bind(transaction.updated_at)
        .execute(&mut *tx)
        .await?;

        ledger::recompute(&mut tx, &transaction.cash_register_id).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(transaction)
    }

    /// Replaces a transaction's data and recomputes its register.
    pub async fn update_transaction(
        &self,
        id: &str,
        input: NewTransaction,
    ) -> StoreResult<Transaction> {
        debug!(transaction_id = %id, "Updating transaction");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let existing = fetch_transaction(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Transaction", id))?;
        ensure_same_salon(&existing.salon_id, &input.salon_id, "transaction", id)?;

        let register = fetch_register(&mut tx, &input.cash_register_id)
            .await?
            .ok_or_else(|| DbError::not_found("CashRegister", &input.cash_register_id))?;
        let currency = fetch_currency(&mut tx, &input.currency_id)
            .await?
            .ok_or_else(|| DbError::not_found("Currency", &input.currency_id))?;

        validate_new_transaction(&input, &register)?;
        validate_in_salon(&currency, "currency", &input.currency_id, &input.salon_id)?;

        let normalized = input.amount.convert(input.exchange_rate)?;
        let now = Utc::now();
        let transaction = Transaction {
            id: existing.id.clone(),
            salon_id: existing.salon_id.clone(),
            cash_register_id: input.cash_register_id.clone(),
            name: input.name.trim().to_string(),
            amount_cents: input.amount.cents(),
            currency_id: input.currency_id.clone(),
            exchange_rate_micros: input.exchange_rate.micros(),
            amount_default_cents: normalized.cents(),
            kind: input.kind,
            occurred_on: input.occurred_on,
            created_at: existing.created_at,
            updated_at: now,
        };

        sqlx::query(
            r#"
            UPDATE transactions
            SET cash_register_id = ?2, name = ?3, amount_cents = ?4, currency_id = ?5,
                exchange_rate_micros = ?6, amount_default_cents = ?7,
                kind = ?8, occurred_on = ?9, updated_at = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&transaction.id)
        .bind(&transaction.cash_register_id)
        .bind(&transaction.name)
        .bind(transaction.amount_cents)
        .bind(&transaction.currency_id)
        .bind(transaction.exchange_rate_micros)
        .bind(transaction.amount_default_cents)
        .bind(transaction.kind)
        .bind(transaction.occurred_on)
        .bind(transaction.updated_at)
        .execute(&mut *tx)
        .await?;

        ledger::recompute(&mut tx, &transaction.cash_register_id).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(transaction)
    }

    /// Deletes a transaction and recomputes its register.
    pub async fn delete_transaction(&self, id: &str) -> StoreResult<()> {
        debug!(transaction_id = %id, "Deleting transaction");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let existing = fetch_transaction(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Transaction", id))?;

        sqlx::query("DELETE FROM transactions WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        ledger::recompute(&mut tx, &existing.cash_register_id).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    // ===== Items =====

    /// Creates an inventory item with zero stock.
    ///
    /// Lives here rather than on the item repository because the
    /// normalized price is derived on save, like every other money field.
    /// No recompute: an item without purchases or uses has no ledger
    /// footprint.
    pub async fn create_item(&self, input: NewItem) -> StoreResult<Item> {
        debug!(salon_id = %input.salon_id, name = %input.name, "Creating item");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let currency = fetch_currency(&mut tx, &input.currency_id)
            .await?
            .ok_or_else(|| DbError::not_found("Currency", &input.currency_id))?;

        validate_new_item(&input)?;
        validate_in_salon(&currency, "currency", &input.currency_id, &input.salon_id)?;

        let normalized = input.price.convert(input.exchange_rate)?;
        let now = Utc::now();
        let item = Item {
            id: generate_item_id(),
            salon_id: input.salon_id.clone(),
            name: input.name.trim().to_string(),
            price_cents: input.price.cents(),
            currency_id: input.currency_id.clone(),
            exchange_rate_micros: input.exchange_rate.micros(),
            price_default_cents: normalized.cents(),
            current_stock: 0,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO items (
                id, salon_id, name, price_cents, currency_id, exchange_rate_micros,
                price_default_cents, current_stock, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&item.id)
        .bind(&item.salon_id)
        .bind(&item.name)
        .bind(item.price_cents)
        .bind(&item.currency_id)
        .bind(item.exchange_rate_micros)
        .bind(item.price_default_cents)
        .bind(item.current_stock)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(item)
    }

    /// Replaces an item's name and pricing. Stock is preserved; use
    /// purchases and uses to move it.
    pub async fn update_item(&self, id: &str, input: NewItem) -> StoreResult<Item> {
        debug!(item_id = %id, "Updating item");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let existing = fetch_item(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", id))?;
        ensure_same_salon(&existing.salon_id, &input.salon_id, "item", id)?;

        let currency = fetch_currency(&mut tx, &input.currency_id)
            .await?
            .ok_or_else(|| DbError::not_found("Currency", &input.currency_id))?;

        validate_new_item(&input)?;
        validate_in_salon(&currency, "currency", &input.currency_id, &input.salon_id)?;

        let normalized = input.price.convert(input.exchange_rate)?;
        let now = Utc::now();
        let item = Item {
            id: existing.id.clone(),
            salon_id: existing.salon_id.clone(),
            name: input.name.trim().to_string(),
            price_cents: input.price.cents(),
            currency_id: input.currency_id.clone(),
            exchange_rate_micros: input.exchange_rate.micros(),
            price_default_cents: normalized.cents(),
            current_stock: existing.current_stock,
            created_at: existing.created_at,
            updated_at: now,
        };

        sqlx::query(
            r#"
            UPDATE items
            SET name = ?2, price_cents = ?3, currency_id = ?4, exchange_rate_micros = ?5,
                price_default_cents = ?6, updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.price_cents)
        .bind(&item.currency_id)
        .bind(item.exchange_rate_micros)
        .bind(item.price_default_cents)
        .bind(item.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(item)
    }

    // ===== Item Purchases =====

    /// Records a stock purchase: inserts the purchase, raises the item's
    /// stock, and recomputes the paying register.
    pub async fn record_item_purchase(
        &self,
        input: NewItemPurchase,
    ) -> StoreResult<ItemPurchase> {
        debug!(item_id = %input.item_id, quantity = input.quantity, "Recording item purchase");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let item = fetch_item(&mut tx, &input.item_id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", &input.item_id))?;
        let register = fetch_register(&mut tx, &input.cash_register_id)
            .await?
            .ok_or_else(|| DbError::not_found("CashRegister", &input.cash_register_id))?;
        let currency = fetch_currency(&mut tx, &input.currency_id)
            .await?
            .ok_or_else(|| DbError::not_found("Currency", &input.currency_id))?;

        validate_new_item_purchase(&input, &item, &register)?;
        validate_in_salon(&currency, "currency", &input.currency_id, &input.salon_id)?;

        let total = input.unit_price.multiply_quantity(input.quantity);
        let normalized = total.convert(input.exchange_rate)?;
        let now = Utc::now();
        let purchase = ItemPurchase {
            id: generate_item_purchase_id(),
            salon_id: input.salon_id.clone(),
            item_id: input.item_id.clone(),
            cash_register_id: input.cash_register_id.clone(),
            quantity: input.quantity,
            unit_price_cents: input.unit_price.cents(),
            currency_id: input.currency_id.clone(),
            exchange_rate_micros: input.exchange_rate.micros(),
            total_price_cents: total.cents(),
            amount_default_cents: normalized.cents(),
            supplier: input.supplier.clone(),
            purchased_on: input.purchased_on,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO item_purchases (
                id, salon_id, item_id, cash_register_id, quantity, unit_price_cents,
                currency_id, exchange_rate_micros, total_price_cents, amount_default_cents,
                supplier, purchased_on, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
        )
        .bind(&purchase.id)
        .bind(&purchase.salon_id)
        .bind(&purchase.item_id)
        .bind(&purchase.cash_register_id)
        .bind(purchase.quantity)
        .bind(purchase.unit_price_cents)
        .bind(&purchase.currency_id)
        .bind(purchase.exchange_rate_micros)
        .bind(purchase.total_price_cents)
        .bind(purchase.amount_default_cents)
        .bind(&purchase.supplier)
        .bind(purchase.purchased_on)
        .bind(purchase.created_at)
        .bind(purchase.updated_at)
        .execute(&mut *tx)
        .await?;

        adjust_stock(&mut tx, &purchase.item_id, purchase.quantity).await?;
        ledger::recompute(&mut tx, &purchase.cash_register_id).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(purchase)
    }

    /// Replaces a purchase's data, re-derives its totals, and recomputes
    /// the register. Stock is NOT re-adjusted: a quantity edit corrects
    /// the paper record, it does not restate what is on the shelf.
    pub async fn update_item_purchase(
        &self,
        id: &str,
        input: NewItemPurchase,
    ) -> StoreResult<ItemPurchase> {
        debug!(purchase_id = %id, "Updating item purchase");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let existing = fetch_purchase(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("ItemPurchase", id))?;
        ensure_same_salon(&existing.salon_id, &input.salon_id, "item purchase", id)?;

        let item = fetch_item(&mut tx, &input.item_id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", &input.item_id))?;
        let register = fetch_register(&mut tx, &input.cash_register_id)
            .await?
            .ok_or_else(|| DbError::not_found("CashRegister", &input.cash_register_id))?;
        let currency = fetch_currency(&mut tx, &input.currency_id)
            .await?
            .ok_or_else(|| DbError::not_found("Currency", &input.currency_id))?;

        validate_new_item_purchase(&input, &item, &register)?;
        validate_in_salon(&currency, "currency", &input.currency_id, &input.salon_id)?;

        let total = input.unit_price.multiply_quantity(input.quantity);
        let normalized = total.convert(input.exchange_rate)?;
        let now = Utc::now();
        let purchase = ItemPurchase {
            id: existing.id.clone(),
            salon_id: existing.salon_id.clone(),
            item_id: input.item_id.clone(),
            cash_register_id: input.cash_register_id.clone(),
            quantity: input.quantity,
            unit_price_cents: input.unit_price.cents(),
            currency_id: input.currency_id.clone(),
            exchange_rate_micros: input.exchange_rate.micros(),
            total_price_cents: total.cents(),
            amount_default_cents: normalized.cents(),
            supplier: input.supplier.clone(),
            purchased_on: input.purchased_on,
            created_at: existing.created_at,
            updated_at: now,
        };

        sqlx::query(
            r#"
            UPDATE item_purchases
            SET item_id = ?2, cash_register_id = ?3, quantity = ?4, unit_price_cents = ?5,
                currency_id = ?6, exchange_rate_micros = ?7, total_price_cents = ?8,
                amount_default_cents = ?9, supplier = ?10, purchased_on = ?11, updated_at = ?12
            WHERE id = ?1
            "#,
        )
        .bind(&purchase.id)
        .bind(&purchase.item_id)
        .bind(&purchase.cash_register_id)
        .bind(purchase.quantity)
        .bind(purchase.unit_price_cents)
        .bind(&purchase.currency_id)
        .bind(purchase.exchange_rate_micros)
        .bind(purchase.total_price_cents)
        .bind(purchase.amount_default_cents)
        .bind(&purchase.supplier)
        .bind(purchase.purchased_on)
        .bind(purchase.updated_at)
        .execute(&mut *tx)
        .await?;

        ledger::recompute(&mut tx, &purchase.cash_register_id).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(purchase)
    }

    /// Deletes a purchase, lowers the item's stock by the purchased
    /// quantity, and recomputes the register.
    ///
    /// Stock may go negative when the purchased units were already
    /// consumed; the figure is then telling the truth about the books.
    pub async fn delete_item_purchase(&self, id: &str) -> StoreResult<()> {
        debug!(purchase_id = %id, "Deleting item purchase");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let existing = fetch_purchase(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("ItemPurchase", id))?;

        sqlx::query("DELETE FROM item_purchases WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        adjust_stock(&mut tx, &existing.item_id, -existing.quantity).await?;
        ledger::recompute(&mut tx, &existing.cash_register_id).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    // ===== Item Uses =====

    /// Records consumption of an item during a COMPLETED shave: inserts
    /// the use, lowers the item's stock, and recomputes the shave's
    /// register (usage cost feeds the profit balance).
    pub async fn record_item_use(&self, input: NewItemUsed) -> StoreResult<ItemUsed> {
        debug!(item_id = %input.item_id, shave_id = %input.shave_id, "Recording item use");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let item = fetch_item(&mut tx, &input.item_id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", &input.item_id))?;
        let shave = fetch_shave(&mut tx, &input.shave_id)
            .await?
            .ok_or_else(|| DbError::not_found("Shave", &input.shave_id))?;
        let barber = fetch_barber(&mut tx, &input.barber_id)
            .await?
            .ok_or_else(|| DbError::not_found("Barber", &input.barber_id))?;

        validate_new_item_use(&input, &item, &shave, &barber)?;

        let now = Utc::now();
        let used = ItemUsed {
            id: generate_item_use_id(),
            salon_id: input.salon_id.clone(),
            item_id: input.item_id.clone(),
            shave_id: input.shave_id.clone(),
            barber_id: input.barber_id.clone(),
            quantity: input.quantity,
            note: input.note.clone(),
            used_on: input.used_on,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO item_uses (
                id, salon_id, item_id, shave_id, barber_id, quantity, note,
                used_on, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&used.id)
        .bind(&used.salon_id)
        .bind(&used.item_id)
        .bind(&used.shave_id)
        .bind(&used.barber_id)
        .bind(used.quantity)
        .bind(&used.note)
        .bind(used.used_on)
        .bind(used.created_at)
        .bind(used.updated_at)
        .execute(&mut *tx)
        .await?;

        adjust_stock(&mut tx, &used.item_id, -used.quantity).await?;
        ledger::recompute(&mut tx, &shave.cash_register_id).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(used)
    }

    /// Deletes an item use, returns the quantity to stock, and recomputes
    /// the parent shave's register. The exact inverse of
    /// [`Bookkeeper::record_item_use`].
    pub async fn delete_item_use(&self, id: &str) -> StoreResult<()> {
        debug!(use_id = %id, "Deleting item use");

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let existing = fetch_use(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("ItemUsed", id))?;
        let shave = fetch_shave(&mut tx, &existing.shave_id)
            .await?
            .ok_or_else(|| DbError::not_found("Shave", &existing.shave_id))?;

        sqlx::query("DELETE FROM item_uses WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        adjust_stock(&mut tx, &existing.item_id, existing.quantity).await?;
        ledger::recompute(&mut tx, &shave.cash_register_id).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }
}

/// Records never move between salons; an update carrying a different
/// salon is a caller bug surfaced as a salon mismatch.
fn ensure_same_salon(
    existing_salon: &str,
    input_salon: &str,
    entity: &'static str,
    id: &str,
) -> StoreResult<()> {
    if existing_salon != input_salon {
        return Err(CoreError::SalonMismatch {
            entity,
            entity_id: id.to_string(),
            salon_id: input_salon.to_string(),
        }
        .into());
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use trimbook_core::{
        Barber, CashRegister, Currency, ExchangeRate, Hairstyle, Money, Salon, ShaveStatus,
        TransactionKind,
    };

    struct Fixture {
        db: Database,
        salon: Salon,
        usd: Currency,
        register: CashRegister,
        barber: Barber,
        hairstyle: Hairstyle,
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let salon = db
            .salons()
            .create("Tonsorial Parlor", None, None, None, None)
            .await
            .unwrap();
        let usd = db
            .salons()
            .add_currency(&salon.id, "USD", "US Dollar", true)
            .await
            .unwrap();
        let register = db
            .registers()
            .create(&salon.id, "Main Till", &usd.id)
            .await
            .unwrap();
        let barber = db
            .barbers()
            .create(&salon.id, "Ray Fontaine", date(2024, 1, 1))
            .await
            .unwrap();
        let hairstyle = db
            .catalog()
            .create_hairstyle(&salon.id, "Hot Towel Shave", Money::from_cents(5000), &usd.id)
            .await
            .unwrap();

        Fixture {
            db,
            salon,
            usd,
            register,
            barber,
            hairstyle,
        }
    }

    fn shave_input(fx: &Fixture, cents: i64, status: ShaveStatus) -> NewShave {
        NewShave {
            salon_id: fx.salon.id.clone(),
            barber_id: fx.barber.id.clone(),
            hairstyle_id: fx.hairstyle.id.clone(),
            client_id: None,
            cash_register_id: fx.register.id.clone(),
            amount: Money::from_cents(cents),
            currency_id: fx.usd.id.clone(),
            exchange_rate: ExchangeRate::ONE,
            status,
            performed_at: Utc::now(),
        }
    }

    fn payment_input(fx: &Fixture, cents: i64) -> NewPayment {
        NewPayment {
            salon_id: fx.salon.id.clone(),
            barber_id: fx.barber.id.clone(),
            cash_register_id: fx.register.id.clone(),
            amount: Money::from_cents(cents),
            currency_id: fx.usd.id.clone(),
            exchange_rate: ExchangeRate::ONE,
            period_start: date(2024, 6, 1),
            period_end: date(2024, 6, 30),
            paid_on: date(2024, 7, 1),
        }
    }

    fn purchase_input(fx: &Fixture, item_id: &str, qty: i64, unit_cents: i64) -> NewItemPurchase {
        NewItemPurchase {
            salon_id: fx.salon.id.clone(),
            item_id: item_id.to_string(),
            cash_register_id: fx.register.id.clone(),
            quantity: qty,
            unit_price: Money::from_cents(unit_cents),
            currency_id: fx.usd.id.clone(),
            exchange_rate: ExchangeRate::ONE,
            supplier: None,
            purchased_on: date(2024, 6, 1),
        }
    }

    async fn seed_item(fx: &Fixture, name: &str) -> Item {
        fx.db
            .bookkeeper()
            .create_item(NewItem {
                salon_id: fx.salon.id.clone(),
                name: name.to_string(),
                price: Money::from_cents(800),
                currency_id: fx.usd.id.clone(),
                exchange_rate: ExchangeRate::ONE,
            })
            .await
            .unwrap()
    }

    async fn balances(fx: &Fixture) -> (i64, i64) {
        let b = fx.db.ledger().balances(&fx.register.id).await.unwrap();
        (b.profit.cents(), b.cash.cents())
    }

    #[tokio::test]
    async fn test_completed_shave_moves_both_balances() {
        let fx = fixture().await;
        let bookkeeper = fx.db.bookkeeper();

        bookkeeper
            .create_shave(shave_input(&fx, 5000, ShaveStatus::Completed))
            .await
            .unwrap();
        assert_eq!(balances(&fx).await, (5000, 5000));

        // A scheduled shave is financially invisible
        bookkeeper
            .create_shave(shave_input(&fx, 9000, ShaveStatus::Scheduled))
            .await
            .unwrap();
        assert_eq!(balances(&fx).await, (5000, 5000));
    }

    #[tokio::test]
    async fn test_payment_and_purchase_split_profit_from_cash() {
        let fx = fixture().await;
        let bookkeeper = fx.db.bookkeeper();

        bookkeeper
            .create_shave(shave_input(&fx, 5000, ShaveStatus::Completed))
            .await
            .unwrap();
        bookkeeper
            .create_payment(payment_input(&fx, 2000))
            .await
            .unwrap();
        assert_eq!(balances(&fx).await, (3000, 3000));

        // Purchases spend cash but cost profit only through later usage
        let foam = seed_item(&fx, "Shave Foam").await;
        bookkeeper
            .record_item_purchase(purchase_input(&fx, &foam.id, 5, 200))
            .await
            .unwrap();
        assert_eq!(balances(&fx).await, (3000, 2000));

        let foam = fx.db.items().get(&foam.id).await.unwrap().unwrap();
        assert_eq!(foam.current_stock, 5);
    }

    #[tokio::test]
    async fn test_item_use_costs_profit_and_reverses_on_delete() {
        let fx = fixture().await;
        let bookkeeper = fx.db.bookkeeper();

        let shave = bookkeeper
            .create_shave(shave_input(&fx, 5000, ShaveStatus::Completed))
            .await
            .unwrap();
        let foam = seed_item(&fx, "Shave Foam").await;
        bookkeeper
            .record_item_purchase(purchase_input(&fx, &foam.id, 5, 200))
            .await
            .unwrap();

        // Average cost 2.00, two units used: profit drops 4.00
        let used = bookkeeper
            .record_item_use(NewItemUsed {
                salon_id: fx.salon.id.clone(),
                item_id: foam.id.clone(),
                shave_id: shave.id.clone(),
                barber_id: fx.barber.id.clone(),
                quantity: 2,
                note: None,
                used_on: date(2024, 6, 2),
            })
            .await
            .unwrap();
        assert_eq!(balances(&fx).await, (4600, 4000));
        let item = fx.db.items().get(&foam.id).await.unwrap().unwrap();
        assert_eq!(item.current_stock, 3);

        // Deleting the use restores stock and balances exactly
        bookkeeper.delete_item_use(&used.id).await.unwrap();
        assert_eq!(balances(&fx).await, (5000, 4000));
        let item = fx.db.items().get(&foam.id).await.unwrap().unwrap();
        assert_eq!(item.current_stock, 5);
    }

    #[tokio::test]
    async fn test_transactions_move_their_side() {
        let fx = fixture().await;
        let bookkeeper = fx.db.bookkeeper();

        let tip_jar = bookkeeper
            .create_transaction(NewTransaction {
                salon_id: fx.salon.id.clone(),
                cash_register_id: fx.register.id.clone(),
                name: "Tip jar count".to_string(),
                amount: Money::from_cents(1500),
                currency_id: fx.usd.id.clone(),
                exchange_rate: ExchangeRate::ONE,
                kind: TransactionKind::Income,
                occurred_on: date(2024, 6, 5),
            })
            .await
            .unwrap();
        assert_eq!(balances(&fx).await, (1500, 1500));

        bookkeeper
            .create_transaction(NewTransaction {
                salon_id: fx.salon.id.clone(),
                cash_register_id: fx.register.id.clone(),
                name: "Window cleaner".to_string(),
                amount: Money::from_cents(500),
                currency_id: fx.usd.id.clone(),
                exchange_rate: ExchangeRate::ONE,
                kind: TransactionKind::Expense,
                occurred_on: date(2024, 6, 6),
            })
            .await
            .unwrap();
        assert_eq!(balances(&fx).await, (1000, 1000));

        bookkeeper.delete_transaction(&tip_jar.id).await.unwrap();
        assert_eq!(balances(&fx).await, (-500, -500));
    }

    #[tokio::test]
    async fn test_use_requires_stock_and_completed_shave() {
        let fx = fixture().await;
        let bookkeeper = fx.db.bookkeeper();

        let completed = bookkeeper
            .create_shave(shave_input(&fx, 5000, ShaveStatus::Completed))
            .await
            .unwrap();
        let scheduled = bookkeeper
            .create_shave(shave_input(&fx, 5000, ShaveStatus::Scheduled))
            .await
            .unwrap();
        let foam = seed_item(&fx, "Shave Foam").await;
        bookkeeper
            .record_item_purchase(purchase_input(&fx, &foam.id, 3, 200))
            .await
            .unwrap();

        let over = NewItemUsed {
            salon_id: fx.salon.id.clone(),
            item_id: foam.id.clone(),
            shave_id: completed.id.clone(),
            barber_id: fx.barber.id.clone(),
            quantity: 4,
            note: None,
            used_on: date(2024, 6, 2),
        };
        let err = bookkeeper.record_item_use(over.clone()).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InsufficientStock { available: 3, requested: 4, .. })
        ));

        let wrong_status = NewItemUsed {
            shave_id: scheduled.id.clone(),
            quantity: 1,
            ..over
        };
        let err = bookkeeper.record_item_use(wrong_status).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::ShaveNotCompleted { .. })
        ));

        // Neither failure touched stock or balances
        let item = fx.db.items().get(&foam.id).await.unwrap().unwrap();
        assert_eq!(item.current_stock, 3);
        assert_eq!(balances(&fx).await, (5000, 4400));
    }

    #[tokio::test]
    async fn test_cross_salon_reference_is_rejected() {
        let fx = fixture().await;
        let other_salon = fx
            .db
            .salons()
            .create("Rival Parlor", None, None, None, None)
            .await
            .unwrap();
        let other_barber = fx
            .db
            .barbers()
            .create(&other_salon.id, "Lou Marsh", date(2024, 1, 1))
            .await
            .unwrap();

        let mut input = shave_input(&fx, 5000, ShaveStatus::Completed);
        input.barber_id = other_barber.id.clone();

        let err = fx.db.bookkeeper().create_shave(input).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::SalonMismatch { entity: "barber", .. })
        ));
        assert_eq!(balances(&fx).await, (0, 0));
    }

    #[tokio::test]
    async fn test_non_completed_update_skips_recompute() {
        let fx = fixture().await;
        let bookkeeper = fx.db.bookkeeper();

        let shave = bookkeeper
            .create_shave(shave_input(&fx, 5000, ShaveStatus::Completed))
            .await
            .unwrap();
        assert_eq!(balances(&fx).await, (5000, 5000));

        // Cancelling does not trigger a recompute; the stored figures go
        // stale until the next one
        bookkeeper
            .update_shave(&shave.id, shave_input(&fx, 5000, ShaveStatus::Cancelled))
            .await
            .unwrap();
        assert_eq!(balances(&fx).await, (5000, 5000));

        let fresh = fx.db.ledger().update_balance(&fx.register.id).await.unwrap();
        assert_eq!(fresh.profit, Money::zero());
        assert_eq!(fresh.cash, Money::zero());
    }

    #[tokio::test]
    async fn test_delete_shave_recomputes_former_register() {
        let fx = fixture().await;
        let bookkeeper = fx.db.bookkeeper();

        let shave = bookkeeper
            .create_shave(shave_input(&fx, 5000, ShaveStatus::Completed))
            .await
            .unwrap();
        assert_eq!(balances(&fx).await, (5000, 5000));

        bookkeeper.delete_shave(&shave.id).await.unwrap();
        assert_eq!(balances(&fx).await, (0, 0));
    }

    #[tokio::test]
    async fn test_missing_reference_is_not_found() {
        let fx = fixture().await;

        let mut input = shave_input(&fx, 5000, ShaveStatus::Completed);
        input.barber_id = "no-such-barber".to_string();

        let err = fx.db.bookkeeper().create_shave(input).await.unwrap_err();
        assert!(matches!(err, StoreError::Db(DbError::NotFound { .. })));
    }
}
