//! # Reports
//!
//! Salon-wide read models: shave statistics, commission and barber
//! balances, the financial summary, and inventory overviews.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │ financial_summary(salon, window)                               │
//! │                                                                │
//! │   total_revenue  = Σ COMPLETED shaves in window                │
//! │   total_profit   = revenue − payments − expense transactions   │
//! │                    − cost of items used, all in window         │
//! │   total_shaves   = COUNT of those shaves                       │
//! │   stock_value    = Σ current_stock × price (no window)         │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here reads; the window filters use each record's ledger
//! date (shaves by performed-at, payments by paid-on, transactions by
//! occurred-on, item uses by their owning shave's performed-at). Unlike
//! register balances, the summary's revenue counts shaves only; manual
//! INCOME transactions appear in neither summary figure.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::{DbError, StoreResult};
use crate::repository::barber::BarberRepository;
use crate::repository::item::ItemRepository;
use crate::repository::shave::ShaveRepository;
use trimbook_core::commission;
use trimbook_core::ledger::{average_unit_cost, total_usage_cost, ItemUsage};
use trimbook_core::{DateRange, Item, Money, ValidationError, LOW_STOCK_THRESHOLD};

// =============================================================================
// Report Types
// =============================================================================

/// Count and revenue of COMPLETED shaves over a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShaveStats {
    pub count: i64,
    pub total: Money,
}

/// The salon-wide financial picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinancialSummary {
    /// Σ COMPLETED shave amounts in the window, default currency.
    pub total_revenue: Money,

    /// Revenue minus payments, expense transactions, and cost of items
    /// used, each filtered by its own ledger date.
    pub total_profit: Money,

    /// Number of COMPLETED shaves in the window.
    pub total_shaves: i64,

    /// Σ `current_stock × price`, never windowed. Summed over each item's
    /// own-currency price, so a mixed-currency salon gets a mixed-unit
    /// figure; treat it as indicative.
    pub stock_value: Money,
}

/// Aggregate inventory position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockLevel {
    /// Σ `current_stock` across the salon's items.
    pub total_items: i64,

    /// Σ `current_stock × price`, same caveat as
    /// [`FinancialSummary::stock_value`].
    pub total_value: Money,
}

/// Per-item purchase/consumption overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemUsageReport {
    pub item_id: String,
    pub name: String,

    /// Units ever purchased.
    pub purchased_quantity: i64,

    /// Units ever consumed.
    pub used_quantity: i64,

    /// Units on hand (`Item.current_stock`).
    pub remaining: i64,

    /// Normalized total spent on this item.
    pub purchased_total: Money,

    /// `purchased_total / purchased_quantity`, `None` with no purchase
    /// history.
    pub average_unit_cost: Option<Decimal>,
}

// =============================================================================
// Reports
// =============================================================================

/// Read-only reporting over a salon's records.
///
/// ## Usage
/// ```rust,ignore
/// let reports = db.reports();
///
/// let summary = reports.financial_summary(&salon_id, &DateRange::UNBOUNDED).await?;
/// let owed = reports.barber_balance(&barber_id, &DateRange::month(2024, 6).unwrap()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Reports {
    pool: SqlitePool,
}

impl Reports {
    /// Creates a new Reports handle.
    pub fn new(pool: SqlitePool) -> Self {
        Reports { pool }
    }

    // ===== Shave Statistics =====

    /// Count and revenue sum of COMPLETED shaves in the window.
    pub async fn shave_stats(&self, salon_id: &str, range: &DateRange) -> StoreResult<ShaveStats> {
        let (count, total) = sqlx::query_as::<_, (i64, Option<i64>)>(
            r#"
            SELECT COUNT(*), SUM(amount_default_cents)
            FROM shaves
            WHERE salon_id = ?1
              AND status = 'COMPLETED'
              AND (?2 IS NULL OR performed_at >= ?2)
              AND (?3 IS NULL OR performed_at <= ?3)
            "#,
        )
        .bind(salon_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(ShaveStats {
            count,
            total: Money::from_cents(total.unwrap_or(0)),
        })
    }

    /// [`Reports::shave_stats`] over one calendar month.
    pub async fn monthly_shave_stats(
        &self,
        salon_id: &str,
        year: i32,
        month: u32,
    ) -> StoreResult<ShaveStats> {
        let range = DateRange::month(year, month).ok_or(ValidationError::OutOfRange {
            field: "month".to_string(),
            min: 1,
            max: 12,
        })?;

        self.shave_stats(salon_id, &range).await
    }

    // ===== Commission =====

    /// Exact commission earned by a barber over the window, selecting the
    /// rule in force at each shave's performed-at instant. Unrounded.
    pub async fn commission(&self, barber_id: &str, range: &DateRange) -> StoreResult<Decimal> {
        let barbers = BarberRepository::new(self.pool.clone());
        barbers
            .get(barber_id)
            .await?
            .ok_or_else(|| DbError::not_found("Barber", barber_id))?;

        let shaves = ShaveRepository::new(self.pool.clone())
            .completed_for_barber(barber_id, range)
            .await?;
        let rules = barbers.commission_rules(barber_id).await?;

        Ok(commission::commission_total(&shaves, &rules))
    }

    /// What a barber is still owed over the window: rounded commission
    /// minus rounded payments (by paid-on date).
    pub async fn barber_balance(&self, barber_id: &str, range: &DateRange) -> StoreResult<Money> {
        let earned = self.commission(barber_id, range).await?;

        let paid = sqlx::query_scalar::<_, Option<i64>>(
            r#"
            SELECT SUM(amount_default_cents)
            FROM payments
            WHERE barber_id = ?1
              AND (?2 IS NULL OR paid_on >= ?2)
              AND (?3 IS NULL OR paid_on <= ?3)
            "#,
        )
        .bind(barber_id)
        .bind(range.start_day())
        .bind(range.end_day())
        .fetch_one(&self.pool)
        .await?;

        let balance = commission::barber_balance(earned, Money::from_cents(paid.unwrap_or(0)))?;
        Ok(balance)
    }

    // ===== Financial Summary =====

    /// Windowed revenue: Σ COMPLETED shave amounts, default currency.
    pub async fn total_revenue(&self, salon_id: &str, range: &DateRange) -> StoreResult<Money> {
        Ok(self.shave_stats(salon_id, range).await?.total)
    }

    /// Windowed profit: revenue minus payments (paid-on), expense
    /// transactions (occurred-on), and cost of items used (owning shave's
    /// performed-at), rounded half-up to cents.
    pub async fn total_profit(&self, salon_id: &str, range: &DateRange) -> StoreResult<Money> {
        let revenue = self.total_revenue(salon_id, range).await?;

        let payments = sqlx::query_scalar::<_, Option<i64>>(
            r#"
            SELECT SUM(amount_default_cents)
            FROM payments
            WHERE salon_id = ?1
              AND (?2 IS NULL OR paid_on >= ?2)
              AND (?3 IS NULL OR paid_on <= ?3)
            "#,
        )
        .bind(salon_id)
        .bind(range.start_day())
        .bind(range.end_day())
        .fetch_one(&self.pool)
        .await?
        .unwrap_or(0);

        let expenses = sqlx::query_scalar::<_, Option<i64>>(
            r#"
            SELECT SUM(amount_default_cents)
            FROM transactions
            WHERE salon_id = ?1
              AND kind = 'EXPENSE'
              AND (?2 IS NULL OR occurred_on >= ?2)
              AND (?3 IS NULL OR occurred_on <= ?3)
            "#,
        )
        .bind(salon_id)
        .bind(range.start_day())
        .bind(range.end_day())
        .fetch_one(&self.pool)
        .await?
        .unwrap_or(0);

        let usage_rows = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT (SELECT COALESCE(SUM(p.amount_default_cents), 0)
                    FROM item_purchases p WHERE p.item_id = u.item_id),
                   (SELECT COALESCE(SUM(p.quantity), 0)
                    FROM item_purchases p WHERE p.item_id = u.item_id),
                   SUM(u.quantity)
            FROM item_uses u
            INNER JOIN shaves s ON s.id = u.shave_id
            WHERE u.salon_id = ?1
              AND s.status = 'COMPLETED'
              AND (?2 IS NULL OR s.performed_at >= ?2)
              AND (?3 IS NULL OR s.performed_at <= ?3)
            GROUP BY u.item_id
            "#,
        )
        .bind(salon_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        let used_cost = total_usage_cost(usage_rows.into_iter().map(
            |(purchased_total_cents, purchased_quantity, used_quantity)| ItemUsage {
                purchased_total_cents,
                purchased_quantity,
                used_quantity,
            },
        ));

        let spent = Money::from_cents(payments + expenses).to_decimal() + used_cost;
        let profit = Money::try_from_decimal(revenue.to_decimal() - spent)?;
        Ok(profit)
    }

    /// The four-figure salon summary for a window.
    pub async fn financial_summary(
        &self,
        salon_id: &str,
        range: &DateRange,
    ) -> StoreResult<FinancialSummary> {
        let stats = self.shave_stats(salon_id, range).await?;
        let total_profit = self.total_profit(salon_id, range).await?;
        let stock_value = self.stock_value(salon_id).await?;

        Ok(FinancialSummary {
            total_revenue: stats.total,
            total_profit,
            total_shaves: stats.count,
            stock_value,
        })
    }

    async fn stock_value(&self, salon_id: &str) -> StoreResult<Money> {
        let value = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT SUM(current_stock * price_cents) FROM items WHERE salon_id = ?1",
        )
        .bind(salon_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(value.unwrap_or(0)))
    }

    // ===== Inventory =====

    /// Total units on hand and their valuation.
    pub async fn stock_level(&self, salon_id: &str) -> StoreResult<StockLevel> {
        let (total_items, total_value) = sqlx::query_as::<_, (Option<i64>, Option<i64>)>(
            r#"
            SELECT SUM(current_stock), SUM(current_stock * price_cents)
            FROM items
            WHERE salon_id = ?1
            "#,
        )
        .bind(salon_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(StockLevel {
            total_items: total_items.unwrap_or(0),
            total_value: Money::from_cents(total_value.unwrap_or(0)),
        })
    }

    /// Items with stock strictly below the threshold (default
    /// [`LOW_STOCK_THRESHOLD`]), emptiest first.
    pub async fn low_stock_items(
        &self,
        salon_id: &str,
        threshold: Option<i64>,
    ) -> StoreResult<Vec<Item>> {
        let threshold = threshold.unwrap_or(LOW_STOCK_THRESHOLD);
        let items = ItemRepository::new(self.pool.clone())
            .low_stock(salon_id, threshold)
            .await?;

        Ok(items)
    }

    /// The per-item inventory overview, sorted by name.
    pub async fn item_usage(&self, salon_id: &str) -> StoreResult<Vec<ItemUsageReport>> {
        let rows = sqlx::query_as::<_, (String, String, i64, i64, i64, i64)>(
            r#"
            SELECT i.id, i.name,
                   (SELECT COALESCE(SUM(p.quantity), 0)
                    FROM item_purchases p WHERE p.item_id = i.id),
                   (SELECT COALESCE(SUM(u.quantity), 0)
                    FROM item_uses u WHERE u.item_id = i.id),
                   i.current_stock,
                   (SELECT COALESCE(SUM(p.amount_default_cents), 0)
                    FROM item_purchases p WHERE p.item_id = i.id)
            FROM items i
            WHERE i.salon_id = ?1
            ORDER BY i.name
            "#,
        )
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(item_id, name, purchased_quantity, used_quantity, remaining, total_cents)| {
                    ItemUsageReport {
                        item_id,
                        name,
                        purchased_quantity,
                        used_quantity,
                        remaining,
                        purchased_total: Money::from_cents(total_cents),
                        average_unit_cost: average_unit_cost(total_cents, purchased_quantity),
                    }
                },
            )
            .collect())
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
    use chrono::{DateTime, NaiveDate, Utc};
    use trimbook_core::{
        Barber, CashRegister, CoreError, Currency, ExchangeRate, NewItem, NewItemPurchase,
        NewItemUsed, NewPayment, NewShave, NewTransaction, Salon, ShaveStatus, TransactionKind,
    };

    struct Fixture {
        db: Database,
        salon: Salon,
        usd: Currency,
        register: CashRegister,
        barber: Barber,
        hairstyle_id: String,
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        date(y, m, d).and_hms_opt(12, 0, 0).unwrap().and_utc()
    }

    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let salon = db
            .salons()
            .create("Crosstown Cuts", None, None, None, None)
            .await
            .unwrap();
        let usd = db
            .salons()
            .add_currency(&salon.id, "USD", "US Dollar", true)
            .await
            .unwrap();
        let register = db
            .registers()
            .create(&salon.id, "Till", &usd.id)
            .await
            .unwrap();
        let barber = db
            .barbers()
            .create(&salon.id, "Gus Delgado", date(2023, 1, 1))
            .await
            .unwrap();
        let hairstyle = db
            .catalog()
            .create_hairstyle(&salon.id, "Pompadour", Money::from_cents(10000), &usd.id)
            .await
            .unwrap();

        Fixture {
            db,
            salon,
            usd,
            register,
            barber,
            hairstyle_id: hairstyle.id,
        }
    }

    async fn completed_shave(fx: &Fixture, cents: i64, performed_at: DateTime<Utc>) -> String {
        fx.db
            .bookkeeper()
            .create_shave(NewShave {
                salon_id: fx.salon.id.clone(),
                barber_id: fx.barber.id.clone(),
                hairstyle_id: fx.hairstyle_id.clone(),
                client_id: None,
                cash_register_id: fx.register.id.clone(),
                amount: Money::from_cents(cents),
                currency_id: fx.usd.id.clone(),
                exchange_rate: ExchangeRate::ONE,
                status: ShaveStatus::Completed,
                performed_at,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_commission_selects_rule_per_shave() {
        let fx = fixture().await;
        let barbers = fx.db.barbers();

        // 10% from January, 15% + 5.00 from June
        barbers
            .add_commission_rule(&fx.barber.id, 1000, Money::zero(), ts(2024, 1, 1))
            .await
            .unwrap();
        barbers
            .add_commission_rule(&fx.barber.id, 1500, Money::from_cents(500), ts(2024, 6, 1))
            .await
            .unwrap();

        completed_shave(&fx, 10000, ts(2024, 3, 1)).await;
        completed_shave(&fx, 10000, ts(2024, 7, 1)).await;

        let reports = fx.db.reports();
        let earned = reports
            .commission(&fx.barber.id, &DateRange::UNBOUNDED)
            .await
            .unwrap();
        assert_eq!(earned, Decimal::new(3000, 2));

        // Windowed to March, only the first rule's shave counts
        let march = DateRange::month(2024, 3).unwrap();
        let earned = reports.commission(&fx.barber.id, &march).await.unwrap();
        assert_eq!(earned, Decimal::new(1000, 2));

        // With no payments the balance is the rounded commission
        let owed = reports
            .barber_balance(&fx.barber.id, &DateRange::UNBOUNDED)
            .await
            .unwrap();
        assert_eq!(owed, Money::from_cents(3000));
    }

    #[tokio::test]
    async fn test_barber_balance_nets_windowed_payments() {
        let fx = fixture().await;
        fx.db
            .barbers()
            .add_commission_rule(&fx.barber.id, 1000, Money::zero(), ts(2024, 1, 1))
            .await
            .unwrap();
        completed_shave(&fx, 10000, ts(2024, 6, 10)).await;

        fx.db
            .bookkeeper()
            .create_payment(NewPayment {
                salon_id: fx.salon.id.clone(),
                barber_id: fx.barber.id.clone(),
                cash_register_id: fx.register.id.clone(),
                amount: Money::from_cents(400),
                currency_id: fx.usd.id.clone(),
                exchange_rate: ExchangeRate::ONE,
                period_start: date(2024, 6, 1),
                period_end: date(2024, 6, 30),
                paid_on: date(2024, 7, 2),
            })
            .await
            .unwrap();

        let reports = fx.db.reports();
        let owed = reports
            .barber_balance(&fx.barber.id, &DateRange::UNBOUNDED)
            .await
            .unwrap();
        assert_eq!(owed, Money::from_cents(600));

        // A June-only window sees the commission but not the July payment
        let june = DateRange::month(2024, 6).unwrap();
        let owed = reports.barber_balance(&fx.barber.id, &june).await.unwrap();
        assert_eq!(owed, Money::from_cents(1000));
    }

    #[tokio::test]
    async fn test_commission_unknown_barber_is_not_found() {
        let fx = fixture().await;
        let err = fx
            .db
            .reports()
            .commission("no-such-barber", &DateRange::UNBOUNDED)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Db(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_financial_summary_composes_the_window() {
        let fx = fixture().await;
        let bookkeeper = fx.db.bookkeeper();

        let shave_id = completed_shave(&fx, 5000, ts(2024, 6, 15)).await;

        bookkeeper
            .create_payment(NewPayment {
                salon_id: fx.salon.id.clone(),
                barber_id: fx.barber.id.clone(),
                cash_register_id: fx.register.id.clone(),
                amount: Money::from_cents(2000),
                currency_id: fx.usd.id.clone(),
                exchange_rate: ExchangeRate::ONE,
                period_start: date(2024, 6, 1),
                period_end: date(2024, 6, 30),
                paid_on: date(2024, 6, 20),
            })
            .await
            .unwrap();

        bookkeeper
            .create_transaction(NewTransaction {
                salon_id: fx.salon.id.clone(),
                cash_register_id: fx.register.id.clone(),
                name: "Razor oil".to_string(),
                amount: Money::from_cents(500),
                currency_id: fx.usd.id.clone(),
                exchange_rate: ExchangeRate::ONE,
                kind: TransactionKind::Expense,
                occurred_on: date(2024, 6, 18),
            })
            .await
            .unwrap();

        let foam = bookkeeper
            .create_item(NewItem {
                salon_id: fx.salon.id.clone(),
                name: "Shave Foam".to_string(),
                price: Money::from_cents(800),
                currency_id: fx.usd.id.clone(),
                exchange_rate: ExchangeRate::ONE,
            })
            .await
            .unwrap();
        bookkeeper
            .record_item_purchase(NewItemPurchase {
                salon_id: fx.salon.id.clone(),
                item_id: foam.id.clone(),
                cash_register_id: fx.register.id.clone(),
                quantity: 5,
                unit_price: Money::from_cents(200),
                currency_id: fx.usd.id.clone(),
                exchange_rate: ExchangeRate::ONE,
                supplier: None,
                purchased_on: date(2024, 6, 10),
            })
            .await
            .unwrap();
        bookkeeper
            .record_item_use(NewItemUsed {
                salon_id: fx.salon.id.clone(),
                item_id: foam.id.clone(),
                shave_id,
                barber_id: fx.barber.id.clone(),
                quantity: 2,
                note: None,
                used_on: date(2024, 6, 15),
            })
            .await
            .unwrap();

        let june = DateRange::month(2024, 6).unwrap();
        let summary = fx
            .db
            .reports()
            .financial_summary(&fx.salon.id, &june)
            .await
            .unwrap();

        // 50.00 − 20.00 − 5.00 − 2×2.00 = 21.00; stock 3 × price 8.00
        assert_eq!(summary.total_revenue, Money::from_cents(5000));
        assert_eq!(summary.total_profit, Money::from_cents(2100));
        assert_eq!(summary.total_shaves, 1);
        assert_eq!(summary.stock_value, Money::from_cents(2400));

        // The unbounded window sees the same records
        let all_time = fx
            .db
            .reports()
            .financial_summary(&fx.salon.id, &DateRange::UNBOUNDED)
            .await
            .unwrap();
        assert_eq!(all_time, summary);

        // A window before any record is empty
        let may = DateRange::month(2024, 5).unwrap();
        let empty = fx
            .db
            .reports()
            .financial_summary(&fx.salon.id, &may)
            .await
            .unwrap();
        assert_eq!(empty.total_revenue, Money::zero());
        assert_eq!(empty.total_shaves, 0);
        // Stock valuation ignores the window
        assert_eq!(empty.stock_value, Money::from_cents(2400));
    }

    #[tokio::test]
    async fn test_monthly_stats_rejects_bad_month() {
        let fx = fixture().await;
        let err = fx
            .db
            .reports()
            .monthly_shave_stats(&fx.salon.id, 2024, 13)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[tokio::test]
    async fn test_inventory_overview() {
        let fx = fixture().await;
        let bookkeeper = fx.db.bookkeeper();

        let foam = bookkeeper
            .create_item(NewItem {
                salon_id: fx.salon.id.clone(),
                name: "Shave Foam".to_string(),
                price: Money::from_cents(800),
                currency_id: fx.usd.id.clone(),
                exchange_rate: ExchangeRate::ONE,
            })
            .await
            .unwrap();
        let towels = bookkeeper
            .create_item(NewItem {
                salon_id: fx.salon.id.clone(),
                name: "Towels".to_string(),
                price: Money::from_cents(1200),
                currency_id: fx.usd.id.clone(),
                exchange_rate: ExchangeRate::ONE,
            })
            .await
            .unwrap();
        bookkeeper
            .record_item_purchase(NewItemPurchase {
                salon_id: fx.salon.id.clone(),
                item_id: foam.id.clone(),
                cash_register_id: fx.register.id.clone(),
                quantity: 20,
                unit_price: Money::from_cents(200),
                currency_id: fx.usd.id.clone(),
                exchange_rate: ExchangeRate::ONE,
                supplier: Some("SupplyCo".to_string()),
                purchased_on: date(2024, 6, 1),
            })
            .await
            .unwrap();

        let reports = fx.db.reports();

        // 20 units valued at the item price of 8.00, not the purchase price
        let level = reports.stock_level(&fx.salon.id).await.unwrap();
        assert_eq!(level.total_items, 20);
        assert_eq!(level.total_value, Money::from_cents(16000));

        let low = reports.low_stock_items(&fx.salon.id, None).await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].id, towels.id);

        // An explicit threshold widens the net
        let low = reports
            .low_stock_items(&fx.salon.id, Some(25))
            .await
            .unwrap();
        assert_eq!(low.len(), 2);
        assert_eq!(low[0].id, towels.id); // emptiest first

        let usage = reports.item_usage(&fx.salon.id).await.unwrap();
        assert_eq!(usage.len(), 2);
        let foam_row = usage.iter().find(|row| row.item_id == foam.id).unwrap();
        assert_eq!(foam_row.purchased_quantity, 20);
        assert_eq!(foam_row.used_quantity, 0);
        assert_eq!(foam_row.remaining, 20);
        assert_eq!(foam_row.purchased_total, Money::from_cents(4000));
        assert_eq!(foam_row.average_unit_cost, Some(Decimal::new(200, 2)));
        let towel_row = usage.iter().find(|row| row.item_id == towels.id).unwrap();
        assert!(towel_row.average_unit_cost.is_none());
    }
}
