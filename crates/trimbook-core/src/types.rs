//! # Domain Types
//!
//! Core domain types used throughout Trimbook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Salon ──owns──► Currency, Barber, Client, Hairstyle, Item,             │
//! │                  CashRegister                                           │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌──────────────────┐      │
//! │  │     Shave       │   │     Payment      │   │   Transaction    │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ──────────────  │      │
//! │  │  amount_cents   │   │  amount_cents    │   │  amount_cents    │      │
//! │  │  rate (micros)  │   │  rate (micros)   │   │  rate (micros)   │      │
//! │  │  normalized     │   │  normalized      │   │  kind IN/EXP     │      │
//! │  │  status         │   │  period          │   │  occurred_on     │      │
//! │  └────────┬────────┘   └────────┬─────────┘   └────────┬─────────┘      │
//! │           └─────────────────────┴──────────────────────┘                │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │                    CashRegister (derived balances)                      │
//! │                                                                         │
//! │  Item ◄── ItemPurchase (stock +, cash −)                                │
//! │       ◄── ItemUsed     (stock −, cost of goods on profit side)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Conventions
//! - `id`: UUID v4 string, immutable, used for relations
//! - `*_cents`: integer money fields; typed access via [`Money`] accessors
//! - `exchange_rate_micros`: rate in millionths; typed via [`ExchangeRate`]
//! - `amount_default_cents`: the normalized amount, derived on save and
//!   never set by callers directly

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{ExchangeRate, Money};

// =============================================================================
// Salon Ownership Capability
// =============================================================================

/// Capability for entities scoped to a salon.
///
/// Every cross-entity check ("does this barber belong to the shave's
/// salon?") goes through this trait instead of probing attributes
/// record-by-record. Entities that reach their salon only through a parent
/// (commission rules through their barber, tariff history through its
/// hairstyle) deliberately do NOT implement it; they are validated via the
/// parent.
pub trait HasSalon {
    /// The id of the salon this entity belongs to.
    fn salon_id(&self) -> &str;

    /// Whether this entity belongs to the given salon.
    #[inline]
    fn belongs_to(&self, salon_id: &str) -> bool {
        self.salon_id() == salon_id
    }
}

// =============================================================================
// Date Range
// =============================================================================

/// An optional, inclusive date window for ledger queries.
///
/// Both bounds are timestamps; records carrying plain dates (payments,
/// transactions, purchases) compare against [`DateRange::start_day`] /
/// [`DateRange::end_day`]. An absent bound means unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive lower bound.
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound.
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// The window covering everything.
    pub const UNBOUNDED: DateRange = DateRange {
        start: None,
        end: None,
    };

    /// Creates a window from optional bounds.
    pub const fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        DateRange { start, end }
    }

    /// The window covering one calendar month, first day 00:00:00 through
    /// the last nanosecond of the last day.
    ///
    /// Returns `None` for an invalid year/month pair.
    pub fn month(year: i32, month: u32) -> Option<DateRange> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let last = next_first.pred_opt()?;

        let start = first.and_hms_opt(0, 0, 0)?.and_utc();
        let end = last.and_hms_nano_opt(23, 59, 59, 999_999_999)?.and_utc();
        Some(DateRange {
            start: Some(start),
            end: Some(end),
        })
    }

    /// Whether the timestamp falls inside the window (bounds inclusive).
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        if let Some(start) = self.start {
            if at < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if at > end {
                return false;
            }
        }
        true
    }

    /// The lower bound as a plain date, for date-typed columns.
    pub fn start_day(&self) -> Option<NaiveDate> {
        self.start.map(|s| s.date_naive())
    }

    /// The upper bound as a plain date, for date-typed columns.
    pub fn end_day(&self) -> Option<NaiveDate> {
        self.end.map(|e| e.date_naive())
    }

    /// True when neither bound is set.
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

// =============================================================================
// Salon
// =============================================================================

/// The tenant boundary. Every financial entity belongs, directly or
/// transitively, to exactly one salon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Salon {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Optional free-form description.
    pub description: Option<String>,

    /// Street address.
    pub address: Option<String>,

    /// Contact phone.
    pub phone: Option<String>,

    /// Contact email.
    pub email: Option<String>,

    /// Whether the salon is operating (soft delete).
    pub is_active: bool,

    /// When the salon was created.
    pub created_at: DateTime<Utc>,

    /// When the salon was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Currency
// =============================================================================

/// A currency known to a salon. The one flagged `is_default` is the
/// reference currency all aggregates are expressed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Currency {
    pub id: String,
    pub salon_id: String,

    /// ISO-style code, unique per salon (e.g. "USD").
    pub code: String,

    /// Display name.
    pub name: String,

    /// Whether this is the salon's reference currency.
    /// At most one currency per salon may carry this flag.
    pub is_default: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HasSalon for Currency {
    fn salon_id(&self) -> &str {
        &self.salon_id
    }
}

// =============================================================================
// People
// =============================================================================

/// A client of the salon. Optional on a shave; kept minimal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Client {
    pub id: String,
    pub salon_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HasSalon for Client {
    fn salon_id(&self) -> &str {
        &self.salon_id
    }
}

/// A barber working at a salon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Barber {
    pub id: String,
    pub salon_id: String,

    /// Display name.
    pub full_name: String,

    pub phone: Option<String>,
    pub address: Option<String>,

    /// First working day.
    pub started_on: NaiveDate,

    /// Last working day, if no longer employed. Must not precede
    /// `started_on`.
    pub ended_on: Option<NaiveDate>,

    /// Whether the barber currently works here (soft delete).
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HasSalon for Barber {
    fn salon_id(&self) -> &str {
        &self.salon_id
    }
}

// =============================================================================
// Commission Rule
// =============================================================================

/// A commission rule for a barber, effective from a given instant until
/// superseded by a later rule.
///
/// Commission for a completed shave =
/// `amount_in_default_currency × percentage / 100 + fixed_amount`,
/// using the rule with the greatest `effective_at` not after the shave.
/// A shave with no applicable rule earns zero commission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CommissionRule {
    pub id: String,
    pub barber_id: String,

    /// Percentage in basis points (1050 = 10.50%).
    pub percent_bps: i64,

    /// Fixed amount per shave, in default-currency cents.
    pub fixed_cents: i64,

    /// When this rule takes effect.
    pub effective_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommissionRule {
    /// Returns the fixed per-shave amount as Money.
    #[inline]
    pub fn fixed_amount(&self) -> Money {
        Money::from_cents(self.fixed_cents)
    }
}

// =============================================================================
// Cash Register
// =============================================================================

/// A cash register of a salon.
///
/// ## Derived Balances
/// `balance_profit_cents` and `balance_cash_cents` are OUTPUTS of the
/// balance ledger, recomputed from the full set of related financial
/// events. Nothing else may write them; setting them directly would be
/// overwritten by the next recompute anyway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CashRegister {
    pub id: String,
    pub salon_id: String,

    /// Display name ("Front Desk").
    pub name: String,

    /// The currency this register operates in.
    pub currency_id: String,

    /// Income minus expenses and cost-of-goods-used (derived).
    pub balance_profit_cents: i64,

    /// Income minus cash outflows: payments, expense transactions,
    /// purchases (derived).
    pub balance_cash_cents: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CashRegister {
    /// Returns the profit balance as Money.
    #[inline]
    pub fn balance_profit(&self) -> Money {
        Money::from_cents(self.balance_profit_cents)
    }

    /// Returns the cash balance as Money.
    #[inline]
    pub fn balance_cash(&self) -> Money {
        Money::from_cents(self.balance_cash_cents)
    }
}

impl HasSalon for CashRegister {
    fn salon_id(&self) -> &str {
        &self.salon_id
    }
}

// =============================================================================
// Hairstyle
// =============================================================================

/// A service offering (haircut/shave style) with its current tariff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Hairstyle {
    pub id: String,
    pub salon_id: String,
    pub name: String,

    /// Current tariff in cents of `currency_id`.
    pub tariff_cents: i64,

    pub currency_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hairstyle {
    /// Returns the current tariff as Money.
    #[inline]
    pub fn tariff(&self) -> Money {
        Money::from_cents(self.tariff_cents)
    }
}

impl HasSalon for Hairstyle {
    fn salon_id(&self) -> &str {
        &self.salon_id
    }
}

/// A historical tariff for a hairstyle, effective from `effective_at`
/// until superseded. Selection works exactly like commission rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct HairstyleTariff {
    pub id: String,
    pub hairstyle_id: String,
    pub tariff_cents: i64,
    pub effective_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HairstyleTariff {
    /// Returns the tariff as Money.
    #[inline]
    pub fn tariff(&self) -> Money {
        Money::from_cents(self.tariff_cents)
    }
}

// =============================================================================
// Shave Status
// =============================================================================

/// Lifecycle status of a shave.
///
/// Only COMPLETED shaves contribute to revenue, commission, and register
/// balances; the other statuses are financially invisible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShaveStatus {
    /// Booked, not yet started.
    Scheduled,
    /// Currently in the chair.
    InProgress,
    /// Done and paid; counts financially.
    Completed,
    /// Called off; never counts financially.
    Cancelled,
}

impl ShaveStatus {
    /// Whether this status contributes to the ledger.
    #[inline]
    pub const fn is_completed(&self) -> bool {
        matches!(self, ShaveStatus::Completed)
    }

    /// Stable uppercase name, as stored.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ShaveStatus::Scheduled => "SCHEDULED",
            ShaveStatus::InProgress => "IN_PROGRESS",
            ShaveStatus::Completed => "COMPLETED",
            ShaveStatus::Cancelled => "CANCELLED",
        }
    }
}

impl Default for ShaveStatus {
    fn default() -> Self {
        ShaveStatus::Scheduled
    }
}

// =============================================================================
// Shave
// =============================================================================

/// A service event: one barber, one hairstyle, one register.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Shave {
    pub id: String,
    pub salon_id: String,
    pub barber_id: String,
    pub hairstyle_id: String,
    pub client_id: Option<String>,
    pub cash_register_id: String,

    /// Charged amount in `currency_id` cents. Zero is allowed
    /// (complimentary shave).
    pub amount_cents: i64,

    pub currency_id: String,

    /// Rate into the salon's default currency, in millionths.
    pub exchange_rate_micros: i64,

    /// Normalized amount (derived): `round2(amount × rate)` in cents.
    pub amount_default_cents: i64,

    pub status: ShaveStatus,

    /// When the shave took place (or is booked for).
    pub performed_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shave {
    /// Returns the charged amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Returns the exchange rate.
    #[inline]
    pub fn exchange_rate(&self) -> ExchangeRate {
        ExchangeRate::from_micros(self.exchange_rate_micros)
    }

    /// Returns the normalized amount as Money.
    #[inline]
    pub fn amount_in_default_currency(&self) -> Money {
        Money::from_cents(self.amount_default_cents)
    }
}

impl HasSalon for Shave {
    fn salon_id(&self) -> &str {
        &self.salon_id
    }
}

/// Input for creating a shave. The normalized amount is derived by the
/// bookkeeper, never supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShave {
    pub salon_id: String,
    pub barber_id: String,
    pub hairstyle_id: String,
    pub client_id: Option<String>,
    pub cash_register_id: String,
    pub amount: Money,
    pub currency_id: String,
    pub exchange_rate: ExchangeRate,
    pub status: ShaveStatus,
    pub performed_at: DateTime<Utc>,
}

// =============================================================================
// Payment
// =============================================================================

/// Money paid out to a barber against earned commission.
/// Always an expense against both register balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: String,
    pub salon_id: String,
    pub barber_id: String,
    pub cash_register_id: String,

    /// Paid amount in `currency_id` cents. Strictly positive.
    pub amount_cents: i64,

    pub currency_id: String,
    pub exchange_rate_micros: i64,

    /// Normalized amount (derived).
    pub amount_default_cents: i64,

    /// First day of the commission period this payment covers.
    pub period_start: NaiveDate,

    /// Last day of the covered period. Must not precede `period_start`.
    pub period_end: NaiveDate,

    /// When the payment was handed over.
    pub paid_on: NaiveDate,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Returns the paid amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Returns the exchange rate.
    #[inline]
    pub fn exchange_rate(&self) -> ExchangeRate {
        ExchangeRate::from_micros(self.exchange_rate_micros)
    }

    /// Returns the normalized amount as Money.
    #[inline]
    pub fn amount_in_default_currency(&self) -> Money {
        Money::from_cents(self.amount_default_cents)
    }
}

impl HasSalon for Payment {
    fn salon_id(&self) -> &str {
        &self.salon_id
    }
}

/// Input for creating a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    pub salon_id: String,
    pub barber_id: String,
    pub cash_register_id: String,
    pub amount: Money,
    pub currency_id: String,
    pub exchange_rate: ExchangeRate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub paid_on: NaiveDate,
}

// =============================================================================
// Transaction
// =============================================================================

/// Whether a transaction adds to or subtracts from a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Adds to income.
    Income,
    /// Counts against both balances.
    Expense,
}

impl TransactionKind {
    /// Stable uppercase name, as stored.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "INCOME",
            TransactionKind::Expense => "EXPENSE",
        }
    }
}

/// A generic income or expense against a cash register, such as rent or a
/// counted tip jar. Anything that moves money but isn't a shave, payment,
/// or purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: String,
    pub salon_id: String,
    pub cash_register_id: String,

    /// Short description ("October rent").
    pub name: String,

    /// Amount in `currency_id` cents. Strictly positive; direction comes
    /// from `kind`.
    pub amount_cents: i64,

    pub currency_id: String,
    pub exchange_rate_micros: i64,

    /// Normalized amount (derived).
    pub amount_default_cents: i64,

    pub kind: TransactionKind,

    /// Ledger date of the event.
    pub occurred_on: NaiveDate,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Returns the exchange rate.
    #[inline]
    pub fn exchange_rate(&self) -> ExchangeRate {
        ExchangeRate::from_micros(self.exchange_rate_micros)
    }

    /// Returns the normalized amount as Money.
    #[inline]
    pub fn amount_in_default_currency(&self) -> Money {
        Money::from_cents(self.amount_default_cents)
    }
}

impl HasSalon for Transaction {
    fn salon_id(&self) -> &str {
        &self.salon_id
    }
}

/// Input for creating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub salon_id: String,
    pub cash_register_id: String,
    pub name: String,
    pub amount: Money,
    pub currency_id: String,
    pub exchange_rate: ExchangeRate,
    pub kind: TransactionKind,
    pub occurred_on: NaiveDate,
}

// =============================================================================
// Inventory
// =============================================================================

/// A consumable inventory item (foam, blades, towels).
///
/// `current_stock` is derived state: purchases raise it, uses lower it.
/// Only the bookkeeper writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Item {
    pub id: String,
    pub salon_id: String,
    pub name: String,

    /// Selling/valuation price in `currency_id` cents.
    pub price_cents: i64,

    pub currency_id: String,
    pub exchange_rate_micros: i64,

    /// Normalized price (derived).
    pub price_default_cents: i64,

    /// Units on hand (derived).
    pub current_stock: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the exchange rate.
    #[inline]
    pub fn exchange_rate(&self) -> ExchangeRate {
        ExchangeRate::from_micros(self.exchange_rate_micros)
    }

    /// Whether `quantity` units can be taken from stock.
    #[inline]
    pub const fn has_stock(&self, quantity: i64) -> bool {
        self.current_stock >= quantity
    }
}

impl HasSalon for Item {
    fn salon_id(&self) -> &str {
        &self.salon_id
    }
}

/// Input for creating an item. The normalized price is derived on save,
/// like every other normalized amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    pub salon_id: String,
    pub name: String,
    pub price: Money,
    pub currency_id: String,
    pub exchange_rate: ExchangeRate,
}

/// A stock purchase for an item.
///
/// `total_price_cents = unit_price × quantity` and
/// `amount_default_cents = round2(total_price × rate)` are derived on every
/// save. Affects the cash balance only; the profit side sees item cost
/// through usage (average cost), not through purchases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ItemPurchase {
    pub id: String,
    pub salon_id: String,
    pub item_id: String,
    pub cash_register_id: String,

    /// Units bought. Strictly positive.
    pub quantity: i64,

    /// Price per unit in `currency_id` cents. Strictly positive.
    pub unit_price_cents: i64,

    pub currency_id: String,
    pub exchange_rate_micros: i64,

    /// `unit_price × quantity` (derived).
    pub total_price_cents: i64,

    /// Normalized total (derived).
    pub amount_default_cents: i64,

    pub supplier: Option<String>,

    /// Ledger date of the purchase.
    pub purchased_on: NaiveDate,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItemPurchase {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the derived total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }

    /// Returns the exchange rate.
    #[inline]
    pub fn exchange_rate(&self) -> ExchangeRate {
        ExchangeRate::from_micros(self.exchange_rate_micros)
    }

    /// Returns the normalized total as Money.
    #[inline]
    pub fn amount_in_default_currency(&self) -> Money {
        Money::from_cents(self.amount_default_cents)
    }
}

impl HasSalon for ItemPurchase {
    fn salon_id(&self) -> &str {
        &self.salon_id
    }
}

/// Input for recording a purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItemPurchase {
    pub salon_id: String,
    pub item_id: String,
    pub cash_register_id: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub currency_id: String,
    pub exchange_rate: ExchangeRate,
    pub supplier: Option<String>,
    pub purchased_on: NaiveDate,
}

/// Consumption of an item during a completed shave.
///
/// Carries no money of its own; its cost is derived at recompute time as
/// the item's average historical purchase price times `quantity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ItemUsed {
    pub id: String,
    pub salon_id: String,
    pub item_id: String,
    pub shave_id: String,
    pub barber_id: String,

    /// Units consumed. Strictly positive, never more than stock on hand.
    pub quantity: i64,

    pub note: Option<String>,

    /// Ledger date of the consumption.
    pub used_on: NaiveDate,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HasSalon for ItemUsed {
    fn salon_id(&self) -> &str {
        &self.salon_id
    }
}

/// Input for recording an item use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItemUsed {
    pub salon_id: String,
    pub item_id: String,
    pub shave_id: String,
    pub barber_id: String,
    pub quantity: i64,
    pub note: Option<String>,
    pub used_on: NaiveDate,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shave_status_default() {
        assert_eq!(ShaveStatus::default(), ShaveStatus::Scheduled);
        assert!(!ShaveStatus::default().is_completed());
        assert!(ShaveStatus::Completed.is_completed());
    }

    #[test]
    fn test_status_names() {
        assert_eq!(ShaveStatus::InProgress.as_str(), "IN_PROGRESS");
        assert_eq!(ShaveStatus::Completed.as_str(), "COMPLETED");
        assert_eq!(TransactionKind::Expense.as_str(), "EXPENSE");
    }

    #[test]
    fn test_date_range_contains() {
        let range = DateRange::month(2024, 3).unwrap();
        let inside = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();
        let before = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap()
            .and_utc();
        let after = NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();

        assert!(range.contains(inside));
        assert!(!range.contains(before));
        assert!(!range.contains(after));
    }

    #[test]
    fn test_date_range_month_bounds() {
        let range = DateRange::month(2024, 12).unwrap();
        assert_eq!(range.start_day(), NaiveDate::from_ymd_opt(2024, 12, 1));
        assert_eq!(range.end_day(), NaiveDate::from_ymd_opt(2024, 12, 31));
        assert!(DateRange::month(2024, 13).is_none());
    }

    #[test]
    fn test_date_range_unbounded() {
        let range = DateRange::UNBOUNDED;
        assert!(range.is_unbounded());
        assert!(range.contains(Utc::now()));
    }

    #[test]
    fn test_has_salon() {
        let register = CashRegister {
            id: "r-1".to_string(),
            salon_id: "s-1".to_string(),
            name: "Front Desk".to_string(),
            currency_id: "c-1".to_string(),
            balance_profit_cents: 0,
            balance_cash_cents: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(register.belongs_to("s-1"));
        assert!(!register.belongs_to("s-2"));
    }

    #[test]
    fn test_item_has_stock() {
        let item = Item {
            id: "i-1".to_string(),
            salon_id: "s-1".to_string(),
            name: "Foam".to_string(),
            price_cents: 500,
            currency_id: "c-1".to_string(),
            exchange_rate_micros: 1_000_000,
            price_default_cents: 500,
            current_stock: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(item.has_stock(3));
        assert!(!item.has_stock(4));
    }
}
