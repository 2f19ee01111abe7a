//! # Validation Module
//!
//! Input validation for every financial mutation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Field checks (this module, ValidationError)                   │
//! │  ├── Required strings, lengths, positive amounts, valid rates           │
//! │  └── Pure, per-field, no entity context needed                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cross-entity checks (this module, CoreError)                  │
//! │  ├── Every referenced entity belongs to the record's salon              │
//! │  ├── Item uses only on COMPLETED shaves                                 │
//! │  └── Stock covers the requested quantity                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── NOT NULL, CHECK, UNIQUE constraints                                │
//! │  └── Foreign key constraints                                            │
//! │                                                                         │
//! │  A failed check at any layer leaves no state behind.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use trimbook_core::money::Money;
//! use trimbook_core::validation::{validate_positive_amount, validate_quantity};
//!
//! // Validate a payment amount before the bookkeeper touches the ledger
//! validate_positive_amount(Money::from_cents(2000)).unwrap();
//!
//! // Validate a use quantity before stock is decremented
//! validate_quantity(3).unwrap();
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{ExchangeRate, Money};
use crate::types::{
    Barber, CashRegister, Client, Hairstyle, HasSalon, Item, NewItem, NewItemPurchase, NewItemUsed,
    NewPayment, NewShave, NewTransaction, Shave,
};
use crate::MAX_QUANTITY;
use chrono::NaiveDate;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (salon, barber, hairstyle, item, register,
/// transaction).
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
///
/// ## Example
/// ```rust
/// use trimbook_core::validation::validate_name;
///
/// assert!(validate_name("Front Desk").is_ok());
/// assert!(validate_name("").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a currency code.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 10 characters
/// - Should contain only letters and digits
///
/// ## Example
/// ```rust
/// use trimbook_core::validation::validate_currency_code;
///
/// assert!(validate_currency_code("USD").is_ok());
/// assert!(validate_currency_code("").is_err());
/// assert!(validate_currency_code("US$").is_err());
/// ```
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 10 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 10,
        });
    }

    if !code.chars().all(|c| c.is_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters and digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an amount that may be zero (shave amounts, item prices).
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (complimentary shave, unpriced item)
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates an amount that must be strictly positive (payments,
/// transactions, purchase unit prices).
///
/// ## Rules
/// - Must be positive (> 0)
/// - Zero would record an event with no financial effect
pub fn validate_positive_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates an item price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (unpriced items)
///
/// ## Example
/// ```rust
/// use trimbook_core::money::Money;
/// use trimbook_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a hairstyle tariff.
///
/// Same rule as [`validate_price`]: non-negative, zero allowed (a free
/// promotional style is a valid listing).
pub fn validate_tariff(tariff: Money) -> ValidationResult<()> {
    if tariff.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "tariff".to_string(),
        });
    }

    Ok(())
}

/// Validates an exchange rate.
///
/// ## Rules
/// - Must be strictly positive; a zero rate would silently zero every
///   normalized amount derived from it
pub fn validate_exchange_rate(rate: ExchangeRate) -> ValidationResult<()> {
    if !rate.is_valid() {
        return Err(ValidationError::MustBePositive {
            field: "exchange rate".to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity (purchase or use).
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_QUANTITY (9 999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Record Item Use                                                        │
/// │                                                                         │
/// │  Caller supplies quantity: 3                                            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(3) ← THIS FUNCTION                                   │
/// │       │                                                                 │
/// │       ├── qty <= 0?     → Error: "quantity must be positive"            │
/// │       │                                                                 │
/// │       ├── qty > 9 999?  → Error: out of range (typo-scale entry)        │
/// │       │                                                                 │
/// │       └── OK → stock check → stock decrement                            │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a commission percentage in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
/// - Most barbers sit between 2000 and 6000 (20% to 60%)
pub fn validate_percent_bps(bps: i64) -> ValidationResult<()> {
    if !(0..=10_000).contains(&bps) {
        return Err(ValidationError::OutOfRange {
            field: "percentage".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

/// Validates the fixed per-shave part of a commission rule.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (percentage-only rules)
pub fn validate_fixed_amount(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "fixed amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Period Validators
// =============================================================================

/// Validates that a date period does not end before it starts.
///
/// Both bounds inclusive; a single-day period (start == end) is fine.
pub fn validate_period(field: &str, start: NaiveDate, end: NaiveDate) -> ValidationResult<()> {
    if start > end {
        return Err(ValidationError::InvalidPeriod {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a barber's employment window.
///
/// ## Rules
/// - `ended_on`, when present, must not precede `started_on`
pub fn validate_employment(started_on: NaiveDate, ended_on: Option<NaiveDate>) -> ValidationResult<()> {
    if let Some(ended) = ended_on {
        validate_period("employment", started_on, ended)?;
    }

    Ok(())
}

// =============================================================================
// Salon Scope Validators
// =============================================================================

/// Checks that an entity belongs to the given salon.
///
/// Every cross-entity reference on a financial record goes through this
/// check before the record is persisted. `label` and `entity_id` feed the
/// error message.
pub fn validate_in_salon<T: HasSalon>(
    entity: &T,
    label: &'static str,
    entity_id: &str,
    salon_id: &str,
) -> CoreResult<()> {
    if !entity.belongs_to(salon_id) {
        return Err(CoreError::SalonMismatch {
            entity: label,
            entity_id: entity_id.to_string(),
            salon_id: salon_id.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a shave before it is persisted.
///
/// ## Checks
/// - amount non-negative, exchange rate positive
/// - barber, hairstyle, register, and client (when present) belong to the
///   shave's salon
pub fn validate_new_shave(
    shave: &NewShave,
    barber: &Barber,
    hairstyle: &Hairstyle,
    register: &CashRegister,
    client: Option<&Client>,
) -> CoreResult<()> {
    validate_amount(shave.amount)?;
    validate_exchange_rate(shave.exchange_rate)?;

    validate_in_salon(barber, "barber", &barber.id, &shave.salon_id)?;
    validate_in_salon(hairstyle, "hairstyle", &hairstyle.id, &shave.salon_id)?;
    validate_in_salon(register, "cash register", &register.id, &shave.salon_id)?;
    if let Some(client) = client {
        validate_in_salon(client, "client", &client.id, &shave.salon_id)?;
    }

    Ok(())
}

/// Validates a barber payment before it is persisted.
///
/// ## Checks
/// - amount strictly positive, exchange rate positive
/// - period_start <= period_end
/// - barber and register belong to the payment's salon
pub fn validate_new_payment(
    payment: &NewPayment,
    barber: &Barber,
    register: &CashRegister,
) -> CoreResult<()> {
    validate_positive_amount(payment.amount)?;
    validate_exchange_rate(payment.exchange_rate)?;
    validate_period("payment period", payment.period_start, payment.period_end)?;

    validate_in_salon(barber, "barber", &barber.id, &payment.salon_id)?;
    validate_in_salon(register, "cash register", &register.id, &payment.salon_id)?;

    Ok(())
}

/// Validates a transaction before it is persisted.
pub fn validate_new_transaction(
    transaction: &NewTransaction,
    register: &CashRegister,
) -> CoreResult<()> {
    validate_name(&transaction.name)?;
    validate_positive_amount(transaction.amount)?;
    validate_exchange_rate(transaction.exchange_rate)?;

    validate_in_salon(
        register,
        "cash register",
        &register.id,
        &transaction.salon_id,
    )?;

    Ok(())
}

/// Validates an item before it is persisted.
///
/// ## Checks
/// - name present and within length
/// - price non-negative (zero allowed), exchange rate positive
pub fn validate_new_item(item: &NewItem) -> CoreResult<()> {
    validate_name(&item.name)?;
    validate_price(item.price)?;
    validate_exchange_rate(item.exchange_rate)?;

    Ok(())
}

/// Validates an item purchase before it is persisted.
///
/// ## Checks
/// - quantity positive and within range, unit price strictly positive,
///   exchange rate positive
/// - item and register belong to the purchase's salon
pub fn validate_new_item_purchase(
    purchase: &NewItemPurchase,
    item: &Item,
    register: &CashRegister,
) -> CoreResult<()> {
    validate_quantity(purchase.quantity)?;
    validate_positive_amount(purchase.unit_price)?;
    validate_exchange_rate(purchase.exchange_rate)?;

    validate_in_salon(item, "item", &item.id, &purchase.salon_id)?;
    validate_in_salon(register, "cash register", &register.id, &purchase.salon_id)?;

    Ok(())
}

/// Validates an item use before stock is decremented.
///
/// ## Checks
/// - quantity positive and within range
/// - item, shave, and barber belong to the use's salon
/// - the shave is COMPLETED
/// - stock on hand covers the quantity
///
/// ## Ordering
/// The stock check runs LAST so a caller fixing errors one at a time never
/// sees the stock message for a record that would be rejected anyway.
pub fn validate_new_item_use(
    used: &NewItemUsed,
    item: &Item,
    shave: &Shave,
    barber: &Barber,
) -> CoreResult<()> {
    validate_quantity(used.quantity)?;

    validate_in_salon(item, "item", &item.id, &used.salon_id)?;
    validate_in_salon(shave, "shave", &shave.id, &used.salon_id)?;
    validate_in_salon(barber, "barber", &barber.id, &used.salon_id)?;

    if !shave.status.is_completed() {
        return Err(CoreError::ShaveNotCompleted {
            shave_id: shave.id.clone(),
            status: shave.status.as_str().to_string(),
        });
    }

    if !item.has_stock(used.quantity) {
        return Err(CoreError::InsufficientStock {
            item: item.name.clone(),
            available: item.current_stock,
            requested: used.quantity,
        });
    }

    Ok(())
}

/// Validates a commission rule before it is persisted.
pub fn validate_commission_rule(percent_bps: i64, fixed: Money) -> ValidationResult<()> {
    validate_percent_bps(percent_bps)?;
    validate_fixed_amount(fixed)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShaveStatus;
    use chrono::Utc;

    fn barber(id: &str, salon_id: &str) -> Barber {
        Barber {
            id: id.to_string(),
            salon_id: salon_id.to_string(),
            full_name: "Tom".to_string(),
            phone: None,
            address: None,
            started_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ended_on: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn register(id: &str, salon_id: &str) -> CashRegister {
        CashRegister {
            id: id.to_string(),
            salon_id: salon_id.to_string(),
            name: "Front Desk".to_string(),
            currency_id: "c-1".to_string(),
            balance_profit_cents: 0,
            balance_cash_cents: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn hairstyle(id: &str, salon_id: &str) -> Hairstyle {
        Hairstyle {
            id: id.to_string(),
            salon_id: salon_id.to_string(),
            name: "Classic Cut".to_string(),
            tariff_cents: 5000,
            currency_id: "c-1".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn item(id: &str, salon_id: &str, stock: i64) -> Item {
        Item {
            id: id.to_string(),
            salon_id: salon_id.to_string(),
            name: "Shaving Foam".to_string(),
            price_cents: 500,
            currency_id: "c-1".to_string(),
            exchange_rate_micros: 1_000_000,
            price_default_cents: 500,
            current_stock: stock,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn shave(id: &str, salon_id: &str, status: ShaveStatus) -> Shave {
        Shave {
            id: id.to_string(),
            salon_id: salon_id.to_string(),
            barber_id: "b-1".to_string(),
            hairstyle_id: "h-1".to_string(),
            client_id: None,
            cash_register_id: "r-1".to_string(),
            amount_cents: 5000,
            currency_id: "c-1".to_string(),
            exchange_rate_micros: 1_000_000,
            amount_default_cents: 5000,
            status,
            performed_at: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn new_shave(salon_id: &str) -> NewShave {
        NewShave {
            salon_id: salon_id.to_string(),
            barber_id: "b-1".to_string(),
            hairstyle_id: "h-1".to_string(),
            client_id: None,
            cash_register_id: "r-1".to_string(),
            amount: Money::from_cents(5000),
            currency_id: "c-1".to_string(),
            exchange_rate: ExchangeRate::ONE,
            status: ShaveStatus::Completed,
            performed_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Front Desk").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_currency_code() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("usd").is_ok());
        assert!(validate_currency_code("").is_err());
        assert!(validate_currency_code("US$").is_err());
        assert!(validate_currency_code("TOOLONGCODE").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(Money::from_cents(0)).is_ok());
        assert!(validate_amount(Money::from_cents(1099)).is_ok());
        assert!(validate_amount(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_positive_amount() {
        assert!(validate_positive_amount(Money::from_cents(1)).is_ok());
        assert!(validate_positive_amount(Money::from_cents(0)).is_err());
        assert!(validate_positive_amount(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_exchange_rate() {
        assert!(validate_exchange_rate(ExchangeRate::ONE).is_ok());
        assert!(validate_exchange_rate(ExchangeRate::from_micros(0)).is_err());
        assert!(validate_exchange_rate(ExchangeRate::from_micros(-1)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(9_999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(10_000).is_err());
    }

    #[test]
    fn test_validate_percent_bps() {
        assert!(validate_percent_bps(0).is_ok());
        assert!(validate_percent_bps(4500).is_ok());
        assert!(validate_percent_bps(10_000).is_ok());
        assert!(validate_percent_bps(10_001).is_err());
        assert!(validate_percent_bps(-1).is_err());
    }

    #[test]
    fn test_validate_period() {
        let march_1 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let march_31 = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();

        assert!(validate_period("period", march_1, march_31).is_ok());
        assert!(validate_period("period", march_1, march_1).is_ok());
        assert!(validate_period("period", march_31, march_1).is_err());
    }

    #[test]
    fn test_validate_employment() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(validate_employment(start, None).is_ok());
        assert!(validate_employment(start, NaiveDate::from_ymd_opt(2024, 6, 1)).is_ok());
        assert!(validate_employment(start, NaiveDate::from_ymd_opt(2023, 6, 1)).is_err());
    }

    #[test]
    fn test_validate_new_shave_same_salon() {
        let shave = new_shave("s-1");
        assert!(validate_new_shave(
            &shave,
            &barber("b-1", "s-1"),
            &hairstyle("h-1", "s-1"),
            &register("r-1", "s-1"),
            None,
        )
        .is_ok());
    }

    #[test]
    fn test_validate_new_shave_rejects_foreign_barber() {
        let shave = new_shave("s-1");
        let err = validate_new_shave(
            &shave,
            &barber("b-9", "s-2"),
            &hairstyle("h-1", "s-1"),
            &register("r-1", "s-1"),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::SalonMismatch { entity: "barber", .. }));
    }

    #[test]
    fn test_validate_new_shave_allows_zero_amount() {
        let mut shave = new_shave("s-1");
        shave.amount = Money::zero();
        assert!(validate_new_shave(
            &shave,
            &barber("b-1", "s-1"),
            &hairstyle("h-1", "s-1"),
            &register("r-1", "s-1"),
            None,
        )
        .is_ok());
    }

    #[test]
    fn test_validate_new_payment_rejects_backwards_period() {
        let payment = NewPayment {
            salon_id: "s-1".to_string(),
            barber_id: "b-1".to_string(),
            cash_register_id: "r-1".to_string(),
            amount: Money::from_cents(2000),
            currency_id: "c-1".to_string(),
            exchange_rate: ExchangeRate::ONE,
            period_start: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            paid_on: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        };
        let err = validate_new_payment(&payment, &barber("b-1", "s-1"), &register("r-1", "s-1"))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_validate_new_item_use() {
        let used = NewItemUsed {
            salon_id: "s-1".to_string(),
            item_id: "i-1".to_string(),
            shave_id: "sh-1".to_string(),
            barber_id: "b-1".to_string(),
            quantity: 2,
            note: None,
            used_on: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        };

        // Happy path
        assert!(validate_new_item_use(
            &used,
            &item("i-1", "s-1", 5),
            &shave("sh-1", "s-1", ShaveStatus::Completed),
            &barber("b-1", "s-1"),
        )
        .is_ok());

        // Shave not completed
        let err = validate_new_item_use(
            &used,
            &item("i-1", "s-1", 5),
            &shave("sh-1", "s-1", ShaveStatus::InProgress),
            &barber("b-1", "s-1"),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::ShaveNotCompleted { .. }));

        // Not enough stock
        let err = validate_new_item_use(
            &used,
            &item("i-1", "s-1", 1),
            &shave("sh-1", "s-1", ShaveStatus::Completed),
            &barber("b-1", "s-1"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 1,
                requested: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_commission_rule() {
        assert!(validate_commission_rule(4500, Money::from_cents(500)).is_ok());
        assert!(validate_commission_rule(4500, Money::zero()).is_ok());
        assert!(validate_commission_rule(10_001, Money::zero()).is_err());
        assert!(validate_commission_rule(4500, Money::from_cents(-1)).is_err());
    }
}
