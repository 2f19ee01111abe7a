//! # Money Module
//!
//! Provides the `Money` and `ExchangeRate` types for handling monetary
//! values safely, plus the normalization math that expresses any amount in
//! a salon's default currency.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In a ledger that recomputes balances from scratch, a drifting cent     │
//! │  reappears on EVERY recompute.                                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Exact Decimals                           │
//! │    Storage holds integer cents (i64) and integer rate millionths.       │
//! │    Every multiplication goes through rust_decimal, then rounds          │
//! │    half-up to cents at a single, documented point.                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use trimbook_core::money::{ExchangeRate, Money};
//!
//! // Create from cents (preferred)
//! let amount = Money::from_cents(5000); // 50.00
//!
//! // Normalize into the default currency at a 1.25 rate
//! let rate = ExchangeRate::from_micros(1_250_000);
//! let normalized = amount.convert(rate).unwrap();
//! assert_eq!(normalized.cents(), 6250); // 62.50
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::error::{CoreError, CoreResult};

/// Rounds a decimal to 2 places, half-up (midpoint away from zero).
///
/// This is THE rounding rule of the ledger. It is applied when a normalized
/// amount is derived, and independently to each side of a barber balance
/// (commission side and payment side) before subtraction.
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: balances go negative when expenses outrun income
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Shave.amount ──convert(rate)──► amount_in_default_currency             │
/// │                                        │                                │
/// │  Payment.amount ─────┐                 ▼                                │
/// │  Transaction.amount ─┴──► Balance Ledger ──► CashRegister balances      │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use trimbook_core::money::Money;
    ///
    /// let amount = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(amount.cents(), 1099);
    /// ```
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The database, calculations, and reports all use cents. Only display
    /// formatting converts to major units.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use trimbook_core::money::Money;
    ///
    /// let amount = Money::from_major_minor(10, 99); // 10.99
    /// assert_eq!(amount.cents(), 1099);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -5.50
    /// assert_eq!(negative.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use trimbook_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert_eq!(zero.cents(), 0);
    /// assert!(zero.is_zero());
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the exact decimal value (e.g. 1099 cents → 10.99).
    ///
    /// All ledger arithmetic that multiplies or divides goes through this
    /// representation so intermediate results stay exact.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Converts a decimal amount back to cents, rounding half-up to 2 places.
    ///
    /// ## Errors
    /// Returns [`CoreError::AmountOutOfRange`] when the rounded value does
    /// not fit the signed 64-bit cents range. Amounts never silently wrap
    /// or truncate.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use trimbook_core::money::Money;
    ///
    /// let exact = Decimal::new(10005, 3); // 10.005
    /// let money = Money::try_from_decimal(exact).unwrap();
    /// assert_eq!(money.cents(), 1001); // half-up
    /// ```
    pub fn try_from_decimal(value: Decimal) -> CoreResult<Self> {
        let rounded = round2(value);
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money::from_cents)
            .ok_or_else(|| CoreError::AmountOutOfRange {
                value: value.to_string(),
            })
    }

    /// Normalizes this amount into the default currency: `amount × rate`,
    /// rounded half-up to cents.
    ///
    /// ## Example
    /// ```rust
    /// use trimbook_core::money::{ExchangeRate, Money};
    ///
    /// let amount = Money::from_cents(10000);          // 100.00
    /// let rate = ExchangeRate::from_micros(925_000);  // 0.925
    /// assert_eq!(amount.convert(rate).unwrap().cents(), 9250);
    /// ```
    ///
    /// ## Errors
    /// Returns [`CoreError::AmountOutOfRange`] if the product overflows the
    /// representable range.
    pub fn convert(&self, rate: ExchangeRate) -> CoreResult<Money> {
        let product = self
            .to_decimal()
            .checked_mul(rate.to_decimal())
            .ok_or_else(|| CoreError::AmountOutOfRange {
                value: format!("{} * {}", self.to_decimal(), rate.to_decimal()),
            })?;
        Money::try_from_decimal(product)
    }

    /// Multiplies money by a quantity.
    ///
    /// Used for purchase totals: `unit_price × quantity`, computed BEFORE
    /// the exchange rate is applied.
    ///
    /// ## Example
    /// ```rust
    /// use trimbook_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(200); // 2.00
    /// let total = unit_price.multiply_quantity(5);
    /// assert_eq!(total.cents(), 1000); // 10.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Exchange Rate Type
// =============================================================================

/// An exchange rate into the salon's default currency, stored in millionths.
///
/// ## Design Decisions
/// - **Millionths (six decimal places)**: matches the precision the rate is
///   recorded with; 1_000_000 represents 1.0
/// - **Per-record**: every monetary record carries its own rate; there is no
///   FX table and no implicit lookup
/// - **i64**: uniform with the other scaled-integer storage types
///
/// ## Example
/// ```rust
/// use trimbook_core::money::ExchangeRate;
///
/// let par = ExchangeRate::ONE;
/// assert_eq!(par.micros(), 1_000_000);
///
/// let rate = ExchangeRate::from_micros(1_250_000); // 1.25
/// assert_eq!(rate.to_string(), "1.250000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExchangeRate(i64);

impl ExchangeRate {
    /// The identity rate (1.000000) for amounts already in the default currency.
    pub const ONE: ExchangeRate = ExchangeRate(1_000_000);

    /// Creates a rate from millionths (1_000_000 = 1.0).
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        ExchangeRate(micros)
    }

    /// Returns the rate in millionths.
    #[inline]
    pub const fn micros(&self) -> i64 {
        self.0
    }

    /// Returns the exact decimal value (1_250_000 → 1.25).
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 6)
    }

    /// A rate must be strictly positive to produce a meaningful amount.
    /// Zero would silently zero every normalized value.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging; no currency symbol is attached because
/// the unit depends on the record's currency.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing an iterator of Money values.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

/// Display shows the rate with six decimal places.
impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:06}", sign, abs / 1_000_000, abs % 1_000_000)
    }
}

/// The default rate is the identity: records created without an explicit
/// rate are already expressed in the default currency.
impl Default for ExchangeRate {
    fn default() -> Self {
        ExchangeRate::ONE
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
