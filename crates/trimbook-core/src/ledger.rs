//! # Balance Ledger Math
//!
//! Pure balance computation for a cash register. The database layer gathers
//! the raw totals; this module turns them into the two derived balances.
//!
//! ## The Two Balances
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  income        = completed shaves + INCOME transactions                 │
//! │                                                                         │
//! │  PROFIT side                        CASH side                           │
//! │  ───────────                        ─────────                           │
//! │  payments                           payments                            │
//! │  EXPENSE transactions               EXPENSE transactions                │
//! │  cost of items used  ◄─not cash     item purchases  ◄─cash, not profit  │
//! │                                                                         │
//! │  balance_profit = income − profit side                                  │
//! │  balance_cash   = income − cash side                                    │
//! │                                                                         │
//! │  A purchase moves cash out the drawer but is not a loss: the loss       │
//! │  materializes as items are consumed, at average purchase cost.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Average Cost
//! An item's unit cost is `Σ normalized purchase totals / Σ purchased
//! quantity` across ALL of its purchases, salon-wide, independent of which
//! register paid. An item never purchased costs zero to use.

use rust_decimal::Decimal;

use crate::error::CoreResult;
use crate::money::Money;

// =============================================================================
// Register Totals
// =============================================================================

/// Raw aggregates for one cash register, gathered by the storage layer.
///
/// All integer fields are default-currency cents summed over the register's
/// rows; `items_used_cost` stays an exact decimal because average unit
/// costs are fractional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterTotals {
    /// Σ normalized amounts of COMPLETED shaves.
    pub shave_income_cents: i64,

    /// Σ normalized amounts of INCOME transactions.
    pub income_tx_cents: i64,

    /// Σ normalized payment amounts.
    pub payment_cents: i64,

    /// Σ normalized amounts of EXPENSE transactions.
    pub expense_tx_cents: i64,

    /// Σ normalized purchase totals.
    pub purchase_cents: i64,

    /// Σ cost of items consumed by this register's completed shaves.
    pub items_used_cost: Decimal,
}

/// The two derived balances of a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterBalances {
    pub profit: Money,
    pub cash: Money,
}

impl RegisterTotals {
    /// Total income: completed shaves plus INCOME transactions.
    #[inline]
    pub fn income(&self) -> Money {
        Money::from_cents(self.shave_income_cents + self.income_tx_cents)
    }

    /// `income − (payments + expense transactions + items-used cost)`,
    /// rounded half-up to cents.
    ///
    /// The rounding only ever bites on the items-used cost; every other
    /// contributor is already integer cents.
    pub fn balance_profit(&self) -> CoreResult<Money> {
        let expense = Money::from_cents(self.payment_cents + self.expense_tx_cents).to_decimal()
            + self.items_used_cost;
        Money::try_from_decimal(self.income().to_decimal() - expense)
    }

    /// `income − (payments + expense transactions + purchases)`.
    /// Integer cents throughout; exact.
    #[inline]
    pub fn balance_cash(&self) -> Money {
        self.income()
            - Money::from_cents(self.payment_cents + self.expense_tx_cents + self.purchase_cents)
    }

    /// Both balances at once.
    pub fn balances(&self) -> CoreResult<RegisterBalances> {
        Ok(RegisterBalances {
            profit: self.balance_profit()?,
            cash: self.balance_cash(),
        })
    }
}

// =============================================================================
// Average Cost
// =============================================================================

/// Per-item usage figures needed to derive cost of goods used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemUsage {
    /// Σ normalized purchase totals for the item, across all purchases.
    pub purchased_total_cents: i64,

    /// Σ purchased quantity for the item, across all purchases.
    pub purchased_quantity: i64,

    /// Σ quantity consumed in the scope being costed.
    pub used_quantity: i64,
}

/// Average default-currency unit cost of an item:
/// `Σ purchase totals / Σ purchased quantity`.
///
/// Returns `None` for an item with no purchase history; such an item is
/// free to use, not an error.
pub fn average_unit_cost(purchased_total_cents: i64, purchased_quantity: i64) -> Option<Decimal> {
    if purchased_quantity <= 0 {
        return None;
    }
    Some(Decimal::new(purchased_total_cents, 2) / Decimal::from(purchased_quantity))
}

/// Cost of consuming `used_quantity` units at the item's average cost.
pub fn usage_cost(usage: &ItemUsage) -> Decimal {
    match average_unit_cost(usage.purchased_total_cents, usage.purchased_quantity) {
        Some(average) => average * Decimal::from(usage.used_quantity),
        None => Decimal::ZERO,
    }
}

/// Total cost of goods used across a set of items.
pub fn total_usage_cost<I>(usages: I) -> Decimal
where
    I: IntoIterator<Item = ItemUsage>,
{
    usages
        .into_iter()
        .fold(Decimal::ZERO, |acc, usage| acc + usage_cost(&usage))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_sums_shaves_and_income_transactions() {
        let totals = RegisterTotals {
            shave_income_cents: 5000,
            income_tx_cents: 1500,
            ..Default::default()
        };
        assert_eq!(totals.income().cents(), 6500);
    }

    #[test]
    fn test_empty_register_balances_are_zero() {
        let balances = RegisterTotals::default().balances().unwrap();
        assert_eq!(balances.profit, Money::zero());
        assert_eq!(balances.cash, Money::zero());
    }

    #[test]
    fn test_purchase_hits_cash_not_profit() {
        // One completed shave of 50.00, one purchase of 10.00
        let totals = RegisterTotals {
            shave_income_cents: 5000,
            purchase_cents: 1000,
            ..Default::default()
        };
        let balances = totals.balances().unwrap();
        assert_eq!(balances.profit.cents(), 5000);
        assert_eq!(balances.cash.cents(), 4000);
    }

    #[test]
    fn test_payment_hits_both_balances() {
        let totals = RegisterTotals {
            shave_income_cents: 5000,
            payment_cents: 2000,
            ..Default::default()
        };
        let balances = totals.balances().unwrap();
        assert_eq!(balances.profit.cents(), 3000);
        assert_eq!(balances.cash.cents(), 3000);
    }

    #[test]
    fn test_items_used_cost_hits_profit_not_cash() {
        let totals = RegisterTotals {
            shave_income_cents: 5000,
            items_used_cost: Decimal::new(1250, 2), // 12.50
            ..Default::default()
        };
        let balances = totals.balances().unwrap();
        assert_eq!(balances.profit.cents(), 3750);
        assert_eq!(balances.cash.cents(), 5000);
    }

    #[test]
    fn test_profit_rounds_fractional_item_cost_half_up() {
        // 50.00 − 0.005 = 49.995 → 50.00 (half-up)
        let totals = RegisterTotals {
            shave_income_cents: 5000,
            items_used_cost: Decimal::new(5, 3), // 0.005
            ..Default::default()
        };
        assert_eq!(totals.balance_profit().unwrap().cents(), 5000);

        // 50.00 − 0.006 = 49.994 → 49.99
        let totals = RegisterTotals {
            shave_income_cents: 5000,
            items_used_cost: Decimal::new(6, 3),
            ..Default::default()
        };
        assert_eq!(totals.balance_profit().unwrap().cents(), 4999);
    }

    #[test]
    fn test_balances_can_go_negative() {
        let totals = RegisterTotals {
            shave_income_cents: 1000,
            payment_cents: 1500,
            purchase_cents: 500,
            ..Default::default()
        };
        let balances = totals.balances().unwrap();
        assert_eq!(balances.profit.cents(), -500);
        assert_eq!(balances.cash.cents(), -1000);
    }

    #[test]
    fn test_average_unit_cost() {
        // Two purchases: 10 units for 20.00, 5 units for 13.00
        // Average = 33.00 / 15 = 2.20
        let average = average_unit_cost(3300, 15).unwrap();
        assert_eq!(average, Decimal::new(220, 2));

        assert!(average_unit_cost(3300, 0).is_none());
        assert!(average_unit_cost(0, -1).is_none());
    }

    #[test]
    fn test_usage_cost_no_history_is_free() {
        let usage = ItemUsage {
            purchased_total_cents: 0,
            purchased_quantity: 0,
            used_quantity: 4,
        };
        assert_eq!(usage_cost(&usage), Decimal::ZERO);
    }

    #[test]
    fn test_usage_cost_fractional_average() {
        // 10.00 for 3 units → average 3.333...; using 2 costs 6.666...
        let usage = ItemUsage {
            purchased_total_cents: 1000,
            purchased_quantity: 3,
            used_quantity: 2,
        };
        let cost = usage_cost(&usage);
        // 1000/3*2 cents = 666.66... cents = 6.6666..., so compare rounded
        assert_eq!(crate::money::round2(cost), Decimal::new(667, 2));
    }

    #[test]
    fn test_total_usage_cost_accumulates() {
        let usages = vec![
            ItemUsage {
                purchased_total_cents: 2000,
                purchased_quantity: 10,
                used_quantity: 3,
            }, // 2.00 avg × 3 = 6.00
            ItemUsage {
                purchased_total_cents: 0,
                purchased_quantity: 0,
                used_quantity: 5,
            }, // free
            ItemUsage {
                purchased_total_cents: 1500,
                purchased_quantity: 5,
                used_quantity: 1,
            }, // 3.00 avg × 1 = 3.00
        ];
        assert_eq!(total_usage_cost(usages), Decimal::new(900, 2));
    }
}
