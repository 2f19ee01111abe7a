//! # Commission Calculator
//!
//! Pure commission math: which rule applies to a shave, what a shave earns,
//! and what a barber is still owed.
//!
//! ## Rule Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rules for one barber, ordered by effective_at:                         │
//! │                                                                         │
//! │    Rule A (10%, +0.00)      Rule B (15%, +5.00)                         │
//! │    effective 2024-01-01     effective 2024-06-01                        │
//! │         │                        │                                      │
//! │  ───────┼────────────────────────┼──────────────────────────► time      │
//! │         │                        │                                      │
//! │   shave on 2024-03-01 ──► A      shave on 2024-07-01 ──► B              │
//! │   shave on 2023-12-01 ──► none (earns zero, not an error)               │
//! │                                                                         │
//! │  Active rule at t = the rule with the greatest effective_at <= t        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Precision
//! Per-shave commission is `amount_in_default_currency × percentage / 100
//! + fixed_amount`, accumulated as an exact [`Decimal`]. Rounding happens
//! once, in [`barber_balance`], independently on the commission side and the
//! payment side before subtraction. The two-stage rounding is intentional
//! and can differ from a single final rounding by a cent.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::CoreResult;
use crate::money::{round2, Money};
use crate::types::{CommissionRule, Shave};

/// Finds the rule active at `at`: the greatest `effective_at` not after
/// `at`. Returns `None` when no rule has taken effect yet.
///
/// The slice does not need to be sorted.
pub fn active_rule(rules: &[CommissionRule], at: DateTime<Utc>) -> Option<&CommissionRule> {
    rules
        .iter()
        .filter(|rule| rule.effective_at <= at)
        .max_by_key(|rule| rule.effective_at)
}

/// Commission earned by one shave under one rule:
/// `amount × percentage / 100 + fixed_amount`, exact.
pub fn shave_commission(amount_in_default_currency: Money, rule: &CommissionRule) -> Decimal {
    // percent_bps is basis points; scale 4 turns 1050 into 0.1050
    let fraction = Decimal::new(rule.percent_bps, 4);
    amount_in_default_currency.to_decimal() * fraction + rule.fixed_amount().to_decimal()
}

/// Total commission earned by a barber over a set of shaves.
///
/// Only COMPLETED shaves earn commission; anything else in the slice is
/// skipped. A shave predating every rule contributes zero.
pub fn commission_total(shaves: &[Shave], rules: &[CommissionRule]) -> Decimal {
    shaves
        .iter()
        .filter(|shave| shave.status.is_completed())
        .fold(Decimal::ZERO, |acc, shave| {
            match active_rule(rules, shave.performed_at) {
                Some(rule) => acc + shave_commission(shave.amount_in_default_currency(), rule),
                None => acc,
            }
        })
}

/// Outstanding balance owed to a barber:
/// `round2(commission) − round2(payments)`.
///
/// Each side is rounded half-up to cents independently BEFORE the
/// subtraction. Do not refactor into one rounding of the difference; the
/// results differ in edge cases and downstream records depend on this
/// exact behavior.
pub fn barber_balance(commission: Decimal, payments_total: Money) -> CoreResult<Money> {
    let owed = round2(commission) - round2(payments_total.to_decimal());
    Money::try_from_decimal(owed)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShaveStatus;
    use chrono::NaiveDate;

    fn ts(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc()
    }

    fn rule(id: &str, percent_bps: i64, fixed_cents: i64, effective: DateTime<Utc>) -> CommissionRule {
        CommissionRule {
            id: id.to_string(),
            barber_id: "b-1".to_string(),
            percent_bps,
            fixed_cents,
            effective_at: effective,
            created_at: effective,
            updated_at: effective,
        }
    }

    fn shave(amount_default_cents: i64, status: ShaveStatus, performed: DateTime<Utc>) -> Shave {
        Shave {
            id: "sh-1".to_string(),
            salon_id: "s-1".to_string(),
            barber_id: "b-1".to_string(),
            hairstyle_id: "h-1".to_string(),
            client_id: None,
            cash_register_id: "r-1".to_string(),
            amount_cents: amount_default_cents,
            currency_id: "c-1".to_string(),
            exchange_rate_micros: 1_000_000,
            amount_default_cents,
            status,
            performed_at: performed,
            created_at: performed,
            updated_at: performed,
        }
    }

    #[test]
    fn test_active_rule_picks_latest_effective() {
        let rules = vec![
            rule("a", 1000, 0, ts(2024, 1, 1)),
            rule("b", 1500, 500, ts(2024, 6, 1)),
        ];

        assert_eq!(active_rule(&rules, ts(2024, 3, 1)).unwrap().id, "a");
        assert_eq!(active_rule(&rules, ts(2024, 7, 1)).unwrap().id, "b");
        assert!(active_rule(&rules, ts(2023, 12, 1)).is_none());
    }

    #[test]
    fn test_rule_active_on_its_effective_instant() {
        let effective = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        let rules = vec![rule("b", 1500, 500, effective)];
        assert_eq!(active_rule(&rules, effective).unwrap().id, "b");
    }

    #[test]
    fn test_shave_commission_percentage_and_fixed() {
        // 100.00 under rule A (10%, +0) = 10.00
        let a = rule("a", 1000, 0, ts(2024, 1, 1));
        assert_eq!(
            shave_commission(Money::from_cents(10000), &a),
            Decimal::new(1000, 2)
        );

        // 100.00 under rule B (15%, +5.00) = 20.00
        let b = rule("b", 1500, 500, ts(2024, 6, 1));
        assert_eq!(
            shave_commission(Money::from_cents(10000), &b),
            Decimal::new(2000, 2)
        );
    }

    #[test]
    fn test_commission_total_selects_rule_per_shave() {
        let rules = vec![
            rule("a", 1000, 0, ts(2024, 1, 1)),
            rule("b", 1500, 500, ts(2024, 6, 1)),
        ];
        let shaves = vec![
            shave(10000, ShaveStatus::Completed, ts(2024, 3, 1)), // 10.00 under A
            shave(10000, ShaveStatus::Completed, ts(2024, 7, 1)), // 20.00 under B
        ];

        assert_eq!(commission_total(&shaves, &rules), Decimal::new(3000, 2));
    }

    #[test]
    fn test_commission_total_skips_non_completed() {
        let rules = vec![rule("a", 1000, 0, ts(2024, 1, 1))];
        let shaves = vec![
            shave(10000, ShaveStatus::Completed, ts(2024, 3, 1)),
            shave(10000, ShaveStatus::Scheduled, ts(2024, 3, 2)),
            shave(10000, ShaveStatus::Cancelled, ts(2024, 3, 3)),
        ];

        assert_eq!(commission_total(&shaves, &rules), Decimal::new(1000, 2));
    }

    #[test]
    fn test_commission_total_no_rules_is_zero() {
        let shaves = vec![shave(10000, ShaveStatus::Completed, ts(2024, 3, 1))];
        assert_eq!(commission_total(&shaves, &[]), Decimal::ZERO);
    }

    #[test]
    fn test_commission_exact_fractions_accumulate() {
        // 33.33 at 12.5% = 4.166250 per shave; three shaves = 12.498750.
        // No rounding while accumulating.
        let rules = vec![rule("a", 1250, 0, ts(2024, 1, 1))];
        let shaves = vec![
            shave(3333, ShaveStatus::Completed, ts(2024, 2, 1)),
            shave(3333, ShaveStatus::Completed, ts(2024, 2, 2)),
            shave(3333, ShaveStatus::Completed, ts(2024, 2, 3)),
        ];

        assert_eq!(
            commission_total(&shaves, &rules),
            Decimal::new(12_498_750, 6)
        );
    }

    #[test]
    fn test_barber_balance_rounds_each_side() {
        // Commission 12.498750 rounds to 12.50 before the payment side
        // (exactly 10.00) is subtracted.
        let balance = barber_balance(Decimal::new(12_498_750, 6), Money::from_cents(1000)).unwrap();
        assert_eq!(balance.cents(), 250);
    }

    #[test]
    fn test_barber_balance_zero_payments_is_rounded_commission() {
        let commission = Decimal::new(10_005, 3); // 10.005
        let balance = barber_balance(commission, Money::zero()).unwrap();
        assert_eq!(balance.cents(), 1001);
    }

    #[test]
    fn test_barber_balance_can_go_negative() {
        // Paid out more than earned
        let balance = barber_balance(Decimal::new(500, 2), Money::from_cents(2000)).unwrap();
        assert_eq!(balance.cents(), -1500);
    }
}
