//! Property-based tests for balance invariants.

use famwallet_shared::types::{Currency, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{Funds, FundsError};

/// Strategy to generate non-negative amounts (0.00 to 10,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate strictly negative amounts.
fn negative_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

#[derive(Debug, Clone)]
enum Op {
    Add(Decimal),
    Withdraw(Decimal),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        amount().prop_map(Op::Add),
        amount().prop_map(Op::Withdraw),
        negative_amount().prop_map(Op::Add),
        negative_amount().prop_map(Op::Withdraw),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The balance is never negative after any sequence of operations.
    #[test]
    fn prop_balance_never_negative(
        opening in amount(),
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let mut funds = Funds::new(Money::new(opening, Currency::Usd)).unwrap();
        for op in ops {
            let _ = match op {
                Op::Add(a) => funds.add_money(a),
                Op::Withdraw(a) => funds.withdraw(a),
            };
            prop_assert!(funds.balance() >= Decimal::ZERO);
        }
    }

    /// Negative deposits always fail and leave the balance unchanged.
    #[test]
    fn prop_negative_add_rejected(opening in amount(), bad in negative_amount()) {
        let mut funds = Funds::new(Money::new(opening, Currency::Usd)).unwrap();
        prop_assert_eq!(funds.add_money(bad), Err(FundsError::NegativeAmount(bad)));
        prop_assert_eq!(funds.balance(), opening);
    }

    /// Withdrawing more than the balance fails and leaves the balance unchanged.
    #[test]
    fn prop_overdraw_rejected(opening in amount(), extra in 1i64..1_000_000i64) {
        let mut funds = Funds::new(Money::new(opening, Currency::Usd)).unwrap();
        let requested = opening + Decimal::new(extra, 2);
        let result = funds.withdraw(requested);
        prop_assert!(
            matches!(result, Err(FundsError::InsufficientFunds { .. })),
            "expected InsufficientFunds, got {:?}",
            result
        );
        prop_assert_eq!(funds.balance(), opening);
    }

    /// Changing the currency with a non-zero balance always fails.
    #[test]
    fn prop_currency_change_requires_zero_balance(cents in 1i64..1_000_000i64) {
        let mut funds = Funds::new(Money::new(Decimal::new(cents, 2), Currency::Usd)).unwrap();
        let result = funds.change_currency(Currency::Eur);
        prop_assert!(
            matches!(result, Err(FundsError::NonZeroBalance { .. })),
            "expected NonZeroBalance, got {:?}",
            result
        );
        prop_assert_eq!(funds.currency(), Currency::Usd);
    }
}
