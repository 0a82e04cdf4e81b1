//! Property-based tests for sub-wallet creation and member checks.

use famwallet_shared::types::{Currency, FamilyId, MemberId, Money, WalletId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{SubWalletError, Wallet, WalletError};
use crate::error::{DomainError, ErrorKind};
use crate::family::FamilyMember;

const FAMILY: FamilyId = FamilyId::new(1);

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn wallet(balance: Decimal) -> Wallet {
    Wallet::new(
        WalletId::new(1),
        Money::new(balance, Currency::Usd),
        "Household",
        FAMILY,
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Creation succeeds iff the opening balance fits, and never debits the parent.
    #[test]
    fn prop_create_sub_wallet_bounded_by_parent(balance in amount(), initial in amount()) {
        let mut parent = wallet(balance);
        let result = parent.create_sub_wallet(WalletId::new(2), initial, "child");

        if initial <= balance {
            let sub = result.unwrap();
            prop_assert_eq!(sub.balance(), initial);
            prop_assert_eq!(parent.sub_wallets().len(), 1);
        } else {
            let is_exceeds = matches!(result, Err(WalletError::InitialBalanceExceedsBalance { .. }));
            prop_assert!(is_exceeds);
            prop_assert!(parent.sub_wallets().is_empty());
        }
        prop_assert_eq!(parent.balance(), balance);
    }

    /// Only members of the set can debit a private sub-wallet.
    #[test]
    fn prop_private_withdraw_requires_member(
        members in prop::collection::btree_set(1i64..50, 1..6),
        candidate in 1i64..50,
        balance in amount(),
    ) {
        let mut parent = wallet(balance);
        let mut sub = parent.create_sub_wallet(WalletId::new(2), balance, "private").unwrap();
        for id in &members {
            sub.add_member(&FamilyMember::new(MemberId::new(*id), FAMILY, "m")).unwrap();
        }

        let candidate_member = FamilyMember::new(MemberId::new(candidate), FAMILY, "c");
        let result = sub.withdraw_as(Decimal::ZERO, Some(&candidate_member));
        if members.contains(&candidate) {
            prop_assert!(result.is_ok());
        } else {
            let is_auth = matches!(&result, Err(SubWalletError::MemberNotAuthorized { .. }));
            prop_assert!(is_auth);
        }

        let unauthenticated = sub.withdraw(Decimal::ZERO).unwrap_err();
        prop_assert_eq!(unauthenticated.kind(), ErrorKind::Authorization);
        prop_assert_eq!(sub.balance(), balance);
    }
}
