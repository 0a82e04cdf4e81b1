//! Wallet and sub-wallet service tests against the in-memory store.

use std::sync::Arc;

use famwallet_core::Entity;
use famwallet_core::repository::{ChangeSet, Store};
use famwallet_core::wallet::{
    NewFamily, NewMember, NewSubWallet, NewWallet, SubWalletService, UpdateSubWallet,
    UpdateWallet, WalletDetails, WalletService,
};
use famwallet_db::InMemoryStore;
use famwallet_shared::AppError;
use famwallet_shared::types::{Currency, FamilyId, MemberId, PageRequest, WalletId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio_util::sync::CancellationToken;

struct Fixture {
    store: Arc<dyn Store>,
    wallets: WalletService,
    sub_wallets: SubWalletService,
    cancel: CancellationToken,
}

fn fixture() -> Fixture {
    let store: Arc<dyn Store> = Arc::new(InMemoryStore::new());
    Fixture {
        wallets: WalletService::new(store.clone()),
        sub_wallets: SubWalletService::new(store.clone()),
        store,
        cancel: CancellationToken::new(),
    }
}

fn new_wallet(family_id: FamilyId, balance: Decimal, currency: Currency) -> NewWallet {
    NewWallet {
        description: "Household".to_string(),
        balance,
        currency,
        family: NewFamily {
            id: family_id,
            name: "Smith".to_string(),
            head_member: NewMember {
                id: MemberId::TRANSIENT,
                name: "Anna".to_string(),
            },
        },
    }
}

fn new_sub_wallet(
    parent: &WalletDetails,
    balance: Decimal,
    members: Vec<NewMember>,
) -> NewSubWallet {
    NewSubWallet {
        parent_wallet_id: parent.wallet.id(),
        family_id: parent.family.id(),
        description: "vacation".to_string(),
        balance,
        currency: parent.wallet.currency(),
        members,
    }
}

fn member(name: &str) -> NewMember {
    NewMember {
        id: MemberId::TRANSIENT,
        name: name.to_string(),
    }
}

#[tokio::test]
async fn test_create_wallet_creates_family_with_head() {
    let f = fixture();
    let details = f
        .wallets
        .create_wallet(new_wallet(FamilyId::TRANSIENT, dec!(100), Currency::Usd), &f.cancel)
        .await
        .unwrap();

    assert_eq!(details.wallet.balance(), dec!(100));
    assert_eq!(details.wallet.family_id(), details.family.id());
    assert!(details.family.head_member().is_head());
    assert_eq!(details.family.head_member().name(), "Anna");

    let loaded = f.wallets.get_wallet(details.wallet.id()).await.unwrap();
    assert_eq!(loaded.family.name(), "Smith");
}

#[tokio::test]
async fn test_duplicate_wallet_per_family_currency_rejected() {
    let f = fixture();
    let first = f
        .wallets
        .create_wallet(new_wallet(FamilyId::TRANSIENT, dec!(0), Currency::Usd), &f.cancel)
        .await
        .unwrap();
    let family_id = first.family.id();

    let err = f
        .wallets
        .create_wallet(new_wallet(family_id, dec!(0), Currency::Usd), &f.cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let second = f
        .wallets
        .create_wallet(new_wallet(family_id, dec!(0), Currency::Eur), &f.cancel)
        .await
        .unwrap();
    assert_eq!(second.family.id(), family_id);
    assert_eq!(second.family.head_member().id(), first.family.head_member().id());
}

#[tokio::test]
async fn test_update_wallet_renames_wallet_and_family() {
    let f = fixture();
    let details = f
        .wallets
        .create_wallet(new_wallet(FamilyId::TRANSIENT, dec!(0), Currency::Usd), &f.cancel)
        .await
        .unwrap();

    let updated = f
        .wallets
        .update_wallet(
            details.wallet.id(),
            UpdateWallet {
                description: "Groceries".to_string(),
                family_name: Some("Smith-Jones".to_string()),
            },
            &f.cancel,
        )
        .await
        .unwrap();
    assert_eq!(updated.wallet.description(), "Groceries");
    assert_eq!(updated.family.name(), "Smith-Jones");

    let err = f
        .wallets
        .update_wallet(
            details.wallet.id(),
            UpdateWallet {
                description: "  ".to_string(),
                family_name: None,
            },
            &f.cancel,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

/// Scenario: a sub-wallet draws on the parent's balance without debiting it.
#[tokio::test]
async fn test_create_sub_wallet_does_not_debit_parent() {
    let f = fixture();
    let parent = f
        .wallets
        .create_wallet(new_wallet(FamilyId::TRANSIENT, dec!(100), Currency::Usd), &f.cancel)
        .await
        .unwrap();

    let sub = f
        .sub_wallets
        .create_sub_wallet(new_sub_wallet(&parent, dec!(30), vec![]), &f.cancel)
        .await
        .unwrap();

    assert_eq!(sub.sub_wallet.balance(), dec!(30));
    assert_eq!(sub.sub_wallet.parent_id(), parent.wallet.id());
    assert!(!sub.sub_wallet.is_private());

    let reloaded = f.wallets.get_wallet(parent.wallet.id()).await.unwrap();
    assert_eq!(reloaded.wallet.balance(), dec!(100));
    assert_eq!(reloaded.wallet.sub_wallets(), &[sub.sub_wallet.id()]);
}

#[tokio::test]
async fn test_create_sub_wallet_validation() {
    let f = fixture();
    let parent = f
        .wallets
        .create_wallet(new_wallet(FamilyId::TRANSIENT, dec!(100), Currency::Usd), &f.cancel)
        .await
        .unwrap();

    let err = f
        .sub_wallets
        .create_sub_wallet(new_sub_wallet(&parent, dec!(100.01), vec![]), &f.cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut wrong_currency = new_sub_wallet(&parent, dec!(1), vec![]);
    wrong_currency.currency = Currency::Eur;
    let err = f
        .sub_wallets
        .create_sub_wallet(wrong_currency, &f.cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut wrong_family = new_sub_wallet(&parent, dec!(1), vec![]);
    wrong_family.family_id = FamilyId::new(999);
    let err = f
        .sub_wallets
        .create_sub_wallet(wrong_family, &f.cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut missing_parent = new_sub_wallet(&parent, dec!(1), vec![]);
    missing_parent.parent_wallet_id = WalletId::new(999);
    let err = f
        .sub_wallets
        .create_sub_wallet(missing_parent, &f.cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let reloaded = f.wallets.get_wallet(parent.wallet.id()).await.unwrap();
    assert!(reloaded.wallet.sub_wallets().is_empty());
}

#[tokio::test]
async fn test_sub_wallet_members_are_created_and_reconciled() {
    let f = fixture();
    let parent = f
        .wallets
        .create_wallet(new_wallet(FamilyId::TRANSIENT, dec!(100), Currency::Usd), &f.cancel)
        .await
        .unwrap();

    let created = f
        .sub_wallets
        .create_sub_wallet(
            new_sub_wallet(&parent, dec!(10), vec![member("Ben"), member("Cleo")]),
            &f.cancel,
        )
        .await
        .unwrap();
    assert!(created.sub_wallet.is_private());
    assert_eq!(created.members.len(), 2);
    let ben = created.members[0].clone();
    assert_eq!(ben.family_id(), parent.family.id());

    let updated = f
        .sub_wallets
        .update_sub_wallet(
            created.sub_wallet.id(),
            UpdateSubWallet {
                description: Some("summer".to_string()),
                members: vec![
                    NewMember {
                        id: ben.id(),
                        name: String::new(),
                    },
                    member("Dora"),
                ],
            },
            &f.cancel,
        )
        .await
        .unwrap();

    let names: Vec<&str> = updated.members.iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["Ben", "Dora"]);
    assert_eq!(updated.sub_wallet.description(), "summer");

    let unchanged = f
        .sub_wallets
        .update_sub_wallet(
            created.sub_wallet.id(),
            UpdateSubWallet {
                description: Some(" ".to_string()),
                members: vec![],
            },
            &f.cancel,
        )
        .await
        .unwrap();
    assert_eq!(unchanged.sub_wallet.description(), "summer");
    assert_eq!(unchanged.members.len(), 2);
}

#[tokio::test]
async fn test_unknown_member_id_rejected() {
    let f = fixture();
    let parent = f
        .wallets
        .create_wallet(new_wallet(FamilyId::TRANSIENT, dec!(10), Currency::Usd), &f.cancel)
        .await
        .unwrap();

    let err = f
        .sub_wallets
        .create_sub_wallet(
            new_sub_wallet(
                &parent,
                dec!(1),
                vec![NewMember {
                    id: MemberId::new(999),
                    name: "Ghost".to_string(),
                }],
            ),
            &f.cancel,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_rules() {
    let f = fixture();
    let parent = f
        .wallets
        .create_wallet(new_wallet(FamilyId::TRANSIENT, dec!(0), Currency::Usd), &f.cancel)
        .await
        .unwrap();
    let sub = f
        .sub_wallets
        .create_sub_wallet(new_sub_wallet(&parent, dec!(0), vec![]), &f.cancel)
        .await
        .unwrap();

    let err = f
        .wallets
        .delete_wallet(parent.wallet.id(), &f.cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvariantViolation(_)));

    f.sub_wallets
        .delete_sub_wallet(sub.sub_wallet.id(), &f.cancel)
        .await
        .unwrap();
    let reloaded = f.wallets.get_wallet(parent.wallet.id()).await.unwrap();
    assert!(reloaded.wallet.sub_wallets().is_empty());

    f.wallets
        .delete_wallet(parent.wallet.id(), &f.cancel)
        .await
        .unwrap();
    assert!(matches!(
        f.wallets.get_wallet(parent.wallet.id()).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_unknown_head_member_id_rejected() {
    let f = fixture();
    let mut input = new_wallet(FamilyId::TRANSIENT, dec!(10), Currency::Usd);
    input.family.head_member.id = MemberId::new(777);

    let err = f.wallets.create_wallet(input, &f.cancel).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    let page = f.wallets.list_wallets(PageRequest::default()).await.unwrap();
    assert_eq!(page.meta.total, 0);
}

#[tokio::test]
async fn test_stored_child_missing_from_parent_list_blocks_delete() {
    let f = fixture();
    let parent = f
        .wallets
        .create_wallet(new_wallet(FamilyId::TRANSIENT, dec!(0), Currency::Usd), &f.cancel)
        .await
        .unwrap();
    // Only the child is written; the stored parent never lists it.
    let stray = parent
        .wallet
        .clone()
        .create_sub_wallet(WalletId::new(500), Decimal::ZERO, "stray")
        .unwrap();
    f.store
        .commit(ChangeSet::new().put_sub_wallet(stray))
        .await
        .unwrap();

    let stored = f.wallets.get_wallet(parent.wallet.id()).await.unwrap();
    assert!(stored.wallet.sub_wallets().is_empty());

    let err = f
        .wallets
        .delete_wallet(parent.wallet.id(), &f.cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvariantViolation(_)));

    f.sub_wallets
        .delete_sub_wallet(WalletId::new(500), &f.cancel)
        .await
        .unwrap();
    f.wallets
        .delete_wallet(parent.wallet.id(), &f.cancel)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_sub_wallet_with_stored_grandchild_cannot_be_deleted() {
    let f = fixture();
    let parent = f
        .wallets
        .create_wallet(new_wallet(FamilyId::TRANSIENT, dec!(0), Currency::Usd), &f.cancel)
        .await
        .unwrap();
    let child = f
        .sub_wallets
        .create_sub_wallet(new_sub_wallet(&parent, dec!(0), vec![]), &f.cancel)
        .await
        .unwrap();
    let grandchild = child
        .sub_wallet
        .clone()
        .create_sub_wallet(WalletId::new(600), Decimal::ZERO, "stray")
        .unwrap();
    f.store
        .commit(ChangeSet::new().put_sub_wallet(grandchild))
        .await
        .unwrap();

    let err = f
        .sub_wallets
        .delete_sub_wallet(child.sub_wallet.id(), &f.cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvariantViolation(_)));
    assert!(f.sub_wallets.get_sub_wallet(child.sub_wallet.id()).await.is_ok());
}

#[tokio::test]
async fn test_delete_funded_sub_wallet_rejected() {
    let f = fixture();
    let parent = f
        .wallets
        .create_wallet(new_wallet(FamilyId::TRANSIENT, dec!(20), Currency::Usd), &f.cancel)
        .await
        .unwrap();
    let sub = f
        .sub_wallets
        .create_sub_wallet(new_sub_wallet(&parent, dec!(5), vec![]), &f.cancel)
        .await
        .unwrap();

    let err = f
        .sub_wallets
        .delete_sub_wallet(sub.sub_wallet.id(), &f.cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvariantViolation(_)));
    assert!(f.sub_wallets.get_sub_wallet(sub.sub_wallet.id()).await.is_ok());
}

#[tokio::test]
async fn test_nested_sub_wallet_under_sub_wallet() {
    let f = fixture();
    let parent = f
        .wallets
        .create_wallet(new_wallet(FamilyId::TRANSIENT, dec!(100), Currency::Usd), &f.cancel)
        .await
        .unwrap();
    let sub = f
        .sub_wallets
        .create_sub_wallet(new_sub_wallet(&parent, dec!(40), vec![]), &f.cancel)
        .await
        .unwrap();

    let nested = f
        .sub_wallets
        .create_sub_wallet(
            NewSubWallet {
                parent_wallet_id: sub.sub_wallet.id(),
                family_id: parent.family.id(),
                description: "toys".to_string(),
                balance: dec!(40),
                currency: Currency::Usd,
                members: vec![],
            },
            &f.cancel,
        )
        .await
        .unwrap();

    assert_eq!(nested.sub_wallet.parent_id(), sub.sub_wallet.id());
    let reloaded = f.sub_wallets.get_sub_wallet(sub.sub_wallet.id()).await.unwrap();
    assert_eq!(reloaded.sub_wallet.sub_wallets(), &[nested.sub_wallet.id()]);

    let err = f
        .sub_wallets
        .delete_sub_wallet(sub.sub_wallet.id(), &f.cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvariantViolation(_)));
}

#[tokio::test]
async fn test_list_wallets_excludes_sub_wallets() {
    let f = fixture();
    let parent = f
        .wallets
        .create_wallet(new_wallet(FamilyId::TRANSIENT, dec!(10), Currency::Usd), &f.cancel)
        .await
        .unwrap();
    f.sub_wallets
        .create_sub_wallet(new_sub_wallet(&parent, dec!(1), vec![]), &f.cancel)
        .await
        .unwrap();

    let wallets = f.wallets.list_wallets(PageRequest::default()).await.unwrap();
    assert_eq!(wallets.meta.total, 1);

    let sub_wallets = f
        .sub_wallets
        .list_sub_wallets(PageRequest::default())
        .await
        .unwrap();
    assert_eq!(sub_wallets.meta.total, 1);
}
