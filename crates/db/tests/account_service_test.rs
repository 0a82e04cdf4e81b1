//! Account service tests against the in-memory store.

use std::sync::Arc;

use famwallet_core::Entity;
use famwallet_core::account::{AccountService, AddFunds, NewAccount};
use famwallet_core::repository::Store;
use famwallet_db::InMemoryStore;
use famwallet_shared::AppError;
use famwallet_shared::types::{AccountId, Currency, PageRequest, ProfileId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio_util::sync::CancellationToken;

fn service() -> AccountService {
    let store: Arc<dyn Store> = Arc::new(InMemoryStore::new());
    AccountService::new(store)
}

fn new_account(profile: i64, balance: Decimal, currency: Currency) -> NewAccount {
    NewAccount {
        profile_id: ProfileId::new(profile),
        description: "Salary".to_string(),
        balance,
        currency,
    }
}

#[tokio::test]
async fn test_create_and_get_account() {
    let service = service();
    let cancel = CancellationToken::new();

    let created = service
        .create_account(new_account(7, dec!(50), Currency::Usd), &cancel)
        .await
        .unwrap();
    let loaded = service.get_account(created.id()).await.unwrap();

    assert_eq!(loaded.balance(), dec!(50));
    assert_eq!(loaded.profile_id(), ProfileId::new(7));
    assert_eq!(loaded.description(), "Salary");
}

#[tokio::test]
async fn test_duplicate_account_per_currency_rejected() {
    let service = service();
    let cancel = CancellationToken::new();
    service
        .create_account(new_account(7, dec!(0), Currency::Usd), &cancel)
        .await
        .unwrap();

    let err = service
        .create_account(new_account(7, dec!(0), Currency::Usd), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    service
        .create_account(new_account(7, dec!(0), Currency::Eur), &cancel)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let service = service();
    let cancel = CancellationToken::new();

    let err = service
        .create_account(new_account(0, dec!(0), Currency::Usd), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = service
        .create_account(new_account(7, dec!(-1), Currency::Usd), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_get_missing_account() {
    let err = service().get_account(AccountId::new(42)).await.unwrap_err();
    assert_eq!(err, AppError::NotFound("Account not found: 42".to_string()));
}

#[tokio::test]
async fn test_add_funds_requires_owner() {
    let service = service();
    let cancel = CancellationToken::new();
    let account = service
        .create_account(new_account(7, dec!(10), Currency::Usd), &cancel)
        .await
        .unwrap();

    let err = service
        .add_funds(
            AddFunds {
                account_id: account.id(),
                profile_id: ProfileId::new(8),
                amount: dec!(5),
            },
            &cancel,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let updated = service
        .add_funds(
            AddFunds {
                account_id: account.id(),
                profile_id: ProfileId::new(7),
                amount: dec!(5),
            },
            &cancel,
        )
        .await
        .unwrap();
    assert_eq!(updated.balance(), dec!(15));
}

#[tokio::test]
async fn test_add_negative_funds_leaves_balance() {
    let service = service();
    let cancel = CancellationToken::new();
    let account = service
        .create_account(new_account(7, dec!(10), Currency::Usd), &cancel)
        .await
        .unwrap();

    let err = service
        .add_funds(
            AddFunds {
                account_id: account.id(),
                profile_id: ProfileId::new(7),
                amount: dec!(-5),
            },
            &cancel,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(
        service.get_account(account.id()).await.unwrap().balance(),
        dec!(10)
    );
}

#[tokio::test]
async fn test_delete_requires_empty_balance() {
    let service = service();
    let cancel = CancellationToken::new();
    let funded = service
        .create_account(new_account(7, dec!(1), Currency::Usd), &cancel)
        .await
        .unwrap();
    let empty = service
        .create_account(new_account(7, dec!(0), Currency::Eur), &cancel)
        .await
        .unwrap();

    let err = service.delete_account(funded.id(), &cancel).await.unwrap_err();
    assert!(matches!(err, AppError::InvariantViolation(_)));

    service.delete_account(empty.id(), &cancel).await.unwrap();
    assert!(matches!(
        service.get_account(empty.id()).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_update_description() {
    let service = service();
    let cancel = CancellationToken::new();
    let account = service
        .create_account(new_account(7, dec!(0), Currency::Usd), &cancel)
        .await
        .unwrap();

    service
        .update_description(account.id(), "Savings".to_string(), &cancel)
        .await
        .unwrap();

    assert_eq!(
        service.get_account(account.id()).await.unwrap().description(),
        "Savings"
    );
}

#[tokio::test]
async fn test_list_accounts_paginates() {
    let service = service();
    let cancel = CancellationToken::new();
    for profile in 1..=3 {
        service
            .create_account(new_account(profile, dec!(0), Currency::Usd), &cancel)
            .await
            .unwrap();
    }

    let page = service.list_accounts(PageRequest::new(1, 2)).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.total, 3);
    assert!(page.meta.has_more);

    let page = service.list_accounts(PageRequest::new(2, 2)).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert!(!page.meta.has_more);
}

#[tokio::test]
async fn test_cancelled_request_changes_nothing() {
    let service = service();
    let cancel = CancellationToken::new();
    let account = service
        .create_account(new_account(7, dec!(10), Currency::Usd), &cancel)
        .await
        .unwrap();

    let cancelled = CancellationToken::new();
    cancelled.cancel();
    let err = service
        .add_funds(
            AddFunds {
                account_id: account.id(),
                profile_id: ProfileId::new(7),
                amount: dec!(5),
            },
            &cancelled,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Cancelled(_)));
    assert_eq!(
        service.get_account(account.id()).await.unwrap().balance(),
        dec!(10)
    );
}
