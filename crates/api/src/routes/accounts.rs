//! Personal account routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use famwallet_core::Entity;
use famwallet_core::account::{Account, AddFunds, NewAccount};
use famwallet_core::transfer::{AccountTransfer, TransferReceipt};
use famwallet_shared::types::{AccountId, Currency, PageResponse, ProfileId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::PageQuery;
use crate::{AppState, error::ApiError};

/// Creates account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route(
            "/accounts/{account_id}",
            get(get_account).put(update_account).delete(delete_account),
        )
        .route("/accounts/transfer-funds", post(transfer_funds))
        .route("/accounts/add-funds", post(add_funds))
}

/// Response for an account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: AccountId,
    /// Owner profile.
    pub profile_id: ProfileId,
    /// Description.
    pub description: String,
    /// Current balance.
    pub balance: Decimal,
    /// Account currency.
    pub currency: Currency,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id(),
            profile_id: account.profile_id(),
            description: account.description().to_string(),
            balance: account.balance(),
            currency: account.currency(),
        }
    }
}

/// Request to change an account.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    /// New description.
    pub description: String,
}

/// POST `/accounts` - Open an account.
async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<NewAccount>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let cancel = state.request_token();
    let account = state.accounts.create_account(payload, &cancel).await?;
    info!(account_id = %account.id(), "Account created via API");
    Ok((StatusCode::CREATED, Json(account.into())))
}

/// GET `/accounts` - List accounts.
async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<AccountResponse>>, ApiError> {
    let page = query.resolve(&state.pagination);
    let accounts = state.accounts.list_accounts(page).await?;
    Ok(Json(accounts.map(AccountResponse::from)))
}

/// GET `/accounts/{account_id}` - Get one account.
async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state.accounts.get_account(account_id).await?;
    Ok(Json(account.into()))
}

/// PUT `/accounts/{account_id}` - Change the description.
async fn update_account(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
    Json(payload): Json<UpdateAccountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let cancel = state.request_token();
    let account = state
        .accounts
        .update_description(account_id, payload.description, &cancel)
        .await?;
    Ok(Json(account.into()))
}

/// DELETE `/accounts/{account_id}` - Delete an empty account.
async fn delete_account(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
) -> Result<StatusCode, ApiError> {
    let cancel = state.request_token();
    state.accounts.delete_account(account_id, &cancel).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/accounts/transfer-funds` - Move money from an account into a wallet.
async fn transfer_funds(
    State(state): State<AppState>,
    Json(payload): Json<AccountTransfer>,
) -> Result<Json<TransferReceipt>, ApiError> {
    let cancel = state.request_token();
    let receipt = state.transfers.account_to_wallet(payload, &cancel).await?;
    Ok(Json(receipt))
}

/// POST `/accounts/add-funds` - Deposit money into an account.
async fn add_funds(
    State(state): State<AppState>,
    Json(payload): Json<AddFunds>,
) -> Result<Json<AccountResponse>, ApiError> {
    let cancel = state.request_token();
    let account = state.accounts.add_funds(payload, &cancel).await?;
    Ok(Json(account.into()))
}
