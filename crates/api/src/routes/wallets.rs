//! Family wallet routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use famwallet_core::Entity;
use famwallet_core::family::{Family, FamilyMember, MemberRole};
use famwallet_core::transfer::{TransferReceipt, WalletTransfer};
use famwallet_core::wallet::{NewWallet, UpdateWallet, Wallet, WalletDetails};
use famwallet_shared::types::{Currency, FamilyId, MemberId, PageResponse, WalletId};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use super::PageQuery;
use crate::{AppState, error::ApiError};

/// Creates wallet routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wallets", get(list_wallets).post(create_wallet))
        .route(
            "/wallets/{wallet_id}",
            get(get_wallet).put(update_wallet).delete(delete_wallet),
        )
        .route("/wallets/transfer-funds", post(transfer_funds))
}

/// Response for a family member.
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    /// Member ID.
    pub id: MemberId,
    /// Display name.
    pub name: String,
    /// Role in the family.
    pub role: MemberRole,
}

impl From<&FamilyMember> for MemberResponse {
    fn from(member: &FamilyMember) -> Self {
        Self {
            id: member.id(),
            name: member.name().to_string(),
            role: member.role(),
        }
    }
}

/// Response for a family.
#[derive(Debug, Serialize)]
pub struct FamilyResponse {
    /// Family ID.
    pub id: FamilyId,
    /// Family name.
    pub name: String,
    /// Head member.
    pub head_member: MemberResponse,
}

impl From<&Family> for FamilyResponse {
    fn from(family: &Family) -> Self {
        Self {
            id: family.id(),
            name: family.name().to_string(),
            head_member: family.head_member().into(),
        }
    }
}

/// Response for a wallet.
#[derive(Debug, Serialize)]
pub struct WalletResponse {
    /// Wallet ID.
    pub id: WalletId,
    /// Description.
    pub description: String,
    /// Current balance.
    pub balance: Decimal,
    /// Wallet currency.
    pub currency: Currency,
    /// Owning family ID.
    pub family_id: FamilyId,
    /// Owning family, on single-wallet responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<FamilyResponse>,
    /// Direct sub-wallet IDs.
    pub sub_wallets: Vec<WalletId>,
}

impl From<Wallet> for WalletResponse {
    fn from(wallet: Wallet) -> Self {
        Self {
            id: wallet.id(),
            description: wallet.description().to_string(),
            balance: wallet.balance(),
            currency: wallet.currency(),
            family_id: wallet.family_id(),
            family: None,
            sub_wallets: wallet.sub_wallets().to_vec(),
        }
    }
}

impl From<WalletDetails> for WalletResponse {
    fn from(details: WalletDetails) -> Self {
        Self {
            family: Some((&details.family).into()),
            ..details.wallet.into()
        }
    }
}

/// POST `/wallets` - Create a wallet, and its family if needed.
async fn create_wallet(
    State(state): State<AppState>,
    Json(payload): Json<NewWallet>,
) -> Result<(StatusCode, Json<WalletResponse>), ApiError> {
    let cancel = state.request_token();
    let details = state.wallets.create_wallet(payload, &cancel).await?;
    info!(
        wallet_id = %details.wallet.id(),
        family_id = %details.family.id(),
        "Wallet created via API"
    );
    Ok((StatusCode::CREATED, Json(details.into())))
}

/// GET `/wallets` - List top-level wallets.
async fn list_wallets(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<WalletResponse>>, ApiError> {
    let page = query.resolve(&state.pagination);
    let wallets = state.wallets.list_wallets(page).await?;
    Ok(Json(wallets.map(WalletResponse::from)))
}

/// GET `/wallets/{wallet_id}` - Get a wallet with its family.
async fn get_wallet(
    State(state): State<AppState>,
    Path(wallet_id): Path<WalletId>,
) -> Result<Json<WalletResponse>, ApiError> {
    let details = state.wallets.get_wallet(wallet_id).await?;
    Ok(Json(details.into()))
}

/// PUT `/wallets/{wallet_id}` - Rename a wallet and optionally its family.
async fn update_wallet(
    State(state): State<AppState>,
    Path(wallet_id): Path<WalletId>,
    Json(payload): Json<UpdateWallet>,
) -> Result<Json<WalletResponse>, ApiError> {
    let cancel = state.request_token();
    let details = state
        .wallets
        .update_wallet(wallet_id, payload, &cancel)
        .await?;
    Ok(Json(details.into()))
}

/// DELETE `/wallets/{wallet_id}` - Delete an empty wallet.
async fn delete_wallet(
    State(state): State<AppState>,
    Path(wallet_id): Path<WalletId>,
) -> Result<StatusCode, ApiError> {
    let cancel = state.request_token();
    state.wallets.delete_wallet(wallet_id, &cancel).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/wallets/transfer-funds` - Move money between a wallet and a sub-wallet.
async fn transfer_funds(
    State(state): State<AppState>,
    Json(payload): Json<WalletTransfer>,
) -> Result<Json<TransferReceipt>, ApiError> {
    let cancel = state.request_token();
    let receipt = state.transfers.between_wallets(payload, &cancel).await?;
    Ok(Json(receipt))
}
