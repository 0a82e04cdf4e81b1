//! Sub-wallet routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use famwallet_core::Entity;
use famwallet_core::transfer::{TransferReceipt, WalletTransfer};
use famwallet_core::wallet::{NewSubWallet, SubWallet, SubWalletDetails, UpdateSubWallet};
use famwallet_shared::types::{Currency, FamilyId, MemberId, PageResponse, WalletId};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use super::PageQuery;
use super::wallets::MemberResponse;
use crate::{AppState, error::ApiError};

/// Creates sub-wallet routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sub-wallets", get(list_sub_wallets).post(create_sub_wallet))
        .route(
            "/sub-wallets/{sub_wallet_id}",
            get(get_sub_wallet)
                .put(update_sub_wallet)
                .delete(delete_sub_wallet),
        )
        .route("/sub-wallets/transfer-funds", post(transfer_funds))
}

/// Response for a sub-wallet.
#[derive(Debug, Serialize)]
pub struct SubWalletResponse {
    /// Sub-wallet ID.
    pub id: WalletId,
    /// Wallet or sub-wallet this one is nested under.
    pub parent_wallet_id: WalletId,
    /// Description.
    pub description: String,
    /// Current balance.
    pub balance: Decimal,
    /// Currency, same as the parent.
    pub currency: Currency,
    /// Owning family ID.
    pub family_id: FamilyId,
    /// True when only listed members may withdraw.
    pub private: bool,
    /// Authorized member IDs.
    pub member_ids: Vec<MemberId>,
    /// Authorized members, on single-sub-wallet responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<MemberResponse>>,
    /// Direct sub-wallet IDs.
    pub sub_wallets: Vec<WalletId>,
}

impl From<SubWallet> for SubWalletResponse {
    fn from(sub_wallet: SubWallet) -> Self {
        Self {
            id: sub_wallet.id(),
            parent_wallet_id: sub_wallet.parent_id(),
            description: sub_wallet.description().to_string(),
            balance: sub_wallet.balance(),
            currency: sub_wallet.currency(),
            family_id: sub_wallet.family_id(),
            private: sub_wallet.is_private(),
            member_ids: sub_wallet.members().iter().copied().collect(),
            members: None,
            sub_wallets: sub_wallet.sub_wallets().to_vec(),
        }
    }
}

impl From<SubWalletDetails> for SubWalletResponse {
    fn from(details: SubWalletDetails) -> Self {
        Self {
            members: Some(details.members.iter().map(MemberResponse::from).collect()),
            ..details.sub_wallet.into()
        }
    }
}

/// POST `/sub-wallets` - Create a sub-wallet under a wallet or sub-wallet.
async fn create_sub_wallet(
    State(state): State<AppState>,
    Json(payload): Json<NewSubWallet>,
) -> Result<(StatusCode, Json<SubWalletResponse>), ApiError> {
    let cancel = state.request_token();
    let details = state
        .sub_wallets
        .create_sub_wallet(payload, &cancel)
        .await?;
    info!(
        sub_wallet_id = %details.sub_wallet.id(),
        parent_wallet_id = %details.sub_wallet.parent_id(),
        "Sub-wallet created via API"
    );
    Ok((StatusCode::CREATED, Json(details.into())))
}

/// GET `/sub-wallets` - List sub-wallets.
async fn list_sub_wallets(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<SubWalletResponse>>, ApiError> {
    let page = query.resolve(&state.pagination);
    let sub_wallets = state.sub_wallets.list_sub_wallets(page).await?;
    Ok(Json(sub_wallets.map(SubWalletResponse::from)))
}

/// GET `/sub-wallets/{sub_wallet_id}` - Get a sub-wallet with its members.
async fn get_sub_wallet(
    State(state): State<AppState>,
    Path(sub_wallet_id): Path<WalletId>,
) -> Result<Json<SubWalletResponse>, ApiError> {
    let details = state.sub_wallets.get_sub_wallet(sub_wallet_id).await?;
    Ok(Json(details.into()))
}

/// PUT `/sub-wallets/{sub_wallet_id}` - Rename and reconcile members.
async fn update_sub_wallet(
    State(state): State<AppState>,
    Path(sub_wallet_id): Path<WalletId>,
    Json(payload): Json<UpdateSubWallet>,
) -> Result<Json<SubWalletResponse>, ApiError> {
    let cancel = state.request_token();
    let details = state
        .sub_wallets
        .update_sub_wallet(sub_wallet_id, payload, &cancel)
        .await?;
    Ok(Json(details.into()))
}

/// DELETE `/sub-wallets/{sub_wallet_id}` - Delete an empty leaf sub-wallet.
async fn delete_sub_wallet(
    State(state): State<AppState>,
    Path(sub_wallet_id): Path<WalletId>,
) -> Result<StatusCode, ApiError> {
    let cancel = state.request_token();
    state
        .sub_wallets
        .delete_sub_wallet(sub_wallet_id, &cancel)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/sub-wallets/transfer-funds` - Move money out of or into a sub-wallet.
async fn transfer_funds(
    State(state): State<AppState>,
    Json(payload): Json<WalletTransfer>,
) -> Result<Json<TransferReceipt>, ApiError> {
    let cancel = state.request_token();
    let receipt = state.transfers.between_wallets(payload, &cancel).await?;
    Ok(Json(receipt))
}
