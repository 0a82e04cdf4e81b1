//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for accounts, wallets and sub-wallets
//! - JSON error mapping for application errors
//! - Response projections of the domain entities

pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use famwallet_core::Store;
use famwallet_core::account::AccountService;
use famwallet_core::transfer::TransferService;
use famwallet_core::wallet::{SubWalletService, WalletService};
use famwallet_shared::PaginationConfig;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Personal account operations.
    pub accounts: AccountService,
    /// Family wallet operations.
    pub wallets: WalletService,
    /// Sub-wallet operations.
    pub sub_wallets: SubWalletService,
    /// Transfers between accounts, wallets and sub-wallets.
    pub transfers: TransferService,
    /// Page size limits for list endpoints.
    pub pagination: Arc<PaginationConfig>,
    /// Cancelled on shutdown; every request works on a child token.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Builds every service over one store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, pagination: PaginationConfig) -> Self {
        Self {
            accounts: AccountService::new(Arc::clone(&store)),
            wallets: WalletService::new(Arc::clone(&store)),
            sub_wallets: SubWalletService::new(Arc::clone(&store)),
            transfers: TransferService::new(store),
            pagination: Arc::new(pagination),
            shutdown: CancellationToken::new(),
        }
    }

    /// Token for one request, cancelled with the server.
    #[must_use]
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    #[allow(deprecated)]
    let timeout = TimeoutLayer::new(request_timeout);

    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
