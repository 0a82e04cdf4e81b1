//! API route definitions.

use axum::Router;
use famwallet_shared::PaginationConfig;
use famwallet_shared::types::PageRequest;
use serde::Deserialize;

use crate::AppState;

pub mod accounts;
pub mod health;
pub mod sub_wallets;
pub mod wallets;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(accounts::routes())
        .merge(wallets::routes())
        .merge(sub_wallets::routes())
}

/// Query parameters for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

impl PageQuery {
    /// Fills in configured defaults and clamps to the configured maximum.
    #[must_use]
    pub fn resolve(&self, config: &PaginationConfig) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(config.default_page_size),
        )
        .clamped(config.max_page_size)
    }
}
