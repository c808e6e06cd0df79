//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two server-rendered pages (gallery and collection detail), two form-post
//! actions on the detail page (wallet toggle, mint), and a JSON status
//! endpoint for polling the mint view-model.

pub mod api;
pub mod error;
pub mod storefront;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(storefront::home))
        .route("/nft/{slug}", get(storefront::drop_page))
        .route("/nft/{slug}/wallet", post(storefront::toggle_wallet))
        .route("/nft/{slug}/mint", post(storefront::mint))
        .route("/api/nft/{slug}/status", get(api::status))
        .route("/healthz", get(healthz))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
