//! JSON status endpoint for polling a drop page's mint state.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use tracing::warn;

use super::error::{AppError, app_error_to_status};
use super::storefront::load_collection;
use crate::error::ErrorCode;
use crate::mint::{MintButton, MintStatus};
use crate::notify::VisibleToast;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub slug: String,
    #[serde(flatten)]
    pub status: MintStatus,
    pub button: MintButton,
    pub supply_line: String,
    pub toasts: Vec<VisibleToast>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

fn to_error_body(err: &AppError) -> (StatusCode, Json<ErrorBody>) {
    if app_error_to_status(err).is_server_error() {
        warn!(error = %err, code = err.error_code(), "api: status lookup failed");
    }
    (
        app_error_to_status(err),
        Json(ErrorBody { code: err.error_code(), message: err.to_string(), retryable: err.retryable() }),
    )
}

/// `GET /api/nft/{slug}/status` — current mint status of a collection.
pub async fn status(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<ErrorBody>)> {
    let collection = load_collection(&state, &slug).await.map_err(|e| to_error_body(&e))?;
    let page = state.drop_page(&collection).await;
    let status = page.view_model.status();

    Ok(Json(StatusResponse {
        slug: collection.slug().to_owned(),
        button: status.button(),
        supply_line: status.supply_line(),
        status,
        toasts: page.toasts.visible(),
    }))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
