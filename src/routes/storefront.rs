//! Server-rendered storefront pages and the form actions posted from them.
//!
//! DESIGN
//! ======
//! Pages are rendered from the drop page's current view-model state. Wallet
//! and mint actions are plain form posts that mutate the view-model and then
//! redirect back to the detail page (post/redirect/get), so a reload never
//! re-submits a mint.

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use tracing::{debug, info, warn};

use super::error::AppError;
use crate::content::types::Collection;
use crate::error::ErrorCode;
use crate::mint::MintOutcome;
use crate::mint::view_model::FAILURE_MESSAGE;
use crate::notify::{Notifier, Toast};
use crate::pages::drop_page::{self, DropView};
use crate::pages::home::{self, CollectionCard};
use crate::state::AppState;

/// Resolve a slug to its collection or a not-found error.
pub(crate) async fn load_collection(state: &AppState, slug: &str) -> Result<Collection, AppError> {
    state
        .content
        .collection_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound(slug.to_owned()))
}

fn detail_location(collection: &Collection) -> Redirect {
    Redirect::to(&format!("/nft/{}", collection.slug()))
}

/// `GET /` — collection gallery.
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let collections = state.content.list_collections().await?;
    let owner = collections.first().map(|c| c.creator.name.clone());
    let cards = collections
        .iter()
        .map(|c| CollectionCard::new(c, &state.images))
        .collect();
    Ok(Html(home::render(owner, cards)))
}

/// `GET /nft/{slug}` — collection detail with the mint control.
pub async fn drop_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let collection = load_collection(&state, &slug).await?;
    let page = state.drop_page(&collection).await;
    let view = DropView::new(&collection, &state.images, &page.view_model.status(), page.toasts.visible());
    Ok(Html(drop_page::render(view)))
}

/// `POST /nft/{slug}/wallet` — sign in when disconnected, sign out otherwise.
pub async fn toggle_wallet(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Redirect, AppError> {
    let collection = load_collection(&state, &slug).await?;

    let connect_failed = if state.wallet.current_address().is_some() {
        state.wallet.disconnect().await;
        false
    } else {
        match state.wallet.connect().await {
            Ok(_) => false,
            Err(e) => {
                warn!(error = %e, code = e.error_code(), %slug, "wallet: connect failed");
                true
            }
        }
    };

    let page = state.drop_page(&collection).await;
    if connect_failed {
        page.toasts.notify(Toast::failure(FAILURE_MESSAGE));
    }
    Ok(detail_location(&collection))
}

/// `POST /nft/{slug}/mint` — claim one token to the connected wallet.
pub async fn mint(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Redirect, AppError> {
    let collection = load_collection(&state, &slug).await?;
    let page = state.drop_page(&collection).await;

    let button = page.view_model.button();
    if button.disabled {
        info!(%slug, phase = ?button.phase, "mint: ignored, control disabled");
        return Ok(detail_location(&collection));
    }

    match page.view_model.mint().await {
        Some(MintOutcome::Minted { receipt, token_id, .. }) => {
            debug!(%slug, %token_id, tx = %receipt.transaction_hash, "mint: redirecting after claim");
        }
        Some(MintOutcome::Failed { reason }) => {
            info!(%slug, %reason, "mint: failed");
        }
        None => info!(%slug, "mint: skipped"),
    }
    Ok(detail_location(&collection))
}

#[cfg(test)]
#[path = "storefront_test.rs"]
mod tests;
