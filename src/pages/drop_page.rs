//! Collection detail and mint page.

use leptos::prelude::*;

use crate::content::image::ImageUrlBuilder;
use crate::content::types::Collection;
use crate::mint::{MintButton, MintStatus};
use crate::notify::{ToastKind, VisibleToast};
use crate::wallet::short_address;

/// Everything the detail page shows, resolved up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropView {
    pub slug: String,
    pub title: String,
    pub collection_name: String,
    pub description: String,
    pub creator_name: String,
    pub preview_url: Option<String>,
    pub main_url: Option<String>,
    pub connected_address: Option<String>,
    pub is_loading: bool,
    pub supply_line: String,
    pub button: MintButton,
    pub toasts: Vec<VisibleToast>,
}

impl DropView {
    #[must_use]
    pub fn new(
        collection: &Collection,
        images: &ImageUrlBuilder,
        status: &MintStatus,
        toasts: Vec<VisibleToast>,
    ) -> Self {
        Self {
            slug: collection.slug().to_owned(),
            title: collection.title.clone(),
            collection_name: collection.nft_collection_name.clone(),
            description: collection.description().to_owned(),
            creator_name: collection.creator.name.clone(),
            preview_url: images.url(&collection.preview_image),
            main_url: images.url(&collection.main_image),
            connected_address: status.connected_address.clone(),
            is_loading: status.is_loading,
            supply_line: status.supply_line(),
            button: status.button(),
            toasts,
        }
    }
}

pub fn render(page: DropView) -> String {
    let title = format!("{} | NFT Drop", page.collection_name);
    super::render_document(title, move || view! { <DropPageView page=page/> })
}

#[component]
fn DropPageView(page: DropView) -> impl IntoView {
    let wallet_action = format!("/nft/{}/wallet", page.slug);
    let mint_action = format!("/nft/{}/mint", page.slug);
    let wallet_label = if page.connected_address.is_some() { "Sign Out" } else { "Sign In" };
    let supply_class = if page.is_loading { "drop__supply drop__supply--pulse" } else { "drop__supply" };

    view! {
        <div class="drop">
            <div class="drop__side">
                <img class="drop__preview" src=page.preview_url alt="side-picture"/>
                <h1>{page.collection_name}</h1>
                <h2>{page.description}</h2>
            </div>
            <div class="drop__main">
                <header class="drop__header">
                    <a href="/">
                        <h1>
                            <span class="brand">{page.creator_name}</span>
                            " NFT Market Place"
                        </h1>
                    </a>
                    <form method="post" action=wallet_action>
                        <button class="btn btn--wallet" type="submit">{wallet_label}</button>
                    </form>
                </header>
                <hr/>
                {page.connected_address.map(|address| {
                    view! {
                        <p class="drop__wallet">
                            {format!("You're logged in with an wallet {}", short_address(&address))}
                        </p>
                    }
                })}
                <div class="drop__content">
                    <img class="drop__image" src=page.main_url alt="content-pic"/>
                    <h1>{page.title}</h1>
                    <p class=supply_class>{page.supply_line}</p>
                </div>
                <form method="post" action=mint_action>
                    <button class="btn btn--mint" type="submit" disabled=page.button.disabled>
                        {page.button.label}
                    </button>
                </form>
            </div>
            <Toasts toasts=page.toasts/>
        </div>
    }
}

#[component]
fn Toasts(toasts: Vec<VisibleToast>) -> impl IntoView {
    view! {
        <div class="toasts">
            {toasts
                .into_iter()
                .map(|t| {
                    let class = format!("toast toast--{}", toast_class(t.toast.kind));
                    view! { <div class=class>{t.toast.message}</div> }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

fn toast_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Loading => "loading",
        ToastKind::Success => "success",
        ToastKind::Failure => "failure",
    }
}

#[cfg(test)]
#[path = "drop_page_test.rs"]
mod tests;
