//! Collection gallery.

use leptos::prelude::*;

use crate::content::image::ImageUrlBuilder;
use crate::content::types::Collection;

/// One gallery card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionCard {
    pub href: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl CollectionCard {
    #[must_use]
    pub fn new(collection: &Collection, images: &ImageUrlBuilder) -> Self {
        Self {
            href: format!("/nft/{}", collection.slug()),
            title: collection.title.clone(),
            description: collection.description().to_owned(),
            image_url: images.url(&collection.main_image),
        }
    }
}

/// Render the listing page. `owner` is shown in the heading when known.
pub fn render(owner: Option<String>, cards: Vec<CollectionCard>) -> String {
    super::render_document("NFT Drop Challenge".to_owned(), move || view! { <HomePage owner=owner cards=cards/> })
}

#[component]
fn HomePage(owner: Option<String>, cards: Vec<CollectionCard>) -> impl IntoView {
    view! {
        <div class="home">
            <h1 class="home__title">
                {owner.map(|name| view! { <span class="brand">{name}</span> " " })}
                "NFT Market Place"
            </h1>
            <main class="home__grid">
                {cards.into_iter().map(|card| view! { <CollectionCardView card=card/> }).collect::<Vec<_>>()}
            </main>
        </div>
    }
}

#[component]
fn CollectionCardView(card: CollectionCard) -> impl IntoView {
    view! {
        <a href=card.href>
            <div class="card">
                <img class="card__image" src=card.image_url alt="main-image"/>
                <div class="card__body">
                    <h2>{card.title}</h2>
                    <p class="card__description">{card.description}</p>
                </div>
            </div>
        </a>
    }
}

#[cfg(test)]
#[path = "home_test.rs"]
mod tests;
