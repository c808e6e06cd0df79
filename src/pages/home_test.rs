use super::*;
use crate::state::test_helpers::sample_collection;

fn images() -> ImageUrlBuilder {
    ImageUrlBuilder::new("testproj", "production")
}

#[test]
fn card_links_to_detail_page() {
    let card = CollectionCard::new(&sample_collection("apes"), &images());
    assert_eq!(card.href, "/nft/apes");
    assert_eq!(card.title, "apes drop");
    assert_eq!(
        card.image_url.as_deref(),
        Some("https://cdn.sanity.io/images/testproj/production/main-600x800.png")
    );
}

#[test]
fn render_lists_every_collection() {
    let cards = vec![
        CollectionCard::new(&sample_collection("apes"), &images()),
        CollectionCard::new(&sample_collection("punks"), &images()),
    ];
    let html = render(Some("Jimmy".into()), cards);
    assert!(html.contains("<title>NFT Drop Challenge</title>"));
    assert!(html.contains("Jimmy"));
    assert!(html.contains("NFT Market Place"));
    assert!(html.contains("href=\"/nft/apes\""));
    assert!(html.contains("href=\"/nft/punks\""));
    assert!(html.contains("A very serious collection."));
}

#[test]
fn render_escapes_cms_text() {
    let mut collection = sample_collection("apes");
    collection.title = "<script>alert(1)</script>".into();
    let html = render(None, vec![CollectionCard::new(&collection, &images())]);
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn render_empty_gallery() {
    let html = render(None, Vec::new());
    assert!(html.contains("NFT Market Place"));
    assert!(!html.contains("class=\"card\""));
}
