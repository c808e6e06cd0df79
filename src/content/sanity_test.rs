use super::*;
use serde_json::json;

fn collection_json(slug: &str) -> serde_json::Value {
    json!({
        "_id": format!("col-{slug}"),
        "title": "Ape Drop",
        "address": "0x8a9cE6A10C3b5a9aE04c0b8D3c4F1Dbe9F3b1e20",
        "nftCollectionName": "Bored Apes",
        "description": "Apes, bored.",
        "mainImage": { "asset": { "_ref": "image-abc-600x800-png", "_type": "reference" } },
        "previewImage": { "asset": { "_ref": "image-def-300x300-jpg", "_type": "reference" } },
        "slug": { "current": slug },
        "creator": {
            "_id": "creator-1",
            "name": "Jimmy",
            "address": null,
            "slug": { "current": "jimmy" }
        }
    })
}

fn cms_config() -> CmsConfig {
    CmsConfig {
        project_id: "abc123".into(),
        dataset: "production".into(),
        api_version: "2021-10-21".into(),
        use_cdn: true,
        token: None,
    }
}

#[test]
fn list_query_filters_on_collection_type() {
    let q = list_collections_query();
    assert!(q.starts_with(r#"*[_type == "collection"]{"#));
    assert!(q.contains("nftCollectionName"));
    assert!(q.contains("creator -> {"));
}

#[test]
fn slug_query_takes_first_match_by_param() {
    let q = collection_by_slug_query();
    assert!(q.contains("slug.current == $id"));
    assert!(q.contains("][0]{"));
}

#[test]
fn query_url_uses_cdn_host_by_default() {
    assert_eq!(query_url(&cms_config()), "https://abc123.apicdn.sanity.io/v2021-10-21/data/query/production");
}

#[test]
fn query_url_uses_api_host_without_cdn() {
    let cfg = CmsConfig { use_cdn: false, ..cms_config() };
    assert_eq!(query_url(&cfg), "https://abc123.api.sanity.io/v2021-10-21/data/query/production");
}

#[test]
fn parse_list_reads_collections() {
    let body = json!({ "ms": 4, "query": "...", "result": [collection_json("apes"), collection_json("punks")] });
    let list = parse_list(&body.to_string()).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].slug(), "apes");
    assert_eq!(list[0].nft_collection_name, "Bored Apes");
    assert_eq!(list[0].main_image.asset.reference, "image-abc-600x800-png");
    assert_eq!(list[1].creator.name, "Jimmy");
    assert!(list[1].creator.address.is_none());
}

#[test]
fn parse_list_null_result_is_empty() {
    let list = parse_list(r#"{"result": null}"#).unwrap();
    assert!(list.is_empty());
}

#[test]
fn parse_single_null_is_none() {
    assert!(parse_single(r#"{"result": null}"#).unwrap().is_none());
}

#[test]
fn parse_single_reads_collection() {
    let body = json!({ "result": collection_json("apes") });
    let collection = parse_single(&body.to_string()).unwrap().unwrap();
    assert_eq!(collection.id, "col-apes");
    assert_eq!(collection.description(), "Apes, bored.");
    assert_eq!(collection.address.as_deref(), Some("0x8a9cE6A10C3b5a9aE04c0b8D3c4F1Dbe9F3b1e20"));
}

#[test]
fn parse_single_tolerates_null_optional_fields() {
    let mut doc = collection_json("apes");
    doc["description"] = json!(null);
    doc["address"] = json!(null);
    let body = json!({ "result": doc });
    let collection = parse_single(&body.to_string()).unwrap().unwrap();
    assert_eq!(collection.description(), "");
    assert!(collection.address.is_none());
}

#[test]
fn parse_invalid_json() {
    let err = parse_list("not json").unwrap_err();
    assert!(matches!(err, ContentError::Parse(_)));
}
