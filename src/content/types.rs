//! Collection documents as projected by the content store queries.
//!
//! Field names follow the CMS schema (`_id`, `nftCollectionName`, ...) on the
//! wire and Rust naming in code. Records are immutable once fetched.

use serde::{Deserialize, Serialize};

/// URL slug wrapper (`slug { current }` in the CMS).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug {
    pub current: String,
}

/// Reference to an uploaded image asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub asset: AssetRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Asset id, e.g. `image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg`.
    #[serde(rename = "_ref")]
    pub reference: String,
}

/// Owner of a collection. Embedded, never shared between collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub slug: Slug,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub nft_collection_name: String,
    /// Drop contract address. Absent until the contract is deployed.
    #[serde(default)]
    pub address: Option<String>,
    pub main_image: ImageRef,
    pub preview_image: ImageRef,
    pub slug: Slug,
    pub creator: Creator,
}

impl Collection {
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug.current
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}
