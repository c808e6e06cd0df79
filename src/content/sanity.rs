//! Sanity content store client.
//!
//! Thin HTTP wrapper over the GROQ query endpoint. Query parameters are sent
//! JSON-encoded as `$name`. Pure parsing in `parse_list` / `parse_single` for
//! testability.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::Collection;
use super::{ContentError, ContentStore};
use crate::config::{CmsConfig, HttpTimeouts};

/// Fields projected for every collection, creator dereferenced inline.
const COLLECTION_PROJECTION: &str = r"{
  _id,
  title,
  address,
  nftCollectionName,
  description,
  mainImage { asset },
  previewImage { asset },
  slug { current },
  creator -> {
    _id,
    name,
    address,
    slug { current }
  }
}";

// =============================================================================
// QUERIES
// =============================================================================

pub(crate) fn list_collections_query() -> String {
    format!(r#"*[_type == "collection"]{COLLECTION_PROJECTION}"#)
}

pub(crate) fn collection_by_slug_query() -> String {
    format!(r#"*[_type == "collection" && slug.current == $id][0]{COLLECTION_PROJECTION}"#)
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct SanityClient {
    http: reqwest::Client,
    query_url: String,
    token: Option<String>,
}

impl SanityClient {
    /// Build a client for the configured project and dataset.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: &CmsConfig, timeouts: HttpTimeouts) -> Result<Self, ContentError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ContentError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, query_url: query_url(config), token: config.token.clone() })
    }

    async fn query(&self, groq: &str, params: &[(&str, &str)]) -> Result<String, ContentError> {
        let mut pairs: Vec<(String, String)> = vec![("query".into(), groq.to_owned())];
        for (name, value) in params {
            // GROQ parameters are JSON literals.
            let literal = serde_json::Value::String((*value).to_owned()).to_string();
            pairs.push((format!("${name}"), literal));
        }

        let mut request = self.http.get(&self.query_url).query(&pairs);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ContentError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ContentError::Request(e.to_string()))?;

        if status != 200 {
            return Err(ContentError::Response { status, body: text });
        }

        debug!(bytes = text.len(), "content: query ok");
        Ok(text)
    }
}

#[async_trait::async_trait]
impl ContentStore for SanityClient {
    async fn list_collections(&self) -> Result<Vec<Collection>, ContentError> {
        let body = self.query(&list_collections_query(), &[]).await?;
        parse_list(&body)
    }

    async fn collection_by_slug(&self, slug: &str) -> Result<Option<Collection>, ContentError> {
        let body = self
            .query(&collection_by_slug_query(), &[("id", slug)])
            .await?;
        parse_single(&body)
    }
}

pub(crate) fn query_url(config: &CmsConfig) -> String {
    let host = if config.use_cdn { "apicdn" } else { "api" };
    format!(
        "https://{}.{host}.sanity.io/v{}/data/query/{}",
        config.project_id, config.api_version, config.dataset
    )
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(serde::Deserialize)]
struct QueryResponse<T> {
    result: T,
}

fn parse_envelope<T: DeserializeOwned>(json: &str) -> Result<T, ContentError> {
    let envelope: QueryResponse<T> = serde_json::from_str(json).map_err(|e| ContentError::Parse(e.to_string()))?;
    Ok(envelope.result)
}

fn parse_list(json: &str) -> Result<Vec<Collection>, ContentError> {
    // A dataset with no collections answers `null` on some API versions.
    let list: Option<Vec<Collection>> = parse_envelope(json)?;
    Ok(list.unwrap_or_default())
}

fn parse_single(json: &str) -> Result<Option<Collection>, ContentError> {
    parse_envelope(json)
}

#[cfg(test)]
#[path = "sanity_test.rs"]
mod tests;
