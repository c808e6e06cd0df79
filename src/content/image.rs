//! Image URL builder for content store asset references.
//!
//! Asset references look like `image-<assetId>-<width>x<height>-<format>`
//! and map onto the image CDN as
//! `https://cdn.sanity.io/images/<project>/<dataset>/<assetId>-<width>x<height>.<format>`.

use super::types::ImageRef;
use crate::config::CmsConfig;

const IMAGE_CDN: &str = "https://cdn.sanity.io/images";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    #[must_use]
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self { project_id: project_id.into(), dataset: dataset.into() }
    }

    #[must_use]
    pub fn from_config(config: &CmsConfig) -> Self {
        Self::new(config.project_id.clone(), config.dataset.clone())
    }

    /// Resolve an image reference to its CDN URL. `None` for malformed refs.
    #[must_use]
    pub fn url(&self, image: &ImageRef) -> Option<String> {
        let asset = parse_asset_ref(&image.asset.reference)?;
        Some(format!(
            "{IMAGE_CDN}/{}/{}/{}-{}x{}.{}",
            self.project_id, self.dataset, asset.id, asset.width, asset.height, asset.format
        ))
    }
}

#[derive(Debug, PartialEq, Eq)]
struct AssetParts<'a> {
    id: &'a str,
    width: u32,
    height: u32,
    format: &'a str,
}

fn parse_asset_ref(reference: &str) -> Option<AssetParts<'_>> {
    let rest = reference.strip_prefix("image-")?;
    let (rest, format) = rest.rsplit_once('-')?;
    let (id, dimensions) = rest.rsplit_once('-')?;
    let (width, height) = dimensions.split_once('x')?;

    if id.is_empty() || format.is_empty() {
        return None;
    }

    Some(AssetParts { id, width: width.parse().ok()?, height: height.parse().ok()?, format })
}

#[cfg(test)]
#[path = "image_test.rs"]
mod tests;
