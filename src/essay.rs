//! Essay image aggregation
//!
//! Bundles one featured search for the essay topic with one search per
//! concept, all strictly sequential, under a total image budget. A failed
//! sub-search contributes an empty batch instead of aborting the run, so
//! the output degrades to "fewer images than requested" on partial
//! upstream failure.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::client::ImageApi;
use crate::types::{EssayImageSet, ImageSummary};

/// Featured images are always capped at this many results
const FEATURED_LIMIT: usize = 3;

/// Page size requested for the featured search (before the budget cap)
const FEATURED_PAGE_SIZE: usize = 5;

/// Preferred image style for essay searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    Photo,
    Illustration,
    #[default]
    Any,
}

/// Issue one essay sub-search against `/images/`.
///
/// Any adapter failure collapses to an empty result list so one bad
/// round trip never aborts the remaining searches.
async fn search_batch(
    api: &dyn ImageApi,
    query: &str,
    page_size: usize,
    style: ImageStyle,
) -> Vec<Value> {
    let mut params = vec![
        ("q", query.to_string()),
        ("page_size", page_size.to_string()),
        ("mature", "false".to_string()),
    ];
    if style == ImageStyle::Photo {
        params.push(("extension", "jpg,png".to_string()));
    }

    match api.get_json("/images/", &params).await {
        Ok(body) => body
            .get("results")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        Err(e) => {
            debug!(query, error = %e, "essay sub-search failed, continuing");
            Vec::new()
        }
    }
}

/// Collect a bounded set of images for an essay topic.
///
/// Searches run in a fixed order: the bare topic first (featured images),
/// then each concept in the order supplied as `"<concept> <topic>"`. The
/// budget check happens before each concept's search rather than after
/// each batch, so `total_images` can overshoot `max_images` by up to one
/// concept's worth of results.
pub async fn collect_essay_images(
    api: &dyn ImageApi,
    topic: &str,
    concepts: &[String],
    style: ImageStyle,
    max_images: usize,
) -> EssayImageSet {
    let mut set = EssayImageSet::new(topic);

    let featured = search_batch(api, topic, FEATURED_PAGE_SIZE.min(max_images), style).await;
    set.featured_images = featured
        .iter()
        .take(FEATURED_LIMIT)
        .map(ImageSummary::from_upstream)
        .collect();
    set.total_images += set.featured_images.len();

    let images_per_concept = if concepts.is_empty() {
        max_images
    } else {
        (max_images / concepts.len()).max(1)
    };

    for concept in concepts {
        if set.total_images >= max_images {
            break;
        }

        let query = format!("{concept} {topic}");
        let batch = search_batch(api, &query, images_per_concept, style).await;
        if batch.is_empty() {
            continue;
        }

        let images: Vec<ImageSummary> = batch
            .iter()
            .take(images_per_concept)
            .map(ImageSummary::from_upstream)
            .collect();
        set.total_images += images.len();
        set.images_by_concept.push((concept.clone(), images));
    }

    set
}
