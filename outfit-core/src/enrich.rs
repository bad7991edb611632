//! Attaches pictures to a recommendation. Lookup failures only cost the
//! affected item its pictures.

use std::collections::BTreeMap;

use crate::{model::ClothingRecommendation, service::ImageLookup};

/// Search text for an item: the first alternative, without remarks.
///
/// `"Shorts / Skirt (lightweight)"` becomes `"Shorts"`.
pub fn search_term(item: &str) -> &str {
    let first = item.split('/').next().unwrap_or(item);
    first.split('(').next().unwrap_or(first).trim()
}

/// Look up every distinct item once. Never fails.
pub async fn collect_images(
    lookup: &dyn ImageLookup,
    recommendation: &ClothingRecommendation,
) -> BTreeMap<String, Vec<String>> {
    let mut images = BTreeMap::new();

    for item in recommendation.all_items() {
        let query = search_term(item);
        let urls = match lookup.search(query).await {
            Ok(urls) => urls,
            Err(err) => {
                tracing::warn!("Image lookup failed for '{query}': {err}");
                Vec::new()
            }
        };
        images.insert(item.to_string(), urls);
    }

    images
}
