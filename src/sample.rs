//! Random sampling and the recommended-item projection.
//!
//! Recommendations are a uniform random draw (without replacement) from the
//! catalog, with every optional field given a concrete default so templates
//! never have to guard against holes.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{ContentItem, TextOrNumber};

/// How many items `recommendedShows` exposes by default.
pub const DEFAULT_RECOMMENDED_COUNT: usize = 12;

const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/300x450?text=No+Image";
const DEFAULT_TYPE: &str = "TV";
const DEFAULT_EPISODE_COUNT: u32 = 12;
const DEFAULT_DURATION: &str = "24m";
const DEFAULT_YEAR: &str = "2023";
const DEFAULT_GENRE: &str = "Action";
const DEFAULT_RATING: f64 = 7.0;
const DEFAULT_VIEWS: &str = "500";

/// A catalog item with every optional field defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedItem {
    pub title: String,
    pub poster: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub episode_count: u32,
    pub duration: String,
    pub year: TextOrNumber,
    pub genres: Vec<String>,
    pub rating: f64,
    pub views: TextOrNumber,
}

impl From<ContentItem> for RecommendedItem {
    fn from(item: ContentItem) -> Self {
        Self {
            title: item.title,
            poster: item
                .poster
                .or(item.thumbnail)
                .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string()),
            kind: item.kind.unwrap_or_else(|| DEFAULT_TYPE.to_string()),
            episode_count: item
                .total_episodes
                .or(item.episode_count)
                .unwrap_or(DEFAULT_EPISODE_COUNT),
            duration: item.duration.unwrap_or_else(|| DEFAULT_DURATION.to_string()),
            year: item.year.unwrap_or_else(|| TextOrNumber::text(DEFAULT_YEAR)),
            genres: item.genres.unwrap_or_else(|| vec![DEFAULT_GENRE.to_string()]),
            rating: item.rating.unwrap_or(DEFAULT_RATING),
            views: item.views.unwrap_or_else(|| TextOrNumber::text(DEFAULT_VIEWS)),
        }
    }
}

/// Shuffle uniformly and keep the first `n` elements.
pub fn shuffle_take<T, R: Rng>(mut items: Vec<T>, n: usize, rng: &mut R) -> Vec<T> {
    items.shuffle(rng);
    items.truncate(n);
    items
}

/// Draw up to `n` random items and apply the defaulting projection.
pub fn random_sample(items: Vec<ContentItem>, n: usize) -> Vec<RecommendedItem> {
    random_sample_with(items, n, &mut rand::thread_rng())
}

/// Seedable variant of [`random_sample`].
pub fn random_sample_with<R: Rng>(
    items: Vec<ContentItem>,
    n: usize,
    rng: &mut R,
) -> Vec<RecommendedItem> {
    shuffle_take(items, n, rng)
        .into_iter()
        .map(RecommendedItem::from)
        .collect()
}
