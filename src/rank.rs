//! Ranking of catalog items by rating and normalized view count.

use std::cmp::Reverse;

use crate::catalog::ContentItem;
use crate::views::normalize_views;

/// How many items `popularShows` exposes by default.
pub const DEFAULT_POPULAR_COUNT: usize = 10;

/// A catalog item tagged with its normalized view count. Internal to
/// sorting; the derived count never reaches serialized output.
struct NormalizedItem {
    view_count: u64,
    item: ContentItem,
}

/// Take the top `n` items by normalized view count.
///
/// The sort is stable, so items with equal counts keep their input order.
pub fn top_by_views(items: Vec<ContentItem>, n: usize) -> Vec<ContentItem> {
    let mut normalized: Vec<NormalizedItem> = items
        .into_iter()
        .map(|item| NormalizedItem {
            view_count: normalize_views(item.views.as_ref()),
            item,
        })
        .collect();

    normalized.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    normalized.truncate(n);
    normalized.into_iter().map(|n| n.item).collect()
}

/// Sort items descending by normalized view count, in place.
pub fn sort_by_views(items: &mut [ContentItem]) {
    items.sort_by_cached_key(|item| Reverse(normalize_views(item.views.as_ref())));
}

/// Sort items descending by rating, in place. Missing ratings count as 0.
pub fn sort_by_rating(items: &mut [ContentItem]) {
    items.sort_by(|a, b| {
        let a_rating = a.rating.unwrap_or(0.0);
        let b_rating = b.rating.unwrap_or(0.0);
        b_rating.total_cmp(&a_rating)
    });
}
