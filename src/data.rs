//! Global data providers derived from the catalog.
//!
//! Providers are the template layer's entry points into the catalog. They
//! must never fail the build: any read or parse error is logged and an
//! empty sequence is returned instead.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use crate::catalog::{Catalog, ContentItem};
use crate::rank::{self, DEFAULT_POPULAR_COUNT};
use crate::sample::{self, RecommendedItem, DEFAULT_RECOMMENDED_COUNT};

/// Derives the global datasets from the catalog.
///
/// Every call re-reads the source file; nothing is cached across calls.
#[derive(Debug, Clone)]
pub struct DataProviders {
    catalog: Catalog,
    popular_count: usize,
    recommended_count: usize,
}

impl DataProviders {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            popular_count: DEFAULT_POPULAR_COUNT,
            recommended_count: DEFAULT_RECOMMENDED_COUNT,
        }
    }

    pub fn with_counts(mut self, popular: usize, recommended: usize) -> Self {
        self.popular_count = popular;
        self.recommended_count = recommended;
        self
    }

    /// Top shows by normalized view count.
    pub fn popular_shows(&self) -> Vec<ContentItem> {
        match self.catalog.load() {
            Ok(posts) => rank::top_by_views(posts, self.popular_count),
            Err(e) => {
                error!(error = %e, "error loading popular shows");
                Vec::new()
            }
        }
    }

    /// Uniform random draw from the catalog, fully defaulted.
    pub fn recommended_shows(&self) -> Vec<RecommendedItem> {
        match self.catalog.load() {
            Ok(posts) => sample::random_sample(posts, self.recommended_count),
            Err(e) => {
                error!(error = %e, "error loading recommended shows");
                Vec::new()
            }
        }
    }

    /// The raw catalog collection: unsorted, unfiltered.
    pub fn all_posts(&self) -> Vec<ContentItem> {
        self.catalog.load_or_empty()
    }
}

/// A registered global data provider.
pub type GlobalFn = Box<dyn Fn() -> Value + Send + Sync>;

/// Name-to-provider table the template layer resolves global data against.
#[derive(Default)]
pub struct GlobalDataRegistry {
    globals: HashMap<String, GlobalFn>,
}

impl GlobalDataRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry wired to the standard providers.
    pub fn with_providers(providers: DataProviders) -> Self {
        let providers = Arc::new(providers);
        let mut registry = Self::new();

        let p = Arc::clone(&providers);
        registry.register("popularShows", move || to_value(&p.popular_shows()));

        let p = Arc::clone(&providers);
        registry.register("recommendedShows", move || to_value(&p.recommended_shows()));

        let p = providers;
        registry.register("allPosts", move || to_value(&p.all_posts()));

        registry
    }

    /// Register a provider under a name, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, provider: impl Fn() -> Value + Send + Sync + 'static) {
        self.globals.insert(name.into(), Box::new(provider));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.globals.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.globals.keys().map(String::as_str).collect()
    }

    /// Invoke a provider by name.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.globals.get(name).map(|provider| provider())
    }
}

fn to_value<T: serde::Serialize>(items: &[T]) -> Value {
    serde_json::to_value(items).unwrap_or(Value::Array(Vec::new()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    fn catalog_with(contents: &str) -> (TempDir, Catalog) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, Catalog::new(path))
    }

    #[test]
    fn test_popular_shows_ranked() {
        let (_dir, catalog) = catalog_with(
            r#"{"posts": [
                {"title": "niche", "views": "900"},
                {"title": "hit", "views": "2.5M"}
            ]}"#,
        );

        let popular = DataProviders::new(catalog).popular_shows();
        assert_eq!(popular.len(), 2);
        assert_eq!(popular[0].title, "hit");
    }

    #[test]
    fn test_popular_shows_respects_count() {
        let posts: Vec<String> = (0..25)
            .map(|i| format!(r#"{{"title": "show-{i}", "views": "{i}00"}}"#))
            .collect();
        let (_dir, catalog) = catalog_with(&format!(r#"{{"posts": [{}]}}"#, posts.join(",")));

        let providers = DataProviders::new(catalog);
        assert_eq!(providers.popular_shows().len(), 10);
        assert_eq!(providers.clone().with_counts(3, 5).popular_shows().len(), 3);
    }

    #[test]
    fn test_providers_never_fail_on_missing_file() {
        let providers = DataProviders::new(Catalog::new("nope/posts.json"));
        assert!(providers.popular_shows().is_empty());
        assert!(providers.recommended_shows().is_empty());
        assert!(providers.all_posts().is_empty());
    }

    #[test]
    fn test_providers_never_fail_on_malformed_json() {
        let (_dir, catalog) = catalog_with("{broken");
        let providers = DataProviders::new(catalog);
        assert!(providers.popular_shows().is_empty());
        assert!(providers.recommended_shows().is_empty());
    }

    #[test]
    fn test_recommended_shows_defaulted() {
        let (_dir, catalog) = catalog_with(r#"{"posts": [{"title": "solo"}]}"#);
        let recommended = DataProviders::new(catalog).recommended_shows();
        assert_eq!(recommended.len(), 1);
        assert_eq!(recommended[0].kind, "TV");
        assert_eq!(recommended[0].rating, 7.0);
    }

    #[test]
    fn test_registry_exposes_standard_names() {
        let (_dir, catalog) = catalog_with(r#"{"posts": [{"title": "x", "views": "1K"}]}"#);
        let registry = GlobalDataRegistry::with_providers(DataProviders::new(catalog));

        for name in ["popularShows", "recommendedShows", "allPosts"] {
            let value = registry.get(name).unwrap();
            assert!(value.is_array(), "{name} should be an array");
        }
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_all_posts_raw_order() {
        let (_dir, catalog) = catalog_with(
            r#"{"posts": [
                {"title": "second-most-viewed", "views": "1K"},
                {"title": "most-viewed", "views": "1M"}
            ]}"#,
        );

        let posts = DataProviders::new(catalog).all_posts();
        assert_eq!(posts[0].title, "second-most-viewed");
    }
}
