//! Catalog loading and the show content model.
//!
//! The catalog is a JSON document with a top-level `posts` array. A missing
//! file, malformed JSON or missing `posts` field degrades to an empty list
//! instead of failing the build.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::Result;

/// A scalar that may arrive as text or as a number in the source JSON.
///
/// The catalog is hand-edited, so fields like `views` and `year` show up
/// both ways ("1.2K" next to 2013). The number keeps its JSON
/// representation so an integer in the source stays an integer on the way
/// back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Number(serde_json::Number),
    Text(String),
}

impl TextOrNumber {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn number(value: impl Into<serde_json::Number>) -> Self {
        Self::Number(value.into())
    }
}

/// One entry of the source catalog.
///
/// Every field except `title` is optional; unknown fields are preserved
/// verbatim so the template layer never loses data the pipeline does not
/// model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(default)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_episodes: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<TextOrNumber>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<TextOrNumber>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentItem {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Shape of the on-disk catalog document.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    posts: Vec<ContentItem>,
}

/// Handle to the on-disk catalog.
///
/// Every load re-reads the file. The build is not latency-sensitive and the
/// file may be edited between invocations, so nothing is cached.
#[derive(Debug, Clone)]
pub struct Catalog {
    data_file: PathBuf,
}

impl Catalog {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Read and parse the catalog file.
    pub fn load(&self) -> Result<Vec<ContentItem>> {
        let raw = std::fs::read_to_string(&self.data_file)?;
        let file: CatalogFile = serde_json::from_str(&raw)?;
        Ok(file.posts)
    }

    /// Read the catalog, degrading to an empty list on any error.
    pub fn load_or_empty(&self) -> Vec<ContentItem> {
        match self.load() {
            Ok(posts) => posts,
            Err(e) => {
                warn!(
                    path = %self.data_file.display(),
                    error = %e,
                    "failed to load catalog, using empty list"
                );
                Vec::new()
            }
        }
    }
}
