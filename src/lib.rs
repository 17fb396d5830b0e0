//! Aniview SSG - build pipeline for a show-catalog static site
//!
//! This library wires the pieces the template layer builds on: passthrough
//! asset copies, a registry of template filters, and global datasets
//! ("popular" and "recommended") derived from a JSON catalog.

pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod filters;
pub mod rank;
pub mod sample;
pub mod slug;
pub mod views;

pub use catalog::{Catalog, ContentItem, TextOrNumber};
pub use config::AppConfig;
pub use data::{DataProviders, GlobalDataRegistry};
pub use error::{Result, SsgError};
pub use filters::FilterRegistry;
pub use sample::RecommendedItem;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

/// Main site builder struct
pub struct Site {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub config: AppConfig,
}

impl Site {
    /// Create a new Site with the given input and output directories
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            config: AppConfig::default(),
        }
    }

    /// Create a Site with directories taken from the configuration
    pub fn from_config(config: AppConfig) -> Self {
        Self {
            input_dir: config.build.input_dir.clone(),
            output_dir: config.build.output_dir.clone(),
            config,
        }
    }

    /// Set the full app configuration
    pub fn with_app_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// The filter table exposed to the template layer
    pub fn filters(&self) -> FilterRegistry {
        FilterRegistry::with_builtins()
    }

    /// The global data providers derived from the catalog
    pub fn providers(&self) -> DataProviders {
        DataProviders::new(Catalog::new(self.config.build.data_file.clone())).with_counts(
            self.config.data.popular_count,
            self.config.data.recommended_count,
        )
    }

    /// The global data table exposed to the template layer
    pub fn globals(&self) -> GlobalDataRegistry {
        GlobalDataRegistry::with_providers(self.providers())
    }

    /// Build the site: copy passthrough assets and materialize datasets
    pub fn build(&self) -> Result<()> {
        info!(
            "Building site from {} to {}",
            self.input_dir.display(),
            self.output_dir.display()
        );

        std::fs::create_dir_all(&self.output_dir)?;

        self.copy_passthrough()?;
        self.write_datasets()?;

        info!("Site build complete!");
        Ok(())
    }

    /// Copy each configured passthrough directory into the output tree
    fn copy_passthrough(&self) -> Result<()> {
        for name in &self.config.build.passthrough {
            let source = self.input_dir.join(name);
            if !source.exists() {
                debug!(dir = %source.display(), "passthrough source missing, skipping");
                continue;
            }

            let dest = self.output_dir.join(name);
            copy_dir(&source, &dest)?;
            info!(
                "Copied passthrough {} to {}",
                source.display(),
                dest.display()
            );
        }
        Ok(())
    }

    /// Write the derived datasets as JSON for the template stage
    fn write_datasets(&self) -> Result<()> {
        let data_dir = self.output_dir.join("data");
        std::fs::create_dir_all(&data_dir)?;

        let providers = self.providers();
        write_json(&data_dir.join("posts.json"), &providers.all_posts())?;
        write_json(&data_dir.join("popular.json"), &providers.popular_shows())?;
        write_json(
            &data_dir.join("recommended.json"),
            &providers.recommended_shows(),
        )?;

        Ok(())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    info!("Generated: {}", path.display());
    Ok(())
}

/// Copy a directory recursively
fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    for entry in walkdir::WalkDir::new(src) {
        let entry = entry?;
        let relative = match entry.path().strip_prefix(src) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let dest = dst.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest)?;
        } else {
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &dest)?;
        }
    }

    Ok(())
}
