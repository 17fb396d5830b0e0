//! Configuration for the aniview SSG build.

use std::path::PathBuf;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub site: SiteConfig,
    pub build: BuildConfig,
    pub data: DataConfig,
    pub dev: DevConfig,
}

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    pub base_url: String,
    pub author: String,
}

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// JSON catalog the derived datasets are read from.
    pub data_file: PathBuf,
    /// Directories under `input_dir` copied into the output tree verbatim.
    pub passthrough: Vec<String>,
}

/// Derived dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub popular_count: usize,
    pub recommended_count: usize,
}

/// Development configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevConfig {
    pub port: u16,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Aniview".to_string(),
            description: "Browse, rank and discover shows".to_string(),
            base_url: "https://aniview.example".to_string(),
            author: "Aniview Team".to_string(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("src"),
            output_dir: PathBuf::from("dist"),
            data_file: PathBuf::from("src/_data/posts.json"),
            passthrough: vec![
                "assets".to_string(),
                "css".to_string(),
                "js".to_string(),
            ],
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            popular_count: 10,
            recommended_count: 12,
        }
    }
}

impl Default for DevConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

impl AppConfig {
    /// Load configuration from file
    /// Supports TOML, YAML, and JSON formats
    pub fn from_file(path: &str) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::with_name(path))
            .build()?;

        let config = builder.try_deserialize::<AppConfig>()?;
        Ok(config)
    }

    /// Load configuration with optional file override
    /// Falls back to default if file doesn't exist
    pub fn load_or_default(config_path: Option<&str>) -> Result<Self> {
        match config_path {
            Some(path) if std::path::Path::new(path).exists() => Self::from_file(path),
            Some(path) => {
                tracing::warn!("Config file {} not found, using defaults", path);
                Ok(Self::default())
            }
            None => {
                // Try to find config file in common locations
                for path in &["config.toml", "config.yaml", "config.yml", "config.json"] {
                    if std::path::Path::new(path).exists() {
                        return Self::from_file(path);
                    }
                }
                tracing::info!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}
