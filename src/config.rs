use crate::model::{ConfigError, SeriesCatalog, SeriesDefinition};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.bls.gov/publicAPI/v2/timeseries/data/";
pub const DEFAULT_ANCHOR: &str = "div.blog-grid";
pub const DEFAULT_RETAIL_IMAGE: &str =
    "https://images.unsplash.com/photo-1604719312566-8912e9227c6a?w=700&h=400&fit=crop";
pub const DEFAULT_OUTLOOK_IMAGE: &str = "images/usda-market-news.png";

#[derive(Debug, Clone, Deserialize)]
pub struct ReportLink {
    pub label: String,
    pub url: String,
}

/// A card whose content is fixed in configuration (company news and the like).
#[derive(Debug, Clone, Deserialize)]
pub struct StaticCard {
    pub title: String,
    pub meta: String,
    pub summary: String,
    /// Paragraph shown on the page; the summary is used when omitted.
    #[serde(default)]
    pub body: Option<String>,
    pub image: String,
    #[serde(default)]
    pub image_alt: String,
    #[serde(default)]
    pub image_class: Option<String>,
    pub updated: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    pub series: Vec<SeriesDefinition>,
    pub blog_path: PathBuf,
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
    #[serde(default = "default_anchor")]
    pub anchor_selector: String,
    #[serde(default = "default_retail_image")]
    pub retail_image: String,
    #[serde(default = "default_outlook_image")]
    pub outlook_image: String,
    #[serde(default)]
    pub report_links: Vec<ReportLink>,
    #[serde(default)]
    pub static_cards: Vec<StaticCard>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_anchor() -> String {
    DEFAULT_ANCHOR.to_string()
}

fn default_retail_image() -> String {
    DEFAULT_RETAIL_IMAGE.to_string()
}

fn default_outlook_image() -> String {
    DEFAULT_OUTLOOK_IMAGE.to_string()
}

impl AppConfig {
    pub fn catalog(&self) -> SeriesCatalog {
        SeriesCatalog::new(self.series.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Makes output paths absolute relative to the directory holding the config file.
    fn resolve_paths(&mut self, base: &Path) {
        if self.blog_path.is_relative() {
            self.blog_path = base.join(&self.blog_path);
        }
        if let Some(snapshot) = self.snapshot_path.as_mut() {
            if snapshot.is_relative() {
                *snapshot = base.join(&*snapshot);
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.series.is_empty() {
            return Err(ConfigError::NoSeries);
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

pub fn parse_config(content: &str, base: &Path) -> Result<AppConfig, ConfigError> {
    let mut config: AppConfig = serde_json::from_str(content)?;
    config.validate()?;
    config.resolve_paths(base);
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    parse_config(&content, base)
}
