// Core structs: SeriesCatalog, PriceRecord, Trend and the error types
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesDefinition {
    pub id: String,
    pub label: String,
}

/// Ordered set of series to request, with their display labels.
#[derive(Debug, Clone, Default)]
pub struct SeriesCatalog {
    series: Vec<SeriesDefinition>,
}

impl SeriesCatalog {
    pub fn new(series: Vec<SeriesDefinition>) -> Self {
        Self { series }
    }

    pub fn ids(&self) -> Vec<String> {
        self.series.iter().map(|s| s.id.clone()).collect()
    }

    /// Label for a series id, or the raw id when the source returns a series we never asked for.
    pub fn label_for<'a>(&'a self, id: &'a str) -> &'a str {
        self.series
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.label.as_str())
            .unwrap_or(id)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }
}

/// One value reported for a series, newest first as delivered by the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub value: f64,
    pub period: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub label: String,
    pub price: f64,
    /// `None` when the series had no earlier observation. `Some(0.0)` means unchanged.
    pub change: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl PriceRecord {
    pub fn direction(&self) -> Option<Direction> {
        match self.change {
            Some(c) if c > 0.0 => Some(Direction::Up),
            Some(c) if c < 0.0 => Some(Direction::Down),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Upward,
    Downward,
    Mixed,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    pub series_ids: Vec<String>,
    pub start_year: i32,
    pub end_year: i32,
}

/// What a single run changed on disk.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub document_path: PathBuf,
    pub snapshot_path: Option<PathBuf>,
    pub card_titles: Vec<String>,
    pub prices_available: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config must list at least one series")]
    NoSeries,
    #[error("timeout_seconds must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::InvalidResponse(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid anchor selector {selector:?}: {message}")]
    Selector { selector: String, message: String },
    #[error("anchor {0:?} not found in document")]
    AnchorNotFound(String),
    #[error("anchor {selector:?} matches {count} elements, expected one")]
    AnchorAmbiguous { selector: String, count: usize },
    #[error("anchor {0:?} is a void element and cannot hold content")]
    AnchorNotContainer(String),
    #[error("anchor {0:?} has no matching closing tag")]
    AnchorUnbalanced(String),
    #[error("anchor {0:?} cannot be mapped to the document source unambiguously")]
    AnchorMismatch(String),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("cannot write snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that aborts a run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("cannot access document {path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
