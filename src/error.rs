//! Error types for fetching card scans.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate error type.
pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Error, Debug)]
pub enum FetchError {
    /// Requested deck is not in the catalog
    #[error("Deck {0} not found in catalog")]
    DeckNotFound(u32),

    /// Catalog content is inconsistent (e.g. duplicate deck ids)
    #[error("Invalid deck catalog: {0}")]
    Catalog(String),

    #[error("Failed to parse deck catalog JSON: {0}")]
    CatalogJson(#[from] serde_json::Error),

    #[error("Failed to read deck catalog {}: {source}", path.display())]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Network level failure (DNS, connection, body read)
    #[error("HTTP request failed for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// Server answered with a non-success status
    #[error("HTTP {status} for URL: {url}")]
    Status { url: String, status: u16 },

    /// Page markup has no main image or the image has no source
    #[error("No <img id=\"theMainImage\"> with a src attribute on {url}")]
    Extraction { url: String },

    #[error("Failed to write {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Downloaded bytes failed the decode check
    #[error("Corrupted image detected: {reason} - URL: {url}")]
    InvalidImage { url: String, reason: String },

    /// Some cards failed under the keep-going policy
    #[error("{failed} of {total} cards failed for deck {deck}")]
    Incomplete {
        deck: u32,
        failed: usize,
        total: usize,
    },

    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },
}

impl FetchError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}
