//! Typed errors for the scraper library.
//!
//! Uses `thiserror` so the binary can match on the failure kind while
//! still wrapping everything in `anyhow` at the process boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a scrape run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Fetching a listing page failed (DNS, connection, HTTP status, timeout)
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// HTTP client could not be constructed
    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Operator supplied a page count that is not a positive integer
    #[error("invalid page count {input:?}: {reason}")]
    InvalidInput { input: String, reason: String },

    /// Reading the operator's answer from the terminal failed
    #[error("prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    /// Listings could not be encoded as JSON
    #[error("JSON encode error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Output file could not be written
    #[error("failed to write {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScrapeError {
    /// Build a transport error from any underlying cause.
    pub fn transport(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Transport {
            url: url.into(),
            source: source.into(),
        }
    }

    /// Build an invalid-input error for a rejected page count.
    pub fn invalid_input(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;
