//! Paginated job-listing scraper.
//!
//! Fetches each page of a listing search, pulls out one [`JobRecord`] per
//! titled `<li>`, and writes the combined collection as a JSON array.
//!
//! # Usage
//!
//! ```rust,ignore
//! use listings_scraper::{HttpFetcher, ScrapeOrchestrator, ScraperConfig};
//!
//! let config = ScraperConfig::from_env()?;
//! let fetcher = HttpFetcher::new(&config)?;
//! let summary = ScrapeOrchestrator::new(config, fetcher).run().await?;
//! println!("{} records", summary.records);
//! ```
//!
//! # Modules
//!
//! - [`fetcher`] - page retrieval (`PageFetcher`, `HttpFetcher`)
//! - [`extractor`] - markup to records
//! - [`pagination`] - page-count detection and page URLs
//! - [`prompt`] - operator page-count prompt
//! - [`orchestrator`] - the run loop
//! - [`persist`] - JSON output
//! - [`testing`] - mock fetcher and scripted prompter

pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod orchestrator;
pub mod pagination;
pub mod persist;
pub mod prompt;
pub mod testing;
pub mod types;

pub use config::{LinkPolicy, PageCountMode, ScraperConfig};
pub use error::{Result, ScrapeError};
pub use extractor::{extract_records, RecordExtractor};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use orchestrator::ScrapeOrchestrator;
pub use pagination::{page_url, resolve_total_pages};
pub use prompt::{parse_page_count, LinePrompter, PageCountPrompter, TerminalPrompter};
pub use types::{JobListings, JobRecord, RunState, RunSummary};
