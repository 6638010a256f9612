//! Scraped listing records and the per-run collection.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One job advertisement extracted from a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "jobTitle")]
    pub title: String,
    pub location: String,
    #[serde(rename = "jobDescription")]
    pub description: String,
    #[serde(rename = "jobLink")]
    pub link: String,
}

impl JobRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            location: String::new(),
            description: String::new(),
            link: String::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }
}

/// Records accumulated across every page of a run, in fetch order.
///
/// Duplicates are kept. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobListings(Vec<JobRecord>);

impl JobListings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page's records, preserving their order.
    pub fn append_page(&mut self, records: Vec<JobRecord>) {
        self.0.extend(records);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.0
    }
}

impl From<Vec<JobRecord>> for JobListings {
    fn from(records: Vec<JobRecord>) -> Self {
        Self(records)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub pages_scraped: u32,
    pub records: usize,
    pub output_path: PathBuf,
}

/// Where a run currently is. Any state may move to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    ResolvingPageCount,
    FetchingPage(u32),
    ExtractingPage(u32),
    Persisting,
    Done,
    Failed,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::ResolvingPageCount => write!(f, "resolving_page_count"),
            Self::FetchingPage(n) => write!(f, "fetching_page({n})"),
            Self::ExtractingPage(n) => write!(f, "extracting_page({n})"),
            Self::Persisting => write!(f, "persisting"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_with_source_keys() {
        let record = JobRecord::new("Dev Rust")
            .with_location("Casablanca")
            .with_description("CDI")
            .with_link("https://www.marocannonces.com//offre/1");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["jobTitle"], "Dev Rust");
        assert_eq!(value["location"], "Casablanca");
        assert_eq!(value["jobDescription"], "CDI");
        assert_eq!(value["jobLink"], "https://www.marocannonces.com//offre/1");
        assert_eq!(value.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_listings_keep_page_order_and_duplicates() {
        let mut listings = JobListings::new();
        listings.append_page(vec![JobRecord::new("a"), JobRecord::new("b")]);
        listings.append_page(vec![JobRecord::new("a")]);

        let titles: Vec<&str> = listings.records().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_listings_serialize_as_array() {
        let listings = JobListings::from(vec![JobRecord::new("x")]);
        let json = serde_json::to_string(&listings).unwrap();
        assert!(json.starts_with('['));
        assert!(json.ends_with(']'));
    }
}
