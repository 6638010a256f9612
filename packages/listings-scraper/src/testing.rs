//! Test doubles for the fetch and prompt seams.
//!
//! Useful for driving the orchestrator without network access or a terminal.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{Result, ScrapeError};
use crate::fetcher::PageFetcher;
use crate::prompt::{parse_page_count, PageCountPrompter};

/// Fetcher that serves canned markup by URL.
///
/// URLs with no canned page, or marked with [`MockFetcher::fail_on`], return
/// a transport error. Clones share state so calls can be inspected after the
/// fetcher has been moved into an orchestrator.
///
/// ```rust
/// use listings_scraper::testing::MockFetcher;
///
/// let fetcher = MockFetcher::new()
///     .with_page("https://example.org/list", "<ul><li><h3>Job</h3></li></ul>");
/// ```
#[derive(Clone, Default)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    failures: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `markup` for `url`, replacing any previous page.
    pub fn add_page(&self, url: impl Into<String>, markup: impl Into<String>) {
        self.pages.write().unwrap().insert(url.into(), markup.into());
    }

    pub fn with_page(self, url: impl Into<String>, markup: impl Into<String>) -> Self {
        self.add_page(url, markup);
        self
    }

    /// Make fetches of `url` fail with a transport error.
    pub fn fail_on(self, url: impl Into<String>) -> Self {
        self.failures.write().unwrap().insert(url.into());
        self
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls.write().unwrap().push(url.to_string());

        if self.failures.read().unwrap().contains(url) {
            return Err(ScrapeError::transport(url, "simulated connection reset"));
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::transport(url, "HTTP 404 Not Found"))
    }
}

/// Prompter that answers with a fixed string, validated like real input.
#[derive(Clone)]
pub struct ScriptedPrompter {
    answer: String,
    asked: Arc<RwLock<usize>>,
}

impl ScriptedPrompter {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            asked: Arc::new(RwLock::new(0)),
        }
    }

    /// Number of times the prompt was shown.
    pub fn times_asked(&self) -> usize {
        *self.asked.read().unwrap()
    }
}

impl PageCountPrompter for ScriptedPrompter {
    fn prompt_page_count(&mut self) -> Result<u32> {
        *self.asked.write().unwrap() += 1;
        parse_page_count(&self.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_serves_and_records() {
        let fetcher = MockFetcher::new().with_page("https://a.test/1", "one");
        let shared = fetcher.clone();

        assert_eq!(fetcher.fetch("https://a.test/1").await.unwrap(), "one");
        assert!(fetcher.fetch("https://a.test/2").await.unwrap_err().is_transport());
        assert_eq!(shared.calls(), vec!["https://a.test/1", "https://a.test/2"]);
    }

    #[tokio::test]
    async fn test_mock_fetcher_failure_overrides_page() {
        let fetcher = MockFetcher::new()
            .with_page("https://a.test/1", "one")
            .fail_on("https://a.test/1");

        assert!(fetcher.fetch("https://a.test/1").await.unwrap_err().is_transport());
    }

    #[test]
    fn test_scripted_prompter_counts_questions() {
        let mut prompter = ScriptedPrompter::new("4");
        assert_eq!(prompter.prompt_page_count().unwrap(), 4);
        assert_eq!(prompter.times_asked(), 1);
    }
}
