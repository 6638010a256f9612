//! Drives a scrape run: page count, sequential fetch/extract, one final write.
//!
//! Output is all-or-nothing. Records only leave memory once every page has
//! been fetched and extracted; any failure before that leaves the previous
//! output file untouched.

use tracing::{debug, info};

use crate::config::{PageCountMode, ScraperConfig};
use crate::error::{Result, ScrapeError};
use crate::extractor::RecordExtractor;
use crate::fetcher::PageFetcher;
use crate::pagination::{page_url, resolve_total_pages};
use crate::persist::{to_pretty_json, write_listings};
use crate::prompt::{stdio_prompter, PageCountPrompter};
use crate::types::{JobListings, RunState, RunSummary};

pub struct ScrapeOrchestrator<F> {
    config: ScraperConfig,
    fetcher: F,
    extractor: RecordExtractor,
    prompter: Option<Box<dyn PageCountPrompter>>,
    state: RunState,
}

impl<F: PageFetcher> ScrapeOrchestrator<F> {
    pub fn new(config: ScraperConfig, fetcher: F) -> Self {
        let extractor = RecordExtractor::new(config.origin.clone(), config.link_policy);
        Self {
            config,
            fetcher,
            extractor,
            prompter: None,
            state: RunState::NotStarted,
        }
    }

    /// Answer the page-count question with `prompter` instead of stdin.
    pub fn with_prompter(mut self, prompter: Box<dyn PageCountPrompter>) -> Self {
        self.prompter = Some(prompter);
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Scrape every page and write the combined listings.
    pub async fn run(&mut self) -> Result<RunSummary> {
        match self.execute().await {
            Ok(summary) => {
                self.transition(RunState::Done);
                Ok(summary)
            }
            Err(e) => {
                self.transition(RunState::Failed);
                Err(e)
            }
        }
    }

    async fn execute(&mut self) -> Result<RunSummary> {
        self.transition(RunState::ResolvingPageCount);
        let (total_pages, mut first_page) = self.resolve_page_count().await?;
        info!(total_pages, mode = ?self.config.page_count, "Starting scrape");

        let mut listings = JobListings::new();
        for page in 1..=total_pages {
            let markup = match (page, first_page.take()) {
                (1, Some(markup)) => markup,
                _ => self.fetch_page(page).await?,
            };

            self.transition(RunState::ExtractingPage(page));
            let records = self.extractor.extract(&markup);
            info!(page, records = records.len(), "Scraped page");
            listings.append_page(records);
        }

        self.transition(RunState::Persisting);
        let json = to_pretty_json(&listings)?;
        info!("Scraped Job Listings:\n{}", json);

        write_listings(&self.config.output_path, &listings).await?;
        info!(
            records = listings.len(),
            "Job listings saved to {}",
            self.config.output_path.display()
        );

        Ok(RunSummary {
            pages_scraped: total_pages,
            records: listings.len(),
            output_path: self.config.output_path.clone(),
        })
    }

    /// Total page count, plus page 1's markup when it had to be fetched to
    /// find out.
    async fn resolve_page_count(&mut self) -> Result<(u32, Option<String>)> {
        let mode = self.config.page_count;
        match mode {
            PageCountMode::Auto => {
                let markup = self.fetch_page(1).await?;
                Ok((resolve_total_pages(&markup), Some(markup)))
            }
            PageCountMode::Prompt => {
                let prompter = self.prompter.get_or_insert_with(stdio_prompter);
                Ok((prompter.prompt_page_count()?, None))
            }
            PageCountMode::Fixed(0) => Err(ScrapeError::invalid_input(
                "0",
                "page count must be greater than zero",
            )),
            PageCountMode::Fixed(pages) => Ok((pages, None)),
        }
    }

    async fn fetch_page(&mut self, page: u32) -> Result<String> {
        self.transition(RunState::FetchingPage(page));
        let url = page_url(&self.config.base_url, &self.config.page_param, page);
        self.fetcher.fetch(&url).await
    }

    fn transition(&mut self, next: RunState) {
        debug!(from = %self.state, to = %next, "Run state");
        self.state = next;
    }
}
