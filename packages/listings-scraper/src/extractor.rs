//! Job record extraction from listing-page markup.
//!
//! Every `<li>` in the document is a candidate. Only items with a non-blank
//! `<h3>` become records; navigation, ads and empty containers fall out.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::config::{LinkPolicy, DEFAULT_ORIGIN};
use crate::types::JobRecord;

lazy_static! {
    static ref LIST_ITEM: Selector = Selector::parse("li").unwrap();
    static ref TITLE: Selector = Selector::parse("h3").unwrap();
    static ref LOCATION: Selector = Selector::parse(".location").unwrap();
    static ref DESCRIPTION: Selector = Selector::parse("p").unwrap();
    static ref LINK: Selector = Selector::parse("a").unwrap();
}

/// Turns one page of markup into job records.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    origin: String,
    link_policy: LinkPolicy,
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN, LinkPolicy::default())
    }
}

impl RecordExtractor {
    pub fn new(origin: impl Into<String>, link_policy: LinkPolicy) -> Self {
        Self {
            origin: origin.into(),
            link_policy,
        }
    }

    /// Extract all titled list items, in document order.
    pub fn extract(&self, markup: &str) -> Vec<JobRecord> {
        let document = Html::parse_document(markup);
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for item in document.select(&LIST_ITEM) {
            let title = descendant_text(&item, &TITLE);
            if title.is_empty() {
                skipped += 1;
                continue;
            }

            let href = item
                .select(&LINK)
                .next()
                .and_then(|a| a.value().attr("href"));

            records.push(JobRecord {
                title,
                location: descendant_text(&item, &LOCATION),
                description: descendant_text(&item, &DESCRIPTION),
                link: self.build_link(href),
            });
        }

        debug!(records = records.len(), skipped, "Extracted job records");
        records
    }

    fn build_link(&self, href: Option<&str>) -> String {
        match self.link_policy {
            LinkPolicy::Concatenate => format!("{}{}", self.origin, href.unwrap_or_default()),
            LinkPolicy::Resolve => href
                .and_then(|href| Url::parse(&self.origin).ok()?.join(href).ok())
                .map(|url| url.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Text of every descendant matching `selector`, joined and trimmed.
fn descendant_text(element: &ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Extract with the default origin and verbatim link concatenation.
pub fn extract_records(markup: &str) -> Vec<JobRecord> {
    RecordExtractor::default().extract(markup)
}
