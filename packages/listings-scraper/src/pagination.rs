//! Page-count detection and page URL construction.
//!
//! Detection reads the last entry of the site's `.pagination` list. It only
//! understands that one markup shape, so anything unexpected falls back to a
//! single page rather than failing the run.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};

lazy_static! {
    static ref LAST_PAGE_LINK: Selector = Selector::parse(".pagination li:last-child a").unwrap();
    static ref PAGE_NUMBER: Regex = Regex::new(r"page=([0-9]+)").unwrap();
}

/// Total number of listing pages advertised by the first page. Always >= 1.
pub fn resolve_total_pages(markup: &str) -> u32 {
    let document = Html::parse_document(markup);

    let Some(href) = document
        .select(&LAST_PAGE_LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
    else {
        debug!("No pagination control found, assuming a single page");
        return 1;
    };

    let Some(digits) = PAGE_NUMBER.captures(href).and_then(|caps| caps.get(1)) else {
        debug!(href = %href, "Pagination link has no page number, assuming a single page");
        return 1;
    };

    match digits.as_str().parse::<u32>() {
        Ok(0) => {
            warn!(href = %href, "Pagination link points at page 0, assuming a single page");
            1
        }
        Ok(total) => {
            debug!(total, "Resolved total pages from pagination");
            total
        }
        Err(e) => {
            warn!(href = %href, error = %e, "Unusable page number, assuming a single page");
            1
        }
    }
}

/// URL for `page` (1-based). Page 1 is the bare base URL; later pages append
/// `&<param>=<page>`.
pub fn page_url(base_url: &str, param: &str, page: u32) -> String {
    if page <= 1 {
        base_url.to_string()
    } else {
        format!("{base_url}&{param}={page}")
    }
}
