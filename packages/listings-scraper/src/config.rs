//! Run configuration.
//!
//! Defaults reproduce the auto-paginated scrape of the marocannonces IT
//! category. Environment variables (optionally from `.env`) override them,
//! and the binary layers CLI flags on top.

use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Category search page that the scraper starts from.
pub const DEFAULT_BASE_URL: &str = "https://www.marocannonces.com/maroc/offres-emploi-domaine-informatique-multimedia-internet-casablanca-b309-t563.html?f_3=Informatique+%2F+Multim%C3%A9dia+%2F+Internet";

/// Prefix prepended to every extracted job href.
pub const DEFAULT_ORIGIN: &str = "https://www.marocannonces.com/";

pub const DEFAULT_OUTPUT: &str = "job_listings.json";

/// Query parameter used when the page count comes from pagination markup.
pub const AUTO_PAGE_PARAM: &str = "page";

/// Query parameter used when the operator supplies the page count.
///
/// Differs from [`AUTO_PAGE_PARAM`]; almost certainly a typo upstream, kept
/// so both presets hit the same URLs as before.
pub const MANUAL_PAGE_PARAM: &str = "pge";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// How the total number of pages is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCountMode {
    /// Read it from the first page's pagination control
    Auto,
    /// Ask the operator once on the terminal
    Prompt,
    /// Use a count given up front
    Fixed(u32),
}

/// How an extracted href is turned into an absolute link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkPolicy {
    /// `origin + href`, verbatim. `/offre/1` becomes `...com//offre/1`.
    #[default]
    Concatenate,
    /// Resolve the href against the origin with URL-join semantics
    Resolve,
}

impl std::str::FromStr for LinkPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concatenate" | "concat" => Ok(Self::Concatenate),
            "resolve" | "join" => Ok(Self::Resolve),
            other => bail!("unknown link policy: {other}"),
        }
    }
}

/// Configuration for one scrape run.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: String,
    pub origin: String,
    pub output_path: PathBuf,
    pub page_param: String,
    pub page_count: PageCountMode,
    pub link_policy: LinkPolicy,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self::auto_pagination()
    }
}

impl ScraperConfig {
    /// Page count read from pagination markup, pages addressed with `page=`.
    pub fn auto_pagination() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            page_param: AUTO_PAGE_PARAM.to_string(),
            page_count: PageCountMode::Auto,
            link_policy: LinkPolicy::Concatenate,
            request_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Page count asked from the operator, pages addressed with `pge=`.
    pub fn manual_pagination() -> Self {
        Self {
            page_param: MANUAL_PAGE_PARAM.to_string(),
            page_count: PageCountMode::Prompt,
            ..Self::auto_pagination()
        }
    }

    /// Load overrides from environment variables on top of the auto preset.
    pub fn from_env() -> Result<Self> {
        Self::auto_pagination().apply_env()
    }

    /// Apply `SCRAPER_*` environment overrides to this config.
    pub fn apply_env(self) -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let mut config = self;

        if let Ok(base_url) = env::var("SCRAPER_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(origin) = env::var("SCRAPER_ORIGIN") {
            config.origin = origin;
        }
        if let Ok(output) = env::var("SCRAPER_OUTPUT") {
            config.output_path = PathBuf::from(output);
        }
        if let Ok(param) = env::var("SCRAPER_PAGE_PARAM") {
            config.page_param = param;
        }
        if let Ok(secs) = env::var("SCRAPER_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .context("SCRAPER_TIMEOUT_SECS must be a valid number")?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(user_agent) = env::var("SCRAPER_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Ok(policy) = env::var("SCRAPER_LINK_POLICY") {
            config.link_policy = policy
                .parse()
                .context("SCRAPER_LINK_POLICY must be 'concatenate' or 'resolve'")?;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_page_count(mut self, mode: PageCountMode) -> Self {
        self.page_count = mode;
        self
    }

    pub fn with_link_policy(mut self, policy: LinkPolicy) -> Self {
        self.link_policy = policy;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ_only_in_pagination() {
        let auto = ScraperConfig::auto_pagination();
        let manual = ScraperConfig::manual_pagination();

        assert_eq!(auto.page_param, "page");
        assert_eq!(auto.page_count, PageCountMode::Auto);
        assert_eq!(manual.page_param, "pge");
        assert_eq!(manual.page_count, PageCountMode::Prompt);
        assert_eq!(auto.base_url, manual.base_url);
        assert_eq!(auto.output_path, manual.output_path);
    }

    #[test]
    fn test_link_policy_from_str() {
        assert_eq!("resolve".parse::<LinkPolicy>().unwrap(), LinkPolicy::Resolve);
        assert_eq!(
            " Concatenate ".parse::<LinkPolicy>().unwrap(),
            LinkPolicy::Concatenate
        );
        assert!("normalize".parse::<LinkPolicy>().is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ScraperConfig::default()
            .with_output_path("/tmp/out.json")
            .with_page_count(PageCountMode::Fixed(4))
            .with_link_policy(LinkPolicy::Resolve);

        assert_eq!(config.output_path, PathBuf::from("/tmp/out.json"));
        assert_eq!(config.page_count, PageCountMode::Fixed(4));
        assert_eq!(config.link_policy, LinkPolicy::Resolve);
    }
}
