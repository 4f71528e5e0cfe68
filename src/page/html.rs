// src/page/html.rs
// =============================================================================
// Extracts wiki article links from HTML pages.
//
// What counts as an article link:
// - An <a href="..."> whose href starts with "/wiki/"
// - ...and contains no ':' (that rules out namespaced pages like
//   "/wiki/Help:Contents", "/wiki/File:Foo.jpg", "/wiki/Special:Random")
//
// Kept links are resolved against the wiki's origin (e.g.
// "https://en.wikipedia.org") so they can be fetched and compared directly.
// Any "#section" fragment is dropped: it points into the same article.
//
// We use the `scraper` crate to parse HTML and the `url` crate to resolve
// the links.
// =============================================================================

use super::LinkExtractor;
use crate::error::ConfigError;
use anyhow::{anyhow, Result};
use scraper::{Html, Selector};
use url::Url;

const ARTICLE_PREFIX: &str = "/wiki/";

/// [`LinkExtractor`] for same-site wiki articles.
#[derive(Debug)]
pub struct ArticleLinkExtractor {
    origin: Url,
    anchors: Selector,
}

impl ArticleLinkExtractor {
    /// Creates an extractor for the wiki that `page_url` lives on.
    ///
    /// Example:
    ///   page_url = "https://en.wikipedia.org/wiki/Rust"
    ///   href "/wiki/Mozilla" -> "https://en.wikipedia.org/wiki/Mozilla"
    pub fn for_site(page_url: &str) -> Result<Self> {
        let parsed = Url::parse(page_url).map_err(|e| ConfigError::invalid_url(page_url, e))?;

        if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
            return Err(ConfigError::invalid_url(page_url, "URL has no host").into());
        }

        let origin = parsed
            .join("/")
            .map_err(|e| ConfigError::invalid_url(page_url, e))?;
        let anchors =
            Selector::parse("a[href]").map_err(|e| anyhow!("Invalid selector 'a[href]': {}", e))?;

        Ok(Self { origin, anchors })
    }

    fn resolve(&self, href: &str) -> Option<String> {
        if !href.starts_with(ARTICLE_PREFIX) || href.contains(':') {
            return None;
        }

        let href = href.split('#').next().unwrap_or(href);
        self.origin.join(href).ok().map(|url| url.to_string())
    }
}

impl LinkExtractor for ArticleLinkExtractor {
    fn extract(&self, content: &str) -> Vec<String> {
        let document = Html::parse_document(content);

        document
            .select(&self.anchors)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| self.resolve(href))
            .collect()
    }
}
