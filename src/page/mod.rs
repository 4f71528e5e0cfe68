// src/page/mod.rs
// =============================================================================
// The two things the search engine needs from the outside world:
//
// - PageFetcher: turn a URL into page content (network I/O)
// - LinkExtractor: turn page content into a list of article links (parsing)
//
// The engine only sees these traits. The real implementations live in the
// submodules, and tests swap in in-memory fakes.
//
// Submodules:
// - http: fetches pages with reqwest
// - html: extracts wiki article links with scraper
// =============================================================================

mod html;
mod http;

pub use html::ArticleLinkExtractor;
pub use http::{HttpFetcher, DEFAULT_TIMEOUT};

/// Fetches the raw content of a page.
///
/// Any failure (timeout, DNS, HTTP status) is returned as an error; the
/// search treats it as "this page has no links".
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> anyhow::Result<String>;
}

/// Pulls outbound article links out of page content, in document order.
///
/// Malformed content should yield an empty list rather than an error.
pub trait LinkExtractor: Send + Sync {
    fn extract(&self, content: &str) -> Vec<String>;
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `Send + Sync` on the traits?
//    - Every worker thread shares the same fetcher and extractor
//    - Sync means "safe to use through a shared reference from many threads"
//    - Send means "safe to move to another thread"
//
// 2. Why traits instead of calling reqwest directly?
//    - The search logic doesn't care where pages come from
//    - Tests can plug in a fake graph and run without a network
// -----------------------------------------------------------------------------
