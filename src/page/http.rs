// src/page/http.rs
// =============================================================================
// Fetches pages over HTTP.
//
// Key functionality:
// - One shared reqwest Client (connection pooling across all workers)
// - Request timeout and a limited redirect policy
// - Non-2xx responses are treated as failures
// - Failures are labelled (timeout, redirect loop, connection, ...) for the
//   debug log, but the search never stops because of them
//
// Threads vs async:
// - The search runs on plain OS threads, while reqwest is async
// - HttpFetcher keeps a handle to the tokio runtime it was created in
// - Each worker thread calls handle.block_on(...) to drive its own request,
//   so many requests are in flight at once, one per worker
//
// Rust concepts:
// - tokio::runtime::Handle: a cheap, cloneable reference to a running runtime
// - anyhow::Context: attach a human-readable message to an error
// =============================================================================

use super::PageFetcher;
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use std::time::Duration;
use tokio::runtime::Handle;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// Identify ourselves politely to the wiki
const USER_AGENT: &str = concat!("wiki-hops/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed [`PageFetcher`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    runtime: Handle,
}

impl HttpFetcher {
    /// Builds a fetcher bound to the current tokio runtime.
    ///
    /// Fails if called outside a runtime or if the HTTP client can't be built.
    pub fn new(timeout: Duration) -> Result<Self> {
        let runtime = Handle::try_current()
            .context("HttpFetcher must be created inside a tokio runtime")?;

        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, runtime })
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("{}: {}", describe_error(&e), e))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {}", response.status()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| anyhow!("{}: {}", describe_error(&e), e))?;
        Ok(html)
    }
}

impl PageFetcher for HttpFetcher {
    // Must not be called from inside an async task: block_on would panic
    fn fetch(&self, url: &str) -> Result<String> {
        self.runtime
            .block_on(self.fetch_page(url))
            .with_context(|| format!("Failed to fetch {}", url))
    }
}

// Short label for the kind of failure, used in debug output
fn describe_error(error: &reqwest::Error) -> &'static str {
    let error_string = error.to_string();

    if error.is_timeout() {
        "Request timed out"
    } else if error.is_redirect() {
        "Too many redirects"
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "Could not resolve hostname"
        } else {
            "Connection failed"
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "SSL certificate error"
    } else {
        "Request failed"
    }
}
