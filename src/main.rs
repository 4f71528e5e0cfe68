// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (progress goes to stderr)
// 3. Validate the configuration and build the fetcher/extractor
// 4. Run the search on a pool of worker threads
// 5. Print the path (or JSON) and exit with a proper code
//    (0 = goal found, 1 = not found, 2 = error)
// =============================================================================

mod cli;
mod error;
mod page;
mod search;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use error::ConfigError;
use page::{ArticleLinkExtractor, HttpFetcher};
use search::{SearchConfig, SearchResult};
use std::time::Duration;
use url::Url;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(result) if result.found => 0,
        Ok(_) => 1,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

async fn run(cli: Cli) -> Result<SearchResult> {
    let start_url = normalize_url(&cli.start_url, "start")?;
    let goal_url = normalize_url(&cli.goal, "goal")?;
    let config = SearchConfig::new(&start_url, &goal_url, cli.max_hops, cli.workers)?;

    let fetcher = HttpFetcher::new(Duration::from_secs(cli.timeout))?;
    let extractor = ArticleLinkExtractor::for_site(&config.start_url)?;

    log::info!("🔍 Searching from: {}", config.start_url);
    log::info!("🎯 Goal: {}", config.goal_url);

    // The workers block on network I/O, so keep them off the async threads
    let search_config = config.clone();
    let result = tokio::task::spawn_blocking(move || {
        search::run_search(&search_config, &fetcher, &extractor)
    })
    .await
    .context("Search workers stopped unexpectedly")?;

    print_result(&result, &config, cli.json)?;
    Ok(result)
}

// Canonical form, so the goal compares equal to extracted links
fn normalize_url(raw: &str, field: &'static str) -> Result<String, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::EmptyUrl { field });
    }
    Url::parse(raw)
        .map(|url| url.to_string())
        .map_err(|e| ConfigError::invalid_url(raw, e))
}

fn print_result(result: &SearchResult, config: &SearchConfig, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(result)?;
        println!("{}", json_output);
    } else if result.found {
        println!("✅ Path to goal page: {}", result.path.join(" / "));
        println!("   {} hop(s)", result.hops());
    } else {
        println!("❌ Goal not found within {} hops.", config.max_hops);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(
            normalize_url(" https://en.wikipedia.org/wiki/Rust ", "start").unwrap(),
            "https://en.wikipedia.org/wiki/Rust"
        );
        assert_eq!(
            normalize_url("HTTPS://EN.wikipedia.org", "start").unwrap(),
            "https://en.wikipedia.org/"
        );
        assert!(normalize_url("wiki/Rust", "start").is_err());
        assert_eq!(
            normalize_url("  ", "goal"),
            Err(ConfigError::EmptyUrl { field: "goal" })
        );
    }
}
