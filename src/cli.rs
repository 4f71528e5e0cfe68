// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Everything is a flag or a positional argument, so runs can be scripted.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the argument parser
// - default_value_t: typed default values for flags
// =============================================================================

use crate::page::DEFAULT_TIMEOUT;
use crate::search::{default_workers, DEFAULT_MAX_HOPS};
use clap::Parser;

/// The page we are trying to reach when no --goal is given
pub const DEFAULT_GOAL_URL: &str = "https://en.wikipedia.org/wiki/Adolf_Hitler";

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "wiki-hops",
    version,
    about = "Find a chain of wiki links from one article to another",
    long_about = "wiki-hops follows article links breadth-first, on several threads at once, \
                  until it reaches the goal article or runs out of hops."
)]
pub struct Cli {
    /// Article to start from (e.g., https://en.wikipedia.org/wiki/Rust)
    pub start_url: String,

    /// Article we are looking for
    #[arg(long, default_value = DEFAULT_GOAL_URL)]
    pub goal: String,

    /// Maximum number of links to follow from the start article
    #[arg(long, default_value_t = DEFAULT_MAX_HOPS)]
    pub max_hops: usize,

    /// Number of worker threads (clamped to the available parallelism)
    #[arg(short, long, default_value_t = default_workers())]
    pub workers: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Output the result as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    pub verbose: bool,
}
