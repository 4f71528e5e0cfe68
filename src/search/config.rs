// src/search/config.rs
// =============================================================================
// Run configuration for a search.
//
// The values are checked once, here, before any shared structure is built.
// After that the workers can trust them completely.
//
// Policy:
// - Blank start/goal URLs are rejected (ConfigError::EmptyUrl)
// - Worker count is clamped into 1..=available parallelism, with a warning
// - max_hops = 0 is allowed: only the start page is processed
// =============================================================================

use crate::error::ConfigError;
use std::num::NonZeroUsize;

/// Default hop budget, the classic "six degrees"
pub const DEFAULT_MAX_HOPS: usize = 6;

/// Validated settings for one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub start_url: String,
    pub goal_url: String,
    pub max_hops: usize,
    pub workers: usize,
}

impl SearchConfig {
    /// Builds a config, trimming URLs and clamping the worker count.
    pub fn new(
        start_url: &str,
        goal_url: &str,
        max_hops: usize,
        workers: usize,
    ) -> Result<Self, ConfigError> {
        let start_url = start_url.trim();
        let goal_url = goal_url.trim();

        if start_url.is_empty() {
            return Err(ConfigError::EmptyUrl { field: "start" });
        }
        if goal_url.is_empty() {
            return Err(ConfigError::EmptyUrl { field: "goal" });
        }

        Ok(Self {
            start_url: start_url.to_string(),
            goal_url: goal_url.to_string(),
            max_hops,
            workers: clamp_workers(workers, hardware_threads()),
        })
    }
}

/// Number of threads the machine can run in parallel (at least 1).
pub fn hardware_threads() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Half the hardware threads, never less than one.
pub fn default_workers() -> usize {
    (hardware_threads() / 2).max(1)
}

fn clamp_workers(requested: usize, limit: usize) -> usize {
    let limit = limit.max(1);
    let clamped = requested.clamp(1, limit);
    if clamped != requested {
        log::warn!(
            "Requested {} workers, using {} (allowed range is 1..={})",
            requested,
            clamped,
            limit
        );
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_workers_clamped_to_one() {
        assert_eq!(clamp_workers(0, 8), 1);
    }

    #[test]
    fn test_too_many_workers_clamped_to_limit() {
        assert_eq!(clamp_workers(64, 8), 8);
        assert_eq!(clamp_workers(5, 8), 5);
    }

    #[test]
    fn test_new_trims_and_keeps_hops() {
        let config = SearchConfig::new("  A ", "D\n", 0, 1).unwrap();
        assert_eq!(config.start_url, "A");
        assert_eq!(config.goal_url, "D");
        assert_eq!(config.max_hops, 0);
        assert_eq!(config.workers, 1);
    }

    #[test]
    fn test_blank_urls_rejected() {
        assert_eq!(
            SearchConfig::new(" ", "D", 6, 1),
            Err(ConfigError::EmptyUrl { field: "start" })
        );
        assert_eq!(
            SearchConfig::new("A", "", 6, 1),
            Err(ConfigError::EmptyUrl { field: "goal" })
        );
    }

    #[test]
    fn test_default_workers_is_positive() {
        assert!(default_workers() >= 1);
        assert!(default_workers() <= hardware_threads());
    }
}
