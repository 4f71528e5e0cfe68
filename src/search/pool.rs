// src/search/pool.rs
// =============================================================================
// Runs the search: a fixed pool of worker threads draining the frontier.
//
// Each worker loops through these states:
//
//   WAITING_FOR_WORK  frontier.take(); None means STOPPED
//   PROCESSING        fetch the page, extract its links
//   GOAL_CHECK        a link equal to the goal ends the whole search
//   EMITTING_EDGES    other links are recorded and offered one hop deeper
//
// Fetching and parsing happen with no lock held, so slow pages only slow down
// the worker that is handling them.
// =============================================================================

use super::config::SearchConfig;
use super::coordinator::{SearchCoordinator, SearchResult};
use super::frontier::{Claim, Frontier};
use crate::page::{LinkExtractor, PageFetcher};
use std::thread;

/// Searches from `config.start_url` for `config.goal_url`, blocking until
/// the goal is found or no pages are left within the hop budget.
pub fn run_search<F, E>(config: &SearchConfig, fetcher: &F, extractor: &E) -> SearchResult
where
    F: PageFetcher + ?Sized,
    E: LinkExtractor + ?Sized,
{
    if config.start_url == config.goal_url {
        log::info!("Start page is the goal page, nothing to search");
        return SearchResult {
            found: true,
            path: vec![config.start_url.clone()],
        };
    }

    let frontier = Frontier::new(config.max_hops);
    let coordinator = SearchCoordinator::new(&config.start_url);
    frontier.offer(&config.start_url, 0);

    log::info!(
        "Starting search with {} worker(s), max {} hop(s)",
        config.workers,
        config.max_hops
    );

    let processed: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = (0..config.workers)
            .map(|id| {
                let worker = Worker {
                    id,
                    config,
                    frontier: &frontier,
                    coordinator: &coordinator,
                    fetcher,
                    extractor,
                };
                s.spawn(move || worker.run())
            })
            .collect();

        // A worker that panicked processed nothing we can count
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or(0))
            .collect()
    });

    for (id, pages) in processed.iter().enumerate() {
        log::debug!("Worker {} processed {} page(s)", id, pages);
    }
    log::debug!("{} distinct page(s) admitted", frontier.admitted());

    coordinator.finish()
}

// Everything one worker thread needs, borrowed from run_search's stack
struct Worker<'a, F: ?Sized, E: ?Sized> {
    id: usize,
    config: &'a SearchConfig,
    frontier: &'a Frontier,
    coordinator: &'a SearchCoordinator,
    fetcher: &'a F,
    extractor: &'a E,
}

impl<F, E> Worker<'_, F, E>
where
    F: PageFetcher + ?Sized,
    E: LinkExtractor + ?Sized,
{
    // Returns how many pages this worker processed
    fn run(self) -> usize {
        let mut processed = 0;

        while let Some(claim) = self.frontier.take() {
            if self.coordinator.is_goal_found() {
                break;
            }
            processed += 1;

            if self.process(&claim) {
                // We found the goal: stop everyone, including us
                self.frontier.close();
                break;
            }
            // Dropping the claim here marks us idle again
        }

        processed
    }

    // Returns true if this worker declared the goal found
    fn process(&self, claim: &Claim<'_>) -> bool {
        log::info!("Worker {} processing URL: {}", self.id, claim.url);

        let content = match self.fetcher.fetch(&claim.url) {
            Ok(content) if !content.is_empty() => content,
            Ok(_) => {
                log::debug!("Worker {} got an empty page: {}", self.id, claim.url);
                return false;
            }
            Err(e) => {
                log::debug!("Worker {} failed to fetch {}: {:#}", self.id, claim.url, e);
                return false;
            }
        };

        let links = self.extractor.extract(&content);
        log::info!(
            "Worker {} found {} links on {}",
            self.id,
            links.len(),
            claim.url
        );

        let next_depth = claim.depth + 1;
        for link in &links {
            if self.coordinator.is_goal_found() {
                return false;
            }

            if *link == self.config.goal_url {
                if next_depth > self.config.max_hops {
                    continue;
                }
                self.coordinator.record_parent_if_absent(link, &claim.url);
                return self.coordinator.declare_goal_found(link, &claim.url);
            }

            if next_depth < self.config.max_hops {
                // The parent edge is committed by whichever offer admits the
                // link, so the path through it matches its queued depth
                self.frontier.offer_with(link, next_depth, || {
                    self.coordinator.record_parent_if_absent(link, &claim.url);
                });
            }
        }

        false
    }
}
