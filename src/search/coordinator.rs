// src/search/coordinator.rs
// =============================================================================
// Owns the "how did we get here?" bookkeeping and the goal-found signal.
//
// - The parent map records, for every discovered page, the page where it was
//   FIRST seen. Later discoveries of the same page are ignored.
// - The goal flag flips from false to true exactly once. The worker that
//   flips it records the goal's parent edge and builds the path.
//
// Nothing outside this module can touch the map or the flag directly.
// =============================================================================

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Final outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Whether the goal page was reached
    pub found: bool,
    /// Start-to-goal path, empty when not found
    pub path: Vec<String>,
}

impl SearchResult {
    /// A result for a search that ran out of pages.
    pub fn not_found() -> Self {
        Self {
            found: false,
            path: Vec::new(),
        }
    }

    /// Number of links followed along the path.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

#[derive(Debug)]
pub struct SearchCoordinator {
    goal_found: AtomicBool,
    // None marks the start page
    parents: Mutex<HashMap<String, Option<String>>>,
    path: Mutex<Option<Vec<String>>>,
}

impl SearchCoordinator {
    /// Creates a coordinator whose parent chain ends at `start_url`.
    pub fn new(start_url: &str) -> Self {
        let mut parents = HashMap::new();
        parents.insert(start_url.to_string(), None);

        Self {
            goal_found: AtomicBool::new(false),
            parents: Mutex::new(parents),
            path: Mutex::new(None),
        }
    }

    /// Has any worker reached the goal yet?
    pub fn is_goal_found(&self) -> bool {
        self.goal_found.load(Ordering::Acquire)
    }

    /// Remembers that `child` was discovered on `parent`, unless `child`
    /// already has a parent. Returns true if this call set it.
    pub fn record_parent_if_absent(&self, child: &str, parent: &str) -> bool {
        let mut parents = lock(&self.parents);
        if parents.contains_key(child) {
            return false;
        }
        parents.insert(child.to_string(), Some(parent.to_string()));
        true
    }

    /// Flips the goal flag. Only the first caller wins and gets `true`; it
    /// commits the goal's parent edge and stores the reconstructed path.
    pub fn declare_goal_found(&self, goal_url: &str, discovered_from: &str) -> bool {
        if self
            .goal_found
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        self.record_parent_if_absent(goal_url, discovered_from);
        let path = self.reconstruct_path(goal_url);
        *lock(&self.path) = Some(path);
        true
    }

    /// Walks the parent map from `goal_url` back to the start and returns
    /// the pages in start-to-goal order.
    ///
    /// Stops early if a page repeats, so a damaged map can't loop forever.
    pub fn reconstruct_path(&self, goal_url: &str) -> Vec<String> {
        let parents = lock(&self.parents);
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(goal_url.to_string());

        while let Some(url) = current {
            if !seen.insert(url.clone()) {
                break;
            }
            current = parents.get(&url).cloned().flatten();
            path.push(url);
        }

        path.reverse();
        path
    }

    /// Produces the final result once every worker has stopped.
    pub fn finish(&self) -> SearchResult {
        match lock(&self.path).take() {
            Some(path) => SearchResult { found: true, path },
            None => SearchResult::not_found(),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_first_writer_wins() {
        let coordinator = SearchCoordinator::new("A");
        assert!(coordinator.record_parent_if_absent("B", "A"));
        assert!(!coordinator.record_parent_if_absent("B", "C"));
        assert_eq!(coordinator.reconstruct_path("B"), vec!["A", "B"]);
    }

    #[test]
    fn test_start_parent_never_overwritten() {
        let coordinator = SearchCoordinator::new("A");
        assert!(!coordinator.record_parent_if_absent("A", "B"));
        assert_eq!(coordinator.reconstruct_path("A"), vec!["A"]);
    }

    #[test]
    fn test_declare_goal_found_is_idempotent() {
        let coordinator = SearchCoordinator::new("A");
        coordinator.record_parent_if_absent("B", "A");
        coordinator.record_parent_if_absent("C", "A");

        assert!(coordinator.declare_goal_found("D", "B"));
        assert!(!coordinator.declare_goal_found("D", "C"));
        assert!(coordinator.is_goal_found());

        let result = coordinator.finish();
        assert!(result.found);
        assert_eq!(result.path, vec!["A", "B", "D"]);
        assert_eq!(result.hops(), 2);
    }

    #[test]
    fn test_concurrent_goal_declarations_commit_one_edge() {
        let coordinator = SearchCoordinator::new("start");
        let winners: usize = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let coordinator = &coordinator;
                    s.spawn(move || {
                        let parent = format!("page{}", i);
                        coordinator.record_parent_if_absent(&parent, "start");
                        coordinator.declare_goal_found("goal", &parent) as usize
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });
        assert_eq!(winners, 1);

        let result = coordinator.finish();
        assert_eq!(result.path.len(), 3);
        assert_eq!(result.path[0], "start");
        assert!(result.path[1].starts_with("page"));
        assert_eq!(result.path[2], "goal");
    }

    #[test]
    fn test_unknown_goal_yields_not_found() {
        let coordinator = SearchCoordinator::new("A");
        assert_eq!(coordinator.finish(), SearchResult::not_found());
    }

    #[test]
    fn test_result_serializes_to_json() {
        let result = SearchResult {
            found: true,
            path: vec!["A".to_string(), "B".to_string()],
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"found":true,"path":["A","B"]}"#);
    }
}
