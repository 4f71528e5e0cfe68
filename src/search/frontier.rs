// src/search/frontier.rs
// =============================================================================
// The frontier: pages we have discovered but not processed yet.
//
// It is a FIFO queue of (url, depth) pairs plus the set of every url that was
// ever admitted. Both live behind ONE mutex, because "is this url new?" and
// "remember it + queue it" must happen as a single step. With two separate
// locks, two workers could both see a url as new and both queue it.
//
// Exhaustion detection:
// - An empty queue alone does not mean we are done. Another worker may be in
//   the middle of fetching a page and about to offer new links.
// - So every item handed out by take() is wrapped in a Claim. While a Claim
//   is alive its worker counts as "active".
// - The search is exhausted only when the queue is empty AND no claims are
//   alive. The first take() that sees this closes the frontier and wakes
//   everyone else.
//
// Rust concepts:
// - Mutex + Condvar: block a thread until some condition on shared state holds
// - RAII: Claim gives the active slot back in its Drop impl, so even a
//   panicking worker can't leave the others waiting forever
// =============================================================================

use std::collections::{HashSet, VecDeque};
use std::ops::Deref;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// One unit of work: a page and how many hops it is from the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    pub depth: usize,
}

// Everything guarded by the frontier's single lock
#[derive(Debug, Default)]
struct State {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
    active: usize,
    closed: bool,
}

/// Thread-safe work queue with built-in dedup and depth cutoff.
#[derive(Debug)]
pub struct Frontier {
    max_hops: usize,
    state: Mutex<State>,
    wake: Condvar,
}

impl Frontier {
    /// Creates an empty frontier that admits depths up to `max_hops`.
    pub fn new(max_hops: usize) -> Self {
        Self {
            max_hops,
            state: Mutex::new(State::default()),
            wake: Condvar::new(),
        }
    }

    /// Admits `url` at `depth` unless it was seen before, is too deep, or the
    /// frontier is already closed. Returns true when the url was queued.
    pub fn offer(&self, url: &str, depth: usize) -> bool {
        self.offer_with(url, depth, || {})
    }

    /// Like [`Frontier::offer`], but runs `on_admit` while still holding the
    /// lock, before the entry becomes visible to `take()`.
    ///
    /// Only the offer that actually admits `url` runs its callback, so
    /// anything recorded there agrees with the depth the url is queued at.
    pub fn offer_with(&self, url: &str, depth: usize, on_admit: impl FnOnce()) -> bool {
        if depth > self.max_hops {
            return false;
        }

        let mut state = self.lock();
        if state.closed || state.visited.contains(url) {
            return false;
        }
        on_admit();
        state.visited.insert(url.to_string());
        state.queue.push_back(FrontierEntry {
            url: url.to_string(),
            depth,
        });
        drop(state);

        self.wake.notify_one();
        true
    }

    /// Blocks until there is work or the search is over.
    ///
    /// Returns `None` once the frontier is closed, either because someone
    /// called [`Frontier::close`] or because the queue is empty with no
    /// active claims left.
    pub fn take(&self) -> Option<Claim<'_>> {
        let mut state = self.lock();
        loop {
            if state.closed {
                return None;
            }

            if let Some(entry) = state.queue.pop_front() {
                state.active += 1;
                return Some(Claim {
                    frontier: self,
                    entry,
                });
            }

            if state.active == 0 {
                // Nobody can add more work: we're exhausted
                state.closed = true;
                self.wake.notify_all();
                return None;
            }

            state = self
                .wake
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Stops the search: drops queued work and wakes every blocked worker.
    pub fn close(&self) {
        let mut state = self.lock();
        state.closed = true;
        state.queue.clear();
        drop(state);

        self.wake.notify_all();
    }

    /// Number of distinct urls ever admitted.
    pub fn admitted(&self) -> usize {
        self.lock().visited.len()
    }

    fn release(&self) {
        let mut state = self.lock();
        state.active -= 1;
        let idle = state.active == 0 && state.queue.is_empty();
        drop(state);

        // The last active worker going idle may be what the others wait for
        if idle {
            self.wake.notify_all();
        }
    }

    // A worker that panicked mid-search must not take the others down with it
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An entry handed to one worker. The worker counts as active until the
/// claim is dropped.
#[derive(Debug)]
pub struct Claim<'a> {
    frontier: &'a Frontier,
    entry: FrontierEntry,
}

impl Deref for Claim<'_> {
    type Target = FrontierEntry;

    fn deref(&self) -> &FrontierEntry {
        &self.entry
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.frontier.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_offer_rejects_duplicates() {
        let frontier = Frontier::new(3);
        assert!(frontier.offer("A", 0));
        assert!(!frontier.offer("A", 1));
        assert_eq!(frontier.admitted(), 1);
    }

    #[test]
    fn test_offer_rejects_too_deep() {
        let frontier = Frontier::new(2);
        assert!(frontier.offer("A", 2));
        assert!(!frontier.offer("B", 3));
        // A rejected url was never marked visited
        assert!(Frontier::new(5).offer("B", 3));
    }

    #[test]
    fn test_on_admit_runs_only_for_admitted_offer() {
        let frontier = Frontier::new(2);
        let mut calls = Vec::new();

        assert!(frontier.offer_with("A", 1, || calls.push("first")));
        assert!(!frontier.offer_with("A", 0, || calls.push("duplicate")));
        assert!(!frontier.offer_with("B", 3, || calls.push("too deep")));
        frontier.close();
        assert!(!frontier.offer_with("C", 1, || calls.push("closed")));

        assert_eq!(calls, vec!["first"]);
    }

    #[test]
    fn test_take_is_fifo() {
        let frontier = Frontier::new(3);
        frontier.offer("A", 0);
        frontier.offer("B", 1);

        let first = frontier.take().unwrap();
        assert_eq!(first.url, "A");
        assert_eq!(first.depth, 0);
        let second = frontier.take().unwrap();
        assert_eq!(second.url, "B");
    }

    #[test]
    fn test_empty_frontier_is_exhausted() {
        let frontier = Frontier::new(3);
        assert!(frontier.take().is_none());
        // Closed for good: late offers are ignored
        assert!(!frontier.offer("A", 0));
        assert!(frontier.take().is_none());
    }

    #[test]
    fn test_exhausted_after_last_claim_dropped() {
        let frontier = Frontier::new(3);
        frontier.offer("A", 0);
        let claim = frontier.take().unwrap();
        drop(claim);
        assert!(frontier.take().is_none());
    }

    #[test]
    fn test_live_claim_blocks_exhaustion() {
        let frontier = Frontier::new(3);
        frontier.offer("A", 0);
        let claim = frontier.take().unwrap();

        thread::scope(|s| {
            let (tx, rx) = mpsc::channel();
            let frontier = &frontier;
            s.spawn(move || {
                let next = frontier.take().map(|c| c.url.clone());
                tx.send(next).unwrap();
            });

            // The other worker must still be waiting, not declaring exhaustion
            assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

            frontier.offer("B", 1);
            drop(claim);
            assert_eq!(
                rx.recv_timeout(Duration::from_secs(5)).unwrap(),
                Some("B".to_string())
            );
        });
    }

    #[test]
    fn test_close_wakes_blocked_worker() {
        let frontier = Frontier::new(3);
        frontier.offer("A", 0);
        let _claim = frontier.take().unwrap();

        thread::scope(|s| {
            let waiter = s.spawn(|| frontier.take().is_none());
            thread::sleep(Duration::from_millis(50));
            frontier.close();
            assert!(waiter.join().unwrap());
        });
    }

    #[test]
    fn test_concurrent_offers_admit_once() {
        let frontier = Frontier::new(3);
        let admitted: usize = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| frontier.offer("same", 1) as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });
        assert_eq!(admitted, 1);
    }
}
