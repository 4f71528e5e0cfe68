// src/search/mod.rs
// =============================================================================
// This module is the concurrent search engine.
//
// Submodules:
// - config: validated run settings
// - frontier: shared work queue + visited set + exhaustion detection
// - coordinator: goal signal, parent map, path reconstruction
// - pool: worker threads tying it all together
//
// Only the pieces main.rs needs are re-exported.
// =============================================================================

mod config;
mod coordinator;
mod frontier;
mod pool;

pub use config::{default_workers, SearchConfig, DEFAULT_MAX_HOPS};
pub use coordinator::SearchResult;
pub use pool::run_search;
