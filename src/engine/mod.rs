//! The concurrent crawl engine
//!
//! This module contains the part of the crate with real synchronization
//! hazards: the shared frontier queue, the worker pool, the coordinator
//! lifecycle, and the progress accounting. Everything network- or
//! HTML-shaped is consumed through the [`Fetcher`](crate::fetch::Fetcher)
//! and [`Extractor`](crate::extract::Extractor) seams.

mod coordinator;
mod frontier;
mod handle;
mod progress;
mod results;
mod worker;

pub use frontier::{Frontier, WorkItem};
pub use handle::RunHandle;
pub use progress::{CrawlStats, ProgressCounters};
pub use results::{DiscoveredLink, ResultSink};

pub(crate) use coordinator::Coordinator;
pub(crate) use worker::Worker;

use std::sync::atomic::{AtomicBool, AtomicUsize};

/// Shared state of one crawl run.
///
/// The frontier and the sink each keep their own lock, counters are
/// atomics; no thread ever holds two of these locks at once. One
/// `RunState` hosts at most one active run at a time.
pub(crate) struct RunState {
    pub frontier: Frontier,
    pub sink: ResultSink,
    pub progress: ProgressCounters,
    pub running: AtomicBool,
    pub stop_requested: AtomicBool,
    pub worker_count: AtomicUsize,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            frontier: Frontier::new(),
            sink: ResultSink::new(),
            progress: ProgressCounters::new(),
            running: AtomicBool::new(false),
            stop_requested: AtomicBool::new(false),
            worker_count: AtomicUsize::new(0),
        }
    }
}
