//! Run lifecycle: spawn the worker pool, watch for quiescence, shut down
//!
//! The coordinator runs on its own thread so a stop request never waits
//! on a worker. Completion is detected with the exact quiescence
//! condition (queue empty and nothing in flight) rather than by sampling
//! the queue size and counting idle cycles; the frontier tracks both
//! facts under one lock, so the check cannot race a worker that is about
//! to push.

use crate::engine::{RunState, Worker};
use crate::extract::Extractor;
use crate::fetch::Fetcher;
use crate::RunConfig;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// How often the coordinator checks for quiescence or a stop request
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Poll ticks between progress log lines
const PROGRESS_LOG_TICKS: u32 = 10;

pub(crate) struct Coordinator {
    pub state: Arc<RunState>,
    pub config: Arc<RunConfig>,
    pub fetcher: Arc<dyn Fetcher>,
    pub extractor: Arc<dyn Extractor>,
}

impl Coordinator {
    /// Drives one run from spawned workers to joined workers.
    ///
    /// `running` is cleared as the very last step, after every worker has
    /// been joined, so `is_running() == false` implies no live threads.
    pub fn run(self) {
        let workers = self.spawn_workers();

        if !self.state.stop_requested.load(Ordering::SeqCst) {
            self.watch();
        }

        self.state.frontier.close();
        for (id, handle) in workers.into_iter().enumerate() {
            if handle.join().is_err() {
                self.state.sink.set_error(format!("worker {} panicked", id));
            }
        }

        // Pending items from a stopped run are released here, after the
        // last worker has exited
        if !self.state.frontier.is_empty() {
            let dropped = self.state.frontier.drain_pending();
            tracing::debug!("dropped {} unprocessed items", dropped);
        }

        tracing::info!(
            "run finished: {} found, {} processed",
            self.state.progress.found(),
            self.state.progress.processed()
        );
        self.state.running.store(false, Ordering::SeqCst);
    }

    /// Spawns the worker pool.
    ///
    /// A spawn failure aborts the run: the error is recorded, the stop
    /// flag is raised, and the handles collected so far are returned so
    /// the caller still joins every thread that did start.
    fn spawn_workers(&self) -> Vec<JoinHandle<()>> {
        let count = self.config.worker_count;
        let mut handles = Vec::with_capacity(count);

        for id in 0..count {
            let worker = Worker {
                id,
                state: Arc::clone(&self.state),
                config: Arc::clone(&self.config),
                fetcher: Arc::clone(&self.fetcher),
                extractor: Arc::clone(&self.extractor),
            };

            let spawned = std::thread::Builder::new()
                .name(format!("linkweave-worker-{}", id))
                .spawn(move || worker.run());

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    tracing::error!("failed to spawn worker {}: {}", id, e);
                    self.state
                        .sink
                        .set_error(format!("failed to spawn worker {}: {}", id, e));
                    self.state.stop_requested.store(true, Ordering::SeqCst);
                    break;
                }
            }
        }

        tracing::info!("spawned {} workers", handles.len());
        handles
    }

    /// Polls until the run quiesces or a stop is requested
    fn watch(&self) {
        let mut ticks = 0u32;
        loop {
            std::thread::sleep(POLL_INTERVAL);

            if self.state.stop_requested.load(Ordering::SeqCst) {
                tracing::info!("stop requested, shutting down workers");
                return;
            }

            if self.state.frontier.is_idle() {
                tracing::info!("frontier quiescent, crawl complete");
                return;
            }

            ticks += 1;
            if ticks % PROGRESS_LOG_TICKS == 0 {
                tracing::debug!(
                    "progress: {} found, {} processed, {} queued",
                    self.state.progress.found(),
                    self.state.progress.processed(),
                    self.state.frontier.len()
                );
            }
        }
    }
}
