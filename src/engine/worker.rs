//! The worker loop: dequeue, fetch, extract, resolve, filter, record
//!
//! Fetching, extraction, and filtering all happen outside any lock; a
//! worker only touches the frontier lock to push and the sink lock to
//! append. Per-item failures are absorbed here and never stop the run.

use crate::engine::{DiscoveredLink, RunState, WorkItem};
use crate::extract::Extractor;
use crate::fetch::Fetcher;
use crate::url::resolve_candidate;
use crate::RunConfig;
use std::sync::Arc;

pub(crate) struct Worker {
    pub id: usize,
    pub state: Arc<RunState>,
    pub config: Arc<RunConfig>,
    pub fetcher: Arc<dyn Fetcher>,
    pub extractor: Arc<dyn Extractor>,
}

impl Worker {
    /// Runs until the frontier is closed
    pub fn run(&self) {
        tracing::debug!("worker {} started", self.id);
        while let Some(item) = self.state.frontier.pop() {
            self.process(item);
            self.state.frontier.task_done();
        }
        tracing::debug!("worker {} stopped", self.id);
    }

    fn process(&self, item: WorkItem) {
        tracing::debug!("worker {} processing {} (depth {})", self.id, item.url, item.depth);

        let body = match self.fetcher.fetch(&item.url) {
            Ok(body) => body,
            Err(e) => {
                // Non-fatal: the item still counts as processed
                tracing::warn!("fetch failed for {}: {}", item.url, e);
                self.state.progress.record_processed();
                self.state.progress.touch();
                return;
            }
        };

        let candidates = self.extractor.extract_links(&body, &item.url);
        let child_depth = item.depth + 1;

        for candidate in candidates {
            let resolved = match resolve_candidate(&item.url, &candidate) {
                Some(resolved) => resolved,
                None => continue,
            };

            if !self.config.filter.matches(&resolved) {
                tracing::trace!("filtered out {}", resolved);
                continue;
            }

            // Recorded regardless of whether it will be expanded further
            self.state.sink.record(DiscoveredLink {
                url: resolved.clone(),
                depth: child_depth,
                found_by: self.id,
            });
            self.state.progress.record_found();

            if self.config.recursive && child_depth < self.config.recursion_limit {
                let accepted = self.state.frontier.push(WorkItem {
                    url: resolved,
                    depth: child_depth,
                    parent: Some(item.url.clone()),
                });
                if !accepted {
                    // First discovery wins; the later parent is dropped
                    tracing::debug!("already admitted, skipping re-enqueue");
                }
            }
        }

        self.state.progress.record_processed();
        self.state.progress.touch();
    }
}
