//! Append-only sink for discovered links
//!
//! Workers append under the sink's own lock; readers take snapshots. The
//! sink also carries the run's terminal error, if one occurred.

use std::sync::Mutex;

/// A link discovered during a crawl, immutable once recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLink {
    /// The resolved, filter-accepted URL
    pub url: String,

    /// Hops from the seed at which the link was discovered
    pub depth: u32,

    /// Index of the worker that discovered it
    pub found_by: usize,
}

/// Lock-guarded, append-only collection of discovered links
#[derive(Default)]
pub struct ResultSink {
    links: Mutex<Vec<DiscoveredLink>>,
    error: Mutex<Option<String>>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, link: DiscoveredLink) {
        self.links.lock().unwrap().push(link);
    }

    /// Snapshot of everything recorded so far.
    ///
    /// Safe to call while a run is live; the view is partial but only
    /// ever grows.
    pub fn snapshot(&self) -> Vec<DiscoveredLink> {
        self.links.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.links.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records a fatal run error. The first error wins.
    pub fn set_error(&self, message: String) {
        let mut error = self.error.lock().unwrap();
        if error.is_none() {
            *error = Some(message);
        }
    }

    pub fn error(&self) -> Option<String> {
        self.error.lock().unwrap().clone()
    }

    /// Releases all recorded links and any stored error
    pub fn clear(&self) {
        self.links.lock().unwrap().clear();
        *self.error.lock().unwrap() = None;
    }
}
