//! The shared work queue and its deduplication set
//!
//! One mutex guards the FIFO queue, the seen set, the in-flight count,
//! and the closed flag together; a condvar wakes workers blocked on an
//! empty queue. Keeping the closed flag inside the same mutex is what
//! makes shutdown race-free: a worker cannot check the flag and then
//! miss the wakeup, because `close()` flips it under the queue lock.

use std::collections::{HashSet, VecDeque};
use std::sync::{Condvar, Mutex};

/// One queued unit of work: a URL with its discovery depth and parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// The URL to fetch
    pub url: String,

    /// Hops from the seed; the seed itself is depth 0
    pub depth: u32,

    /// The page this URL was discovered on, `None` for the seed
    pub parent: Option<String>,
}

#[derive(Default)]
struct Inner {
    queue: VecDeque<WorkItem>,
    seen: HashSet<String>,
    /// Items dequeued by a worker but not yet finished
    in_flight: usize,
    closed: bool,
}

/// FIFO frontier of pending work plus the set of every URL ever admitted
#[derive(Default)]
pub struct Frontier {
    inner: Mutex<Inner>,
    ready: Condvar,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits an item unless its URL was already admitted.
    ///
    /// The URL enters the seen set at the moment of acceptance, so two
    /// workers discovering the same link concurrently can never both
    /// enqueue it. Returns false for duplicates.
    pub fn push(&self, item: WorkItem) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if !inner.seen.insert(item.url.clone()) {
            return false;
        }
        inner.queue.push_back(item);
        self.ready.notify_one();
        true
    }

    /// Blocks until an item is available or the frontier is closed.
    ///
    /// Returns `None` only on close; on close nothing is consumed even if
    /// the queue still holds items. A successful pop counts the item as
    /// in flight until the caller's matching [`Frontier::task_done`].
    pub fn pop(&self) -> Option<WorkItem> {
        let mut inner = self.inner.lock().unwrap();
        loop {
            if inner.closed {
                return None;
            }
            if let Some(item) = inner.queue.pop_front() {
                inner.in_flight += 1;
                return Some(item);
            }
            inner = self.ready.wait(inner).unwrap();
        }
    }

    /// Marks one previously popped item as finished
    pub fn task_done(&self) {
        let mut inner = self.inner.lock().unwrap();
        debug_assert!(inner.in_flight > 0);
        inner.in_flight = inner.in_flight.saturating_sub(1);
    }

    /// True when nothing is queued and nothing is in flight.
    ///
    /// Both facts are read under one lock acquisition, so this is an
    /// exact quiescence check, not a sampling heuristic.
    pub fn is_idle(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.queue.is_empty() && inner.in_flight == 0
    }

    /// Snapshot of the pending queue length, for progress reporting only
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Closes the frontier and wakes every blocked worker.
    ///
    /// Idempotent. After close, `pop` returns `None` without consuming.
    pub fn close(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.closed = true;
        self.ready.notify_all();
    }

    /// Drops all pending items, returning how many there were.
    ///
    /// Called after the workers have been joined; the seen set is kept so
    /// late queries still reflect what the run admitted.
    pub fn drain_pending(&self) -> usize {
        let mut inner = self.inner.lock().unwrap();
        let count = inner.queue.len();
        inner.queue.clear();
        count
    }

    /// Drops all pending items and the seen set and reopens the frontier.
    ///
    /// Only valid between runs, once every worker has stopped.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.queue.clear();
        inner.seen.clear();
        inner.in_flight = 0;
        inner.closed = false;
    }
}
