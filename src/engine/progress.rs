//! Lock-free progress accounting
//!
//! Counters and wall-clock stamps are plain atomics so that readers never
//! block the workers incrementing them. A stamp value of zero means
//! "never set".

use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic found/processed counters plus start and last-activity stamps
#[derive(Default)]
pub struct ProgressCounters {
    found: AtomicU64,
    processed: AtomicU64,
    started_at_ms: AtomicU64,
    last_activity_ms: AtomicU64,
}

impl ProgressCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments once per recorded [`DiscoveredLink`](super::DiscoveredLink)
    pub fn record_found(&self) {
        self.found.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments exactly once per dequeued item, success or failure
    pub fn record_processed(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn found(&self) -> u64 {
        self.found.load(Ordering::Relaxed)
    }

    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    /// Records the start of a run
    pub fn mark_started(&self) {
        let now = now_ms();
        self.started_at_ms.store(now, Ordering::Relaxed);
        self.last_activity_ms.store(now, Ordering::Relaxed);
    }

    /// Bumps the last-activity stamp to now
    pub fn touch(&self) {
        self.last_activity_ms.store(now_ms(), Ordering::Relaxed);
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        stamp_to_datetime(self.started_at_ms.load(Ordering::Relaxed))
    }

    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        stamp_to_datetime(self.last_activity_ms.load(Ordering::Relaxed))
    }

    /// Zeroes everything, as part of `clear()` or a new run
    pub fn reset(&self) {
        self.found.store(0, Ordering::Relaxed);
        self.processed.store(0, Ordering::Relaxed);
        self.started_at_ms.store(0, Ordering::Relaxed);
        self.last_activity_ms.store(0, Ordering::Relaxed);
    }
}

fn now_ms() -> u64 {
    Utc::now().timestamp_millis().max(1) as u64
}

fn stamp_to_datetime(ms: u64) -> Option<DateTime<Utc>> {
    if ms == 0 {
        return None;
    }
    Utc.timestamp_millis_opt(ms as i64).single()
}

/// A point-in-time view of a run's progress
///
/// Each field is read independently; no cross-field atomicity is implied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlStats {
    pub found: u64,
    pub processed: u64,
    pub queue_size: usize,
    pub worker_count: usize,
    pub started_at: Option<DateTime<Utc>>,
    pub last_activity: Option<DateTime<Utc>>,
}
