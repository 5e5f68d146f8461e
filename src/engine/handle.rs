//! Public façade over the crawl engine
//!
//! A [`RunHandle`] owns the shared run state and the collaborator seams
//! and exposes the start/stop/query surface consumed by the CLI (or any
//! other caller). One handle hosts at most one active run; results from
//! a finished run stay readable until `clear()` or the next `start()`.

use crate::engine::{Coordinator, CrawlStats, DiscoveredLink, RunState, WorkItem};
use crate::extract::{Extractor, HtmlExtractor};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::{url, CrawlError, Result, RunConfig};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

pub struct RunHandle {
    state: Arc<RunState>,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    coordinator: Mutex<Option<JoinHandle<()>>>,
}

impl RunHandle {
    /// Creates a handle with injected collaborators
    pub fn new(fetcher: Arc<dyn Fetcher>, extractor: Arc<dyn Extractor>) -> Self {
        Self {
            state: Arc::new(RunState::new()),
            fetcher,
            extractor,
            coordinator: Mutex::new(None),
        }
    }

    /// Creates a handle backed by the blocking HTTP fetcher and the HTML
    /// anchor extractor
    pub fn with_http() -> Result<Self> {
        let fetcher = HttpFetcher::new().map_err(CrawlError::Client)?;
        Ok(Self::new(Arc::new(fetcher), Arc::new(HtmlExtractor)))
    }

    /// Starts a crawl from the seed URL.
    ///
    /// Fails with [`CrawlError::AlreadyRunning`] if a run is active,
    /// [`CrawlError::InvalidSeed`] if the seed is not an http(s) URL, and
    /// [`CrawlError::Spawn`] if the coordinator thread cannot be created.
    /// Any state from a previous run is released before seeding.
    pub fn start(&self, seed: &str, config: RunConfig) -> Result<()> {
        if !url::is_valid_seed(seed) {
            return Err(CrawlError::InvalidSeed(seed.to_string()));
        }

        if config.worker_count < 1 {
            return Err(crate::ConfigError::Validation(
                "worker_count must be >= 1".to_string(),
            )
            .into());
        }

        // Same rule the TOML path enforces: a zero limit with recursion on
        // would let depth-1 results exceed the bound
        if config.recursive && config.recursion_limit < 1 {
            return Err(crate::ConfigError::Validation(
                "recursion_limit must be >= 1 when recursive crawling is enabled".to_string(),
            )
            .into());
        }

        if self
            .state
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CrawlError::AlreadyRunning);
        }

        // Reap the coordinator of a naturally finished previous run so
        // reset below cannot race a straggler thread
        if let Some(handle) = self.coordinator.lock().unwrap().take() {
            let _ = handle.join();
        }

        self.state.stop_requested.store(false, Ordering::SeqCst);
        self.state.frontier.reset();
        self.state.sink.clear();
        self.state.progress.reset();
        self.state.progress.mark_started();
        self.state
            .worker_count
            .store(config.worker_count, Ordering::SeqCst);

        self.state.frontier.push(WorkItem {
            url: seed.to_string(),
            depth: 0,
            parent: None,
        });

        tracing::info!(
            "starting crawl of {} ({} workers, recursive: {})",
            seed,
            config.worker_count,
            config.recursive
        );

        let coordinator = Coordinator {
            state: Arc::clone(&self.state),
            config: Arc::new(config),
            fetcher: Arc::clone(&self.fetcher),
            extractor: Arc::clone(&self.extractor),
        };

        let spawned = std::thread::Builder::new()
            .name("linkweave-coordinator".to_string())
            .spawn(move || coordinator.run());

        match spawned {
            Ok(handle) => {
                *self.coordinator.lock().unwrap() = Some(handle);
                Ok(())
            }
            Err(source) => {
                self.state
                    .sink
                    .set_error(format!("failed to spawn coordinator: {}", source));
                self.state.running.store(false, Ordering::SeqCst);
                Err(CrawlError::Spawn {
                    what: "coordinator",
                    source,
                })
            }
        }
    }

    /// Requests a stop and waits for the run to wind down.
    ///
    /// Idempotent; a no-op when nothing is running. Blocks at most for
    /// the duration of the slowest in-flight fetch (bounded by the HTTP
    /// client's own timeout).
    pub fn stop(&self) {
        self.state.stop_requested.store(true, Ordering::SeqCst);
        self.state.frontier.close();

        if let Some(handle) = self.coordinator.lock().unwrap().take() {
            if handle.join().is_err() {
                self.state
                    .sink
                    .set_error("coordinator thread panicked".to_string());
                self.state.running.store(false, Ordering::SeqCst);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::SeqCst)
    }

    /// The run's terminal error, if any
    pub fn error(&self) -> Option<String> {
        self.state.sink.error()
    }

    /// Non-blocking progress snapshot; fields are read independently
    pub fn stats(&self) -> CrawlStats {
        CrawlStats {
            found: self.state.progress.found(),
            processed: self.state.progress.processed(),
            queue_size: self.state.frontier.len(),
            worker_count: self.state.worker_count.load(Ordering::SeqCst),
            started_at: self.state.progress.started_at(),
            last_activity: self.state.progress.last_activity(),
        }
    }

    /// Snapshot of the links discovered so far.
    ///
    /// Safe while running: the view is partial and only grows.
    pub fn results(&self) -> Vec<DiscoveredLink> {
        self.state.sink.snapshot()
    }

    /// Stops any active run and releases all frontier and result memory
    pub fn clear(&self) {
        self.stop();
        self.state.frontier.reset();
        self.state.sink.clear();
        self.state.progress.reset();
        self.state.worker_count.store(0, Ordering::SeqCst);
        self.state.stop_requested.store(false, Ordering::SeqCst);
    }
}

impl Drop for RunHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::LinkFilter;
    use crate::fetch::FetchError;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::time::{Duration, Instant};

    struct MapFetcher {
        pages: HashMap<String, String>,
        fetches: AtomicUsize,
        delay: Duration,
    }

    impl MapFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.to_string()))
                    .collect(),
                fetches: AtomicUsize::new(0),
                delay: Duration::ZERO,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl Fetcher for MapFetcher {
        fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
            self.pages
                .get(url)
                .map(|body| body.clone().into_bytes())
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    code: 404,
                })
        }
    }

    fn handle_over(fetcher: Arc<MapFetcher>) -> RunHandle {
        RunHandle::new(fetcher, Arc::new(HtmlExtractor))
    }

    fn wait_for_finish(handle: &RunHandle) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while handle.is_running() {
            assert!(Instant::now() < deadline, "run did not finish in time");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_invalid_seed_rejected() {
        let handle = handle_over(Arc::new(MapFetcher::new(&[])));
        let err = handle.start("no-scheme.example", RunConfig::default());
        assert!(matches!(err, Err(CrawlError::InvalidSeed(_))));
        assert!(!handle.is_running());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let handle = handle_over(Arc::new(MapFetcher::new(&[])));
        let config = RunConfig {
            worker_count: 0,
            ..RunConfig::default()
        };
        assert!(matches!(
            handle.start("https://a.test/", config),
            Err(CrawlError::Config(_))
        ));
        assert!(!handle.is_running());
    }

    #[test]
    fn test_recursive_with_zero_limit_rejected() {
        // With limit 0 the seed itself sits at the limit, so any result
        // at depth 1 would exceed it; the run must not start
        let fetcher = Arc::new(MapFetcher::new(&[(
            "https://a.test/",
            r#"<a href="/one">1</a>"#,
        )]));
        let handle = handle_over(fetcher);

        let config = RunConfig {
            recursive: true,
            recursion_limit: 0,
            ..RunConfig::default()
        };
        assert!(matches!(
            handle.start("https://a.test/", config),
            Err(CrawlError::Config(_))
        ));
        assert!(!handle.is_running());
        assert!(handle.results().is_empty());
    }

    #[test]
    fn test_already_running_rejected() {
        // The slow fetch keeps the first run alive past the second start
        let fetcher = Arc::new(
            MapFetcher::new(&[("https://a.test/", "")]).with_delay(Duration::from_millis(400)),
        );
        let handle = handle_over(fetcher);

        handle.start("https://a.test/", RunConfig::default()).unwrap();
        let second = handle.start("https://a.test/", RunConfig::default());
        assert!(matches!(second, Err(CrawlError::AlreadyRunning)));
        wait_for_finish(&handle);
    }

    #[test]
    fn test_no_recursion_containment() {
        let fetcher = Arc::new(MapFetcher::new(&[
            (
                "https://a.test/",
                r#"<a href="/one">1</a><a href="/two">2</a>"#,
            ),
            ("https://a.test/one", r#"<a href="/deeper">d</a>"#),
        ]));
        let handle = handle_over(Arc::clone(&fetcher));

        handle.start("https://a.test/", RunConfig::default()).unwrap();
        wait_for_finish(&handle);

        let mut urls: Vec<String> = handle.results().into_iter().map(|l| l.url).collect();
        urls.sort();
        assert_eq!(urls, vec!["https://a.test/one", "https://a.test/two"]);
        assert!(handle.results().iter().all(|l| l.depth == 1));
        assert_eq!(fetcher.fetch_count(), 1);
    }

    #[test]
    fn test_recursion_limit_one_records_without_expanding() {
        let fetcher = Arc::new(MapFetcher::new(&[
            ("https://a.test/", r#"<a href="/child">c</a>"#),
            ("https://a.test/child", r#"<a href="/grandchild">g</a>"#),
        ]));
        let handle = handle_over(Arc::clone(&fetcher));

        let config = RunConfig {
            recursive: true,
            recursion_limit: 1,
            ..RunConfig::default()
        };
        handle.start("https://a.test/", config).unwrap();
        wait_for_finish(&handle);

        // Depth-1 links are recorded but never dequeued
        assert_eq!(handle.results().len(), 1);
        assert_eq!(handle.results()[0].url, "https://a.test/child");
        assert_eq!(fetcher.fetch_count(), 1);
        assert_eq!(handle.stats().queue_size, 0);
    }

    #[test]
    fn test_depth_bound_holds_across_workers() {
        let fetcher = Arc::new(MapFetcher::new(&[
            ("https://a.test/", r#"<a href="/a">a</a><a href="/b">b</a>"#),
            ("https://a.test/a", r#"<a href="/a1">x</a>"#),
            ("https://a.test/b", r#"<a href="/b1">x</a>"#),
            ("https://a.test/a1", r#"<a href="/a2">x</a>"#),
            ("https://a.test/b1", r#"<a href="/b2">x</a>"#),
        ]));
        let handle = handle_over(Arc::clone(&fetcher));

        let config = RunConfig {
            recursive: true,
            recursion_limit: 2,
            worker_count: 4,
            ..RunConfig::default()
        };
        handle.start("https://a.test/", config).unwrap();
        wait_for_finish(&handle);

        assert!(handle.results().iter().all(|l| l.depth <= 2));
        // depth 0 and 1 fetched: /, /a, /b
        assert_eq!(fetcher.fetch_count(), 3);
    }

    #[test]
    fn test_stats_after_single_page_run() {
        let fetcher = Arc::new(MapFetcher::new(&[(
            "https://example.com/",
            r#"<a href="https://www.iana.org/domains/example">More information...</a>"#,
        )]));
        let handle = handle_over(fetcher);

        let config = RunConfig {
            worker_count: 1,
            ..RunConfig::default()
        };
        handle.start("https://example.com/", config).unwrap();
        wait_for_finish(&handle);

        let results = handle.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://www.iana.org/domains/example");
        assert_eq!(results[0].depth, 1);

        let stats = handle.stats();
        assert_eq!(stats.found, 1);
        assert_eq!(stats.processed, 1);
        assert_eq!(stats.queue_size, 0);
        assert_eq!(stats.worker_count, 1);
        assert!(stats.started_at.is_some());
        assert!(stats.last_activity >= stats.started_at);
    }

    #[test]
    fn test_filtered_run() {
        let fetcher = Arc::new(MapFetcher::new(&[(
            "https://a.test/",
            r#"<a href="/report.pdf">p</a><a href="/page.html">h</a>"#,
        )]));
        let handle = handle_over(fetcher);

        let config = RunConfig {
            filter: LinkFilter::compile(&[r".*\.pdf$".to_string()]).unwrap(),
            ..RunConfig::default()
        };
        handle.start("https://a.test/", config).unwrap();
        wait_for_finish(&handle);

        let results = handle.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://a.test/report.pdf");
    }

    #[test]
    fn test_stop_is_idempotent_and_bounded() {
        let fetcher = Arc::new(MapFetcher::new(&[("https://a.test/", "")]));
        let handle = handle_over(fetcher);

        // Stop before any run: no-op
        handle.stop();
        assert!(!handle.is_running());

        handle.start("https://a.test/", RunConfig::default()).unwrap();
        let start = Instant::now();
        handle.stop();
        handle.stop();
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(!handle.is_running());
    }

    #[test]
    fn test_clear_resets_everything() {
        let fetcher = Arc::new(MapFetcher::new(&[(
            "https://a.test/",
            r#"<a href="/one">1</a>"#,
        )]));
        let handle = handle_over(fetcher);

        handle.start("https://a.test/", RunConfig::default()).unwrap();
        wait_for_finish(&handle);
        assert!(!handle.results().is_empty());

        handle.clear();
        let stats = handle.stats();
        assert_eq!(stats.found, 0);
        assert_eq!(stats.processed, 0);
        assert_eq!(stats.queue_size, 0);
        assert_eq!(stats.worker_count, 0);
        assert!(stats.started_at.is_none());
        assert!(handle.results().is_empty());
        assert!(handle.error().is_none());
    }

    #[test]
    fn test_clear_without_run_is_safe() {
        let handle = handle_over(Arc::new(MapFetcher::new(&[])));
        handle.clear();
        assert_eq!(handle.stats().found, 0);
        assert!(handle.results().is_empty());
    }

    #[test]
    fn test_restart_after_completion() {
        let fetcher = Arc::new(MapFetcher::new(&[(
            "https://a.test/",
            r#"<a href="/one">1</a>"#,
        )]));
        let handle = handle_over(Arc::clone(&fetcher));

        handle.start("https://a.test/", RunConfig::default()).unwrap();
        wait_for_finish(&handle);
        handle.start("https://a.test/", RunConfig::default()).unwrap();
        wait_for_finish(&handle);

        // Second run starts from a clean seen set: same page fetched again
        assert_eq!(fetcher.fetch_count(), 2);
        assert_eq!(handle.results().len(), 1);
        assert_eq!(handle.stats().processed, 1);
    }

    #[test]
    fn test_relative_link_resolves_against_seed_host() {
        let fetcher = Arc::new(MapFetcher::new(&[(
            "https://a.test/dir/index.html",
            r#"<a href="/about">a</a>"#,
        )]));
        let handle = handle_over(fetcher);

        handle
            .start("https://a.test/dir/index.html", RunConfig::default())
            .unwrap();
        wait_for_finish(&handle);

        assert_eq!(handle.results()[0].url, "https://a.test/about");
    }
}
