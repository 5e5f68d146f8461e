//! Report generation from crawl results
//!
//! Renders a markdown summary of a finished (or stopped) run from the
//! result snapshot and the stats; consumes only the façade's read
//! surface, never the engine internals.

use crate::engine::{CrawlStats, DiscoveredLink};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report of discovered links, grouped by depth
pub fn write_report(
    path: &Path,
    links: &[DiscoveredLink],
    stats: &CrawlStats,
) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write!(file, "{}", render_report(links, stats))?;
    Ok(())
}

fn render_report(links: &[DiscoveredLink], stats: &CrawlStats) -> String {
    let mut by_depth: BTreeMap<u32, Vec<&DiscoveredLink>> = BTreeMap::new();
    for link in links {
        by_depth.entry(link.depth).or_default().push(link);
    }

    let mut out = String::new();
    out.push_str("# Crawl report\n\n");

    if let Some(started) = stats.started_at {
        out.push_str(&format!(
            "Started: {}\n\n",
            started.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    out.push_str(&format!(
        "Pages processed: {}  \nLinks found: {}\n",
        stats.processed, stats.found
    ));

    for (depth, group) in &by_depth {
        out.push_str(&format!("\n## Depth {} ({} links)\n\n", depth, group.len()));
        for link in group {
            out.push_str(&format!("- {} (worker {})\n", link.url, link.found_by));
        }
    }

    if links.is_empty() {
        out.push_str("\nNo links discovered.\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(found: u64, processed: u64) -> CrawlStats {
        CrawlStats {
            found,
            processed,
            queue_size: 0,
            worker_count: 4,
            started_at: None,
            last_activity: None,
        }
    }

    fn link(url: &str, depth: u32, found_by: usize) -> DiscoveredLink {
        DiscoveredLink {
            url: url.to_string(),
            depth,
            found_by,
        }
    }

    #[test]
    fn test_render_groups_by_depth() {
        let links = vec![
            link("https://a.test/deep", 2, 1),
            link("https://a.test/one", 1, 0),
            link("https://a.test/two", 1, 1),
        ];
        let report = render_report(&links, &stats(3, 2));

        assert!(report.contains("## Depth 1 (2 links)"));
        assert!(report.contains("## Depth 2 (1 links)"));
        assert!(report.contains("- https://a.test/one (worker 0)"));
        // Depth 1 section comes before depth 2
        assert!(report.find("Depth 1").unwrap() < report.find("Depth 2").unwrap());
    }

    #[test]
    fn test_render_empty() {
        let report = render_report(&[], &stats(0, 1));
        assert!(report.contains("No links discovered."));
        assert!(report.contains("Pages processed: 1"));
    }

    #[test]
    fn test_write_report_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        let links = vec![link("https://a.test/x", 1, 0)];

        write_report(&path, &links, &stats(1, 1)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Crawl report"));
        assert!(written.contains("https://a.test/x"));
    }
}
