//! Link extraction from fetched page content
//!
//! The extractor scans HTML for anchor targets and returns the raw href
//! strings. It does not resolve them against the page URL; resolution is
//! the worker's job, so that depth and provenance stay with the engine.

mod filter;

pub use filter::LinkFilter;

use scraper::{Html, Selector};

/// Extracts raw candidate link strings from page content.
///
/// Pure function of the content, no side effects; may return zero links.
/// The `base_url` is informational (for logging by richer extractors) and
/// unused by the HTML implementation.
pub trait Extractor: Send + Sync {
    fn extract_links(&self, content: &[u8], base_url: &str) -> Vec<String>;
}

/// Anchor scanner over parsed HTML
///
/// Scans `<a href="...">` and skips hrefs that can never become fetchable
/// pages: `javascript:`, `mailto:`, `tel:`, `data:` schemes, same-page
/// fragments, and anchors carrying the `download` attribute.
pub struct HtmlExtractor;

impl Extractor for HtmlExtractor {
    fn extract_links(&self, content: &[u8], base_url: &str) -> Vec<String> {
        let html = String::from_utf8_lossy(content);
        let document = Html::parse_document(&html);
        let mut links = Vec::new();

        let selector = match Selector::parse("a[href]") {
            Ok(s) => s,
            Err(_) => return links,
        };

        for element in document.select(&selector) {
            if element.value().attr("download").is_some() {
                continue;
            }
            if let Some(href) = element.value().attr("href") {
                if let Some(href) = usable_href(href) {
                    links.push(href.to_string());
                }
            }
        }

        tracing::trace!("extracted {} candidate hrefs from {}", links.len(), base_url);
        links
    }
}

/// Filters out hrefs that should never be treated as page candidates
fn usable_href(href: &str) -> Option<&str> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    Some(href)
}
