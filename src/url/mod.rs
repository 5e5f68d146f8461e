//! URL handling for the crawl engine
//!
//! Raw hrefs coming out of the extractor are resolved against the page
//! they were found on. Resolution is deliberately string-based: three
//! rules tried in order, matching how discovered links are recorded.

use url::Url;

/// Resolves a raw candidate href against the URL of the page it was found on.
///
/// Three rules, tried in order:
/// 1. The candidate already carries a scheme: used as-is.
/// 2. The candidate starts with `/`: joined to the scheme+host root of the
///    base URL.
/// 3. Anything else: joined to the directory portion of the base URL (text
///    up to and including the last `/`, or the whole base if it has none).
///
/// Returns `None` for empty candidates and for rule 2 when the base URL
/// does not parse (no root to join against).
pub fn resolve_candidate(base: &str, candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }

    if has_scheme(candidate) {
        return Some(candidate.to_string());
    }

    if candidate.starts_with('/') {
        return domain_root(base).map(|root| format!("{}{}", root, candidate));
    }

    Some(format!("{}{}", directory_of(base), candidate))
}

/// Returns true if the string begins with a URI scheme (`letter` followed
/// by letters/digits/`+`/`-`/`.`, then `:`).
pub fn has_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    for c in chars {
        match c {
            ':' => return true,
            c if c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.' => {}
            _ => return false,
        }
    }
    false
}

/// Returns the scheme+host (and port, if any) of a URL, without a trailing
/// slash: `https://example.com:8080/a/b` -> `https://example.com:8080`.
pub fn domain_root(base: &str) -> Option<String> {
    let parsed = Url::parse(base).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    })
}

/// Returns the directory portion of a URL: everything up to and including
/// the last `/`, or the whole string if there is no `/` at all.
pub fn directory_of(base: &str) -> &str {
    match base.rfind('/') {
        Some(idx) => &base[..=idx],
        None => base,
    }
}

/// Validates a seed URL: must parse and use an http(s) scheme.
pub fn is_valid_seed(seed: &str) -> bool {
    match Url::parse(seed) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
