//! URL helpers shared by the date and domain classifiers.

use url::Url;

/// Extract the path component of a URL for pattern matching.
///
/// Everything after the host is returned, query string included. Strings
/// without a scheme fall back to the last `/` segment.
pub fn extract_path_from_url(url: &str) -> Option<&str> {
    url.split("://")
        .nth(1)
        .and_then(|s| s.find('/').map(|i| &s[i..]))
        .or_else(|| url.rfind('/').map(|i| &url[i..]))
}

/// Hostname of an absolute URL with one leading `www.` removed.
///
/// Returns `None` for anything the URL parser rejects or that has no host.
pub fn normalized_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// True when `host` is `domain` or a subdomain of it.
pub fn host_matches_domain(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
