//! Result URL classification: official documentation hosts and known platforms.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::utils::{host_matches_domain, normalized_host};

/// Hosts recognised as official documentation sources.
pub static AUTHORITY_DOMAINS: &[&str] = &[
    "developer.mozilla.org",
    "react.dev",
    "reactjs.org",
    "vuejs.org",
    "angular.io",
    "svelte.dev",
    "nextjs.org",
    "pypi.org",
    "npmjs.com",
    "docs.python.org",
    "go.dev",
    "rust-lang.org",
    "learn.microsoft.com",
    "docs.microsoft.com",
    "docs.aws.amazon.com",
    "cloud.google.com",
    "developers.google.com",
    "developer.apple.com",
    "docs.oracle.com",
    "kotlinlang.org",
    "typescriptlang.org",
    "php.net",
];

/// Community platforms a result can be hosted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Github,
    StackOverflow,
    Npm,
    Pypi,
    Medium,
    DevTo,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Github => "github",
            Platform::StackOverflow => "stackoverflow",
            Platform::Npm => "npm",
            Platform::Pypi => "pypi",
            Platform::Medium => "medium",
            Platform::DevTo => "devto",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Github => "GitHub",
            Platform::StackOverflow => "Stack Overflow",
            Platform::Npm => "NPM",
            Platform::Pypi => "PyPI",
            Platform::Medium => "Medium",
            Platform::DevTo => "Dev.to",
        }
    }
}

/// A platform match for a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformMatch {
    #[serde(rename = "type")]
    pub platform: Platform,
    pub label: &'static str,
}

/// Platform patterns, tested in order against the raw URL.
pub static PLATFORM_PATTERNS: LazyLock<Vec<(Platform, Regex)>> = LazyLock::new(|| {
    vec![
        (Platform::Github, Regex::new(r"github\.com/[\w-]+/[\w-]+").unwrap()),
        (Platform::StackOverflow, Regex::new(r"stackoverflow\.com/questions").unwrap()),
        (Platform::Npm, Regex::new(r"npmjs\.com/package").unwrap()),
        (Platform::Pypi, Regex::new(r"pypi\.org/project").unwrap()),
        (Platform::Medium, Regex::new(r"medium\.com").unwrap()),
        (Platform::DevTo, Regex::new(r"dev\.to").unwrap()),
    ]
});

/// Check whether a URL points at an official documentation host.
///
/// Matches the exact domain or any subdomain of it, never a longer label
/// (`notreact.dev` is not `react.dev`). Malformed URLs are not authorities.
pub fn is_authority_domain(url: &str) -> bool {
    match normalized_host(url) {
        Some(host) => AUTHORITY_DOMAINS
            .iter()
            .any(|domain| host_matches_domain(&host, domain)),
        None => {
            tracing::trace!("Unparseable URL treated as non-authority: {}", url);
            false
        }
    }
}

/// Detect the community platform hosting a URL. First table match wins.
pub fn detect_platform(url: Option<&str>) -> Option<PlatformMatch> {
    let url = url?;
    PLATFORM_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(url))
        .map(|(platform, _)| PlatformMatch {
            platform: *platform,
            label: platform.label(),
        })
}
