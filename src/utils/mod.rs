//! Shared utility functions.
//!
//! - `url_parts`: hostname normalization and path extraction

mod url_parts;

pub use url_parts::{extract_path_from_url, host_matches_domain, normalized_host};
