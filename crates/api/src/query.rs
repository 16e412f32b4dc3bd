//! Query parameter types for the listing endpoints.

use serde::Deserialize;

/// Query parameters for the public listing (`?search=&page=`).
///
/// `page` is kept as text so a malformed value falls back to the first
/// page instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub page: Option<String>,
}

/// Query parameters for the admin listing (`?page=`).
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

/// Parse a `page` query value. Anything that is not an integer yields
/// `None`, which the service serves as page 1.
pub fn parse_page(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|p| p.trim().parse().ok())
}
