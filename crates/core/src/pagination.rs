//! Offset-based page slicing for movie listings.

use serde::Serialize;

/// Movies per page on the public listing.
pub const PUBLIC_PAGE_SIZE: i64 = 6;

/// Movies per page on the admin listing.
pub const ADMIN_PAGE_SIZE: i64 = 10;

/// One page of results plus the numbers needed to render page links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was served.
    pub current_page: i64,
    pub per_page: i64,
    /// Total matching rows across all pages.
    pub total: i64,
    /// Last page that has rows (at least 1, even when `total` is 0).
    pub last_page: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, current_page: i64, per_page: i64, total: i64) -> Self {
        Self {
            items,
            current_page,
            per_page,
            total,
            last_page: last_page(total, per_page),
        }
    }
}

/// Clamp a requested page number to 1 or more. Missing means the first page.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Row offset for a clamped page number.
pub fn page_offset(page: i64, per_page: i64) -> i64 {
    (page - 1).saturating_mul(per_page)
}

/// Number of the last non-empty page.
pub fn last_page(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        return 1;
    }
    (total + per_page - 1) / per_page
}
