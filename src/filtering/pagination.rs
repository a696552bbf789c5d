use axum::http::header::{CONTENT_RANGE, HeaderMap, HeaderValue};

/// Number of pages needed for `total` items.
///
/// `None` when there is nothing to page through. Without a page size every
/// item fits on a single page.
#[must_use]
pub fn total_pages(total: u64, page_size: Option<u64>) -> Option<u64> {
    if total == 0 {
        return None;
    }

    match page_size {
        Some(size) if size > 0 => Some(total.div_ceil(size)),
        _ => Some(1),
    }
}

/// Row offset of a 1-based page.
#[must_use]
pub fn offset(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(page_size)
}

/// Page after `page`, `None` on the last one or when the count is unknown.
#[must_use]
pub fn next_page(page: u64, total_pages: Option<u64>) -> Option<u64> {
    total_pages.filter(|last| page < *last).map(|_| page + 1)
}

/// Page before `page`, `None` on the first one.
#[must_use]
pub const fn prev_page(page: u64) -> Option<u64> {
    if page > 1 { Some(page - 1) } else { None }
}

/// Strip control and non-ASCII characters so the name is a valid header value.
fn sanitize_resource_name(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii() && !c.is_ascii_control()).collect()
}

/// Build the `Content-Range` header for a page window, e.g. `users 0-9/100`.
///
/// The window is capped at the last item. A window starting at or past the
/// end renders as `users */100`.
#[must_use]
pub fn calculate_content_range(
    offset: u64,
    limit: u64,
    total_count: u64,
    resource_name: &str,
) -> HeaderMap {
    let safe_name = sanitize_resource_name(resource_name);

    let content_range = if offset >= total_count {
        format!("{safe_name} */{total_count}")
    } else {
        let last = offset
            .saturating_add(limit.max(1))
            .saturating_sub(1)
            .min(total_count - 1);
        format!("{safe_name} {offset}-{last}/{total_count}")
    };

    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&content_range).unwrap_or_else(|_| {
        HeaderValue::from_static("items 0-0/0")
    });
    headers.insert(CONTENT_RANGE, value);

    headers
}
