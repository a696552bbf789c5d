use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Parameters every navigator understands, independent of its filters.
///
/// # Sorting
/// `orderby` is a column name; prefix it with `_` for descending order:
/// ```text
/// ?orderby=title      ascending
/// ?orderby=_title     descending
/// ```
///
/// # Pagination
/// `page` is 1-based. Out of range pages are not clamped, they simply return
/// no items.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct NavigatorParams {
    /// Sort column, `_`-prefixed for descending order.
    #[param(example = "_created_at")]
    pub orderby: Option<String>,
    /// Page number, starting at 1.
    #[param(example = 2, minimum = 1)]
    pub page: Option<u64>,
}

/// Pagination state of a navigator, ready to be sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageSummary {
    pub page: u64,
    pub page_size: Option<u64>,
    pub total: u64,
    /// `None` when nothing matched.
    pub total_pages: Option<u64>,
    pub prev_page: Option<u64>,
    pub next_page: Option<u64>,
    /// Canonical URL of the current state, without the page.
    pub url: String,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
}
