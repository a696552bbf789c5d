//! # Filtering, Sorting & Pagination Primitives
//!
//! The building blocks a [`Navigator`](crate::Navigator) is assembled from.
//!
//! ## URL Conventions
//!
//! ```text
//! /news/orderby:_date/                 sort by `date` descending
//! /news/orderby:title/page:2/          sort by `title` ascending, second page
//! /news/created_from:01.01.2024/       lower bound of the `created` range filter
//! /news?status=draft&created_to=2024-02-01
//! ```
//!
//! ## Main Components
//!
//! - [`Filter`]: one filterable parameter with its validation and predicate logic
//! - [`OrderBy`]: one sortable column and its URL token
//! - [`Conditions`]: predicates joined with `AND`, rendered through sea-query
//! - [`Validator`] and [`Choices`]: what counts as a clean value
//! - [`pagination`]: page arithmetic and the `Content-Range` header

pub mod conditions;
pub mod filter;
pub mod pagination;
pub mod sort;
pub mod validator;

pub use conditions::{Conditions, typed_value};
pub use filter::{
    Filter, FilterCallback, FilterContext, FilterKind, LikeOptions, RangeOptions,
};
pub use pagination::calculate_content_range;
pub use sort::{ORDER_BY_PARAM, OrderBy, decode_token};
pub use validator::{Choices, Validator, is_numeric};
