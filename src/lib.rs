//! # crudnav
//!
//! Turns untrusted request parameters into validated SQL filters, one sort
//! order and pagination bounds, and rebuilds canonical URLs that keep only
//! the state it recognised.
//!
//! ```rust,ignore
//! use crudnav::{Navigator, NavigatorRequest, Validator};
//!
//! async fn list(req: NavigatorRequest) -> String {
//!     // GET /posts/title:rust/id_from:10/orderby:_id/page:2/
//!     let mut nav = Navigator::from_request(req);
//!     nav.add_filter_like("title");
//!     nav.add_filter_between("id").set_validator(Validator::numeric());
//!     nav.add_order_by("id");
//!
//!     nav.process_filters().as_sql() // `title` LIKE 'rust%' AND `id` >= 10
//! }
//! ```
//!
//! ## Modules
//!
//! - [`navigator`]: the [`Navigator`] tying everything together
//! - [`filtering`]: filters, sort options, predicates and page arithmetic
//! - [`url`]: [`PathUrl`], the immutable URL with `name:value` parameters
//! - [`collection`]: the data source seam and its sea-orm implementation
//! - [`config`]: declarative setup from JSON

pub mod collection;
pub mod config;
pub mod errors;
pub mod filtering;
pub mod html;
pub mod models;
pub mod naming;
pub mod navigator;
pub mod request;
pub mod url;

pub use collection::{Collection, EntityCollection, NoCollection};
pub use config::{NavigatorConfig, SqlDialect};
pub use errors::NavigatorError;
pub use filtering::{
    Choices, Conditions, Filter, FilterCallback, FilterContext, FilterKind, OrderBy, Validator,
};
pub use models::{NavigatorParams, PageSummary};
pub use navigator::Navigator;
pub use request::{NavigatorRequest, ParamLookup, RequestParams};
pub use url::PathUrl;
