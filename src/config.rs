//! # Declarative Navigator Setup
//!
//! Everything that can be registered on a [`Navigator`](crate::Navigator) in
//! code can also be described in a configuration document and applied with
//! [`Navigator::configure`](crate::Navigator::configure).
//!
//! ```json
//! {
//!   "page_size": 20,
//!   "dialect": "postgres",
//!   "filters": [
//!     { "column": "status", "kind": "equal", "choices": [["new", "New"], ["done", "Done"]] },
//!     { "column": "created", "kind": "between", "field": "posts.created_at", "date": true },
//!     { "column": "title", "kind": "like" },
//!     { "column": "recent", "kind": "custom", "callback": "recent_days", "numeric": true }
//!   ],
//!   "order_by": [
//!     { "column": "id", "name": "ID" },
//!     { "column": "comments", "sql": "count(comments.id)", "inverse": true }
//!   ],
//!   "default_order_by": { "column": "id", "ascending": false }
//! }
//! ```
//!
//! Callbacks are referenced by name; the name must be registered with
//! [`Navigator::register_callback`](crate::Navigator::register_callback)
//! before the document is applied.

use sea_orm::sea_query::{
    MysqlQueryBuilder, PostgresQueryBuilder, QueryStatementWriter, SelectStatement,
    SqliteQueryBuilder,
};
use serde::{Deserialize, Serialize};

use crate::errors::NavigatorError;
use crate::filtering::sort::{DEFAULT_ASC_TEMPLATE, DEFAULT_DESC_TEMPLATE};

/// SQL flavour used when predicates and sort clauses are rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    #[default]
    MySql,
    Postgres,
    Sqlite,
}

impl SqlDialect {
    /// Render a statement with values inlined.
    pub(crate) fn render(self, statement: &SelectStatement) -> String {
        match self {
            Self::MySql => statement.to_string(MysqlQueryBuilder),
            Self::Postgres => statement.to_string(PostgresQueryBuilder),
            Self::Sqlite => statement.to_string(SqliteQueryBuilder),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Items per page; `None` disables pagination.
    pub page_size: Option<u64>,
    /// Template for ascending sort labels, `{}` is the option name.
    pub asc_name_template: String,
    /// Template for descending sort labels, `{}` is the option name.
    pub desc_name_template: String,
    pub dialect: SqlDialect,
    pub filters: Vec<FilterConfig>,
    pub order_by: Vec<OrderByConfig>,
    pub default_order_by: Option<DefaultOrderByConfig>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            page_size: None,
            asc_name_template: DEFAULT_ASC_TEMPLATE.to_string(),
            desc_name_template: DEFAULT_DESC_TEMPLATE.to_string(),
            dialect: SqlDialect::default(),
            filters: Vec::new(),
            order_by: Vec::new(),
            default_order_by: None,
        }
    }
}

impl NavigatorConfig {
    /// Parse a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::InvalidConfig`] when the document is malformed.
    pub fn from_json(document: &str) -> Result<Self, NavigatorError> {
        Ok(serde_json::from_str(document)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKindConfig {
    #[default]
    Equal,
    Between,
    Like,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub column: String,
    pub kind: FilterKindConfig,
    pub name: Option<String>,
    pub field: Option<String>,
    /// Regex the value has to match.
    pub pattern: Option<String>,
    /// Only numbers pass. Ignored when `pattern` is set.
    pub numeric: bool,
    /// Allowed `[key, label]` pairs.
    pub choices: Vec<(String, String)>,
    /// Match choices by label instead of key.
    pub match_values: bool,
    /// Name of a registered callback.
    pub callback: Option<String>,
    pub greater_or_equal: Option<bool>,
    pub less_or_equal: Option<bool>,
    pub date: Option<bool>,
    pub like_template: Option<String>,
    pub cleaner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderByConfig {
    pub column: String,
    pub name: Option<String>,
    pub sql: Option<String>,
    pub inverse: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultOrderByConfig {
    pub column: String,
    #[serde(default = "ascending")]
    pub ascending: bool,
}

const fn ascending() -> bool {
    true
}
