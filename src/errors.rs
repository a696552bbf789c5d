//! # Navigator Errors
//!
//! Only configuration mistakes and data source failures are errors here.
//! A parameter that fails validation is not an error: the filter simply
//! contributes no predicate. An absent or empty data source is not an error
//! either: the navigator becomes "not searchable".
//!
//! ## Error Codes
//!
//! | Code | Variant |
//! |------|---------|
//! | 10 | [`NavigatorError::NoOrderByOption`] |
//! | 20 | [`NavigatorError::FilterNotExists`] |
//! | 30 | [`NavigatorError::FilterNotCallable`] |
//! | 40 | [`NavigatorError::InvalidPattern`] |
//! | 50 | [`NavigatorError::InvalidConfig`] |
//! | 60 | [`NavigatorError::InvalidUrl`] |
//! | 70 | [`NavigatorError::Database`] |
//!
//! ## Usage with Axum
//!
//! ```rust,ignore
//! async fn list(req: NavigatorRequest) -> Result<Json<PageSummary>, NavigatorError> {
//!     let mut nav = Navigator::from_request(req);
//!     nav.add_order_by("id");
//!     let _ = nav.order_by_option("title")?; // 500, logged
//!     Ok(Json(nav.page_summary()))
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

/// Errors raised by [`Navigator`](crate::Navigator) and its configuration.
#[derive(Debug, thiserror::Error)]
pub enum NavigatorError {
    /// A sort option was looked up by a column that was never registered.
    #[error("column \"{0}\" is not among the sort options")]
    NoOrderByOption(String),

    /// A filter was looked up by a column that was never registered.
    #[error("filter \"{0}\" is not registered")]
    FilterNotExists(String),

    /// A filter refers to a callback name that resolves to nothing callable.
    #[error("filter callback \"{0}\" is not callable")]
    FilterNotCallable(String),

    /// A validator or cleaner pattern failed to compile.
    #[error("invalid pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A declarative configuration document could not be parsed.
    #[error("invalid navigator configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// The request URL could not be parsed.
    #[error("invalid url \"{url}\": {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The bound collection failed to count or fetch.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl NavigatorError {
    pub const NO_ORDERBY_OPTION: u16 = 10;
    pub const FILTER_NOT_EXISTS: u16 = 20;
    pub const FILTER_NOT_CALLABLE: u16 = 30;
    pub const INVALID_PATTERN: u16 = 40;
    pub const INVALID_CONFIG: u16 = 50;
    pub const INVALID_URL: u16 = 60;
    pub const DATABASE: u16 = 70;

    /// Stable numeric code of this error.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::NoOrderByOption(_) => Self::NO_ORDERBY_OPTION,
            Self::FilterNotExists(_) => Self::FILTER_NOT_EXISTS,
            Self::FilterNotCallable(_) => Self::FILTER_NOT_CALLABLE,
            Self::InvalidPattern { .. } => Self::INVALID_PATTERN,
            Self::InvalidConfig(_) => Self::INVALID_CONFIG,
            Self::InvalidUrl { .. } => Self::INVALID_URL,
            Self::Database(_) => Self::DATABASE,
        }
    }

    pub(crate) fn invalid_pattern(pattern: &str, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Sanitized message sent to clients
    fn user_message(&self) -> String {
        match self {
            Self::InvalidUrl { .. } => "Malformed request URL".to_string(),
            Self::Database(_) => "A database error occurred".to_string(),
            _ => "Internal Server Error".to_string(),
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database(internal) => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            Self::InvalidUrl { .. } => {
                tracing::debug!(error = %self, "Rejected request url");
            }
            _ => {
                tracing::error!(code = self.code(), error = %self, "Navigator misconfigured");
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl IntoResponse for NavigatorError {
    fn into_response(self) -> Response {
        self.log_internal();

        let body = ErrorResponse {
            error: self.user_message(),
            code: self.code(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
