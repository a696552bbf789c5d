use axum::{
    body::Bytes,
    extract::{FromRequest, Request, rejection::BytesRejection},
    http::{HeaderMap, Uri, header::CONTENT_TYPE},
};
use indexmap::IndexMap;
use url::form_urlencoded;

use crate::url::PathUrl;

/// Flat request parameters (query string and form body), independent of the
/// URL's own parameter view. Later sources override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    values: IndexMap<String, String>,
}

impl RequestParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` string, such as a query
    /// string or a form body.
    #[must_use]
    pub fn from_urlencoded(input: &str) -> Self {
        let mut params = Self::new();
        params.merge_urlencoded(input);
        params
    }

    pub fn merge_urlencoded(&mut self, input: &str) {
        let input = input.strip_prefix('?').unwrap_or(input);
        for (name, value) in form_urlencoded::parse(input.as_bytes()) {
            self.values.insert(name.into_owned(), value.into_owned());
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Read-only view over both parameter sources. URL parameters win over
/// request parameters of the same name.
#[derive(Debug, Clone, Copy)]
pub struct ParamLookup<'a> {
    url: &'a PathUrl,
    request: &'a RequestParams,
}

impl<'a> ParamLookup<'a> {
    #[must_use]
    pub const fn new(url: &'a PathUrl, request: &'a RequestParams) -> Self {
        Self { url, request }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.url
            .parameter(name)
            .or_else(|| self.request.get(name))
    }

    #[must_use]
    pub const fn url(&self) -> &'a PathUrl {
        self.url
    }
}

/// Everything a [`Navigator`](crate::Navigator) reads from an inbound request.
///
/// Usable directly as an Axum extractor. Request parameters come from the
/// query string, then from an `application/x-www-form-urlencoded` body, which
/// wins on name clashes. A request URI that cannot be parsed degrades to the
/// root URL with only the request parameters available.
///
/// The extractor consumes the body, so it has to be the last handler argument.
#[derive(Debug, Clone, Default)]
pub struct NavigatorRequest {
    pub url: PathUrl,
    pub params: RequestParams,
}

impl NavigatorRequest {
    #[must_use]
    pub fn new(url: PathUrl, params: RequestParams) -> Self {
        Self { url, params }
    }

    /// URL and query parameters of `uri`, without any body.
    #[must_use]
    pub fn from_uri(uri: &Uri) -> Self {
        let target = uri.path_and_query().map_or("/", |pq| pq.as_str());

        let url = PathUrl::parse(target).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "Falling back to root url");
            PathUrl::new()
        });
        let params = RequestParams::from_urlencoded(uri.query().unwrap_or_default());

        Self { url, params }
    }
}

fn has_form_body(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

impl<S> FromRequest<S> for NavigatorRequest
where
    S: Send + Sync,
{
    type Rejection = BytesRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut extracted = Self::from_uri(req.uri());

        if has_form_body(req.headers()) {
            let body = Bytes::from_request(req, state).await?;
            extracted.params.merge_urlencoded(&String::from_utf8_lossy(&body));
        }

        Ok(extracted)
    }
}
