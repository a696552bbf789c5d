//! Immutable request URL with named parameters.
//!
//! Parameters are read from two places: path segments written as
//! `name:value` (`/news/page:2/orderby:_date/`) and the query string
//! (`/news?page=2`). Parameters are kept sorted by name, so two URLs carrying
//! the same state always render identically.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use url::{Url, form_urlencoded};

use crate::errors::NavigatorError;

/// Name of the page number parameter.
pub const PAGE_PARAM: &str = "page";

const BASE: &str = "http://localhost/";

/// How parameters are written back when the URL is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamStyle {
    /// `/path/name:value/`
    #[default]
    Path,
    /// `/path?name=value`
    Query,
}

/// An immutable URL value. Every modifier returns a new instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathUrl {
    segments: Vec<String>,
    params: BTreeMap<String, String>,
    style: ParamStyle,
    trailing_slash: bool,
}

impl PathUrl {
    /// The root URL `/` without parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trailing_slash: true,
            ..Self::default()
        }
    }

    /// Parse an absolute URL or an absolute path.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::InvalidUrl`] when the input is not a valid URL.
    pub fn parse(input: &str) -> Result<Self, NavigatorError> {
        let parsed = match Url::parse(input) {
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(BASE).and_then(|base| base.join(input))
            }
            other => other,
        }
        .map_err(|source| NavigatorError::InvalidUrl {
            url: input.to_string(),
            source,
        })?;

        let mut url = Self::new();
        let mut path_params = false;

        if let Some(segments) = parsed.path_segments() {
            for raw in segments.filter(|s| !s.is_empty()) {
                match raw.split_once(':') {
                    Some((name, value)) if !name.is_empty() => {
                        url.params.insert(decode(name), decode(value));
                        path_params = true;
                    }
                    _ => url.segments.push(decode(raw)),
                }
            }
        }
        url.trailing_slash = parsed.path().ends_with('/');

        let mut query_params = false;
        for (name, value) in parsed.query_pairs() {
            url.params.insert(name.into_owned(), value.into_owned());
            query_params = true;
        }

        if query_params && !path_params {
            url.style = ParamStyle::Query;
        }

        Ok(url)
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub const fn style(&self) -> ParamStyle {
        self.style
    }

    /// Same URL, rendered with the given parameter style.
    #[must_use]
    pub fn with_style(&self, style: ParamStyle) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// All parameters, sorted by name.
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn has_parameters(&self) -> bool {
        !self.params.is_empty()
    }

    /// Set or replace a parameter.
    #[must_use]
    pub fn with_parameter(&self, name: &str, value: impl Into<String>) -> Self {
        let mut url = self.clone();
        url.params.insert(name.to_string(), value.into());
        url
    }

    #[must_use]
    pub fn without_parameter(&self, name: &str) -> Self {
        let mut url = self.clone();
        url.params.remove(name);
        url
    }

    /// Same path, no parameters at all.
    #[must_use]
    pub fn without_parameters(&self) -> Self {
        Self {
            params: BTreeMap::new(),
            ..self.clone()
        }
    }

    /// Current page number, 1-based.
    ///
    /// Missing or malformed values mean page 1, and so do `0` and negative
    /// values since no page precedes the first. Anything larger is returned
    /// as is, even past the last page.
    #[must_use]
    pub fn page(&self) -> u64 {
        self.parameter(PAGE_PARAM)
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1)
    }

    #[must_use]
    pub fn with_page(&self, page: u64) -> Self {
        self.with_parameter(PAGE_PARAM, page.to_string())
    }

    /// Rendered path and parameters, without scheme and host.
    #[must_use]
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

fn decode(raw: &str) -> String {
    url_escape::decode(raw).into_owned()
}

fn encode(raw: &str) -> String {
    url_escape::encode_component(raw).into_owned()
}

impl fmt::Display for PathUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from("/");
        for segment in &self.segments {
            out.push_str(&encode(segment));
            out.push('/');
        }

        match self.style {
            ParamStyle::Path => {
                for (name, value) in &self.params {
                    out.push_str(&encode(name));
                    out.push(':');
                    out.push_str(&encode(value));
                    out.push('/');
                }
            }
            ParamStyle::Query => {
                if !self.trailing_slash && !self.segments.is_empty() {
                    out.pop();
                }
                if !self.params.is_empty() {
                    let query = form_urlencoded::Serializer::new(String::new())
                        .extend_pairs(&self.params)
                        .finish();
                    out.push('?');
                    out.push_str(&query);
                }
            }
        }

        f.write_str(&out)
    }
}

impl FromStr for PathUrl {
    type Err = NavigatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
