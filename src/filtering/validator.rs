use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::errors::NavigatorError;

/// Rule a raw parameter value has to satisfy.
#[derive(Clone, Default)]
pub enum Validator {
    /// Every value passes.
    #[default]
    Any,
    /// Value passes when the predicate returns `true`.
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
    /// Value passes when the pattern matches somewhere in it.
    Pattern(Regex),
}

impl Validator {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Compile `pattern` into a [`Validator::Pattern`].
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::InvalidPattern`] if the regex does not compile.
    pub fn pattern(pattern: &str) -> Result<Self, NavigatorError> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|e| NavigatorError::invalid_pattern(pattern, e))
    }

    /// Integers and decimal numbers, optionally signed.
    #[must_use]
    pub fn numeric() -> Self {
        Self::predicate(is_numeric)
    }

    #[must_use]
    pub fn check(&self, value: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Predicate(f) => f(value),
            Self::Pattern(re) => re.is_match(value),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
        }
    }
}

impl From<Regex> for Validator {
    fn from(re: Regex) -> Self {
        Self::Pattern(re)
    }
}

#[must_use]
pub fn is_numeric(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        && value.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Finite set of allowed values, each with a display label.
///
/// By default a value is allowed when it equals one of the keys; with
/// [`Choices::match_values`] it has to equal one of the labels instead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Choices {
    entries: Vec<(String, String)>,
    match_values: bool,
}

impl Choices {
    /// Keyed choices: `[("1", "one"), ("2", "two")]`.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            match_values: false,
        }
    }

    /// A plain list; values are matched, keys are positions.
    pub fn list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::new(values.into_iter().enumerate().map(|(i, v)| (i.to_string(), v))).match_values(true)
    }

    #[must_use]
    pub fn match_values(mut self, match_values: bool) -> Self {
        self.match_values = match_values;
        self
    }

    #[must_use]
    pub const fn matches_values(&self) -> bool {
        self.match_values
    }

    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|(key, label)| {
            if self.match_values {
                label == value
            } else {
                key == value
            }
        })
    }
}
