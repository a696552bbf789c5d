use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use sea_orm::sea_query::Value;

use crate::config::SqlDialect;
use crate::errors::NavigatorError;
use crate::filtering::conditions::{Conditions, typed_value};
use crate::filtering::validator::{Choices, Validator};
use crate::html::{Attributes, Input, Select};
use crate::naming::humanize;
use crate::request::ParamLookup;

pub const FROM_SUFFIX: &str = "_from";
pub const TO_SUFFIX: &str = "_to";
pub const DEFAULT_LIKE_TEMPLATE: &str = "{}%";

/// Latin and Cyrillic letters plus digits are kept, everything else splits words.
static DEFAULT_CLEANER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[^a-zа-яё0-9]+").expect("default cleaner is a valid regex"));

const DATE_FORMATS: &[&str] = &["%d.%m.%Y", "%Y-%m-%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%d.%m.%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Custom resolution step. Replaces the built-in behavior of the filter kind.
pub type FilterCallback = Arc<dyn Fn(&mut FilterContext<'_>, &Filter) + Send + Sync>;

/// What a filter sees while it resolves: the parameters of the request and
/// the working predicate set of the navigator.
pub struct FilterContext<'a> {
    params: ParamLookup<'a>,
    conditions: &'a mut Conditions,
}

impl<'a> FilterContext<'a> {
    pub fn new(params: ParamLookup<'a>, conditions: &'a mut Conditions) -> Self {
        Self { params, conditions }
    }

    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&'a str> {
        self.params.get(name)
    }

    #[must_use]
    pub const fn params(&self) -> ParamLookup<'a> {
        self.params
    }

    pub fn conditions(&mut self) -> &mut Conditions {
        self.conditions
    }
}

/// Bound inclusivity and date handling of a range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeOptions {
    /// `>=` instead of `>` for the lower bound.
    pub greater_or_equal: bool,
    /// `<=` instead of `<` for the upper bound.
    pub less_or_equal: bool,
    /// Stretch bounds to whole calendar days.
    pub date: bool,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            greater_or_equal: true,
            less_or_equal: true,
            date: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LikeOptions {
    /// Pattern with a `{}` placeholder for the cleaned value.
    pub template: String,
    /// Runs of matching characters become word breaks.
    pub cleaner: Regex,
}

impl Default for LikeOptions {
    fn default() -> Self {
        Self {
            template: DEFAULT_LIKE_TEMPLATE.to_string(),
            cleaner: DEFAULT_CLEANER.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum FilterKind {
    /// Only the callback contributes predicates.
    Custom,
    /// `field = value`
    Equal,
    /// `{column}_from` / `{column}_to` bounds.
    Between(RangeOptions),
    /// `field LIKE pattern`
    Like(LikeOptions),
}

impl FilterKind {
    #[must_use]
    pub const fn between() -> Self {
        Self::Between(RangeOptions {
            greater_or_equal: true,
            less_or_equal: true,
            date: false,
        })
    }

    #[must_use]
    pub fn like() -> Self {
        Self::Like(LikeOptions::default())
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Equal => "equal",
            Self::Between(_) => "between",
            Self::Like(_) => "like",
        }
    }
}

/// A filterable request parameter.
///
/// `column` is the parameter name in the URL, `field` the SQL column the
/// predicate is built on. For range filters `column` is a stem and the actual
/// parameters are `{column}_from` and `{column}_to`.
#[derive(Clone)]
pub struct Filter {
    column: String,
    name: Option<String>,
    field: Option<String>,
    validator: Validator,
    choices: Option<Choices>,
    callback: Option<FilterCallback>,
    kind: FilterKind,
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("column", &self.column)
            .field("name", &self.name)
            .field("field", &self.field)
            .field("validator", &self.validator)
            .field("choices", &self.choices)
            .field("callback", &self.callback.as_ref().map(|_| ".."))
            .field("kind", &self.kind)
            .finish()
    }
}

impl Filter {
    pub fn new(column: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            column: column.into(),
            name: None,
            field: None,
            validator: Validator::Any,
            choices: None,
            callback: None,
            kind,
        }
    }

    pub fn equal(column: impl Into<String>) -> Self {
        Self::new(column, FilterKind::Equal)
    }

    pub fn between(column: impl Into<String>) -> Self {
        Self::new(column, FilterKind::between())
    }

    pub fn like(column: impl Into<String>) -> Self {
        Self::new(column, FilterKind::like())
    }

    pub fn custom<F>(column: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&mut FilterContext<'_>, &Self) + Send + Sync + 'static,
    {
        let mut filter = Self::new(column, FilterKind::Custom);
        filter.set_callback(callback);
        filter
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    #[must_use]
    pub const fn kind(&self) -> &FilterKind {
        &self.kind
    }

    /// Display name, derived from the column when not set.
    #[must_use]
    pub fn name(&self) -> String {
        self.name.clone().unwrap_or_else(|| humanize(&self.column))
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_deref().unwrap_or(&self.column)
    }

    pub fn set_field(&mut self, field: impl Into<String>) -> &mut Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub const fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn set_validator(&mut self, validator: impl Into<Validator>) -> &mut Self {
        self.validator = validator.into();
        self
    }

    /// Shortcut for [`Validator::pattern`].
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::InvalidPattern`] if the regex does not compile.
    pub fn set_pattern(&mut self, pattern: &str) -> Result<&mut Self, NavigatorError> {
        self.validator = Validator::pattern(pattern)?;
        Ok(self)
    }

    #[must_use]
    pub const fn choices(&self) -> Option<&Choices> {
        self.choices.as_ref()
    }

    /// Restrict values to a fixed set. An empty set lifts the restriction.
    pub fn set_choices(&mut self, choices: Choices) -> &mut Self {
        self.choices = (!choices.is_empty()).then_some(choices);
        self
    }

    #[must_use]
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    pub fn set_callback<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&mut FilterContext<'_>, &Self) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    pub fn set_shared_callback(&mut self, callback: FilterCallback) -> &mut Self {
        self.callback = Some(callback);
        self
    }

    pub fn set_greater_or_equal(&mut self, greater_or_equal: bool) -> &mut Self {
        match &mut self.kind {
            FilterKind::Between(range) => range.greater_or_equal = greater_or_equal,
            other => warn_kind(&self.column, other, "greater_or_equal"),
        }
        self
    }

    pub fn set_less_or_equal(&mut self, less_or_equal: bool) -> &mut Self {
        match &mut self.kind {
            FilterKind::Between(range) => range.less_or_equal = less_or_equal,
            other => warn_kind(&self.column, other, "less_or_equal"),
        }
        self
    }

    pub fn set_date(&mut self, date: bool) -> &mut Self {
        match &mut self.kind {
            FilterKind::Between(range) => range.date = date,
            other => warn_kind(&self.column, other, "date"),
        }
        self
    }

    pub fn set_like_template(&mut self, template: impl Into<String>) -> &mut Self {
        match &mut self.kind {
            FilterKind::Like(like) => like.template = template.into(),
            other => warn_kind(&self.column, other, "like_template"),
        }
        self
    }

    /// Replace the regex that decides which characters split search words.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::InvalidPattern`] if the regex does not compile.
    pub fn set_cleaner(&mut self, pattern: &str) -> Result<&mut Self, NavigatorError> {
        let cleaner = Regex::new(pattern).map_err(|e| NavigatorError::invalid_pattern(pattern, e))?;
        match &mut self.kind {
            FilterKind::Like(like) => like.cleaner = cleaner,
            other => warn_kind(&self.column, other, "cleaner"),
        }
        Ok(self)
    }

    /// Check one value against the choices, then against the validator.
    #[must_use]
    pub fn validate(&self, value: &str) -> bool {
        if let Some(choices) = &self.choices
            && (value.is_empty() || !choices.contains(value))
        {
            return false;
        }

        self.validator.check(value)
    }

    /// `true` when every value passes [`Filter::validate`].
    pub fn validate_all<'v>(&self, values: impl IntoIterator<Item = &'v str>) -> bool {
        values.into_iter().all(|v| self.validate(v))
    }

    fn clean(&self, params: ParamLookup<'_>, name: &str) -> Option<String> {
        let raw = params.get(name)?;
        if raw.is_empty() {
            return None;
        }

        if self.validate(raw) {
            Some(raw.to_string())
        } else {
            tracing::debug!(filter = %self.column, parameter = %name, "Value rejected by validation");
            None
        }
    }

    /// The parameter value if it is present and valid.
    #[must_use]
    pub fn clean_value(&self, params: ParamLookup<'_>) -> Option<String> {
        self.clean(params, &self.column)
    }

    #[must_use]
    pub fn column_from(&self) -> String {
        format!("{}{FROM_SUFFIX}", self.column)
    }

    #[must_use]
    pub fn column_to(&self) -> String {
        format!("{}{TO_SUFFIX}", self.column)
    }

    #[must_use]
    pub fn clean_value_from(&self, params: ParamLookup<'_>) -> Option<String> {
        self.clean(params, &self.column_from())
    }

    #[must_use]
    pub fn clean_value_to(&self, params: ParamLookup<'_>) -> Option<String> {
        self.clean(params, &self.column_to())
    }

    /// Parameters this filter would keep in a clean URL.
    #[must_use]
    pub fn clean_url_params(&self, params: ParamLookup<'_>) -> Vec<(String, String)> {
        match self.kind {
            FilterKind::Between(_) => [
                (self.column_from(), self.clean_value_from(params)),
                (self.column_to(), self.clean_value_to(params)),
            ]
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect(),
            _ => self
                .clean_value(params)
                .map(|v| vec![(self.column.clone(), v)])
                .unwrap_or_default(),
        }
    }

    /// Add this filter's predicates to the context's conditions.
    pub fn resolve(&self, ctx: &mut FilterContext<'_>) {
        if let Some(callback) = &self.callback {
            callback(ctx, self);
            return;
        }

        let params = ctx.params();
        match &self.kind {
            FilterKind::Custom => {}
            FilterKind::Equal => {
                if let Some(value) = self.clean_value(params) {
                    ctx.conditions().equal(self.field(), typed_value(&value));
                }
            }
            FilterKind::Between(_) => {
                self.add_from_condition(ctx.conditions(), params, None);
                self.add_to_condition(ctx.conditions(), params, None);
            }
            FilterKind::Like(like) => {
                if let Some(value) = self.clean_value(params) {
                    let cleaned = clean_like(&like.cleaner, &value);
                    if !cleaned.is_empty() {
                        let pattern = like.template.replacen("{}", &cleaned, 1);
                        ctx.conditions().like(self.field(), pattern);
                    }
                }
            }
        }
    }

    /// Lower bound predicate in a fresh [`Conditions`] rendered in `dialect`.
    /// `value` replaces the request value and skips date normalization.
    #[must_use]
    pub fn from_condition(
        &self,
        params: ParamLookup<'_>,
        value: Option<&str>,
        dialect: SqlDialect,
    ) -> Conditions {
        let mut conditions = Conditions::new(dialect);
        self.add_from_condition(&mut conditions, params, value);
        conditions
    }

    /// Upper bound counterpart of [`Filter::from_condition`].
    #[must_use]
    pub fn to_condition(
        &self,
        params: ParamLookup<'_>,
        value: Option<&str>,
        dialect: SqlDialect,
    ) -> Conditions {
        let mut conditions = Conditions::new(dialect);
        self.add_to_condition(&mut conditions, params, value);
        conditions
    }

    pub fn add_from_condition(
        &self,
        conditions: &mut Conditions,
        params: ParamLookup<'_>,
        value: Option<&str>,
    ) {
        let range = self.range();
        let Some(start_of_day) = NaiveTime::from_hms_opt(0, 0, 0) else {
            return;
        };
        let Some(bound) = self.bound(value, || self.clean_value_from(params), range.date, start_of_day)
        else {
            return;
        };

        if range.greater_or_equal {
            conditions.greater_or_equal(self.field(), bound);
        } else {
            conditions.greater(self.field(), bound);
        }
    }

    pub fn add_to_condition(
        &self,
        conditions: &mut Conditions,
        params: ParamLookup<'_>,
        value: Option<&str>,
    ) {
        let range = self.range();
        let Some(end_of_day) = NaiveTime::from_hms_opt(23, 59, 59) else {
            return;
        };
        let Some(bound) = self.bound(value, || self.clean_value_to(params), range.date, end_of_day)
        else {
            return;
        };

        if range.less_or_equal {
            conditions.less_or_equal(self.field(), bound);
        } else {
            conditions.less(self.field(), bound);
        }
    }

    fn range(&self) -> RangeOptions {
        match self.kind {
            FilterKind::Between(range) => range,
            _ => RangeOptions::default(),
        }
    }

    fn bound(
        &self,
        value: Option<&str>,
        clean: impl FnOnce() -> Option<String>,
        date: bool,
        time: NaiveTime,
    ) -> Option<Value> {
        if let Some(value) = value {
            return (!value.is_empty()).then(|| typed_value(value));
        }

        let raw = clean()?;
        if !date {
            return Some(typed_value(&raw));
        }

        match parse_day(&raw) {
            Some(day) => Some(Value::from(NaiveDateTime::new(day, time))),
            None => {
                tracing::debug!(filter = %self.column, value = %raw, "Not a date, bound ignored");
                None
            }
        }
    }

    /// Reduce a search string to words joined by `%`, using this filter's
    /// cleaner (or the default one for non-like filters).
    #[must_use]
    pub fn clean_like_value(&self, value: &str) -> String {
        match &self.kind {
            FilterKind::Like(like) => clean_like(&like.cleaner, value),
            _ => clean_like(&DEFAULT_CLEANER, value),
        }
    }

    /// A `<select>` over the choices, `None` without choices. The current
    /// clean value is selected unless `value` is given.
    #[must_use]
    pub fn as_select(
        &self,
        params: ParamLookup<'_>,
        placeholder: Option<&str>,
        attributes: Attributes,
        value: Option<&str>,
    ) -> Option<Select> {
        let choices = self.choices.as_ref()?;
        let options = choices
            .entries()
            .iter()
            .map(|(key, label)| {
                if choices.matches_values() {
                    (label.clone(), label.clone())
                } else {
                    (key.clone(), label.clone())
                }
            })
            .collect();

        let selected = value
            .map(str::to_string)
            .or_else(|| self.clean_value(params));

        Some(Select::new(
            self.column.clone(),
            options,
            selected,
            attributes,
            placeholder.map(str::to_string),
        ))
    }

    /// A text input holding the current clean value unless `value` is given.
    #[must_use]
    pub fn as_input(&self, params: ParamLookup<'_>, attributes: Attributes, value: Option<&str>) -> Input {
        let value = value.map(str::to_string).or_else(|| self.clean_value(params));
        Input::new(self.column.clone(), value, attributes)
    }

    #[must_use]
    pub fn as_input_from(&self, params: ParamLookup<'_>, attributes: Attributes, value: Option<&str>) -> Input {
        let value = value
            .map(str::to_string)
            .or_else(|| self.clean_value_from(params));
        Input::new(self.column_from(), value, attributes)
    }

    #[must_use]
    pub fn as_input_to(&self, params: ParamLookup<'_>, attributes: Attributes, value: Option<&str>) -> Input {
        let value = value
            .map(str::to_string)
            .or_else(|| self.clean_value_to(params));
        Input::new(self.column_to(), value, attributes)
    }
}

fn warn_kind(column: &str, kind: &FilterKind, option: &str) {
    tracing::warn!(filter = %column, kind = kind.label(), option, "Option does not apply to this filter kind");
}

fn clean_like(cleaner: &Regex, value: &str) -> String {
    cleaner
        .replace_all(value, " ")
        .trim()
        .replace(' ', "%")
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestParams;
    use crate::url::PathUrl;

    fn url(path: &str) -> PathUrl {
        PathUrl::parse(path).unwrap()
    }

    fn resolve(filter: &Filter, url: &PathUrl) -> String {
        let request = RequestParams::new();
        let mut conditions = Conditions::default();
        let mut ctx = FilterContext::new(ParamLookup::new(url, &request), &mut conditions);
        filter.resolve(&mut ctx);
        conditions.as_sql()
    }

    #[test]
    fn test_name() {
        let mut f = Filter::equal("is_active");
        assert_eq!(f.name(), "Is active");
        f.set_name("Вкл");
        assert_eq!(f.name(), "Вкл");
    }

    #[test]
    fn test_field_defaults_to_column() {
        let mut f = Filter::equal("name");
        assert_eq!(f.field(), "name");
        f.set_field("fullname");
        assert_eq!(f.field(), "fullname");
    }

    #[test]
    fn test_validators() {
        let u = url("/test:1/");
        let request = RequestParams::new();
        let params = ParamLookup::new(&u, &request);

        let mut f = Filter::equal("test");
        assert!(f.validate("abc123"));

        f.set_validator(Validator::numeric());
        assert_eq!(f.clean_value(params).as_deref(), Some("1"));
        assert!(!f.validate("abc123"));
        assert!(f.validate("123"));

        f.set_pattern("^[a-z]+$").unwrap();
        assert_eq!(f.clean_value(params), None);
        assert!(!f.validate("abc123"));
        assert!(f.validate("abc"));
    }

    #[test]
    fn test_choices() {
        let mut f = Filter::equal("test");
        f.set_choices(Choices::new([("1", "one"), ("2", "two")]));

        assert!(f.validate("1"));
        assert!(!f.validate("one"));
        assert!(!f.validate(""));
        assert!(f.validate_all(["1", "2"]));
        assert!(!f.validate_all(["1", "3"]));

        f.set_choices(Choices::list(["one", "two"]));
        assert!(f.validate("one"));
        assert!(!f.validate("three"));
    }

    #[test]
    fn test_choices_and_validator_both_apply() {
        let mut f = Filter::equal("test");
        f.set_choices(Choices::new([("1", "one"), ("a", "letter")]))
            .set_validator(Validator::numeric());

        assert!(f.validate("1"));
        assert!(!f.validate("a"));
    }

    #[test]
    fn test_empty_value_is_never_clean() {
        let u = PathUrl::new().with_parameter("name", "");
        let request = RequestParams::new();
        let f = Filter::equal("name");
        assert_eq!(f.clean_value(ParamLookup::new(&u, &request)), None);
    }

    #[test]
    fn test_request_fallback() {
        let u = url("/hello/");
        let request: RequestParams = [("name", "john")].into_iter().collect();
        let f = Filter::equal("name");
        assert_eq!(f.clean_value(ParamLookup::new(&u, &request)).as_deref(), Some("john"));
    }

    #[test]
    fn test_equal() {
        let f = Filter::equal("name");
        assert_eq!(resolve(&f, &url("/hello/name:abc/")), "`name` = 'abc'");
        assert_eq!(resolve(&f, &url("/hello/")), "");
    }

    #[test]
    fn test_between_bounds_are_independent() {
        let mut f = Filter::between("id");
        f.set_validator(Validator::numeric()).set_greater_or_equal(false);

        assert_eq!(resolve(&f, &url("/id_from:10/id_to:20/")), "`id` > 10 AND `id` <= 20");
        assert_eq!(resolve(&f, &url("/id_from:abc/id_to:10/")), "`id` <= 10");
        assert_eq!(resolve(&f, &url("/id_from:10/")), "`id` > 10");

        f.set_greater_or_equal(true).set_less_or_equal(false);
        assert_eq!(resolve(&f, &url("/id_from:10/id_to:20/")), "`id` >= 10 AND `id` < 20");
    }

    #[test]
    fn test_between_clean_values() {
        let u = url("/some/age_from:today/age_to:20/");
        let request = RequestParams::new();
        let params = ParamLookup::new(&u, &request);

        let mut f = Filter::between("age");
        assert_eq!(f.column_from(), "age_from");
        assert_eq!(f.column_to(), "age_to");
        assert_eq!(f.clean_value_from(params).as_deref(), Some("today"));
        assert_eq!(f.clean_value_to(params).as_deref(), Some("20"));

        f.set_pattern("^[a-z]+$").unwrap();
        assert_eq!(f.clean_value_from(params).as_deref(), Some("today"));
        assert_eq!(f.clean_value_to(params), None);

        assert_eq!(
            f.as_input_from(params, crate::html::attrs([("class", "hello")]), None).to_html(),
            r#"<input class="hello" name="age_from" type="text" value="today" />"#
        );
        assert_eq!(
            f.as_input_to(params, crate::html::attrs([("id", "123")]), None).to_html(),
            r#"<input id="123" name="age_to" type="text" value="" />"#
        );
    }

    #[test]
    fn test_between_dates() {
        let u = url("/hello/date_from:18.01.2014/date_to:20.01.2014/");
        let request = RequestParams::new();
        let params = ParamLookup::new(&u, &request);

        let mut f = Filter::between("date");
        assert_eq!(f.from_condition(params, Some("12345"), SqlDialect::MySql).as_sql(), "`date` >= 12345");
        assert_eq!(f.from_condition(params, None, SqlDialect::MySql).as_sql(), "`date` >= '18.01.2014'");
        assert_eq!(f.to_condition(params, Some("12345"), SqlDialect::MySql).as_sql(), "`date` <= 12345");
        assert_eq!(f.to_condition(params, None, SqlDialect::MySql).as_sql(), "`date` <= '20.01.2014'");

        f.set_date(true);
        assert_eq!(
            resolve(&f, &u),
            "`date` >= '2014-01-18 00:00:00' AND `date` <= '2014-01-20 23:59:59'"
        );

        f.set_field("`some`.`date`");
        assert_eq!(
            f.from_condition(params, None, SqlDialect::MySql).as_sql(),
            "`some`.`date` >= '2014-01-18 00:00:00'"
        );
        assert_eq!(
            f.to_condition(params, None, SqlDialect::MySql).as_sql(),
            "`some`.`date` <= '2014-01-20 23:59:59'"
        );
        assert_eq!(
            f.from_condition(params, None, SqlDialect::Postgres).as_sql(),
            "\"some\".\"date\" >= '2014-01-18 00:00:00'"
        );
    }

    #[test]
    fn test_date_bounds_ignore_time_of_day() {
        let u = url("/hello/?d_from=2014-01-18%2015:30&d_to=2014-01-20T08:00:00%2B03:00");
        let mut f = Filter::between("d");
        f.set_date(true);
        assert_eq!(
            resolve(&f, &u),
            "`d` >= '2014-01-18 00:00:00' AND `d` <= '2014-01-20 23:59:59'"
        );
    }

    #[test]
    fn test_unparseable_date_adds_nothing() {
        let mut f = Filter::between("date");
        f.set_date(true);
        assert_eq!(resolve(&f, &url("/date_from:today/date_to:2014-01-20/")), "`date` <= '2014-01-20 23:59:59'");
    }

    #[test]
    fn test_like() {
        let f = Filter::like("addr");
        assert_eq!(resolve(&f, &url("/hello/addr:при/")), "`addr` LIKE 'при%'");
        assert_eq!(resolve(&f, &url("/hello/addr:!!!/")), "");
    }

    #[test]
    fn test_like_cleaning() {
        let mut f = Filter::like("addr");
        assert_eq!(f.clean_like_value("оЛолё\"\"\"   ло 123"), "оЛолё%ло%123");
        assert_eq!(f.clean_like_value("a, b!! c"), "a%b%c");
        assert_eq!(f.clean_like_value("a%b%c"), "a%b%c");

        f.set_cleaner("[^а-я]+").unwrap();
        assert_eq!(f.clean_like_value(" оло\"\"\"   ло 123 "), "оло%ло");
    }

    #[test]
    fn test_like_template() {
        let mut f = Filter::like("title");
        f.set_like_template("%{}%");
        assert_eq!(resolve(&f, &url("/title:rust%20book/")), "`title` LIKE '%rust%book%'");
    }

    #[test]
    fn test_callback_overrides_kind() {
        let mut f = Filter::between("age");
        assert_eq!(resolve(&f, &url("/hello/age_from:18/")), "`age` >= 18");

        f.set_callback(|ctx, f| {
            if let Some(value) = f.clean_value_from(ctx.params()) {
                ctx.conditions().equal("two", typed_value(&value));
            }
        });
        assert_eq!(resolve(&f, &url("/hello/age_from:18/")), "`two` = 18");

        let mut f = Filter::like("name");
        f.set_callback(|ctx, _| {
            ctx.conditions().like("name", "пыщпыщ%");
        });
        assert_eq!(resolve(&f, &url("/hello/name:ололо/")), "`name` LIKE 'пыщпыщ%'");
    }

    #[test]
    fn test_custom_without_callback_adds_nothing() {
        let f = Filter::new("anything", FilterKind::Custom);
        assert_eq!(resolve(&f, &url("/anything:1/")), "");
    }

    #[test]
    fn test_clean_url_params() {
        let u = url("/id_from:5/name:abc/");
        let request = RequestParams::new();
        let params = ParamLookup::new(&u, &request);

        assert_eq!(
            Filter::between("id").clean_url_params(params),
            vec![("id_from".to_string(), "5".to_string())]
        );
        assert_eq!(
            Filter::equal("name").clean_url_params(params),
            vec![("name".to_string(), "abc".to_string())]
        );
        assert!(Filter::equal("other").clean_url_params(params).is_empty());
    }

    #[test]
    fn test_rendering() {
        let u = url("/test:1/");
        let request = RequestParams::new();
        let params = ParamLookup::new(&u, &request);

        let mut f = Filter::equal("test");
        assert!(f.as_select(params, None, Attributes::new(), None).is_none());

        f.set_choices(Choices::new([("1", "one"), ("2", "two")]));
        let expected = "<select name=\"test\">\
            <option selected=\"selected\" value=\"1\">one</option>\n\
            <option value=\"2\">two</option>\n\
            </select>";
        assert_eq!(
            f.as_select(params, None, Attributes::new(), None).unwrap().to_html(),
            expected
        );
        assert_eq!(
            f.as_input(params, Attributes::new(), None).to_html(),
            r#"<input name="test" type="text" value="1" />"#
        );

        f.set_pattern("^[a-z]+$").unwrap();
        assert_eq!(
            f.as_input(params, Attributes::new(), None).to_html(),
            r#"<input name="test" type="text" value="" />"#
        );
        assert_eq!(
            f.as_input(params, Attributes::new(), Some("x")).to_html(),
            r#"<input name="test" type="text" value="x" />"#
        );
    }
}
