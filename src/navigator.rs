//! # Navigator
//!
//! Request-scoped orchestration of filters, sorting and pagination.
//!
//! ```rust,ignore
//! async fn list(
//!     State(db): State<DatabaseConnection>,
//!     req: NavigatorRequest,
//! ) -> Result<Json<Vec<post::Model>>, NavigatorError> {
//!     let mut nav = Navigator::from_request(req).bind(EntityCollection::<post::Entity>::new(db));
//!     nav.add_filter_equal("status");
//!     nav.add_filter_between("created").set_date(true);
//!     nav.add_order_by("title");
//!     nav.set_default_order_by("id", false);
//!     nav.set_page_size(Some(20));
//!
//!     nav.fetch_total().await?;
//!     Ok(Json(nav.items().await?))
//! }
//! ```
//!
//! Register filters and sort options before resolving anything: resolution
//! reads the registry as it is at call time.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::HeaderMap;
use indexmap::IndexMap;
use utoipa::openapi::{
    RefOr, Required,
    path::{Parameter, ParameterBuilder, ParameterIn},
    schema::{Object, ObjectBuilder, Schema, Type},
};

use crate::collection::{Collection, NoCollection};
use crate::config::{FilterConfig, FilterKindConfig, NavigatorConfig, SqlDialect};
use crate::errors::NavigatorError;
use crate::filtering::filter::{Filter, FilterCallback, FilterContext, FilterKind};
use crate::filtering::pagination;
use crate::filtering::sort::{
    DEFAULT_ASC_TEMPLATE, DEFAULT_DESC_TEMPLATE, ORDER_BY_PARAM, OrderBy, decode_token,
};
use crate::filtering::validator::{Choices, Validator};
use crate::filtering::Conditions;
use crate::html::{Attributes, Select};
use crate::models::PageSummary;
use crate::request::{NavigatorRequest, ParamLookup, RequestParams};
use crate::url::{PAGE_PARAM, PathUrl};

pub struct Navigator<C = NoCollection> {
    request: RequestParams,
    url: PathUrl,
    collection: Option<C>,

    page_size: Option<u64>,
    total: Option<u64>,
    searchable: bool,

    dialect: SqlDialect,
    asc_template: String,
    desc_template: String,
    order_by_options: IndexMap<String, OrderBy>,
    default_order_by: Option<(String, bool)>,
    explicit_order_by: Option<(String, bool)>,

    filters: IndexMap<String, Filter>,
    callbacks: HashMap<String, FilterCallback>,
    conditions: Conditions,
    default_conditions: Conditions,
}

impl<C: std::fmt::Debug> std::fmt::Debug for Navigator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("request", &self.request)
            .field("url", &self.url)
            .field("collection", &self.collection)
            .field("page_size", &self.page_size)
            .field("total", &self.total)
            .field("searchable", &self.searchable)
            .field("dialect", &self.dialect)
            .field("asc_template", &self.asc_template)
            .field("desc_template", &self.desc_template)
            .field("order_by_options", &self.order_by_options)
            .field("default_order_by", &self.default_order_by)
            .field("explicit_order_by", &self.explicit_order_by)
            .field("filters", &self.filters)
            .field("callbacks", &self.callbacks.keys().collect::<Vec<_>>())
            .field("conditions", &self.conditions)
            .field("default_conditions", &self.default_conditions)
            .finish()
    }
}

impl Navigator {
    #[must_use]
    pub fn new(request: RequestParams, url: PathUrl) -> Self {
        Self {
            request,
            url,
            collection: None,
            page_size: None,
            total: None,
            searchable: true,
            dialect: SqlDialect::default(),
            asc_template: DEFAULT_ASC_TEMPLATE.to_string(),
            desc_template: DEFAULT_DESC_TEMPLATE.to_string(),
            order_by_options: IndexMap::new(),
            default_order_by: None,
            explicit_order_by: None,
            filters: IndexMap::new(),
            callbacks: HashMap::new(),
            conditions: Conditions::default(),
            default_conditions: Conditions::default(),
        }
    }

    #[must_use]
    pub fn from_request(request: NavigatorRequest) -> Self {
        Self::new(request.params, request.url)
    }
}

impl<C> Navigator<C> {
    /// Attach the data source items and totals are read from.
    pub fn bind<D: Collection>(self, collection: D) -> Navigator<D> {
        Navigator {
            request: self.request,
            url: self.url,
            collection: Some(collection),
            page_size: self.page_size,
            total: None,
            searchable: true,
            dialect: self.dialect,
            asc_template: self.asc_template,
            desc_template: self.desc_template,
            order_by_options: self.order_by_options,
            default_order_by: self.default_order_by,
            explicit_order_by: self.explicit_order_by,
            filters: self.filters,
            callbacks: self.callbacks,
            conditions: self.conditions,
            default_conditions: self.default_conditions,
        }
    }

    /// Apply a configuration document and return the navigator.
    ///
    /// # Errors
    ///
    /// See [`Navigator::configure`].
    pub fn with_config(mut self, config: &NavigatorConfig) -> Result<Self, NavigatorError> {
        self.configure(config)?;
        Ok(self)
    }

    /// Register everything the configuration declares. Callbacks named by
    /// filters must be registered beforehand.
    ///
    /// # Errors
    ///
    /// - [`NavigatorError::FilterNotCallable`] for an unknown callback name
    /// - [`NavigatorError::InvalidPattern`] for a pattern or cleaner that does not compile
    pub fn configure(&mut self, config: &NavigatorConfig) -> Result<&mut Self, NavigatorError> {
        if config.page_size.is_some() {
            self.set_page_size(config.page_size);
        }
        self.set_dialect(config.dialect);
        self.set_name_templates(&config.asc_name_template, &config.desc_name_template);

        for filter_config in &config.filters {
            let filter = self.build_filter(filter_config)?;
            self.insert_filter(filter);
        }

        for option in &config.order_by {
            let order_by = self.add_order_by(option.column.clone());
            if let Some(name) = &option.name {
                order_by.set_name(name.clone());
            }
            if let Some(sql) = &option.sql {
                order_by.set_sql(sql.clone());
            }
            order_by.set_inverse(option.inverse);
        }

        if let Some(default) = &config.default_order_by {
            self.set_default_order_by(default.column.clone(), default.ascending);
        }

        tracing::debug!(
            filters = config.filters.len(),
            order_by = config.order_by.len(),
            "Applied navigator configuration"
        );
        Ok(self)
    }

    fn build_filter(&self, config: &FilterConfig) -> Result<Filter, NavigatorError> {
        let kind = match config.kind {
            FilterKindConfig::Equal => FilterKind::Equal,
            FilterKindConfig::Between => FilterKind::between(),
            FilterKindConfig::Like => FilterKind::like(),
            FilterKindConfig::Custom => FilterKind::Custom,
        };
        let mut filter = Filter::new(config.column.clone(), kind);

        if let Some(name) = &config.name {
            filter.set_name(name.clone());
        }
        if let Some(field) = &config.field {
            filter.set_field(field.clone());
        }

        if let Some(pattern) = &config.pattern {
            filter.set_validator(Validator::pattern(pattern)?);
        } else if config.numeric {
            filter.set_validator(Validator::numeric());
        }

        if !config.choices.is_empty() {
            filter.set_choices(
                Choices::new(config.choices.iter().cloned()).match_values(config.match_values),
            );
        }

        if let Some(name) = &config.callback {
            let callback = self
                .callbacks
                .get(name)
                .cloned()
                .ok_or_else(|| NavigatorError::FilterNotCallable(name.clone()))?;
            filter.set_shared_callback(callback);
        }

        if let Some(greater_or_equal) = config.greater_or_equal {
            filter.set_greater_or_equal(greater_or_equal);
        }
        if let Some(less_or_equal) = config.less_or_equal {
            filter.set_less_or_equal(less_or_equal);
        }
        if let Some(date) = config.date {
            filter.set_date(date);
        }
        if let Some(template) = &config.like_template {
            filter.set_like_template(template.clone());
        }
        if let Some(cleaner) = &config.cleaner {
            filter.set_cleaner(cleaner)?;
        }

        Ok(filter)
    }

    #[must_use]
    pub const fn collection(&self) -> Option<&C> {
        self.collection.as_ref()
    }

    #[must_use]
    pub const fn url(&self) -> &PathUrl {
        &self.url
    }

    pub fn set_url(&mut self, url: PathUrl) -> &mut Self {
        self.url = url;
        self
    }

    #[must_use]
    pub const fn request(&self) -> &RequestParams {
        &self.request
    }

    #[must_use]
    pub const fn params(&self) -> ParamLookup<'_> {
        ParamLookup::new(&self.url, &self.request)
    }

    /// A parameter from the URL, or from the request when the URL lacks it.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.params().get(name)
    }

    #[must_use]
    pub fn parameter_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.parameter(name).unwrap_or(default)
    }

    #[must_use]
    pub const fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// SQL flavour for [`Navigator::order_sql`] and [`Conditions::as_sql`].
    pub fn set_dialect(&mut self, dialect: SqlDialect) -> &mut Self {
        self.dialect = dialect;
        self.conditions.set_dialect(dialect);
        self.default_conditions.set_dialect(dialect);
        for option in self.order_by_options.values_mut() {
            option.set_dialect(dialect);
        }
        self
    }

    /// Label templates for sort options; `{}` is replaced by the option name.
    /// Applies to options registered before and after the call.
    pub fn set_name_templates(&mut self, asc: &str, desc: &str) -> &mut Self {
        self.asc_template = asc.to_string();
        self.desc_template = desc.to_string();
        for option in self.order_by_options.values_mut() {
            option.set_asc_name_template(asc).set_desc_name_template(desc);
        }
        self
    }

    // Filters

    /// Register a filter, replacing any filter on the same column.
    pub fn insert_filter(&mut self, filter: Filter) -> &mut Filter {
        let (index, replaced) = self
            .filters
            .insert_full(filter.column().to_string(), filter);
        if replaced.is_some() {
            tracing::debug!(index, "Replaced filter");
        }
        &mut self.filters[index]
    }

    /// A filter resolved only by `callback`.
    pub fn add_filter<F>(&mut self, column: impl Into<String>, callback: F) -> &mut Filter
    where
        F: Fn(&mut FilterContext<'_>, &Filter) + Send + Sync + 'static,
    {
        self.insert_filter(Filter::custom(column, callback))
    }

    pub fn add_filter_equal(&mut self, column: impl Into<String>) -> &mut Filter {
        self.insert_filter(Filter::equal(column))
    }

    pub fn add_filter_between(&mut self, column: impl Into<String>) -> &mut Filter {
        self.insert_filter(Filter::between(column))
    }

    pub fn add_filter_like(&mut self, column: impl Into<String>) -> &mut Filter {
        self.insert_filter(Filter::like(column))
    }

    /// A filter resolved by a callback registered under `callback`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::FilterNotCallable`] if no such callback is registered.
    pub fn add_filter_with(
        &mut self,
        column: impl Into<String>,
        callback: &str,
    ) -> Result<&mut Filter, NavigatorError> {
        let callback = self
            .callbacks
            .get(callback)
            .cloned()
            .ok_or_else(|| NavigatorError::FilterNotCallable(callback.to_string()))?;

        let mut filter = Filter::new(column, FilterKind::Custom);
        filter.set_shared_callback(callback);
        Ok(self.insert_filter(filter))
    }

    /// Make a callback available to [`Navigator::add_filter_with`] and to
    /// configuration documents.
    pub fn register_callback<F>(&mut self, name: impl Into<String>, callback: F) -> &mut Self
    where
        F: Fn(&mut FilterContext<'_>, &Filter) + Send + Sync + 'static,
    {
        self.callbacks.insert(name.into(), Arc::new(callback));
        self
    }

    /// Registered filters in registration order.
    pub fn filters(&self) -> impl Iterator<Item = &Filter> {
        self.filters.values()
    }

    #[must_use]
    pub fn has_filter(&self, column: &str) -> bool {
        self.filters.contains_key(column)
    }

    /// # Errors
    ///
    /// Returns [`NavigatorError::FilterNotExists`] for an unregistered column.
    pub fn filter(&self, column: &str) -> Result<&Filter, NavigatorError> {
        self.filters
            .get(column)
            .ok_or_else(|| NavigatorError::FilterNotExists(column.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`NavigatorError::FilterNotExists`] for an unregistered column.
    pub fn filter_mut(&mut self, column: &str) -> Result<&mut Filter, NavigatorError> {
        self.filters
            .get_mut(column)
            .ok_or_else(|| NavigatorError::FilterNotExists(column.to_string()))
    }

    // Conditions

    /// Predicates of the last [`Navigator::process_filters`] pass.
    #[must_use]
    pub const fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    pub fn conditions_mut(&mut self) -> &mut Conditions {
        &mut self.conditions
    }

    /// Baseline predicates every resolution pass starts from.
    pub fn default_conditions_mut(&mut self) -> &mut Conditions {
        &mut self.default_conditions
    }

    /// Rebuild the working predicates from the defaults and every filter, in
    /// registration order.
    pub fn process_filters(&mut self) -> &Conditions {
        self.conditions = self.default_conditions.clone();

        let params = ParamLookup::new(&self.url, &self.request);
        let mut ctx = FilterContext::new(params, &mut self.conditions);
        for filter in self.filters.values() {
            filter.resolve(&mut ctx);
        }

        &self.conditions
    }

    // Sorting

    /// Register a sort option, replacing any option on the same column.
    pub fn add_order_by(&mut self, column: impl Into<String>) -> &mut OrderBy {
        let mut option = OrderBy::new(column);
        option
            .set_dialect(self.dialect)
            .set_asc_name_template(self.asc_template.clone())
            .set_desc_name_template(self.desc_template.clone());

        let (index, _) = self
            .order_by_options
            .insert_full(option.column().to_string(), option);
        &mut self.order_by_options[index]
    }

    /// Registered sort options in registration order.
    pub fn order_by_options(&self) -> impl Iterator<Item = &OrderBy> {
        self.order_by_options.values()
    }

    #[must_use]
    pub fn has_order_by_option(&self, column: &str) -> bool {
        self.order_by_options.contains_key(column)
    }

    /// Split a URL sort token against the registered options.
    #[must_use]
    pub fn decode_order_token(&self, raw: &str) -> (String, bool) {
        decode_token(raw, |column| self.has_order_by_option(column))
    }

    /// The option a token refers to, with the token's direction.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::NoOrderByOption`] when the token does not
    /// name a registered option.
    pub fn order_by_option(&self, token: &str) -> Result<OrderBy, NavigatorError> {
        let (column, ascending) = self.decode_order_token(token);
        self.order_by_options
            .get(&column)
            .map(|option| option.clone().with_ascending(ascending))
            .ok_or(NavigatorError::NoOrderByOption(column))
    }

    /// Select a sort explicitly. A valid sort in the URL still wins.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::NoOrderByOption`] when `column` is not a
    /// registered option.
    pub fn set_order_by(
        &mut self,
        column: impl Into<String>,
        ascending: bool,
    ) -> Result<&mut Self, NavigatorError> {
        let column = column.into();
        if !self.has_order_by_option(&column) {
            return Err(NavigatorError::NoOrderByOption(column));
        }
        self.explicit_order_by = Some((column, ascending));
        Ok(self)
    }

    /// Sort used when neither the URL nor [`Navigator::set_order_by`]
    /// selects one. Registers the column as an option if needed.
    pub fn set_default_order_by(&mut self, column: impl Into<String>, ascending: bool) -> &mut Self {
        let column = column.into();
        if !self.has_order_by_option(&column) {
            self.add_order_by(column.clone());
        }
        self.default_order_by = Some((column, ascending));
        self
    }

    #[must_use]
    pub fn default_order_by(&self) -> Option<OrderBy> {
        let (column, ascending) = self.default_order_by.as_ref()?;
        self.order_by_options
            .get(column)
            .map(|option| option.clone().with_ascending(*ascending))
    }

    /// Sort selected by the URL or by [`Navigator::set_order_by`], ignoring
    /// the default.
    #[must_use]
    pub fn selected_order_by(&self) -> Option<OrderBy> {
        if let Some(raw) = self.parameter(ORDER_BY_PARAM).filter(|raw| !raw.is_empty()) {
            match self.order_by_option(raw) {
                Ok(option) => return Some(option),
                Err(_) => tracing::debug!(token = %raw, "Sort token does not resolve"),
            }
        }

        let (column, ascending) = self.explicit_order_by.as_ref()?;
        self.order_by_options
            .get(column)
            .map(|option| option.clone().with_ascending(*ascending))
    }

    /// Active sort: the selected one, else the default.
    #[must_use]
    pub fn order_by(&self) -> Option<OrderBy> {
        self.selected_order_by().or_else(|| self.default_order_by())
    }

    /// Inline SQL of the active sort, e.g. `` `name` DESC ``.
    #[must_use]
    pub fn order_sql(&self) -> Option<String> {
        self.order_by().map(|option| option.as_sql())
    }

    /// `(token, label)` for both directions of every option.
    #[must_use]
    pub fn order_by_choices(&self) -> Vec<(String, String)> {
        self.order_by_options
            .values()
            .flat_map(|option| {
                [
                    (option.url_token(Some(true)), option.asc_name()),
                    (option.url_token(Some(false)), option.desc_name()),
                ]
            })
            .collect()
    }

    /// A `<select>` over [`Navigator::order_by_choices`], the active sort
    /// selected unless `selected` is given.
    #[must_use]
    pub fn order_by_select(
        &self,
        placeholder: Option<&str>,
        selected: Option<&str>,
        attributes: Attributes,
    ) -> Select {
        let selected = selected
            .map(str::to_string)
            .or_else(|| self.order_by().map(|option| option.url_token(None)));

        Select::new(
            ORDER_BY_PARAM,
            self.order_by_choices(),
            selected,
            attributes,
            placeholder.map(str::to_string),
        )
    }

    /// Clean URL sorted by `token`, optionally forcing the direction.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::NoOrderByOption`] for an unregistered column.
    pub fn order_by_url(&self, token: &str, ascending: Option<bool>) -> Result<PathUrl, NavigatorError> {
        let option = self.order_by_option(token)?;
        Ok(option.as_url(&self.url_clean(), ascending))
    }

    // URLs

    /// Current URL reduced to the recognised state: the selected sort and
    /// every clean filter value. Paging and unknown parameters are dropped.
    #[must_use]
    pub fn url_clean(&self) -> PathUrl {
        let mut url = self.url.without_parameters();

        if let Some(option) = self.selected_order_by() {
            url = url.with_parameter(ORDER_BY_PARAM, option.url_token(None));
        }

        let params = self.params();
        for filter in self.filters.values() {
            for (name, value) in filter.clean_url_params(params) {
                url = url.with_parameter(&name, value);
            }
        }

        url
    }

    /// Clean URL with the filter on `column` set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::FilterNotExists`] for an unregistered column.
    pub fn filter_url(&self, column: &str, value: &str) -> Result<PathUrl, NavigatorError> {
        let filter = self.filter(column)?;
        Ok(self.url_clean().with_parameter(filter.column(), value))
    }

    #[must_use]
    pub fn page_url(&self, page: u64) -> PathUrl {
        self.url_clean().with_page(page)
    }

    #[must_use]
    pub fn current_page_url(&self) -> PathUrl {
        self.page_url(self.page())
    }

    #[must_use]
    pub fn first_page_url(&self) -> PathUrl {
        self.page_url(self.first_page())
    }

    #[must_use]
    pub fn last_page_url(&self) -> Option<PathUrl> {
        self.last_page().map(|page| self.page_url(page))
    }

    #[must_use]
    pub fn next_page_url(&self) -> Option<PathUrl> {
        self.next_page().map(|page| self.page_url(page))
    }

    #[must_use]
    pub fn prev_page_url(&self) -> Option<PathUrl> {
        self.prev_page().map(|page| self.page_url(page))
    }

    // Pagination

    #[must_use]
    pub const fn page_size(&self) -> Option<u64> {
        self.page_size
    }

    /// Items per page; `None` or zero puts everything on one page.
    pub fn set_page_size(&mut self, page_size: Option<u64>) -> &mut Self {
        self.page_size = page_size.filter(|size| *size > 0);
        self
    }

    /// Current page from the URL, 1-based. Not clamped to the last page.
    #[must_use]
    pub fn page(&self) -> u64 {
        self.url.page()
    }

    pub fn set_page(&mut self, page: u64) -> &mut Self {
        self.url = self.url.with_page(page);
        self
    }

    /// Use a known total instead of counting. Marks the navigator searchable.
    pub fn set_total(&mut self, total: u64) -> &mut Self {
        self.total = Some(total);
        self.searchable = true;
        self
    }

    /// Known total, 0 when unknown or not searchable.
    #[must_use]
    pub fn total(&self) -> u64 {
        if self.searchable {
            self.total.unwrap_or(0)
        } else {
            0
        }
    }

    #[must_use]
    pub fn total_pages(&self) -> Option<u64> {
        pagination::total_pages(self.total(), self.page_size)
    }

    #[must_use]
    pub const fn first_page(&self) -> u64 {
        1
    }

    #[must_use]
    pub fn last_page(&self) -> Option<u64> {
        self.total_pages()
    }

    #[must_use]
    pub fn next_page(&self) -> Option<u64> {
        pagination::next_page(self.page(), self.total_pages())
    }

    #[must_use]
    pub fn prev_page(&self) -> Option<u64> {
        pagination::prev_page(self.page())
    }

    #[must_use]
    pub const fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn set_searchable(&mut self, searchable: bool) -> &mut Self {
        self.searchable = searchable;
        self
    }

    #[must_use]
    pub fn page_summary(&self) -> PageSummary {
        PageSummary {
            page: self.page(),
            page_size: self.page_size,
            total: self.total(),
            total_pages: self.total_pages(),
            prev_page: self.prev_page(),
            next_page: self.next_page(),
            url: self.url_clean().as_string(),
            prev_url: self.prev_page_url().map(|url| url.as_string()),
            next_url: self.next_page_url().map(|url| url.as_string()),
        }
    }

    /// `Content-Range` header for the current page, e.g. `posts 10-19/56`.
    #[must_use]
    pub fn content_range(&self, resource: &str) -> HeaderMap {
        let total = self.total();
        let (offset, limit) = match self.page_size {
            Some(size) => (pagination::offset(self.page(), size), size),
            None => (0, total),
        };
        pagination::calculate_content_range(offset, limit, total, resource)
    }

    /// OpenAPI description of every parameter this navigator reads.
    #[must_use]
    pub fn query_parameters(&self) -> Vec<Parameter> {
        let mut parameters = Vec::new();

        if !self.order_by_options.is_empty() {
            let tokens = self
                .order_by_choices()
                .into_iter()
                .map(|(token, _)| token);
            parameters.push(query_parameter(
                ORDER_BY_PARAM,
                "Sort column, `_`-prefixed for descending order",
                ObjectBuilder::new()
                    .schema_type(Type::String)
                    .enum_values(Some(tokens))
                    .build(),
            ));
        }

        parameters.push(query_parameter(
            PAGE_PARAM,
            "Page number, starting at 1",
            ObjectBuilder::new()
                .schema_type(Type::Integer)
                .minimum(Some(1))
                .build(),
        ));

        for filter in self.filters.values() {
            let schema = || {
                let mut builder = ObjectBuilder::new().schema_type(Type::String);
                if let Some(choices) = filter.choices() {
                    let values = choices.entries().iter().map(|(key, label)| {
                        if choices.matches_values() {
                            label.clone()
                        } else {
                            key.clone()
                        }
                    });
                    builder = builder.enum_values(Some(values));
                }
                builder.build()
            };

            match filter.kind() {
                FilterKind::Between(_) => {
                    let name = filter.name();
                    parameters.push(query_parameter(
                        &filter.column_from(),
                        &format!("{name}, lower bound"),
                        schema(),
                    ));
                    parameters.push(query_parameter(
                        &filter.column_to(),
                        &format!("{name}, upper bound"),
                        schema(),
                    ));
                }
                _ => parameters.push(query_parameter(filter.column(), &filter.name(), schema())),
            }
        }

        parameters
    }
}

impl<C: Collection> Navigator<C> {
    /// Count matching items through the bound collection.
    ///
    /// No collection, or nothing matching, makes the navigator not searchable
    /// and yields 0.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::Database`] when the count query fails.
    pub async fn fetch_total(&mut self) -> Result<u64, NavigatorError> {
        self.total = None;
        let condition = self.process_filters().to_condition();

        let Some(collection) = &self.collection else {
            tracing::debug!("No collection bound, nothing to count");
            self.searchable = false;
            return Ok(0);
        };

        let count = collection.count(condition).await?;
        if count == 0 {
            tracing::debug!("Nothing matches the filters");
            self.searchable = false;
            return Ok(0);
        }

        self.searchable = true;
        self.total = Some(count);
        Ok(count)
    }

    /// Items of the current page. Empty without touching the data source
    /// when the navigator is not searchable.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::Database`] when the query fails.
    pub async fn items(&mut self) -> Result<Vec<C::Item>, NavigatorError> {
        if !self.searchable {
            return Ok(Vec::new());
        }

        let condition = self.process_filters().to_condition();
        let order = self.order_by();
        let page = self.page();

        let Some(collection) = &self.collection else {
            tracing::debug!("No collection bound, no items");
            return Ok(Vec::new());
        };

        Ok(collection
            .find(condition, order.as_ref(), self.page_size, page)
            .await?)
    }
}

fn query_parameter(name: &str, description: &str, schema: Object) -> Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .description(Some(description))
        .schema(Some(RefOr::T(Schema::Object(schema))))
        .build()
}
