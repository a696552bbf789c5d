use sea_orm::sea_query::{Expr, Order, OrderedStatement, Query, SimpleExpr};

use crate::config::SqlDialect;
use crate::filtering::conditions::column;
use crate::naming::humanize;
use crate::url::PathUrl;

/// Name of the sort parameter in the URL.
pub const ORDER_BY_PARAM: &str = "orderby";

pub const DEFAULT_ASC_TEMPLATE: &str = "{} ascending";
pub const DEFAULT_DESC_TEMPLATE: &str = "{} descending";

/// Prefix marking a descending sort token: `_name` sorts by `name` DESC.
const DESC_PREFIX: char = '_';

/// Split a URL sort token into `(column, ascending)`.
///
/// `_name` decodes to `("name", false)` only when `name` is registered;
/// otherwise the token is returned whole as an ascending column, which the
/// caller then fails to find among its options.
pub fn decode_token(raw: &str, is_registered: impl Fn(&str) -> bool) -> (String, bool) {
    if let Some(column) = raw.strip_prefix(DESC_PREFIX)
        && is_registered(column)
    {
        return (column.to_string(), false);
    }

    (raw.to_string(), true)
}

/// One sortable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    column: String,
    name: Option<String>,
    sql: Option<String>,
    ascending: bool,
    inverse: bool,
    asc_template: String,
    desc_template: String,
    dialect: SqlDialect,
}

impl OrderBy {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            name: None,
            sql: None,
            ascending: true,
            inverse: false,
            asc_template: DEFAULT_ASC_TEMPLATE.to_string(),
            desc_template: DEFAULT_DESC_TEMPLATE.to_string(),
            dialect: SqlDialect::default(),
        }
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
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

    /// Raw SQL sort expression used instead of the column, e.g. `count(*)`.
    #[must_use]
    pub fn sql(&self) -> Option<&str> {
        self.sql.as_deref()
    }

    pub fn set_sql(&mut self, sql: impl Into<String>) -> &mut Self {
        self.sql = Some(sql.into());
        self
    }

    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        self.ascending
    }

    pub fn set_ascending(&mut self, ascending: bool) -> &mut Self {
        self.ascending = ascending;
        self
    }

    #[must_use]
    pub fn with_ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }

    #[must_use]
    pub const fn is_inverse(&self) -> bool {
        self.inverse
    }

    /// Flip what "ascending" means in SQL, for columns where bigger reads as
    /// "lower" (ranks, priorities). URL tokens are unaffected.
    pub fn set_inverse(&mut self, inverse: bool) -> &mut Self {
        self.inverse = inverse;
        self
    }

    pub fn set_dialect(&mut self, dialect: SqlDialect) -> &mut Self {
        self.dialect = dialect;
        self
    }

    pub fn set_asc_name_template(&mut self, template: impl Into<String>) -> &mut Self {
        self.asc_template = template.into();
        self
    }

    pub fn set_desc_name_template(&mut self, template: impl Into<String>) -> &mut Self {
        self.desc_template = template.into();
        self
    }

    #[must_use]
    pub fn asc_name(&self) -> String {
        self.asc_template.replacen("{}", &self.name(), 1)
    }

    #[must_use]
    pub fn desc_name(&self) -> String {
        self.desc_template.replacen("{}", &self.name(), 1)
    }

    /// URL token for the given direction, or for the current one.
    #[must_use]
    pub fn url_token(&self, ascending: Option<bool>) -> String {
        if ascending.unwrap_or(self.ascending) {
            self.column.clone()
        } else {
            format!("{DESC_PREFIX}{}", self.column)
        }
    }

    /// `base` with the sort parameter set to this option.
    #[must_use]
    pub fn as_url(&self, base: &PathUrl, ascending: Option<bool>) -> PathUrl {
        base.with_parameter(ORDER_BY_PARAM, self.url_token(ascending))
    }

    /// Direction as applied in SQL, after `inverse`.
    #[must_use]
    pub const fn order(&self) -> Order {
        if self.ascending != self.inverse {
            Order::Asc
        } else {
            Order::Desc
        }
    }

    /// Sort expression and direction for `QueryOrder::order_by`.
    #[must_use]
    pub fn order_expr(&self) -> (SimpleExpr, Order) {
        let expr = self
            .sql
            .as_ref()
            .map_or_else(|| column(&self.column).into(), |sql| Expr::cust(sql.clone()));
        (expr, self.order())
    }

    /// Inline SQL, e.g. `` `name` ASC `` or `count(*) DESC`.
    #[must_use]
    pub fn as_sql(&self) -> String {
        let (expr, order) = self.order_expr();
        let mut statement = Query::select();
        statement.order_by_expr(expr, order);

        self.dialect
            .render(&statement)
            .split_once(" ORDER BY ")
            .map(|(_, clause)| clause.to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_token() {
        let mut o = OrderBy::new("name");
        assert_eq!(o.url_token(None), "name");
        assert_eq!(o.url_token(Some(false)), "_name");

        o.set_ascending(false);
        assert_eq!(o.url_token(None), "_name");
        assert_eq!(o.url_token(Some(true)), "name");
    }

    #[test]
    fn test_as_url() {
        let o = OrderBy::new("name");
        assert_eq!(o.as_url(&PathUrl::new(), None).as_string(), "/orderby:name/");

        let base = PathUrl::parse("/test/me/orderby:id/id:2/").unwrap();
        assert_eq!(o.as_url(&base, None).as_string(), "/test/me/id:2/orderby:name/");
    }

    #[test]
    fn test_as_sql() {
        let mut o = OrderBy::new("name");
        assert_eq!(o.as_sql(), "`name` ASC");

        o.set_ascending(false);
        assert_eq!(o.as_sql(), "`name` DESC");

        o.set_sql("count(*)");
        assert_eq!(o.as_sql(), "count(*) DESC");
    }

    #[test]
    fn test_inverse_flips_sql_only() {
        let mut o = OrderBy::new("ololo");
        assert_eq!(o.set_ascending(true).order(), Order::Asc);
        assert_eq!(o.set_ascending(false).order(), Order::Desc);

        o.set_inverse(true);
        assert_eq!(o.set_ascending(true).order(), Order::Desc);
        assert_eq!(o.url_token(None), "ololo");
        assert_eq!(o.set_ascending(false).order(), Order::Asc);
        assert_eq!(o.url_token(None), "_ololo");
    }

    #[test]
    fn test_names() {
        let mut o = OrderBy::new("is_active");
        assert_eq!(o.name(), "Is active");
        assert_eq!(o.asc_name(), "Is active ascending");
        assert_eq!(o.desc_name(), "Is active descending");

        o.set_name("Active")
            .set_asc_name_template("{} up")
            .set_desc_name_template("{} down");
        assert_eq!(o.asc_name(), "Active up");
        assert_eq!(o.desc_name(), "Active down");
    }

    #[test]
    fn test_decode_token() {
        let registered = |c: &str| c == "name";
        assert_eq!(decode_token("name", registered), ("name".to_string(), true));
        assert_eq!(decode_token("_name", registered), ("name".to_string(), false));
        // unknown stripped form keeps the underscore
        assert_eq!(decode_token("_other", registered), ("_other".to_string(), true));
        assert_eq!(decode_token("", registered), (String::new(), true));
    }

    #[test]
    fn test_token_round_trip() {
        for column in ["id", "name", "created_at"] {
            let o = OrderBy::new(column);
            let registered = |c: &str| c == column;
            assert_eq!(decode_token(&o.url_token(Some(false)), registered), (column.to_string(), false));
            assert_eq!(decode_token(&o.url_token(Some(true)), registered), (column.to_string(), true));
        }
    }
}
