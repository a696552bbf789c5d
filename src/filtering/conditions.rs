use sea_orm::{
    Condition,
    sea_query::{Alias, ConditionalStatement, Expr, Query, SimpleExpr, Value},
};

use crate::config::SqlDialect;

/// Predicates joined with `AND`.
///
/// Values are bound through sea-query, never spliced into SQL text, except
/// for [`Conditions::expr`] which takes raw SQL on purpose.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    exprs: Vec<SimpleExpr>,
    dialect: SqlDialect,
}

impl Conditions {
    #[must_use]
    pub fn new(dialect: SqlDialect) -> Self {
        Self {
            exprs: Vec::new(),
            dialect,
        }
    }

    #[must_use]
    pub const fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    pub fn set_dialect(&mut self, dialect: SqlDialect) -> &mut Self {
        self.dialect = dialect;
        self
    }

    pub fn add(&mut self, expr: SimpleExpr) -> &mut Self {
        tracing::trace!(?expr, "Adding predicate");
        self.exprs.push(expr);
        self
    }

    /// Raw SQL predicate, e.g. `` `id` > 7 ``.
    pub fn expr(&mut self, sql: impl Into<String>) -> &mut Self {
        self.add(Expr::cust(sql.into()))
    }

    pub fn equal(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.add(column(field).eq(value.into()))
    }

    pub fn like(&mut self, field: &str, pattern: impl Into<String>) -> &mut Self {
        self.add(column(field).like(pattern.into()))
    }

    pub fn greater(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.add(column(field).gt(value.into()))
    }

    pub fn greater_or_equal(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.add(column(field).gte(value.into()))
    }

    pub fn less(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.add(column(field).lt(value.into()))
    }

    pub fn less_or_equal(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.add(column(field).lte(value.into()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimpleExpr> {
        self.exprs.iter()
    }

    /// The predicates as a sea-orm [`Condition`], ready for `.filter(..)`.
    #[must_use]
    pub fn to_condition(&self) -> Condition {
        self.exprs
            .iter()
            .cloned()
            .fold(Condition::all(), |condition, expr| condition.add(expr))
    }

    /// Inline SQL text of the predicates, empty when there are none.
    #[must_use]
    pub fn as_sql(&self) -> String {
        if self.exprs.is_empty() {
            return String::new();
        }

        let mut statement = Query::select();
        statement.cond_where(self.to_condition());

        self.dialect
            .render(&statement)
            .split_once(" WHERE ")
            .map(|(_, predicates)| predicates.to_string())
            .unwrap_or_default()
    }
}

/// Column reference for an SQL field name. `table.column` is qualified,
/// backticks are dropped.
pub(crate) fn column(field: &str) -> Expr {
    let field = field.replace('`', "");
    match field.split_once('.') {
        Some((table, name)) => Expr::col((Alias::new(table), Alias::new(name))),
        None => Expr::col(Alias::new(field)),
    }
}

/// Bind a raw request value with its natural SQL type: canonical integers
/// and decimals as numbers, anything else as a string.
#[must_use]
pub fn typed_value(raw: &str) -> Value {
    if let Ok(int) = raw.parse::<i64>()
        && int.to_string() == raw
    {
        return Value::from(int);
    }

    if raw.contains('.')
        && raw.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        && let Ok(float) = raw.parse::<f64>()
        && float.is_finite()
    {
        return Value::from(float);
    }

    Value::from(raw.to_string())
}
