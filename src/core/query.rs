//! Dynamic query building blocks shared by every repository.
//!
//! Filters, patches and inserts are built as typed values and rendered to
//! parameterized SQL. Column names are validated against each entity's
//! static column list; user input only ever reaches the database through
//! bind parameters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::mysql::MySqlArguments;
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::MySql;

use crate::core::error::{AppError, Result};

/// A value bound into a SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Str(String),
    I64(i64),
    Bool(bool),
    Decimal(Decimal),
    DateTime(DateTime<Utc>),
    Json(serde_json::Value),
    Null,
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Str(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Str(v.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::I64(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        SqlValue::DateTime(v)
    }
}

impl From<serde_json::Value> for SqlValue {
    fn from(v: serde_json::Value) -> Self {
        SqlValue::Json(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

/// Bind a list of values onto a plain query.
pub fn bind_values<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    values: Vec<SqlValue>,
) -> Query<'q, MySql, MySqlArguments> {
    for value in values {
        query = match value {
            SqlValue::Str(v) => query.bind(v),
            SqlValue::I64(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
            SqlValue::Decimal(v) => query.bind(v),
            SqlValue::DateTime(v) => query.bind(v),
            SqlValue::Json(v) => query.bind(v),
            SqlValue::Null => query.bind(Option::<String>::None),
        };
    }
    query
}

/// Bind a list of values onto a `query_as` query.
pub fn bind_values_as<'q, O>(
    mut query: QueryAs<'q, MySql, O, MySqlArguments>,
    values: Vec<SqlValue>,
) -> QueryAs<'q, MySql, O, MySqlArguments> {
    for value in values {
        query = match value {
            SqlValue::Str(v) => query.bind(v),
            SqlValue::I64(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
            SqlValue::Decimal(v) => query.bind(v),
            SqlValue::DateTime(v) => query.bind(v),
            SqlValue::Json(v) => query.bind(v),
            SqlValue::Null => query.bind(Option::<String>::None),
        };
    }
    query
}

/// Bind a list of values onto a `query_scalar` query.
pub fn bind_values_scalar<'q, O>(
    mut query: QueryScalar<'q, MySql, O, MySqlArguments>,
    values: Vec<SqlValue>,
) -> QueryScalar<'q, MySql, O, MySqlArguments> {
    for value in values {
        query = match value {
            SqlValue::Str(v) => query.bind(v),
            SqlValue::I64(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
            SqlValue::Decimal(v) => query.bind(v),
            SqlValue::DateTime(v) => query.bind(v),
            SqlValue::Json(v) => query.bind(v),
            SqlValue::Null => query.bind(Option::<String>::None),
        };
    }
    query
}

fn check_column(column: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&column) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Unknown filter column: {column}"
        )))
    }
}

/// Typed predicate tree over entity fields.
///
/// `All` is the neutral filter: it matches everything and disappears when
/// combined with `and`/`or`.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    /// Field equality
    Eq(String, SqlValue),
    /// Case-insensitive substring match
    Contains(String, String),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Default for Filter {
    fn default() -> Self {
        Filter::All
    }
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Filter::Eq(column.into(), value.into())
    }

    pub fn contains(column: impl Into<String>, needle: impl Into<String>) -> Self {
        Filter::Contains(column.into(), needle.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }

    /// Conjunction; `All` on either side is neutral.
    pub fn and(self, other: Filter) -> Filter {
        match (self, other) {
            (Filter::All, f) | (f, Filter::All) => f,
            (Filter::And(mut children), f) => {
                children.push(f);
                Filter::And(children)
            }
            (a, b) => Filter::And(vec![a, b]),
        }
    }

    /// Disjunction; `All` on either side is neutral.
    pub fn or(self, other: Filter) -> Filter {
        match (self, other) {
            (Filter::All, f) | (f, Filter::All) => f,
            (Filter::Or(mut children), f) => {
                children.push(f);
                Filter::Or(children)
            }
            (a, b) => Filter::Or(vec![a, b]),
        }
    }

    /// Render to a SQL condition plus bind values.
    ///
    /// Returns `None` for the match-everything filter, in which case the
    /// caller emits no WHERE clause at all.
    pub fn to_sql(&self, allowed: &[&str]) -> Result<Option<(String, Vec<SqlValue>)>> {
        let mut values = Vec::new();
        match self.render(allowed, &mut values)? {
            Some(condition) => Ok(Some((condition, values))),
            None => Ok(None),
        }
    }

    fn render(&self, allowed: &[&str], values: &mut Vec<SqlValue>) -> Result<Option<String>> {
        match self {
            Filter::All => Ok(None),
            Filter::Eq(column, value) => {
                check_column(column, allowed)?;
                values.push(value.clone());
                Ok(Some(format!("`{column}` = ?")))
            }
            Filter::Contains(column, needle) => {
                check_column(column, allowed)?;
                values.push(SqlValue::Str(format!("%{}%", needle.to_lowercase())));
                Ok(Some(format!("LOWER(`{column}`) LIKE ?")))
            }
            Filter::And(children) => Self::render_group(children, " AND ", allowed, values),
            Filter::Or(children) => Self::render_group(children, " OR ", allowed, values),
        }
    }

    fn render_group(
        children: &[Filter],
        joiner: &str,
        allowed: &[&str],
        values: &mut Vec<SqlValue>,
    ) -> Result<Option<String>> {
        let mut parts = Vec::new();
        for child in children {
            if let Some(part) = child.render(allowed, values)? {
                parts.push(part);
            }
        }
        match parts.len() {
            0 => Ok(None),
            1 => Ok(parts.pop()),
            _ => Ok(Some(format!("({})", parts.join(joiner)))),
        }
    }
}

/// Ordering terms for list queries.
#[derive(Debug, Clone, Default)]
pub struct Order {
    terms: Vec<(String, bool)>,
}

impl Order {
    pub fn by(column: impl Into<String>) -> Self {
        Order {
            terms: vec![(column.into(), false)],
        }
    }

    pub fn by_desc(column: impl Into<String>) -> Self {
        Order {
            terms: vec![(column.into(), true)],
        }
    }

    pub fn then(mut self, column: impl Into<String>) -> Self {
        self.terms.push((column.into(), false));
        self
    }

    pub fn then_desc(mut self, column: impl Into<String>) -> Self {
        self.terms.push((column.into(), true));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn to_sql(&self, allowed: &[&str]) -> Result<Option<String>> {
        if self.terms.is_empty() {
            return Ok(None);
        }
        let mut parts = Vec::with_capacity(self.terms.len());
        for (column, desc) in &self.terms {
            check_column(column, allowed)?;
            if *desc {
                parts.push(format!("`{column}` DESC"));
            } else {
                parts.push(format!("`{column}`"));
            }
        }
        Ok(Some(parts.join(", ")))
    }
}

/// Column/value pairs for an INSERT statement.
#[derive(Debug, Clone, Default)]
pub struct InsertSet {
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl InsertSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.columns.push(column.into());
        self.values.push(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Render to `(column list, placeholder list, bind values)`.
    pub fn to_sql(&self, allowed: &[&str]) -> Result<(String, String, Vec<SqlValue>)> {
        if self.columns.is_empty() {
            return Err(AppError::validation("No fields to insert"));
        }
        for column in &self.columns {
            check_column(column, allowed)?;
        }
        let columns = self
            .columns
            .iter()
            .map(|c| format!("`{c}`"))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; self.columns.len()].join(", ");
        Ok((columns, placeholders, self.values.clone()))
    }
}

/// Partial-update assignment list: only fields explicitly added are written,
/// everything else keeps its prior value.
#[derive(Debug, Clone, Default)]
pub struct UpdateSet {
    assignments: Vec<(String, SqlValue)>,
}

impl UpdateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.assignments.push((column.into(), value.into()));
        self
    }

    /// Add the assignment only when the patch field is present.
    pub fn set_if<V: Into<SqlValue>>(self, column: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(column, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Render to `(assignment list, bind values)`.
    pub fn to_sql(&self, allowed: &[&str]) -> Result<(String, Vec<SqlValue>)> {
        if self.assignments.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        let mut parts = Vec::with_capacity(self.assignments.len());
        let mut values = Vec::with_capacity(self.assignments.len());
        for (column, value) in &self.assignments {
            check_column(column, allowed)?;
            parts.push(format!("`{column}` = ?"));
            values.push(value.clone());
        }
        Ok((parts.join(", "), values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[&str] = &["id", "name", "role", "email"];

    #[test]
    fn test_all_renders_to_no_condition() {
        assert_eq!(Filter::All.to_sql(COLUMNS).unwrap(), None);
    }

    #[test]
    fn test_and_with_all_is_neutral() {
        let filter = Filter::All.and(Filter::eq("role", "admin"));
        assert_eq!(filter, Filter::eq("role", "admin"));
    }

    #[test]
    fn test_contains_lowers_both_sides() {
        let (sql, values) = Filter::contains("name", "John")
            .to_sql(COLUMNS)
            .unwrap()
            .unwrap();
        assert_eq!(sql, "LOWER(`name`) LIKE ?");
        assert_eq!(values, vec![SqlValue::Str("%john%".to_string())]);
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let err = Filter::eq("password", "x").to_sql(COLUMNS).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_nested_group_rendering() {
        let filter = Filter::contains("name", "a")
            .or(Filter::contains("email", "a"))
            .and(Filter::eq("role", "admin"));
        let (sql, values) = filter.to_sql(COLUMNS).unwrap().unwrap();
        assert_eq!(
            sql,
            "((LOWER(`name`) LIKE ? OR LOWER(`email`) LIKE ?) AND `role` = ?)"
        );
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_update_set_skips_absent_fields() {
        let patch = UpdateSet::new()
            .set_if("name", Some("X"))
            .set_if::<String>("email", None);
        assert_eq!(patch.len(), 1);
        let (sql, values) = patch.to_sql(COLUMNS).unwrap();
        assert_eq!(sql, "`name` = ?");
        assert_eq!(values, vec![SqlValue::Str("X".to_string())]);
    }

    #[test]
    fn test_empty_update_set_errors() {
        assert!(UpdateSet::new().to_sql(COLUMNS).is_err());
    }

    #[test]
    fn test_insert_set_rendering() {
        let (columns, placeholders, values) = InsertSet::new()
            .set("name", "Apple")
            .set("role", "customer")
            .to_sql(COLUMNS)
            .unwrap();
        assert_eq!(columns, "`name`, `role`");
        assert_eq!(placeholders, "?, ?");
        assert_eq!(values.len(), 2);
    }
}
