// SQL rendering of predicate trees, patches and inserts.
//
// User input must only reach the database through bind parameters, and
// column names must pass the entity allow-list.

use mercato::core::query::{Filter, InsertSet, Order, SqlValue, UpdateSet};

const COLUMNS: &[&str] = &["id", "name", "email", "role", "price"];

#[test]
fn test_eq_renders_placeholder() {
    let (sql, values) = Filter::eq("role", "admin")
        .to_sql(COLUMNS)
        .unwrap()
        .unwrap();
    assert_eq!(sql, "`role` = ?");
    assert_eq!(values, vec![SqlValue::Str("admin".to_string())]);
}

#[test]
fn test_contains_is_case_insensitive_like() {
    let (sql, values) = Filter::contains("name", "JoHn")
        .to_sql(COLUMNS)
        .unwrap()
        .unwrap();
    assert_eq!(sql, "LOWER(`name`) LIKE ?");
    assert_eq!(values, vec![SqlValue::Str("%john%".to_string())]);
}

#[test]
fn test_value_is_bound_not_interpolated() {
    let hostile = "x'; DROP TABLE user; --";
    let (sql, values) = Filter::contains("name", hostile)
        .to_sql(COLUMNS)
        .unwrap()
        .unwrap();
    assert!(!sql.contains("DROP TABLE"));
    assert_eq!(values.len(), 1);
}

#[test]
fn test_unknown_column_is_rejected_everywhere() {
    assert!(Filter::eq("evil", 1i64).to_sql(COLUMNS).is_err());
    assert!(Order::by("evil").to_sql(COLUMNS).is_err());
    assert!(UpdateSet::new().set("evil", 1i64).to_sql(COLUMNS).is_err());
    assert!(InsertSet::new().set("evil", 1i64).to_sql(COLUMNS).is_err());
}

#[test]
fn test_and_or_nesting() {
    let filter = Filter::eq("role", "admin").and(
        Filter::contains("name", "jo").or(Filter::contains("email", "jo")),
    );
    let (sql, values) = filter.to_sql(COLUMNS).unwrap().unwrap();
    assert_eq!(
        sql,
        "(`role` = ? AND (LOWER(`name`) LIKE ? OR LOWER(`email`) LIKE ?))"
    );
    assert_eq!(values.len(), 3);
}

#[test]
fn test_match_all_renders_no_condition() {
    assert!(Filter::All.to_sql(COLUMNS).unwrap().is_none());
}

#[test]
fn test_group_of_all_children_collapses() {
    let filter = Filter::And(vec![Filter::All, Filter::All]);
    assert!(filter.to_sql(COLUMNS).unwrap().is_none());
}

#[test]
fn test_single_child_group_drops_parentheses() {
    let filter = Filter::And(vec![Filter::All, Filter::eq("id", 7i64)]);
    let (sql, _) = filter.to_sql(COLUMNS).unwrap().unwrap();
    assert_eq!(sql, "`id` = ?");
}

#[test]
fn test_order_rendering() {
    let order = Order::by("name").then_desc("id");
    assert_eq!(
        order.to_sql(COLUMNS).unwrap().unwrap(),
        "`name`, `id` DESC"
    );
    assert!(Order::default().to_sql(COLUMNS).unwrap().is_none());
}

#[test]
fn test_update_set_renders_only_present_fields() {
    let patch = UpdateSet::new()
        .set_if("name", Some("X"))
        .set_if::<String>("email", None)
        .set_if("role", Some("customer"));
    let (sql, values) = patch.to_sql(COLUMNS).unwrap();
    assert_eq!(sql, "`name` = ?, `role` = ?");
    assert_eq!(values.len(), 2);
}

#[test]
fn test_empty_update_set_is_an_error_at_render() {
    assert!(UpdateSet::new().to_sql(COLUMNS).is_err());
}

#[test]
fn test_insert_set_columns_and_placeholders_align() {
    let (columns, placeholders, values) = InsertSet::new()
        .set("name", "Apple")
        .set("price", 10i64)
        .set("email", SqlValue::Null)
        .to_sql(COLUMNS)
        .unwrap();
    assert_eq!(columns, "`name`, `price`, `email`");
    assert_eq!(placeholders, "?, ?, ?");
    assert_eq!(values.len(), 3);
    assert_eq!(values[2], SqlValue::Null);
}

#[test]
fn test_option_values_become_null() {
    let none: Option<String> = None;
    assert_eq!(SqlValue::from(none), SqlValue::Null);
    assert_eq!(
        SqlValue::from(Some("x".to_string())),
        SqlValue::Str("x".to_string())
    );
}
