//! Pagination query parameters and the fixed response envelope shared by
//! every list endpoint.

use serde::{Deserialize, Serialize};

/// Query parameters accepted by collection endpoints.
///
/// `page_size` also answers to `limit`, which some clients send instead.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size", alias = "limit")]
    pub page_size: i64,
    #[serde(default)]
    pub search: String,
    #[serde(default = "default_search_join", rename = "searchJoin")]
    pub search_join: String,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            search: String::new(),
            search_join: default_search_join(),
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

fn default_search_join() -> String {
    "and".to_string()
}

/// Clamp 1-indexed paging inputs so the offset never underflows and a page
/// never exceeds its requested size.
pub fn clamp_page(page: i64, page_size: i64) -> (i64, i64) {
    (page.max(1), page_size.max(1))
}

/// Fixed pagination envelope: `{ data, page, perPage, itemsPerPage, total }`.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: i64,
    #[serde(rename = "perPage")]
    pub per_page: i64,
    #[serde(rename = "itemsPerPage")]
    pub items_per_page: i64,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, page: i64, per_page: i64, total: i64) -> Self {
        let items_per_page = data.len() as i64;
        Self {
            data,
            page,
            per_page,
            items_per_page,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 10);
        assert_eq!(query.search, "");
        assert_eq!(query.search_join, "and");
    }

    #[test]
    fn test_limit_alias() {
        let query: PageQuery = serde_json::from_str(r#"{"limit": 25}"#).unwrap();
        assert_eq!(query.page_size, 25);
    }

    #[test]
    fn test_clamp_never_underflows() {
        assert_eq!(clamp_page(0, 10), (1, 10));
        assert_eq!(clamp_page(-3, 0), (1, 1));
        assert_eq!(clamp_page(2, 50), (2, 50));
    }

    #[test]
    fn test_envelope_wire_keys() {
        let page = Page::new(vec![1, 2, 3], 2, 10, 23);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["page"], 2);
        assert_eq!(json["perPage"], 10);
        assert_eq!(json["itemsPerPage"], 3);
        assert_eq!(json["total"], 23);
        assert_eq!(json["data"].as_array().unwrap().len(), 3);
    }
}
