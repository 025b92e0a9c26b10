//! Search query language: a flat `field:value;field:value` string parsed
//! into a typed [`Filter`] tree.
//!
//! Each pair becomes a case-insensitive substring predicate. A search key
//! may be mapped to several underlying columns (OR-ed together) via a
//! static, entity-specific table. All pairs combine under one join mode for
//! the whole query. Segments without a `:` are skipped; a fully malformed
//! or empty input is the match-everything filter.

use crate::core::query::Filter;

/// Static mapping from one search key to the set of columns it expands to.
#[derive(Debug, Clone, Copy)]
pub struct SearchMapping {
    pub key: &'static str,
    pub columns: &'static [&'static str],
}

/// How multiple `field:value` pairs combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchJoin {
    And,
    Or,
}

impl SearchJoin {
    /// `"or"` (any casing) selects union; anything else intersects.
    pub fn from_param(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("or") {
            SearchJoin::Or
        } else {
            SearchJoin::And
        }
    }
}

/// How a `role` parameter interacts with an accumulated search predicate on
/// the user listing. `Replace` drops the search predicate whenever a role is
/// supplied (legacy behavior); `Combine` intersects the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFilterMode {
    Combine,
    Replace,
}

impl RoleFilterMode {
    pub fn from_param(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("replace") {
            RoleFilterMode::Replace
        } else {
            RoleFilterMode::Combine
        }
    }

    /// Fold a role-equality predicate into the search predicate.
    pub fn apply(self, search: Filter, role: Filter) -> Filter {
        match self {
            RoleFilterMode::Combine => search.and(role),
            RoleFilterMode::Replace => role,
        }
    }
}

/// Parse a raw search string into a predicate tree.
pub fn parse_search(raw: &str, join: SearchJoin, mappings: &[SearchMapping]) -> Filter {
    let mut filter = Filter::All;
    for segment in raw.split(';') {
        // skip invalid filter format
        let Some((field, value)) = segment.split_once(':') else {
            continue;
        };

        let condition = match mappings.iter().find(|m| m.key == field) {
            Some(mapping) => {
                // one search key fans out over several columns
                let mut fanned = Filter::All;
                for column in mapping.columns {
                    fanned = fanned.or(Filter::contains(*column, value));
                }
                fanned
            }
            None => Filter::contains(field, value),
        };

        filter = match join {
            SearchJoin::Or => filter.or(condition),
            SearchJoin::And => filter.and(condition),
        };
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_MAPPINGS: &[SearchMapping] = &[SearchMapping {
        key: "name",
        columns: &["first_name", "last_name", "email", "username"],
    }];

    #[test]
    fn test_empty_input_matches_everything() {
        assert!(parse_search("", SearchJoin::And, &[]).is_all());
    }

    #[test]
    fn test_single_pair() {
        let filter = parse_search("status:active", SearchJoin::And, &[]);
        assert_eq!(filter, Filter::contains("status", "active"));
    }

    #[test]
    fn test_mapping_fans_out_to_or() {
        let filter = parse_search("name:john", SearchJoin::And, USER_MAPPINGS);
        match filter {
            Filter::Or(children) => assert_eq!(children.len(), 4),
            other => panic!("expected Or fan-out, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_segment_is_skipped() {
        let filter = parse_search("nonsense;status:active", SearchJoin::And, &[]);
        assert_eq!(filter, Filter::contains("status", "active"));
    }

    #[test]
    fn test_all_malformed_behaves_as_empty() {
        assert!(parse_search("a;b;c", SearchJoin::And, &[]).is_all());
    }

    #[test]
    fn test_value_may_contain_colon() {
        let filter = parse_search("note:a:b", SearchJoin::And, &[]);
        assert_eq!(filter, Filter::contains("note", "a:b"));
    }

    #[test]
    fn test_join_or_unions_pairs() {
        let filter = parse_search("status:active;icon:star", SearchJoin::Or, &[]);
        match filter {
            Filter::Or(children) => assert_eq!(children.len(), 2),
            other => panic!("expected Or, got {other:?}"),
        }
    }

    #[test]
    fn test_join_param_parsing() {
        assert_eq!(SearchJoin::from_param("or"), SearchJoin::Or);
        assert_eq!(SearchJoin::from_param("OR"), SearchJoin::Or);
        assert_eq!(SearchJoin::from_param("and"), SearchJoin::And);
        assert_eq!(SearchJoin::from_param("anything"), SearchJoin::And);
    }

    #[test]
    fn test_role_mode_combine_augments() {
        let search = parse_search("name:john", SearchJoin::And, USER_MAPPINGS);
        let combined = RoleFilterMode::Combine.apply(search.clone(), Filter::eq("role", "admin"));
        match combined {
            Filter::And(children) => assert_eq!(children.len(), 2),
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn test_role_mode_replace_drops_search() {
        let search = parse_search("name:john", SearchJoin::And, USER_MAPPINGS);
        let replaced = RoleFilterMode::Replace.apply(search, Filter::eq("role", "admin"));
        assert_eq!(replaced, Filter::eq("role", "admin"));
    }
}
