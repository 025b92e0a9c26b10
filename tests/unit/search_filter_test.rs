// Search DSL parsing: field:value;field:value strings into predicate trees.
//
// Covers:
// - and/or join semantics across pairs
// - search-key fan-out over mapped column sets
// - malformed segments skipped without aborting the parse
// - the role-vs-search interaction in both configured modes

use mercato::core::query::Filter;
use mercato::core::search::{parse_search, RoleFilterMode, SearchJoin, SearchMapping};
use mercato::modules::auth::models::USER_SEARCH_MAPPINGS;

const NO_MAPPINGS: &[SearchMapping] = &[];

#[test]
fn test_empty_string_is_neutral_filter() {
    let filter = parse_search("", SearchJoin::And, NO_MAPPINGS);
    assert!(filter.is_all());
}

#[test]
fn test_two_pairs_and_join() {
    let filter = parse_search("name:john;role:admin", SearchJoin::And, NO_MAPPINGS);
    match filter {
        Filter::And(children) => {
            assert_eq!(children.len(), 2);
            assert_eq!(children[0], Filter::contains("name", "john"));
            assert_eq!(children[1], Filter::contains("role", "admin"));
        }
        other => panic!("expected And, got {other:?}"),
    }
}

#[test]
fn test_two_pairs_or_join() {
    let filter = parse_search("name:john;role:admin", SearchJoin::Or, NO_MAPPINGS);
    assert!(matches!(filter, Filter::Or(ref children) if children.len() == 2));
}

#[test]
fn test_unknown_join_falls_back_to_and() {
    assert_eq!(SearchJoin::from_param("union"), SearchJoin::And);
    assert_eq!(SearchJoin::from_param(""), SearchJoin::And);
    assert_eq!(SearchJoin::from_param("Or"), SearchJoin::Or);
}

#[test]
fn test_user_name_key_fans_out_over_mapped_columns() {
    let filter = parse_search("name:john", SearchJoin::And, USER_SEARCH_MAPPINGS);
    match filter {
        Filter::Or(children) => {
            assert_eq!(
                children,
                vec![
                    Filter::contains("first_name", "john"),
                    Filter::contains("last_name", "john"),
                    Filter::contains("email", "john"),
                    Filter::contains("username", "john"),
                ]
            );
        }
        other => panic!("expected Or fan-out, got {other:?}"),
    }
}

#[test]
fn test_mapped_and_plain_pairs_combine() {
    let filter = parse_search(
        "name:john;role:admin",
        SearchJoin::And,
        USER_SEARCH_MAPPINGS,
    );
    match filter {
        Filter::And(children) => {
            assert_eq!(children.len(), 2);
            assert!(matches!(children[0], Filter::Or(_)));
            assert_eq!(children[1], Filter::contains("role", "admin"));
        }
        other => panic!("expected And, got {other:?}"),
    }
}

#[test]
fn test_malformed_segment_anywhere_is_ignored() {
    let head = parse_search("junk;role:admin", SearchJoin::And, NO_MAPPINGS);
    let tail = parse_search("role:admin;junk", SearchJoin::And, NO_MAPPINGS);
    assert_eq!(head, Filter::contains("role", "admin"));
    assert_eq!(tail, Filter::contains("role", "admin"));
}

#[test]
fn test_fully_malformed_input_matches_all() {
    let filter = parse_search("one;two;three", SearchJoin::And, NO_MAPPINGS);
    assert!(filter.is_all());
}

// The flagged override: with both search and role supplied, `replace` keeps
// only the role predicate (legacy behavior) while `combine` intersects them.

#[test]
fn test_role_replace_mode_drops_search_predicate() {
    let search = parse_search("name:john", SearchJoin::And, USER_SEARCH_MAPPINGS);
    let filter = RoleFilterMode::Replace.apply(search, Filter::eq("role", "admin"));
    assert_eq!(filter, Filter::eq("role", "admin"));
}

#[test]
fn test_role_combine_mode_augments_search_predicate() {
    let search = parse_search("name:john", SearchJoin::And, USER_SEARCH_MAPPINGS);
    let filter = RoleFilterMode::Combine.apply(search, Filter::eq("role", "admin"));
    match filter {
        Filter::And(children) => {
            assert_eq!(children.len(), 2);
            assert!(matches!(children[0], Filter::Or(_)));
            assert_eq!(children[1], Filter::eq("role", "admin"));
        }
        other => panic!("expected And of search and role, got {other:?}"),
    }
}

#[test]
fn test_role_without_search_filters_by_role_alone_in_both_modes() {
    for mode in [RoleFilterMode::Combine, RoleFilterMode::Replace] {
        let search = parse_search("", SearchJoin::And, USER_SEARCH_MAPPINGS);
        let filter = mode.apply(search, Filter::eq("role", "customer"));
        assert_eq!(filter, Filter::eq("role", "customer"));
    }
}

#[test]
fn test_mode_parsing_defaults_to_combine() {
    assert_eq!(RoleFilterMode::from_param("replace"), RoleFilterMode::Replace);
    assert_eq!(RoleFilterMode::from_param("combine"), RoleFilterMode::Combine);
    assert_eq!(RoleFilterMode::from_param("whatever"), RoleFilterMode::Combine);
}
