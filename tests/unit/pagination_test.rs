// Pagination arithmetic and the fixed response envelope.
//
// Property-style checks: for all page >= 1 and page_size > 0 the computed
// slice is exactly [(page-1)*page_size, page*page_size), clamping never
// underflows, and the envelope reports total independently of the page.

use proptest::prelude::*;

use mercato::core::pagination::{clamp_page, Page};

proptest! {
    #[test]
    fn test_clamped_offset_never_negative(page in -1000i64..1000, page_size in -1000i64..1000) {
        let (page, page_size) = clamp_page(page, page_size);
        let offset = (page - 1) * page_size;
        prop_assert!(offset >= 0);
        prop_assert!(page >= 1);
        prop_assert!(page_size >= 1);
    }

    #[test]
    fn test_valid_inputs_pass_through_unchanged(page in 1i64..10_000, page_size in 1i64..500) {
        prop_assert_eq!(clamp_page(page, page_size), (page, page_size));
    }

    #[test]
    fn test_page_slice_returns_at_most_page_size(
        total in 0usize..500,
        page in 1i64..50,
        page_size in 1i64..50,
    ) {
        // the repository's LIMIT/OFFSET arithmetic over an in-memory collection
        let records: Vec<usize> = (0..total).collect();
        let offset = ((page - 1) * page_size) as usize;
        let slice: Vec<usize> = records.iter().skip(offset).take(page_size as usize).copied().collect();

        prop_assert!(slice.len() <= page_size as usize);

        // total reported by the envelope ignores pagination entirely
        let envelope = Page::new(slice, page, page_size, total as i64);
        prop_assert_eq!(envelope.total, total as i64);
        prop_assert!(envelope.items_per_page <= page_size);
    }

    #[test]
    fn test_consecutive_pages_partition_the_collection(
        total in 0usize..200,
        page_size in 1i64..20,
    ) {
        let records: Vec<usize> = (0..total).collect();
        let mut reassembled = Vec::new();
        let mut page = 1i64;
        loop {
            let offset = ((page - 1) * page_size) as usize;
            let slice: Vec<usize> = records.iter().skip(offset).take(page_size as usize).copied().collect();
            if slice.is_empty() {
                break;
            }
            reassembled.extend(slice);
            page += 1;
        }
        prop_assert_eq!(reassembled, records);
    }
}

#[test]
fn test_envelope_shape() {
    let page = Page::new(vec!["a", "b"], 3, 2, 11);
    let json = serde_json::to_value(&page).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    for key in ["data", "page", "perPage", "itemsPerPage", "total"] {
        assert!(keys.contains(&key), "missing envelope key {key}");
    }
    assert_eq!(json["perPage"], 2);
    assert_eq!(json["itemsPerPage"], 2);
}
