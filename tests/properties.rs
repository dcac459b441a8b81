//! Property-based tests for pagination, URL building and predicate algebra.

use nesql_rust::registry::Table;
use nesql_rust::search::{
    combine, total_pages, Identifiable, Page, PageWindow, Predicate, QueryFailure, QuerySource,
    SearchService,
};
use proptest::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Clone)]
struct Filter(Arc<dyn Fn(&i64) -> bool + Send + Sync>);

impl Filter {
    fn new(f: impl Fn(&i64) -> bool + Send + Sync + 'static) -> Self {
        Filter(Arc::new(f))
    }

    fn matches(&self, v: &i64) -> bool {
        (self.0)(v)
    }
}

impl Predicate for Filter {
    fn match_all() -> Self {
        Filter::new(|_| true)
    }

    fn and(self, other: Self) -> Self {
        Filter::new(move |v| self.matches(v) && other.matches(v))
    }
}

struct Values(Vec<i64>);

impl QuerySource for Values {
    type Entity = i64;
    type Predicate = Filter;

    fn find_page(&self, predicate: &Filter, window: PageWindow) -> Result<Page<i64>, QueryFailure> {
        let matching: Vec<i64> = self.0.iter().copied().filter(|v| predicate.matches(v)).collect();
        let items = matching
            .iter()
            .copied()
            .skip(usize::try_from(window.offset).unwrap_or(usize::MAX))
            .take(window.limit as usize)
            .collect();
        Ok(Page {
            items,
            total: matching.len() as u64,
        })
    }
}

struct Named(String);

impl Identifiable for Named {
    fn id(&self) -> &str {
        &self.0
    }
}

fn table_strategy() -> impl Strategy<Value = Table> {
    prop::sample::select(Table::ALL.to_vec())
}

fn threshold_filter() -> impl Strategy<Value = Option<i64>> {
    prop::option::of(-50i64..50)
}

fn to_filter(threshold: Option<i64>) -> Option<Filter> {
    threshold.map(|t| Filter::new(move |v| *v > t))
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Page count is ceil(total / size), never below one.
    #[test]
    fn total_pages_is_ceiling(total in 0u64..1_000_000, size in 1u32..500) {
        let pages = total_pages(total, size);
        prop_assert!(pages >= 1);
        prop_assert!(pages * u64::from(size) >= total);
        if total > 0 {
            prop_assert!((pages - 1) * u64::from(size) < total);
        }
    }

    /// Any requested page lands inside 1..=last and returns at most page_size items.
    #[test]
    fn requested_page_is_clamped(
        count in 0i64..200,
        size in 1u32..30,
        page in any::<i64>(),
    ) {
        let source = Values((0..count).collect());
        let service = SearchService::new(size, 3);
        let result = service.handle_get_all(page, &source, |v| *v).unwrap();

        let last = total_pages(count as u64, size);
        prop_assert_eq!(result.total_pages, last);
        prop_assert!(result.page >= 1 && result.page <= last);
        if page < 1 {
            prop_assert_eq!(result.page, 1);
        }
        if page as i128 > last as i128 {
            prop_assert_eq!(result.page, last);
        }
        prop_assert!(result.items.len() <= size as usize);
        prop_assert!(*result.nav_pages().start() >= 1);
        prop_assert!(*result.nav_pages().end() <= last);
        if let Some(first) = result.items.first() {
            prop_assert_eq!(*first as u64, result.offset());
        }
    }

    /// The id can be recovered from the last segment of a view URL.
    #[test]
    fn view_url_round_trip(table in table_strategy(), id in "[A-Za-z0-9_.:-]{1,30}") {
        let url = table.view_url(&Named(id.clone()));
        let prefix = format!("/{}/view/", table.path());
        prop_assert!(url.starts_with(&prefix));
        prop_assert_eq!(&url[prefix.len()..], id.as_str());
        prop_assert_eq!(Table::from_path(table.path()), Some(table));
    }

    /// Odd-length parameter lists always panic.
    #[test]
    fn odd_params_always_panic(
        table in table_strategy(),
        params in prop::collection::vec("[a-z]{0,8}", 0..9),
    ) {
        prop_assume!(params.len() % 2 == 1);
        let outcome = catch_unwind(AssertUnwindSafe(|| table.search_url_with_params(&params)));
        prop_assert!(outcome.is_err());
    }

    /// Even-length parameter lists keep every pair, in order.
    #[test]
    fn even_params_keep_pairs(
        table in table_strategy(),
        pairs in prop::collection::vec(("[a-zA-Z]{1,8}", "[a-z ]{0,8}"), 0..5),
    ) {
        let flat: Vec<String> = pairs.iter().flat_map(|(k, v)| [k.clone(), v.clone()]).collect();
        let url = table.search_url_with_params(&flat);
        let query = url.split_once('?').map(|(_, q)| q).unwrap_or("");

        let decoded: Vec<(String, String)> = if query.is_empty() {
            Vec::new()
        } else {
            query
                .split('&')
                .map(|pair| {
                    let (k, v) = pair.split_once('=').unwrap();
                    (
                        urlencoding::decode(k).unwrap().into_owned(),
                        urlencoding::decode(v).unwrap().into_owned(),
                    )
                })
                .collect()
        };
        prop_assert_eq!(decoded, pairs);
    }

    /// combine(p, None) == p and AND composition ignores operand order.
    #[test]
    fn combine_identity_and_commutativity(
        a in threshold_filter(),
        b in threshold_filter(),
        values in prop::collection::vec(-100i64..100, 0..50),
    ) {
        prop_assert!(combine::<Filter>(None, None).is_none());

        let left = combine(to_filter(a), None);
        prop_assert_eq!(left.is_some(), a.is_some());

        let ab = combine(to_filter(a), to_filter(b)).unwrap_or_else(Filter::match_all);
        let ba = combine(to_filter(b), to_filter(a)).unwrap_or_else(Filter::match_all);
        let all = Filter::all_of([to_filter(a), to_filter(b)]);

        for v in &values {
            prop_assert_eq!(ab.matches(v), ba.matches(v));
            prop_assert_eq!(ab.matches(v), all.matches(v));
            if let Some(left) = &left {
                prop_assert_eq!(left.matches(v), to_filter(a).unwrap().matches(v));
            }
        }
    }
}
