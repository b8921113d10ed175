// ── Derived view ──
//
// Pure projection of (collection, filters): text filter, category
// filter, stable sort. Memoized against the collection version and the
// filter state -- recomputing a sort on every read is observable as lag
// on large collections, so the memo is part of the contract, not a nicety.

use std::cmp::Ordering;
use std::sync::{Arc, PoisonError};

use super::ProductStore;
use crate::model::{FilterState, Product, SortBy, SortDir};

pub(super) struct VisibleCache {
    version: u64,
    filters: FilterState,
    result: Arc<Vec<Product>>,
}

impl ProductStore {
    /// The filtered, sorted view of the canonical collection.
    ///
    /// Cheap when neither the collection nor the filters changed since
    /// the last call: the memoized result is returned as-is.
    pub fn visible_products(&self) -> Arc<Vec<Product>> {
        let st = self.state();
        let mut cache = self
            .visible_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(cached) = cache.as_ref() {
            if cached.version == st.version && cached.filters == st.filters {
                return Arc::clone(&cached.result);
            }
        }

        let result = Arc::new(compute_visible(&st.items, &st.filters));
        *cache = Some(VisibleCache {
            version: st.version,
            filters: st.filters.clone(),
            result: Arc::clone(&result),
        });
        result
    }
}

/// Apply the filter/sort algebra to a copy of the collection.
///
/// Order of operations: text query (case-insensitive substring over
/// title OR category), then exact category match, then stable sort.
/// The canonical collection is never reordered -- this works on clones.
fn compute_visible(items: &[Product], filters: &FilterState) -> Vec<Product> {
    let query = filters.query.to_lowercase();

    let mut result: Vec<Product> = items
        .iter()
        .filter(|p| {
            query.is_empty()
                || p.title.to_lowercase().contains(&query)
                || p.category.to_lowercase().contains(&query)
        })
        .filter(|p| filters.category.matches(&p.category))
        .cloned()
        .collect();

    // `sort_by` is stable: records comparing equal on the key keep their
    // canonical relative order. Descending reverses the comparator, not
    // the output, so ties stay in canonical order either way.
    result.sort_by(|a, b| {
        let ord = match filters.sort_by {
            SortBy::Name => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortBy::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
        };
        match filters.sort_dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });

    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{CategoryFilter, ProductId};

    fn product(id: u64, title: &str, price: f64, category: &str) -> Product {
        Product {
            id: ProductId::Number(id),
            title: title.into(),
            price,
            stock: 1,
            category: category.into(),
            thumbnail: String::new(),
        }
    }

    fn titles(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn no_filters_sorts_by_name_asc() {
        let items = vec![
            product(1, "banana", 1.0, "fruit"),
            product(2, "Apple", 3.0, "fruit"),
        ];
        let visible = compute_visible(&items, &FilterState::default());
        assert_eq!(titles(&visible), vec!["Apple", "banana"]);
    }

    #[test]
    fn price_sort_ascending() {
        // Apple at 3, Banana at 1 -> Banana first.
        let items = vec![
            product(1, "Apple", 3.0, "fruit"),
            product(2, "Banana", 1.0, "fruit"),
        ];
        let filters = FilterState {
            sort_by: SortBy::Price,
            ..FilterState::default()
        };
        assert_eq!(titles(&compute_visible(&items, &filters)), vec!["Banana", "Apple"]);
    }

    #[test]
    fn query_matches_title_or_category_case_insensitively() {
        let items = vec![
            product(1, "Apple", 3.0, "fruit"),
            product(2, "Hammer", 12.0, "tools"),
            product(3, "Fruit Basket", 20.0, "gifts"),
        ];
        let filters = FilterState {
            query: "FRUIT".into(),
            ..FilterState::default()
        };
        let visible = compute_visible(&items, &filters);
        // "Apple" matches on category, "Fruit Basket" on title.
        assert_eq!(titles(&visible), vec!["Apple", "Fruit Basket"]);
    }

    #[test]
    fn category_filter_is_exact() {
        let items = vec![
            product(1, "Apple", 3.0, "fruit"),
            product(2, "Hammer", 12.0, "tools"),
        ];
        let filters = FilterState {
            category: CategoryFilter::Category("tools".into()),
            ..FilterState::default()
        };
        assert_eq!(titles(&compute_visible(&items, &filters)), vec!["Hammer"]);
    }

    #[test]
    fn equal_keys_keep_canonical_order() {
        let items = vec![
            product(1, "Cherry", 2.0, "fruit"),
            product(2, "Apple", 2.0, "fruit"),
            product(3, "Banana", 2.0, "fruit"),
        ];
        let filters = FilterState {
            sort_by: SortBy::Price,
            ..FilterState::default()
        };
        // All prices equal: canonical order survives.
        assert_eq!(
            titles(&compute_visible(&items, &filters)),
            vec!["Cherry", "Apple", "Banana"]
        );
    }

    #[test]
    fn descending_keeps_tie_order_stable() {
        let items = vec![
            product(1, "Cherry", 2.0, "fruit"),
            product(2, "Apple", 2.0, "fruit"),
            product(3, "Pricey", 9.0, "fruit"),
        ];
        let filters = FilterState {
            sort_by: SortBy::Price,
            sort_dir: SortDir::Desc,
            ..FilterState::default()
        };
        // Descending moves the expensive record first but the 2.0 tie
        // stays in canonical order -- the comparator is reversed, not
        // the output.
        assert_eq!(
            titles(&compute_visible(&items, &filters)),
            vec!["Pricey", "Cherry", "Apple"]
        );
    }

    #[test]
    fn name_sort_descending() {
        let items = vec![
            product(1, "Apple", 3.0, "fruit"),
            product(2, "banana", 1.0, "fruit"),
        ];
        let filters = FilterState {
            sort_dir: SortDir::Desc,
            ..FilterState::default()
        };
        assert_eq!(titles(&compute_visible(&items, &filters)), vec!["banana", "Apple"]);
    }
}
