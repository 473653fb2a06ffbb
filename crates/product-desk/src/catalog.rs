//! Filter/sort pipeline deriving the displayed product list.
//!
//! Everything here is a pure function of its arguments. The input slice is never reordered;
//! the pipeline works on references and clones only the survivors.

use crate::model::{Product, SortOption};

/// Products whose name contains `search`, in collection order.
///
/// Matching is a case-sensitive substring test. An empty `search` keeps every product.
pub fn filter_by_name<'a>(products: &'a [Product], search: &str) -> Vec<&'a Product> {
    if search.is_empty() {
        return products.iter().collect();
    }
    products.iter().filter(|p| p.name.contains(search)).collect()
}

/// Stable sort by `sort`. [`SortOption::Default`] leaves the order alone.
pub fn sort_products(products: &mut [&Product], sort: SortOption) {
    if sort == SortOption::Default {
        return;
    }
    // slice::sort_by is stable, so ties keep their collection order
    products.sort_by(|a, b| sort.compare(a, b).unwrap_or(std::cmp::Ordering::Equal));
}

/// The list to display for a collection, a settled search text and a sort option.
pub fn visible_products(products: &[Product], search: &str, sort: SortOption) -> Vec<Product> {
    let mut shown = filter_by_name(products, search);
    sort_products(&mut shown, sort);
    shown.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;

    fn product(id: u32, name: &str, price: f64, stock: u32) -> Product {
        Product::new(ProductId::from(id), name, price, stock)
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    fn shop() -> Vec<Product> {
        vec![
            product(1, "Laptop Gaming", 15000000.0, 5),
            product(2, "Mouse Wireless", 250000.0, 20),
            product(3, "Keyboard Mechanical", 1200000.0, 8),
            product(4, "Mouse Pad", 250000.0, 5),
        ]
    }

    #[test]
    fn test_search_scenario() {
        let products = vec![
            product(1, "Laptop", 15000000.0, 5),
            product(2, "Mouse", 250000.0, 20),
        ];
        assert_eq!(
            names(&visible_products(&products, "Mouse", SortOption::Default)),
            vec!["Mouse"]
        );
        assert_eq!(
            names(&visible_products(&products, "", SortOption::PriceDesc)),
            vec!["Laptop", "Mouse"]
        );
    }

    #[test]
    fn test_empty_search_keeps_everything_in_order() {
        let products = shop();
        assert_eq!(visible_products(&products, "", SortOption::Default), products);
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let products = shop();
        assert!(visible_products(&products, "mouse", SortOption::Default).is_empty());
        assert_eq!(
            names(&visible_products(&products, "Mouse", SortOption::Default)),
            vec!["Mouse Wireless", "Mouse Pad"]
        );
        // substring anywhere in the name
        assert_eq!(
            names(&visible_products(&products, "board", SortOption::Default)),
            vec!["Keyboard Mechanical"]
        );
    }

    #[test]
    fn test_filter_result_is_subset_with_matching_names() {
        let products = shop();
        for search in ["", "a", "Mo", "Laptop Gaming", "zzz", " "] {
            let shown = filter_by_name(&products, search);
            assert!(shown.iter().all(|p| products.contains(p)));
            assert!(shown.iter().all(|p| p.name.contains(search)));
        }
    }

    #[test]
    fn test_sorts_are_stable_permutations() {
        let products = shop();
        let cases = [
            (SortOption::PriceAsc, vec!["Mouse Wireless", "Mouse Pad", "Keyboard Mechanical", "Laptop Gaming"]),
            (SortOption::PriceDesc, vec!["Laptop Gaming", "Keyboard Mechanical", "Mouse Wireless", "Mouse Pad"]),
            (SortOption::StockAsc, vec!["Laptop Gaming", "Mouse Pad", "Keyboard Mechanical", "Mouse Wireless"]),
            (SortOption::StockDesc, vec!["Mouse Wireless", "Keyboard Mechanical", "Laptop Gaming", "Mouse Pad"]),
            (SortOption::Default, vec!["Laptop Gaming", "Mouse Wireless", "Keyboard Mechanical", "Mouse Pad"]),
        ];
        for (sort, expected) in cases {
            let shown = visible_products(&products, "", sort);
            assert_eq!(names(&shown), expected, "{sort}");
            assert_eq!(shown.len(), products.len());
        }
    }

    #[test]
    fn test_sort_applies_after_filter() {
        let products = shop();
        let shown = visible_products(&products, "Mouse", SortOption::StockAsc);
        assert_eq!(names(&shown), vec!["Mouse Pad", "Mouse Wireless"]);
    }

    #[test]
    fn test_pipeline_is_idempotent_and_leaves_input_alone() {
        let products = shop();
        let before = products.clone();
        let first = visible_products(&products, "o", SortOption::PriceAsc);
        let second = visible_products(&products, "o", SortOption::PriceAsc);
        assert_eq!(first, second);
        assert_eq!(products, before);
    }
}

#[cfg(test)]
mod properties {
    use super::*;
    use crate::model::ProductId;
    use proptest::prelude::*;
    use std::cmp::Ordering;

    /// Small alphabets and ranges so that matches and sort-key ties are common.
    fn catalog_strategy() -> impl Strategy<Value = Vec<Product>> {
        proptest::collection::vec(("[abAB ]{0,5}", 1u32..50, 1u32..10), 0..20).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, price, stock))| {
                    Product::new(ProductId::from(i as u32), name, f64::from(price), stock)
                })
                .collect()
        })
    }

    fn sort_strategy() -> impl Strategy<Value = SortOption> {
        proptest::sample::select(SortOption::ALL.to_vec())
    }

    /// Index in the generated collection; ids are allocated in order.
    fn position(product: &Product) -> usize {
        product.id.0.parse().unwrap()
    }

    proptest! {
        #[test]
        fn filtered_products_are_the_matching_subset_in_order(
            products in catalog_strategy(),
            search in "[abAB]{0,2}",
        ) {
            let shown = filter_by_name(&products, &search);

            prop_assert!(shown.iter().all(|p| p.name.contains(search.as_str())));
            prop_assert!(shown.windows(2).all(|w| position(w[0]) < position(w[1])));
            let matching = products
                .iter()
                .filter(|p| p.name.contains(search.as_str()))
                .count();
            prop_assert_eq!(shown.len(), matching);
            if search.is_empty() {
                prop_assert_eq!(shown.len(), products.len());
            }
        }

        #[test]
        fn sorting_is_a_stable_permutation_of_the_filtered_set(
            products in catalog_strategy(),
            search in "[abAB]{0,2}",
            sort in sort_strategy(),
        ) {
            let before = products.clone();
            let shown = visible_products(&products, &search, sort);

            for pair in shown.windows(2) {
                match sort.compare(&pair[0], &pair[1]) {
                    Some(Ordering::Less) => {}
                    Some(Ordering::Greater) => {
                        prop_assert!(false, "{} out of order under {}", pair[0].id, sort);
                    }
                    // ties and the default order keep collection order
                    Some(Ordering::Equal) | None => {
                        prop_assert!(position(&pair[0]) < position(&pair[1]));
                    }
                }
            }

            let mut filtered: Vec<usize> = filter_by_name(&products, &search)
                .into_iter()
                .map(position)
                .collect();
            let mut sorted: Vec<usize> = shown.iter().map(position).collect();
            filtered.sort_unstable();
            sorted.sort_unstable();
            prop_assert_eq!(filtered, sorted);

            prop_assert_eq!(visible_products(&products, &search, sort), shown);
            prop_assert_eq!(products, before);
        }
    }
}
