//! Integration tests for searching and filtering the built-in catalog.

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use shophub_core::{FilterCriteria, Price};
use shophub_integration_tests::open;
use shophub_storefront::search::FilterSummary;
use shophub_storefront::state::{ShopEvent, ShopState};
use shophub_storefront::storage::FileStore;

fn names(state: &ShopState<FileStore>) -> Vec<String> {
    state
        .visible_products()
        .iter()
        .map(|p| p.name.clone())
        .collect()
}

#[test]
fn test_laptops_under_budget() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = open(&dir.path().join("storage.json"));

    state.set_filters(
        FilterCriteria::default()
            .with_category("Laptops", true)
            .with_price_range(Price::ZERO, Price::from_whole(1500)),
    );

    assert_eq!(names(&state), vec!["Professional Laptop".to_string()]);
    assert_eq!(state.summary().to_string(), "Showing 1 of 6 products");
}

#[test]
fn test_search_combines_with_filters() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = open(&dir.path().join("storage.json"));

    state.set_search("SMART");
    assert_eq!(state.summary(), FilterSummary { shown: 2, total: 6 });

    state.set_filters(FilterCriteria::default().with_in_stock(true));
    assert_eq!(state.summary(), FilterSummary { shown: 1, total: 6 });
    assert_eq!(names(&state), vec!["Smart Fitness Watch".to_string()]);

    assert_eq!(
        state.active_labels(),
        vec!["Search: SMART".to_string(), "In Stock Only".to_string()]
    );
}

#[test]
fn test_clear_filters_restores_catalog_and_notifies() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = open(&dir.path().join("storage.json"));

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    state.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    state.set_filters(FilterCriteria::default().with_min_rating(4.8));
    assert_eq!(state.summary().shown, 1);

    state.clear_filters();
    assert_eq!(state.summary().shown, 6);
    assert!(state.active_labels().is_empty());

    let summaries: Vec<usize> = events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            ShopEvent::ProductsFiltered(summary) => Some(summary.shown),
            _ => None,
        })
        .collect();
    assert_eq!(summaries, vec![1, 6]);
}

#[test]
fn test_filters_do_not_touch_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut state = open(&path);
    state.set_search("watch");
    state.set_filters(FilterCriteria::default().with_category("Watches", true));
    assert_eq!(state.summary().shown, 1);
    drop(state);

    assert!(!path.exists());
}
