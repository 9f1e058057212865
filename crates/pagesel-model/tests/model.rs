//! Tests for pagesel-model types.

use std::collections::BTreeSet;

use pagesel_model::{
    ItemId, PageContext, PageRequest, SelectionModel, SessionOptions, virtual_position,
};
use proptest::prelude::*;

/// Collection size used when brute-forcing effective counts.
const COLLECTION: u64 = 120;

fn id(n: u64) -> ItemId {
    ItemId::from(n)
}

/// Build a model whose exceptions respect the side of the baseline they
/// belong to: only positions past the baseline are included, only positions
/// below it are excluded. Item ids equal their positions.
fn model_from(baseline: u64, picks: &BTreeSet<u64>) -> SelectionModel {
    let mut model = SelectionModel::new();
    model.set_baseline(baseline as i64).unwrap();
    for &position in picks {
        if position < baseline {
            model.mark_excluded(&id(position));
        } else {
            model.mark_included(&id(position));
        }
    }
    model
}

proptest! {
    #[test]
    fn effective_count_matches_formula(
        baseline in 0..COLLECTION,
        picks in prop::collection::btree_set(0..COLLECTION, 0..40),
    ) {
        let model = model_from(baseline, &picks);
        let expected = baseline + model.included().len() as u64 - model.excluded().len() as u64;
        prop_assert_eq!(model.effective_count(), expected);
    }

    #[test]
    fn effective_count_matches_item_by_item_tally(
        baseline in 0..COLLECTION,
        picks in prop::collection::btree_set(0..COLLECTION, 0..40),
    ) {
        let model = model_from(baseline, &picks);
        let tally = (0..COLLECTION)
            .filter(|&position| model.effective_selected(&id(position), position))
            .count() as u64;
        prop_assert_eq!(model.effective_count(), tally);
    }

    #[test]
    fn set_baseline_resets_exceptions(
        first in 0..COLLECTION,
        picks in prop::collection::btree_set(0..COLLECTION, 0..40),
        next in 0i64..10_000,
    ) {
        let mut model = model_from(first, &picks);
        model.set_baseline(next).unwrap();
        prop_assert_eq!(model.effective_count(), next as u64);
        prop_assert!(model.included().is_empty());
        prop_assert!(model.excluded().is_empty());
    }

    #[test]
    fn positions_are_contiguous_across_pages(page in 1u64..500, size in 1u64..100) {
        let last_of_page = virtual_position(page, size, size - 1);
        let first_of_next = virtual_position(page + 1, size, 0);
        prop_assert_eq!(last_of_page + 1, first_of_next);
    }
}

#[test]
fn page_context_positions_second_page() {
    let request = PageRequest::new(2, 12).unwrap();
    let page = PageContext::new(request, (13..=24).map(id).collect()).unwrap();
    let positions: Vec<u64> = page.positioned().map(|(_, position)| position).collect();
    assert_eq!(positions, (12..24).collect::<Vec<_>>());
    assert_eq!(page.total_pages(100), 9);
    assert_eq!(page.window(100).map(|w| w.to_string()).as_deref(), Some("13-24 of 100"));
}

#[test]
fn default_options_use_twelve_item_pages() {
    let options = SessionOptions::default();
    assert_eq!(options.page_size, 12);
    assert!(options.validate().is_ok());
    assert!(SessionOptions::new().with_page_size(0).validate().is_err());
}

#[test]
fn model_serializes_exceptions_in_order() {
    let mut model = SelectionModel::new();
    model.set_baseline(15).unwrap();
    model.mark_excluded(&id(13));
    model.mark_included(&id(40));
    model.mark_included(&id(30));
    let json = serde_json::to_value(&model).expect("serialize model");
    assert_eq!(json["baseline"], 15);
    assert_eq!(json["include"], serde_json::json!(["30", "40"]));
    assert_eq!(json["exclude"], serde_json::json!(["13"]));
}
