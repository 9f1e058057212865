//! Algebraic properties of the reconciler.

use pagesel_core::{SelectionEvent, SelectionQuery, SelectionReconciler};
use pagesel_model::{ItemId, PageContext, PageRequest};
use proptest::prelude::*;

const PAGE_SIZE: u64 = 12;

/// Page 2 of a collection whose ids equal their 1-based rank.
fn second_page() -> PageContext {
    let request = PageRequest::new(2, PAGE_SIZE).unwrap();
    PageContext::new(request, (13..=24).map(ItemId::from).collect()).unwrap()
}

fn event_strategy() -> impl Strategy<Value = SelectionEvent> {
    prop_oneof![
        4 => (13u64..=24, any::<bool>()).prop_map(|(n, selected)| SelectionEvent::ToggleItem {
            id: ItemId::from(n),
            selected,
        }),
        1 => any::<bool>().prop_map(|checked| SelectionEvent::ToggleAllOnPage { checked }),
    ]
}

fn reconciler_at(baseline: i64) -> SelectionReconciler {
    let mut reconciler = SelectionReconciler::new();
    reconciler.replace_baseline(baseline).unwrap();
    reconciler
}

fn run(reconciler: &mut SelectionReconciler, page: &PageContext, events: &[SelectionEvent]) {
    for event in events {
        reconciler.apply(page, event).unwrap();
    }
}

proptest! {
    #[test]
    fn repeating_an_event_changes_nothing(
        baseline in 0i64..40,
        prefix in prop::collection::vec(event_strategy(), 0..20),
        event in event_strategy(),
    ) {
        let page = second_page();
        let mut reconciler = reconciler_at(baseline);
        run(&mut reconciler, &page, &prefix);

        reconciler.apply(&page, &event).unwrap();
        let once = reconciler.model().clone();
        let outcome = reconciler.apply(&page, &event).unwrap();

        prop_assert_eq!(reconciler.model(), &once);
        prop_assert!(outcome.is_noop());
    }

    #[test]
    fn same_final_selection_gives_same_model(
        baseline in 0i64..40,
        first in prop::collection::vec(event_strategy(), 0..30),
        noise in prop::collection::vec(event_strategy(), 0..30),
    ) {
        let page = second_page();
        let mut left = reconciler_at(baseline);
        run(&mut left, &page, &first);

        let wanted: Vec<(ItemId, bool)> = SelectionQuery::new(left.model(), &page)
            .rows()
            .map(|row| (row.id.clone(), row.selected))
            .collect();
        let settle: Vec<SelectionEvent> = wanted
            .into_iter()
            .rev()
            .map(|(id, selected)| SelectionEvent::ToggleItem { id, selected })
            .collect();

        let mut right = reconciler_at(baseline);
        run(&mut right, &page, &noise);
        run(&mut right, &page, &settle);

        prop_assert_eq!(left.model(), right.model());
    }

    #[test]
    fn count_tracks_page_tally(
        baseline in 0i64..40,
        events in prop::collection::vec(event_strategy(), 0..30),
    ) {
        let page = second_page();
        let mut reconciler = reconciler_at(baseline);
        run(&mut reconciler, &page, &events);

        // Only page 2 was ever touched; everything else follows the rule.
        let before_page = (baseline as u64).min(12);
        let after_page = (baseline as u64).saturating_sub(24);
        let on_page = SelectionQuery::new(reconciler.model(), &page).selected_on_page() as u64;
        prop_assert_eq!(
            reconciler.model().effective_count(),
            before_page + on_page + after_page
        );
    }
}
