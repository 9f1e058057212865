//! Turns user selection intents into selection model mutations.
//!
//! The reconciler is the sole owner of the [`SelectionModel`]. It never
//! remembers which page is on screen: every call receives the current
//! [`PageContext`] explicitly, and a virtual position is only ever taken from
//! that page. Items the caller cannot currently see are rejected rather than
//! guessed at.

use pagesel_model::{ItemId, PageContext, SelectionError, SelectionModel};
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

/// A discrete selection intent emitted by the display surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// One checkbox was set to `selected`.
    ToggleItem { id: ItemId, selected: bool },
    /// The page header checkbox was set to `checked`.
    ToggleAllOnPage { checked: bool },
    /// A new "select the first `count` items" command.
    ReplaceBaseline { count: i64 },
}

/// Model mutation for one item, chosen from the desired state and what the
/// bulk rule alone predicts for the item's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Wanted, but past the baseline.
    MarkIncluded,
    /// Wanted, and the rule already selects it.
    UnmarkExcluded,
    /// Unwanted, but the rule selects it.
    MarkExcluded,
    /// Unwanted, and the rule already leaves it out.
    UnmarkIncluded,
}

impl Transition {
    #[must_use]
    pub fn for_toggle(desired: bool, rule_selected: bool) -> Self {
        match (desired, rule_selected) {
            (true, false) => Self::MarkIncluded,
            (true, true) => Self::UnmarkExcluded,
            (false, true) => Self::MarkExcluded,
            (false, false) => Self::UnmarkIncluded,
        }
    }

    fn apply(self, model: &mut SelectionModel, id: &ItemId) {
        match self {
            Self::MarkIncluded => model.mark_included(id),
            Self::UnmarkExcluded => model.unmark_excluded(id),
            Self::MarkExcluded => model.mark_excluded(id),
            Self::UnmarkIncluded => model.unmark_included(id),
        }
    }
}

/// What an applied event did to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// Items whose exception membership changed.
    pub changed: usize,
    /// Stale exceptions dropped for items on the page.
    pub pruned: usize,
    /// Whether the event replaced the bulk rule.
    pub rebaselined: bool,
}

impl EventOutcome {
    /// True when the model is unchanged.
    pub fn is_noop(&self) -> bool {
        self.changed == 0 && self.pruned == 0 && !self.rebaselined
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionReconciler {
    model: SelectionModel,
}

impl SelectionReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&self) -> &SelectionModel {
        &self.model
    }

    pub fn into_model(self) -> SelectionModel {
        self.model
    }

    /// Apply `event` against the page currently on screen.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::UnknownIdentifier`] when a toggle names an item
    ///   that is not on `page`. The model is not touched.
    /// - [`SelectionError::InvalidArgument`] for a negative baseline. The
    ///   model is not touched.
    pub fn apply(
        &mut self,
        page: &PageContext,
        event: &SelectionEvent,
    ) -> Result<EventOutcome, SelectionError> {
        match event {
            SelectionEvent::ToggleItem { id, selected } => self.toggle_item(page, id, *selected),
            SelectionEvent::ToggleAllOnPage { checked } => Ok(self.toggle_page(page, *checked)),
            SelectionEvent::ReplaceBaseline { count } => self.replace_baseline(*count),
        }
    }

    pub fn toggle_item(
        &mut self,
        page: &PageContext,
        id: &ItemId,
        selected: bool,
    ) -> Result<EventOutcome, SelectionError> {
        let position = page
            .position_of(id)
            .ok_or_else(|| SelectionError::UnknownIdentifier { id: id.clone() })?;
        let changed = usize::from(self.transition(id, position, selected));
        let pruned = self.prune_page(page);
        Ok(EventOutcome {
            changed,
            pruned,
            rebaselined: false,
        })
    }

    /// Set every item on `page` to `checked`.
    pub fn toggle_page(&mut self, page: &PageContext, checked: bool) -> EventOutcome {
        let changed = page
            .positioned()
            .filter(|&(id, position)| self.transition(id, position, checked))
            .count();
        let pruned = self.prune_page(page);
        EventOutcome {
            changed,
            pruned,
            rebaselined: false,
        }
    }

    /// Replace the bulk rule; discards every manual exception.
    pub fn replace_baseline(&mut self, count: i64) -> Result<EventOutcome, SelectionError> {
        let dropped = self.model.included().len() + self.model.excluded().len();
        self.model.set_baseline(count)?;
        info!(
            baseline = self.model.baseline(),
            dropped_exceptions = dropped,
            "baseline replaced"
        );
        Ok(EventOutcome {
            changed: dropped,
            pruned: 0,
            rebaselined: true,
        })
    }

    /// Returns true if the item's membership changed.
    fn transition(&mut self, id: &ItemId, position: u64, desired: bool) -> bool {
        let before = self.membership(id);
        let transition = Transition::for_toggle(desired, self.model.rule_selects(position));
        transition.apply(&mut self.model, id);
        trace!(%id, position, desired, ?transition, "toggle");
        before != self.membership(id)
    }

    /// Drop exceptions recorded on the wrong side of the baseline for items
    /// on `page`.
    fn prune_page(&mut self, page: &PageContext) -> usize {
        let mut pruned = 0;
        for (id, position) in page.positioned() {
            if self.model.rule_selects(position) {
                if self.model.is_included(id) {
                    self.model.unmark_included(id);
                    pruned += 1;
                }
            } else if self.model.is_excluded(id) {
                self.model.unmark_excluded(id);
                pruned += 1;
            }
        }
        pruned
    }

    fn membership(&self, id: &ItemId) -> (bool, bool) {
        (self.model.is_included(id), self.model.is_excluded(id))
    }
}

#[cfg(test)]
mod tests {
    use pagesel_model::PageRequest;

    use super::*;

    fn page(number: u64, size: u64, ids: std::ops::RangeInclusive<u64>) -> PageContext {
        let request = PageRequest::new(number, size).unwrap();
        PageContext::new(request, ids.map(ItemId::from).collect()).unwrap()
    }

    #[test]
    fn transition_table_is_exhaustive() {
        assert_eq!(Transition::for_toggle(true, false), Transition::MarkIncluded);
        assert_eq!(Transition::for_toggle(true, true), Transition::UnmarkExcluded);
        assert_eq!(Transition::for_toggle(false, true), Transition::MarkExcluded);
        assert_eq!(Transition::for_toggle(false, false), Transition::UnmarkIncluded);
    }

    #[test]
    fn unknown_item_is_rejected_without_mutation() {
        let mut reconciler = SelectionReconciler::new();
        let first = page(1, 12, 1..=12);
        let err = reconciler
            .toggle_item(&first, &ItemId::from(99u64), true)
            .unwrap_err();
        assert!(matches!(err, SelectionError::UnknownIdentifier { .. }));
        assert!(reconciler.model().is_empty());
    }

    #[test]
    fn stale_inclusion_is_pruned_below_baseline() {
        let mut reconciler = SelectionReconciler::new();
        let first = page(1, 12, 1..=12);

        // An inclusion left behind for an item that now sits below the baseline.
        reconciler.model.set_baseline(3).unwrap();
        reconciler.model.mark_included(&ItemId::from(1u64));
        let outcome = reconciler
            .toggle_item(&first, &ItemId::from(2u64), true)
            .unwrap();
        assert_eq!(outcome.pruned, 1);
        assert!(!reconciler.model().is_included(&ItemId::from(1u64)));
        assert_eq!(reconciler.model().effective_count(), 3);
    }

    #[test]
    fn repeated_toggle_reports_no_change() {
        let mut reconciler = SelectionReconciler::new();
        let first = page(1, 12, 1..=12);
        let once = reconciler
            .toggle_item(&first, &ItemId::from(5u64), true)
            .unwrap();
        let twice = reconciler
            .toggle_item(&first, &ItemId::from(5u64), true)
            .unwrap();
        assert_eq!(once.changed, 1);
        assert!(twice.is_noop());
    }

    #[test]
    fn negative_baseline_is_rejected() {
        let mut reconciler = SelectionReconciler::new();
        let first = page(1, 12, 1..=12);
        reconciler.toggle_item(&first, &ItemId::from(5u64), true).unwrap();
        let err = reconciler
            .apply(&first, &SelectionEvent::ReplaceBaseline { count: -4 })
            .unwrap_err();
        assert!(matches!(err, SelectionError::InvalidArgument { .. }));
        assert!(reconciler.model().is_included(&ItemId::from(5u64)));
    }

    #[test]
    fn events_round_trip_as_tagged_json() {
        let event = SelectionEvent::ToggleItem {
            id: ItemId::from(5u64),
            selected: true,
        };
        let json = serde_json::to_string(&event).expect("serialize event");
        assert_eq!(json, r#"{"kind":"toggle_item","id":"5","selected":true}"#);
    }
}
