//! Compact selection state over a virtual collection.
//!
//! Selection is stored as a bulk rule plus per-item exceptions:
//!
//! - `baseline`: every item whose virtual position is below it is selected.
//! - `include`: items selected although they sit at or past the baseline.
//! - `exclude`: items deselected although they sit below the baseline.
//!
//! `include` and `exclude` are kept disjoint. Exceptions only matter on the
//! side of the baseline they were recorded for, which is what makes
//! [`SelectionModel::effective_count`] exact without knowing any positions.

use std::collections::BTreeSet;
use std::num::{IntErrorKind, ParseIntError};

use serde::Serialize;

use crate::{ItemId, SelectionError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionModel {
    baseline: u64,
    include: BTreeSet<ItemId>,
    exclude: BTreeSet<ItemId>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn baseline(&self) -> u64 {
        self.baseline
    }

    pub fn included(&self) -> &BTreeSet<ItemId> {
        &self.include
    }

    pub fn excluded(&self) -> &BTreeSet<ItemId> {
        &self.exclude
    }

    pub fn is_included(&self, id: &ItemId) -> bool {
        self.include.contains(id)
    }

    pub fn is_excluded(&self, id: &ItemId) -> bool {
        self.exclude.contains(id)
    }

    /// Replace the bulk rule with "the first `count` items are selected".
    ///
    /// Every manual exception is discarded. Negative counts are rejected and
    /// leave the model untouched.
    pub fn set_baseline(&mut self, count: i64) -> Result<(), SelectionError> {
        let baseline = u64::try_from(count).map_err(|_| {
            SelectionError::invalid_baseline(count.to_string(), "must not be negative")
        })?;
        self.baseline = baseline;
        self.include.clear();
        self.exclude.clear();
        Ok(())
    }

    pub fn mark_included(&mut self, id: &ItemId) {
        self.exclude.remove(id);
        self.include.insert(id.clone());
    }

    pub fn unmark_included(&mut self, id: &ItemId) {
        self.include.remove(id);
    }

    pub fn mark_excluded(&mut self, id: &ItemId) {
        self.include.remove(id);
        self.exclude.insert(id.clone());
    }

    pub fn unmark_excluded(&mut self, id: &ItemId) {
        self.exclude.remove(id);
    }

    /// Whether the bulk rule alone selects `position`.
    #[must_use]
    pub fn rule_selects(&self, position: u64) -> bool {
        position < self.baseline
    }

    /// Final selected state of `id` sitting at `position`.
    #[must_use]
    pub fn effective_selected(&self, id: &ItemId, position: u64) -> bool {
        if self.exclude.contains(id) {
            false
        } else if self.include.contains(id) {
            true
        } else {
            self.rule_selects(position)
        }
    }

    /// Number of selected items across the whole collection.
    #[must_use]
    pub fn effective_count(&self) -> u64 {
        (self.baseline + self.include.len() as u64).saturating_sub(self.exclude.len() as u64)
    }

    /// True when no bulk rule and no exception is recorded.
    pub fn is_empty(&self) -> bool {
        self.baseline == 0 && self.include.is_empty() && self.exclude.is_empty()
    }
}

/// Parse a user-entered bulk selection count.
///
/// Accepts surrounding whitespace; rejects empty, non-integer and negative
/// input with [`SelectionError::InvalidArgument`].
pub fn parse_baseline(input: &str) -> Result<i64, SelectionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SelectionError::invalid_baseline(input, "a number is required"));
    }
    let count: i64 = trimmed.parse().map_err(|err: ParseIntError| {
        let reason = match err.kind() {
            IntErrorKind::PosOverflow => "too large",
            IntErrorKind::NegOverflow => "must not be negative",
            _ => "not a whole number",
        };
        SelectionError::invalid_baseline(input, reason)
    })?;
    if count < 0 {
        return Err(SelectionError::invalid_baseline(input, "must not be negative"));
    }
    Ok(count)
}
