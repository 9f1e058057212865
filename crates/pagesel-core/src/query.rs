//! Read-only selection answers for the page on screen.

use pagesel_model::{ItemId, PageContext, SelectionModel};

/// One displayed item and whether its checkbox is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSelection<'a> {
    pub id: &'a ItemId,
    pub position: u64,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct SelectionQuery<'a> {
    model: &'a SelectionModel,
    page: &'a PageContext,
}

impl<'a> SelectionQuery<'a> {
    pub fn new(model: &'a SelectionModel, page: &'a PageContext) -> Self {
        Self { model, page }
    }

    /// Selected state of `id`, or `None` when it is not on this page.
    pub fn is_selected(&self, id: &ItemId) -> Option<bool> {
        self.page
            .position_of(id)
            .map(|position| self.model.effective_selected(id, position))
    }

    /// Every item on the page, in display order.
    pub fn rows(&self) -> impl Iterator<Item = RowSelection<'a>> + use<'a> {
        let model = self.model;
        let page = self.page;
        page.positioned().map(move |(id, position)| RowSelection {
            id,
            position,
            selected: model.effective_selected(id, position),
        })
    }

    pub fn selected_on_page(&self) -> usize {
        self.rows().filter(|row| row.selected).count()
    }

    /// Header checkbox fully checked. An empty page is never fully checked.
    pub fn all_selected(&self) -> bool {
        !self.page.is_empty() && self.rows().all(|row| row.selected)
    }

    /// Header checkbox fully unchecked.
    pub fn none_selected(&self) -> bool {
        self.rows().all(|row| !row.selected)
    }

    pub fn effective_count(&self) -> u64 {
        self.model.effective_count()
    }
}
