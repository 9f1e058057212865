//! Mapping between page-local offsets and virtual positions.
//!
//! A virtual position is an item's rank in the full remote collection. It is
//! derived purely from the page number, the fixed page size and the item's
//! offset within its page, so it can be computed for any fetched item
//! without knowing anything about the rest of the collection.

/// Virtual position of the item at `offset` on page `page_number`.
///
/// Pages are 1-based, offsets 0-based. Callers must pass `page_number >= 1`,
/// `page_size >= 1` and `offset < page_size`.
#[must_use]
pub fn virtual_position(page_number: u64, page_size: u64, offset: u64) -> u64 {
    debug_assert!(page_number >= 1, "page numbers are 1-based");
    debug_assert!(page_size >= 1, "page size must be positive");
    debug_assert!(offset < page_size, "offset {offset} outside page of {page_size}");
    (page_number - 1) * page_size + offset
}

/// Number of pages needed to show `total_count` items.
#[must_use]
pub fn total_pages(total_count: u64, page_size: u64) -> u64 {
    debug_assert!(page_size >= 1, "page size must be positive");
    total_count.div_ceil(page_size)
}

/// One page's slot in the virtual collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageGeometry {
    pub page_number: u64,
    pub page_size: u64,
}

impl PageGeometry {
    pub fn new(page_number: u64, page_size: u64) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Position of the first slot on this page.
    #[must_use]
    pub fn first_position(&self) -> u64 {
        virtual_position(self.page_number, self.page_size, 0)
    }

    #[must_use]
    pub fn position_of(&self, offset: u64) -> u64 {
        virtual_position(self.page_number, self.page_size, offset)
    }

    /// Whether `position` falls inside this page's slots.
    #[must_use]
    pub fn contains(&self, position: u64) -> bool {
        let first = self.first_position();
        position >= first && position - first < self.page_size
    }

    /// 1-based row range shown on this page, clamped to `total_count`.
    ///
    /// Returns `None` when the page lies entirely past the end of the
    /// collection.
    #[must_use]
    pub fn window(&self, total_count: u64) -> Option<PageWindow> {
        let first = self.first_position();
        if first >= total_count {
            return None;
        }
        let last = (first + self.page_size).min(total_count);
        Some(PageWindow {
            first_row: first + 1,
            last_row: last,
            total_count,
        })
    }
}

/// Rows visible on one page, for "Showing 13-24 of 100" style labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub first_row: u64,
    pub last_row: u64,
    pub total_count: u64,
}

impl std::fmt::Display for PageWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{} of {}",
            self.first_row, self.last_row, self.total_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(virtual_position(1, 12, 0), 0);
        assert_eq!(virtual_position(1, 12, 11), 11);
    }

    #[test]
    fn later_pages_continue_numbering() {
        assert_eq!(virtual_position(2, 12, 0), 12);
        assert_eq!(virtual_position(3, 12, 4), 28);
    }

    #[test]
    fn geometry_contains_own_slots_only() {
        let page = PageGeometry::new(2, 12);
        assert!(page.contains(12));
        assert!(page.contains(23));
        assert!(!page.contains(11));
        assert!(!page.contains(24));
    }

    #[test]
    fn window_clamps_last_page() {
        let window = PageGeometry::new(9, 12).window(100).expect("window");
        assert_eq!(window.first_row, 97);
        assert_eq!(window.last_row, 100);
        assert_eq!(window.to_string(), "97-100 of 100");
        assert!(PageGeometry::new(10, 12).window(100).is_none());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 12), 0);
        assert_eq!(total_pages(12, 12), 1);
        assert_eq!(total_pages(100, 12), 9);
    }
}
