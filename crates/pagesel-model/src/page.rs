//! Page payloads and the page context the selection core works against.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::position::{PageGeometry, PageWindow, total_pages};
use crate::{ItemId, SelectionError};

/// One item as delivered by the page data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageItem {
    pub id: ItemId,
    /// Display fields; opaque to the selection core.
    #[serde(default)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl PageItem {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

/// A provider response for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub items: Vec<PageItem>,
    pub total_count: u64,
}

/// A request for one page of the remote collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_number: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(page_number: u64, page_size: u64) -> Result<Self, SelectionError> {
        if page_number == 0 {
            return Err(SelectionError::InvalidPageNumber);
        }
        if page_size == 0 {
            return Err(SelectionError::InvalidPageSize);
        }
        let end = (page_number - 1)
            .checked_mul(page_size)
            .and_then(|first| first.checked_add(page_size));
        if end.is_none() {
            return Err(SelectionError::PageOutOfRange {
                page_number,
                page_size,
            });
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::new(self.page_number, self.page_size)
    }
}

/// The currently displayed page: its slot in the collection and its ids in
/// display order.
///
/// This is the only source of virtual positions the reconciler trusts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    geometry: PageGeometry,
    ids: Vec<ItemId>,
}

impl PageContext {
    pub fn new(request: PageRequest, ids: Vec<ItemId>) -> Result<Self, SelectionError> {
        let page_size = request.page_size;
        if ids.len() as u64 > page_size {
            return Err(SelectionError::PageOverflow {
                len: ids.len(),
                page_size,
            });
        }
        Ok(Self {
            geometry: request.geometry(),
            ids,
        })
    }

    /// A page with no items, shown while a fetch failed.
    pub fn empty(request: PageRequest) -> Self {
        Self {
            geometry: request.geometry(),
            ids: Vec::new(),
        }
    }

    pub fn from_response(
        request: PageRequest,
        response: &PageResponse,
    ) -> Result<Self, SelectionError> {
        let ids = response.items.iter().map(|item| item.id.clone()).collect();
        Self::new(request, ids)
    }

    pub fn page_number(&self) -> u64 {
        self.geometry.page_number
    }

    pub fn page_size(&self) -> u64 {
        self.geometry.page_size
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    /// Virtual position of `id`, or `None` if it is not on this page.
    pub fn position_of(&self, id: &ItemId) -> Option<u64> {
        self.ids
            .iter()
            .position(|candidate| candidate == id)
            .map(|offset| self.geometry.position_of(offset as u64))
    }

    /// Ids paired with their virtual positions, in display order.
    pub fn positioned(&self) -> impl Iterator<Item = (&ItemId, u64)> + '_ {
        self.ids
            .iter()
            .enumerate()
            .map(|(offset, id)| (id, self.geometry.position_of(offset as u64)))
    }

    pub fn window(&self, total_count: u64) -> Option<PageWindow> {
        self.geometry.window(total_count)
    }

    pub fn total_pages(&self, total_count: u64) -> u64 {
        total_pages(total_count, self.geometry.page_size)
    }
}
