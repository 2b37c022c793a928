//! Derived result lists and fixed-size pages for the table widgets.

use crate::catalog::{CatalogItem, FacetCatalog};
use crate::filter::engine::filter_and_sort_by;
use crate::filter::sort::SortOrder;
use crate::filter::state::FilterState;
use serde::Serialize;

/// Rows per page on the coverage tables.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Debug)]
/// Filtered and ordered items for one `FilterState`.
pub struct CatalogView<'a> {
    matches: Vec<&'a CatalogItem>,
    total: usize,
}

#[derive(Clone, Debug, Serialize)]
/// One page of a `CatalogView`.
pub struct Page<'v, 'a> {
    pub index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub items: &'v [&'a CatalogItem],
    pub has_previous: bool,
    pub has_next: bool,
}

impl<'a> CatalogView<'a> {
    pub fn build(
        items: &'a [CatalogItem],
        labels: &FacetCatalog,
        state: &FilterState,
        order: &SortOrder,
    ) -> Self {
        Self {
            matches: filter_and_sort_by(items, labels, state, order),
            total: items.len(),
        }
    }

    pub fn matches(&self) -> &[&'a CatalogItem] {
        &self.matches
    }

    pub fn matched(&self) -> usize {
        self.matches.len()
    }

    /// Size of the unfiltered collection.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn is_single_result(&self) -> bool {
        self.matches.len() == 1
    }

    /// Number of pages; an empty view still has one (empty) page.
    pub fn page_count(&self, page_size: usize) -> usize {
        let page_size = page_size.max(1);
        self.matches.len().div_ceil(page_size).max(1)
    }

    /// Slice out page `index` (zero-based). Out-of-range pages are empty.
    pub fn page(&self, index: usize, page_size: usize) -> Page<'_, 'a> {
        let page_size = page_size.max(1);
        let page_count = self.page_count(page_size);
        let start = index.saturating_mul(page_size).min(self.matches.len());
        let end = start.saturating_add(page_size).min(self.matches.len());
        Page {
            index,
            page_size,
            page_count,
            items: &self.matches[start..end],
            has_previous: index > 0,
            has_next: index.saturating_add(1) < page_count,
        }
    }
}
