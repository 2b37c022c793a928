//! Search, facet matching, and ordering over an in-memory catalog.
//!
//! Everything here is a pure function of its arguments. Items are borrowed,
//! never cloned or mutated, and label lookups go through the `FacetCatalog`
//! passed in by the caller.

use crate::catalog::{CatalogItem, FacetCatalog, FacetCode, FacetDimension};
use crate::filter::sort::{SortKey, SortOrder, compare_text};
use crate::filter::state::FilterState;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// A selectable facet value with its display label and how many items carry it.
pub struct FacetOption {
    pub code: FacetCode,
    pub label: String,
    pub count: usize,
}

/// Distinct codes present in one dimension, ordered by display label.
pub fn derive_facet_options(
    items: &[CatalogItem],
    labels: &FacetCatalog,
    dimension: &FacetDimension,
) -> Vec<FacetCode> {
    describe_facet_options(items, labels, dimension)
        .into_iter()
        .map(|option| option.code)
        .collect()
}

/// Like [`derive_facet_options`], with labels and per-code item counts.
///
/// A code listed twice on one item counts once for that item.
pub fn describe_facet_options(
    items: &[CatalogItem],
    labels: &FacetCatalog,
    dimension: &FacetDimension,
) -> Vec<FacetOption> {
    let mut counts: BTreeMap<&FacetCode, usize> = BTreeMap::new();
    for item in items {
        let codes = item.facet(dimension);
        for (idx, code) in codes.iter().enumerate() {
            if codes[..idx].contains(code) {
                continue;
            }
            *counts.entry(code).or_insert(0) += 1;
        }
    }

    let mut options: Vec<FacetOption> = counts
        .into_iter()
        .map(|(code, count)| FacetOption {
            code: code.clone(),
            label: labels.label(dimension, code).to_string(),
            count,
        })
        .collect();
    // Codes arrive in code order, so equal labels stay deterministic.
    options.sort_by(|a, b| compare_text(&a.label, &b.label));
    options
}

/// Case-insensitive substring search over name, description, facet labels,
/// and tags. A blank query matches everything.
pub fn matches_search(item: &CatalogItem, labels: &FacetCatalog, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let hit = |text: &str| text.to_lowercase().contains(&needle);

    hit(item.name.as_str())
        || hit(item.description.as_str())
        || item.facets.iter().any(|(dimension, codes)| {
            codes
                .iter()
                .any(|code| hit(labels.label(dimension, code)))
        })
        || item.tags.iter().any(|tag| hit(tag.as_str()))
}

/// AND across dimensions, OR within a dimension; every enabled flag must be
/// set on the item.
pub fn matches_filters(item: &CatalogItem, state: &FilterState) -> bool {
    let facets_match = state.selections().all(|(dimension, selected)| {
        item.facet(dimension)
            .iter()
            .any(|code| selected.contains(code))
    });
    facets_match && state.enabled_flags().all(|flag| item.flag(flag))
}

/// Items passing both predicates, ordered ascending by `key`.
pub fn filter_and_sort<'a>(
    items: &'a [CatalogItem],
    labels: &FacetCatalog,
    state: &FilterState,
    key: &SortKey,
) -> Vec<&'a CatalogItem> {
    let mut matched = filter_items(items, labels, state);
    matched.sort_by(|a, b| key.compare(a, b));
    matched
}

/// Items passing both predicates, ordered by `order`.
pub fn filter_and_sort_by<'a>(
    items: &'a [CatalogItem],
    labels: &FacetCatalog,
    state: &FilterState,
    order: &SortOrder,
) -> Vec<&'a CatalogItem> {
    let mut matched = filter_items(items, labels, state);
    matched.sort_by(|a, b| order.compare(a, b));
    matched
}

fn filter_items<'a>(
    items: &'a [CatalogItem],
    labels: &FacetCatalog,
    state: &FilterState,
) -> Vec<&'a CatalogItem> {
    items
        .iter()
        .filter(|item| matches_search(item, labels, state.search()))
        .filter(|item| matches_filters(item, state))
        .collect()
}
