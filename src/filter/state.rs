//! Per-view query state: search text, facet selections, and flag filters.
//!
//! Every transition returns a new state and leaves the receiver untouched.
//! Dimensions with an empty selection are never stored, so two states that
//! select the same codes always compare equal regardless of how they got there.

use crate::catalog::{FacetCode, FacetDimension, FlagId};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct FilterState {
    search: String,
    facets: BTreeMap<FacetDimension, BTreeSet<FacetCode>>,
    flags: BTreeSet<FlagId>,
}

impl FilterState {
    /// The empty state: no search text, no selections, every flag off.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Codes selected for a dimension, in code order.
    pub fn selected(&self, dimension: &FacetDimension) -> impl Iterator<Item = &FacetCode> {
        self.facets.get(dimension).into_iter().flatten()
    }

    pub fn is_selected(&self, dimension: &FacetDimension, code: &FacetCode) -> bool {
        self.facets
            .get(dimension)
            .is_some_and(|codes| codes.contains(code))
    }

    /// Dimensions that currently narrow the view, with their selections.
    pub fn selections(&self) -> impl Iterator<Item = (&FacetDimension, &BTreeSet<FacetCode>)> {
        self.facets.iter()
    }

    pub fn flag(&self, flag: &FlagId) -> bool {
        self.flags.contains(flag)
    }

    pub fn enabled_flags(&self) -> impl Iterator<Item = &FlagId> {
        self.flags.iter()
    }

    /// True when any search text, selection, or flag is in effect.
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty() || !self.facets.is_empty() || !self.flags.is_empty()
    }

    pub fn with_search(&self, search: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.search = search.into();
        next
    }

    /// Add `code` to the dimension's selection if absent, remove it if present.
    pub fn toggle_facet(&self, dimension: &FacetDimension, code: &FacetCode) -> Self {
        let mut next = self.clone();
        let selection = next.facets.entry(dimension.clone()).or_default();
        if !selection.remove(code) {
            selection.insert(code.clone());
        }
        if selection.is_empty() {
            next.facets.remove(dimension);
        }
        next
    }

    /// Replace the dimension's selection with exactly `code`.
    ///
    /// This is the dropdown behaviour of the showcase pages; an empty code
    /// (the "all" option) clears the dimension.
    pub fn select_single(&self, dimension: &FacetDimension, code: &FacetCode) -> Self {
        let mut next = self.clone();
        if code.as_str().trim().is_empty() {
            next.facets.remove(dimension);
        } else {
            next.facets
                .insert(dimension.clone(), BTreeSet::from([code.clone()]));
        }
        next
    }

    /// Drop every selection for one dimension.
    pub fn clear_facet(&self, dimension: &FacetDimension) -> Self {
        let mut next = self.clone();
        next.facets.remove(dimension);
        next
    }

    pub fn set_flag(&self, flag: &FlagId, enabled: bool) -> Self {
        let mut next = self.clone();
        if enabled {
            next.flags.insert(flag.clone());
        } else {
            next.flags.remove(flag);
        }
        next
    }

    pub fn toggle_flag(&self, flag: &FlagId) -> Self {
        self.set_flag(flag, !self.flag(flag))
    }

    /// Reset search, selections, and flags.
    pub fn clear_all(&self) -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services() -> FacetDimension {
        FacetDimension::Services
    }

    #[test]
    fn toggle_facet_is_its_own_inverse() {
        let base = FilterState::new()
            .with_search("queue")
            .toggle_facet(&services(), &FacetCode::new("sqs"));
        let s3 = FacetCode::new("s3");
        let toggled = base.toggle_facet(&services(), &s3);
        assert!(toggled.is_selected(&services(), &s3));
        assert!(!base.is_selected(&services(), &s3), "input is not mutated");
        assert_eq!(toggled.toggle_facet(&services(), &s3), base);
    }

    #[test]
    fn toggling_last_code_removes_dimension() {
        let code = FacetCode::new("lambda");
        let state = FilterState::new()
            .toggle_facet(&services(), &code)
            .toggle_facet(&services(), &code);
        assert_eq!(state, FilterState::new());
        assert!(!state.has_active_filters());
    }

    #[test]
    fn multi_select_accumulates_within_dimension() {
        let state = FilterState::new()
            .toggle_facet(&services(), &FacetCode::new("s3"))
            .toggle_facet(&services(), &FacetCode::new("lambda"));
        let selected: Vec<&str> = state.selected(&services()).map(FacetCode::as_str).collect();
        assert_eq!(selected, ["lambda", "s3"]);
    }

    #[test]
    fn select_single_replaces_and_clears() {
        let state = FilterState::new()
            .toggle_facet(&services(), &FacetCode::new("s3"))
            .toggle_facet(&services(), &FacetCode::new("sqs"))
            .select_single(&services(), &FacetCode::new("lambda"));
        let selected: Vec<&str> = state.selected(&services()).map(FacetCode::as_str).collect();
        assert_eq!(selected, ["lambda"]);

        let cleared = state.select_single(&services(), &FacetCode::new(""));
        assert_eq!(cleared.selected(&services()).count(), 0);
        assert_eq!(cleared.clear_all(), FilterState::new());
    }

    #[test]
    fn clear_all_resets_everything() {
        let pro = FlagId::new("pro");
        let state = FilterState::new()
            .with_search("java")
            .toggle_facet(&FacetDimension::Platforms, &FacetCode::new("java"))
            .set_flag(&pro, true);
        assert!(state.has_active_filters());
        let cleared = state.clear_all();
        assert_eq!(cleared.search(), "");
        assert_eq!(cleared.selections().count(), 0);
        assert!(!cleared.flag(&pro));
    }

    #[test]
    fn flags_toggle_and_report_activity() {
        let pro = FlagId::new("pro");
        let on = FilterState::new().toggle_flag(&pro);
        assert!(on.flag(&pro));
        assert!(on.has_active_filters());
        assert_eq!(on.toggle_flag(&pro), FilterState::new());
    }
}
