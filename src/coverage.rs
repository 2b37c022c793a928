//! Label coverage between a collection's items and its label tables.
//!
//! Codes without a label still work (they display as themselves), but they
//! usually mean a label file is stale. The report lists them per dimension so
//! `showcase-lint` can surface the gaps.

use crate::catalog::{CatalogItem, FacetCatalog, FacetCode, FacetDimension};
use anyhow::{Result, bail};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Labelled and unlabelled codes seen in one dimension, each sorted by code.
pub struct LabelCoverage {
    pub labelled: Vec<FacetCode>,
    pub unlabelled: Vec<FacetCode>,
    /// Items referencing each unlabelled code, by item name.
    pub referenced_by: BTreeMap<FacetCode, Vec<String>>,
}

impl LabelCoverage {
    pub fn is_complete(&self) -> bool {
        self.unlabelled.is_empty()
    }
}

/// Build a per-dimension label coverage report.
///
/// Only dimensions that have a label table are checked; a dimension with no
/// table at all (for example free-form use cases) is displayed by raw code on
/// purpose.
pub fn build_label_coverage(
    items: &[CatalogItem],
    labels: &FacetCatalog,
) -> BTreeMap<FacetDimension, LabelCoverage> {
    let mut report: BTreeMap<FacetDimension, LabelCoverage> = labels
        .dimensions()
        .map(|dimension| (dimension.clone(), LabelCoverage::default()))
        .collect();

    for (dimension, coverage) in report.iter_mut() {
        let mut labelled = BTreeSet::new();
        let mut unlabelled = BTreeSet::new();
        for item in items {
            for code in item.facet(dimension) {
                if labels.lookup(dimension, code).is_some() {
                    labelled.insert(code.clone());
                } else {
                    unlabelled.insert(code.clone());
                    let names = coverage.referenced_by.entry(code.clone()).or_default();
                    if !names.contains(&item.name) {
                        names.push(item.name.clone());
                    }
                }
            }
        }
        coverage.labelled = labelled.into_iter().collect();
        coverage.unlabelled = unlabelled.into_iter().collect();
    }

    report
}

/// Fail when any checked dimension has unlabelled codes.
pub fn require_complete_labels(report: &BTreeMap<FacetDimension, LabelCoverage>) -> Result<()> {
    let gaps: Vec<String> = report
        .iter()
        .filter(|(_, coverage)| !coverage.is_complete())
        .map(|(dimension, coverage)| {
            let codes = coverage
                .unlabelled
                .iter()
                .map(FacetCode::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{dimension}: {codes}")
        })
        .collect();
    if !gaps.is_empty() {
        bail!("facet codes without labels:\n{}", gaps.join("\n"));
    }
    Ok(())
}
