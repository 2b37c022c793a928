//! Facet code → label lookup tables.
//!
//! Each dimension carries its own table, loaded from a flat JSON object such
//! as `{"s3": "Simple Storage Service (S3)"}`. Lookups never fail: a code with
//! no label is displayed and searched as itself.

use crate::catalog::identity::{FacetCode, FacetDimension};
use crate::schema_loader::{BundledSchema, validate_document};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
/// Read-only label tables for every facet dimension of a collection.
pub struct FacetCatalog {
    dimensions: BTreeMap<FacetDimension, BTreeMap<FacetCode, String>>,
}

impl FacetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FacetCatalog::insert`] for a whole dimension.
    pub fn with_labels<I, C, L>(mut self, dimension: FacetDimension, labels: I) -> Self
    where
        I: IntoIterator<Item = (C, L)>,
        C: Into<String>,
        L: Into<String>,
    {
        let table = self.dimensions.entry(dimension).or_default();
        for (code, label) in labels {
            table.insert(FacetCode(code.into()), label.into());
        }
        self
    }

    pub fn insert(&mut self, dimension: FacetDimension, code: FacetCode, label: String) {
        self.dimensions
            .entry(dimension)
            .or_default()
            .insert(code, label);
    }

    /// Merge a loaded table into a dimension; later labels win.
    pub fn extend_dimension(
        &mut self,
        dimension: FacetDimension,
        labels: BTreeMap<FacetCode, String>,
    ) {
        self.dimensions.entry(dimension).or_default().extend(labels);
    }

    /// The explicit label for a code, if one exists.
    pub fn lookup(&self, dimension: &FacetDimension, code: &FacetCode) -> Option<&str> {
        self.dimensions
            .get(dimension)
            .and_then(|table| table.get(code))
            .map(String::as_str)
    }

    /// The display label for a code, falling back to the raw code.
    pub fn label<'a>(&'a self, dimension: &FacetDimension, code: &'a FacetCode) -> &'a str {
        self.lookup(dimension, code).unwrap_or(code.as_str())
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &FacetDimension> {
        self.dimensions.keys()
    }

    /// Number of labels known for a dimension.
    pub fn label_count(&self, dimension: &FacetDimension) -> usize {
        self.dimensions.get(dimension).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.values().all(BTreeMap::is_empty)
    }
}

/// Read a flat `code → label` JSON object and validate it against the bundled
/// label map schema.
pub fn load_label_map(path: &Path) -> Result<BTreeMap<FacetCode, String>> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    validate_document(BundledSchema::LabelMap, &value, &path.display().to_string())?;
    let labels: BTreeMap<FacetCode, String> = serde_json::from_value(value)
        .with_context(|| format!("decoding labels from {}", path.display()))?;
    tracing::debug!(path = %path.display(), labels = labels.len(), "loaded label map");
    Ok(labels)
}
