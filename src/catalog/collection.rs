//! A configured collection: its items plus the label tables they reference.
//!
//! Loading is strict about structure (missing files, malformed JSON, schema
//! violations, nameless items) and lenient about content the site tolerates:
//! duplicate names only warn.

use crate::catalog::labels::{FacetCatalog, load_label_map};
use crate::catalog::model::{CatalogItem, DocumentKind, parse_items};
use crate::config::{CollectionConfig, ShowcaseConfig};
use crate::filter::{DEFAULT_PAGE_SIZE, SortOrder};
use crate::schema_loader::{BundledSchema, validate_document};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug)]
pub struct Collection {
    name: String,
    kind: DocumentKind,
    items: Vec<CatalogItem>,
    labels: FacetCatalog,
    default_sort: SortOrder,
    page_size: usize,
}

impl Collection {
    /// Assemble a collection from in-memory parts.
    pub fn new(
        name: impl Into<String>,
        kind: DocumentKind,
        items: Vec<CatalogItem>,
        labels: FacetCatalog,
    ) -> Result<Self> {
        let name = name.into();
        validate_items(&name, &items)?;
        Ok(Self {
            name,
            kind,
            items,
            labels,
            default_sort: SortOrder::default(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Load the items file and every label file named by `entry`.
    pub fn load(config: &ShowcaseConfig, entry: &CollectionConfig) -> Result<Self> {
        let items_path = config.resolve(&entry.items);
        let items = read_items(&items_path, entry.kind)
            .with_context(|| format!("loading collection '{}'", entry.name))?;

        let mut labels = FacetCatalog::new();
        for (dimension, path) in &entry.labels {
            let path = config.resolve(path);
            let table = load_label_map(&path).with_context(|| {
                format!(
                    "loading {} labels for collection '{}'",
                    dimension, entry.name
                )
            })?;
            labels.extend_dimension(dimension.clone(), table);
        }

        let default_sort = match entry.default_sort.as_deref() {
            Some(raw) => SortOrder::parse(raw)
                .with_context(|| format!("collection '{}' default_sort", entry.name))?,
            None => SortOrder::default(),
        };

        let mut collection = Self::new(entry.name.clone(), entry.kind, items, labels)?;
        collection.default_sort = default_sort;
        collection.page_size = entry.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        tracing::info!(
            collection = %collection.name,
            kind = collection.kind.as_str(),
            items = collection.items.len(),
            "loaded collection"
        );
        Ok(collection)
    }

    /// Look up `name` in the config and load it.
    pub fn load_named(config: &ShowcaseConfig, name: &str) -> Result<Self> {
        let entry = config.collection(name)?;
        Self::load(config, entry)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn labels(&self) -> &FacetCatalog {
        &self.labels
    }

    pub fn default_sort(&self) -> &SortOrder {
        &self.default_sort
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

fn read_items(path: &Path, kind: DocumentKind) -> Result<Vec<CatalogItem>> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    if kind == DocumentKind::Items {
        validate_document(
            BundledSchema::CatalogItems,
            &value,
            &path.display().to_string(),
        )?;
    }
    parse_items(kind, value).with_context(|| format!("converting {}", path.display()))
}

fn validate_items(collection: &str, items: &[CatalogItem]) -> Result<()> {
    let mut names = BTreeSet::new();
    for (idx, item) in items.iter().enumerate() {
        if item.name.trim().is_empty() {
            bail!("collection '{collection}' item {idx} has an empty name");
        }
        if !names.insert(item.name.as_str()) {
            tracing::warn!(
                collection,
                name = %item.name,
                "duplicate item name; both entries are kept"
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FacetCode, FacetDimension};

    #[test]
    fn new_rejects_nameless_items() {
        let err = Collection::new(
            "apps",
            DocumentKind::Items,
            vec![CatalogItem::new("ok"), CatalogItem::new("  ")],
            FacetCatalog::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("item 1"));
    }

    #[test]
    fn duplicates_are_kept() {
        let collection = Collection::new(
            "apps",
            DocumentKind::Items,
            vec![CatalogItem::new("same"), CatalogItem::new("same")],
            FacetCatalog::new().with_labels(FacetDimension::Services, [("s3", "S3")]),
        )
        .unwrap();
        assert_eq!(collection.items().len(), 2);
        assert_eq!(
            collection
                .labels()
                .label(&FacetDimension::Services, &FacetCode::new("s3")),
            "S3"
        );
        assert_eq!(collection.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(collection.default_sort(), &SortOrder::default());
    }
}
