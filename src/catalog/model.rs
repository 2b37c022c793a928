//! Catalog items and the site documents they are read from.
//!
//! Every showcase page feeds the engine the same `CatalogItem` shape; the
//! record types below mirror the JSON each page bundles at build time and are
//! converted on load. Unknown fields are ignored and missing arrays default to
//! empty so older data files keep loading.

use crate::catalog::identity::{FacetCode, FacetDimension, FlagId};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const PRO_FLAG: &str = "pro";
pub const TEST_SUITE_FLAG: &str = "test_suite";
pub const IMPLEMENTED_FLAG: &str = "implemented";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// One browsable entry: a sample application, tutorial, or coverage row.
pub struct CatalogItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "merge_facet_aliases")]
    pub facets: BTreeMap<FacetDimension, Vec<FacetCode>>,
    /// Literal values matched by search as-is, never resolved through labels.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub flags: BTreeMap<FlagId, bool>,
    /// Level label consulted by rank-based sorting (complexity, support level).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    /// Display-only values (links, images, notes). Not searched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl CatalogItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_facet<I, S>(mut self, dimension: FacetDimension, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facets
            .entry(dimension)
            .or_default()
            .extend(codes.into_iter().map(|code| FacetCode(code.into())));
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>, value: bool) -> Self {
        self.flags.insert(FlagId(flag.into()), value);
        self
    }

    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = Some(rank.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Facet values for a dimension; empty when the item does not carry it.
    pub fn facet(&self, dimension: &FacetDimension) -> &[FacetCode] {
        self.facets
            .get(dimension)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Missing flags read as `false`.
    pub fn flag(&self, flag: &FlagId) -> bool {
        self.flags.get(flag).copied().unwrap_or(false)
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Fold spellings of the same dimension (`service`, `services`) into one
/// entry. Codes keep first-seen order and repeats are dropped.
fn merge_facet_aliases<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<FacetDimension, Vec<FacetCode>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Vec<FacetCode>>::deserialize(deserializer)?;
    let mut facets: BTreeMap<FacetDimension, Vec<FacetCode>> = BTreeMap::new();
    for (name, codes) in raw {
        let merged = facets.entry(FacetDimension::parse(&name)).or_default();
        for code in codes {
            if !merged.contains(&code) {
                merged.push(code);
            }
        }
    }
    Ok(facets)
}

/// Shape of a JSON document that can be turned into catalog items.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Applications,
    Tutorials,
    PersistenceCoverage,
    ReplicatorCoverage,
    FeatureCoverage,
    Services,
    /// Native `CatalogItem` array.
    Items,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Applications => "applications",
            DocumentKind::Tutorials => "tutorials",
            DocumentKind::PersistenceCoverage => "persistence_coverage",
            DocumentKind::ReplicatorCoverage => "replicator_coverage",
            DocumentKind::FeatureCoverage => "feature_coverage",
            DocumentKind::Services => "services",
            DocumentKind::Items => "items",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Sample application card.
pub struct ApplicationRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub teaser: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub integrations: Vec<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub complexity: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
/// Tutorial page front matter.
pub struct TutorialRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub leadimage: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub platform: Vec<String>,
    #[serde(default)]
    pub deployment: Vec<String>,
    #[serde(default)]
    pub pro: bool,
}

#[derive(Clone, Debug, Deserialize)]
/// Row of the persistence coverage table.
pub struct PersistenceCoverageRow {
    pub service: String,
    pub full_name: String,
    #[serde(default)]
    pub support: Option<String>,
    #[serde(default)]
    pub test_suite: bool,
    #[serde(default)]
    pub limitations: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
/// Row of the replicator coverage table: one replicable resource type.
pub struct ReplicatorCoverageRow {
    pub resource_type: String,
    pub service: String,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub policy_statements: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
/// Per-service API operation coverage document.
pub struct FeatureCoverageDocument {
    #[serde(default)]
    pub operations: Vec<BTreeMap<String, OperationStatus>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OperationStatus {
    #[serde(default)]
    pub implemented: bool,
    #[serde(default)]
    pub availability: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
/// Entry of the searchable service list.
pub struct ServicePageRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub href: Option<String>,
}

impl From<ApplicationRecord> for CatalogItem {
    fn from(app: ApplicationRecord) -> Self {
        // Use cases have no label table; searching them through the facet
        // fallback matches their literal value.
        let mut item = CatalogItem::new(app.name)
            .with_description(app.description)
            .with_facet(FacetDimension::Services, app.services)
            .with_facet(FacetDimension::Integrations, app.integrations)
            .with_facet(FacetDimension::UseCases, app.use_cases);
        item.rank = app.complexity;
        insert_optional(&mut item, "github_url", app.github_url);
        insert_optional(&mut item, "teaser", app.teaser);
        item
    }
}

impl From<TutorialRecord> for CatalogItem {
    fn from(tutorial: TutorialRecord) -> Self {
        let platforms: Vec<String> = tutorial
            .platform
            .iter()
            .map(|platform| platform.to_lowercase())
            .collect();
        let mut item = CatalogItem::new(tutorial.title)
            .with_description(tutorial.description)
            .with_facet(FacetDimension::Services, tutorial.services)
            .with_facet(FacetDimension::Platforms, platforms)
            .with_facet(FacetDimension::Deployments, tutorial.deployment)
            .with_flag(PRO_FLAG, tutorial.pro);
        insert_optional(&mut item, "slug", tutorial.slug);
        insert_optional(&mut item, "leadimage", tutorial.leadimage);
        item
    }
}

impl From<PersistenceCoverageRow> for CatalogItem {
    fn from(row: PersistenceCoverageRow) -> Self {
        let href = format!("/aws/{}", row.service);
        let mut item = CatalogItem::new(row.full_name)
            .with_facet(FacetDimension::Services, [row.service])
            .with_flag(TEST_SUITE_FLAG, row.test_suite)
            .with_attribute("href", href);
        item.rank = row.support;
        insert_optional(&mut item, "limitations", row.limitations);
        item
    }
}

impl From<ReplicatorCoverageRow> for CatalogItem {
    fn from(row: ReplicatorCoverageRow) -> Self {
        // Required IAM actions are searchable as typed.
        let mut item = CatalogItem::new(row.resource_type)
            .with_facet(FacetDimension::Services, [row.service]);
        item.tags = row.policy_statements;
        insert_optional(&mut item, "identifier", row.identifier);
        item
    }
}

impl From<ServicePageRecord> for CatalogItem {
    fn from(page: ServicePageRecord) -> Self {
        let mut item = CatalogItem::new(page.title).with_description(page.description);
        insert_optional(&mut item, "href", page.href);
        item
    }
}

impl FeatureCoverageDocument {
    /// One item per operation, in document order.
    pub fn into_items(self) -> Vec<CatalogItem> {
        self.operations
            .into_iter()
            .flat_map(|entry| entry.into_iter())
            .map(|(operation, status)| {
                let mut item =
                    CatalogItem::new(operation).with_flag(IMPLEMENTED_FLAG, status.implemented);
                insert_optional(&mut item, "availability", status.availability);
                item
            })
            .collect()
    }
}

fn insert_optional(item: &mut CatalogItem, key: &str, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        item.attributes.insert(key.to_string(), value);
    }
}

/// Convert an already-parsed document of the given kind into catalog items.
pub fn parse_items(kind: DocumentKind, value: Value) -> Result<Vec<CatalogItem>> {
    let items = match kind {
        DocumentKind::Applications => convert_array::<ApplicationRecord>(value, kind)?,
        DocumentKind::Tutorials => convert_array::<TutorialRecord>(value, kind)?,
        DocumentKind::PersistenceCoverage => {
            convert_array::<PersistenceCoverageRow>(keyed_rows(value), kind)?
        }
        DocumentKind::ReplicatorCoverage => {
            convert_array::<ReplicatorCoverageRow>(keyed_rows(value), kind)?
        }
        DocumentKind::FeatureCoverage => {
            let document: FeatureCoverageDocument = serde_json::from_value(value)
                .context("Unable to parse feature coverage document")?;
            document.into_items()
        }
        DocumentKind::Services => convert_array::<ServicePageRecord>(value, kind)?,
        DocumentKind::Items => {
            if !value.is_array() {
                bail!("items document must be a JSON array");
            }
            serde_json::from_value(value).context("Unable to parse catalog items")?
        }
    };
    Ok(items)
}

// Coverage exports are keyed by service or resource; only the values matter.
fn keyed_rows(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Array(map.into_iter().map(|(_, v)| v).collect()),
        other => other,
    }
}

fn convert_array<T>(value: Value, kind: DocumentKind) -> Result<Vec<CatalogItem>>
where
    T: serde::de::DeserializeOwned + Into<CatalogItem>,
{
    let Value::Array(entries) = value else {
        bail!("{} document must be a JSON array", kind.as_str());
    };
    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            serde_json::from_value::<T>(entry)
                .map(|record| -> CatalogItem { record.into() })
                .with_context(|| format!("Unable to parse {} entry {}", kind.as_str(), idx))
        })
        .collect()
}

/// Read and convert a catalog document from disk without further validation.
pub fn load_items_from_path(path: &Path, kind: DocumentKind) -> Result<Vec<CatalogItem>> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    parse_items(kind, value).with_context(|| format!("loading {}", path.display()))
}
