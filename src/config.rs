//! Showcase configuration (`showcase.json`).
//!
//! The config lists the collections the tools can query. Each collection names
//! its document kind, its items file, and one label file per facet dimension.
//! Relative paths resolve against the directory holding the config file, so a
//! checkout can be queried from anywhere.

use crate::catalog::{DocumentKind, FacetDimension};
use crate::find_repo_root;
use crate::schema_loader::{BundledSchema, validate_document};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "showcase.json";
pub const CONFIG_ENV: &str = "SHOWCASE_CONFIG";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShowcaseConfig {
    pub collections: Vec<CollectionConfig>,
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// One configured catalog.
pub struct CollectionConfig {
    pub name: String,
    pub kind: DocumentKind,
    pub items: PathBuf,
    #[serde(default)]
    pub labels: BTreeMap<FacetDimension, PathBuf>,
    /// Sort applied when the caller does not ask for one (see `SortOrder::parse`).
    #[serde(default)]
    pub default_sort: Option<String>,
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl ShowcaseConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let value: Value =
            serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
        validate_document(
            BundledSchema::ShowcaseConfig,
            &value,
            &path.display().to_string(),
        )?;
        let mut config: ShowcaseConfig = serde_json::from_value(value)
            .with_context(|| format!("decoding {}", path.display()))?;

        let mut seen = BTreeSet::new();
        for collection in &config.collections {
            if !seen.insert(collection.name.as_str()) {
                bail!(
                    "{} declares collection '{}' more than once",
                    path.display(),
                    collection.name
                );
            }
        }

        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        tracing::debug!(
            path = %path.display(),
            collections = config.collections.len(),
            "loaded showcase config"
        );
        Ok(config)
    }

    /// Locate and load the config.
    ///
    /// `SHOWCASE_CONFIG` wins when set; otherwise `showcase.json` at the
    /// repository root found by [`find_repo_root`].
    pub fn discover() -> Result<Self> {
        Self::load(&discover_config_path()?)
    }

    /// Directory relative paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.iter().map(|c| c.name.as_str())
    }

    pub fn collection(&self, name: &str) -> Result<&CollectionConfig> {
        match self.collections.iter().find(|c| c.name == name) {
            Some(collection) => Ok(collection),
            None => bail!(
                "unknown collection '{name}' (configured: {})",
                self.names().collect::<Vec<_>>().join(", ")
            ),
        }
    }
}

/// Resolve the config path without loading it.
pub fn discover_config_path() -> Result<PathBuf> {
    if let Some(explicit) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        let path = PathBuf::from(explicit);
        if !path.is_file() {
            bail!("{CONFIG_ENV} points at {}, which is not a file", path.display());
        }
        return Ok(path);
    }
    Ok(find_repo_root()?.join(CONFIG_FILE))
}
