//! Shared library for the showcase filter tools.
//!
//! The crate exposes the catalog model (items, facet label tables, configured
//! collections) and the filter engine that derives the visible, ordered subset
//! of a catalog from a search string and facet selections. The binaries
//! (`showcase-query`, `showcase-lint`) are thin wrappers over these functions.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod config;
pub mod coverage;
pub mod filter;
pub mod logging;
pub mod schema_loader;

pub use catalog::{
    CatalogItem, Collection, DocumentKind, FacetCatalog, FacetCode, FacetDimension, FlagId,
    load_items_from_path, load_label_map, parse_items,
};
pub use config::{CollectionConfig, ShowcaseConfig};
pub use coverage::{LabelCoverage, build_label_coverage, require_complete_labels};
pub use filter::{
    CatalogView, FacetOption, FilterState, Page, RankTable, SortKey, SortOrder,
    derive_facet_options, describe_facet_options, filter_and_sort, filter_and_sort_by,
    matches_filters, matches_search,
};

const ROOT_ENV: &str = "SHOWCASE_ROOT";
const ROOT_SENTINEL: &str = config::CONFIG_FILE;

/// Returns true when `candidate` holds a showcase config.
fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(ROOT_SENTINEL).is_file()
}

/// Verifies that an explicit root hint points at a valid checkout.
fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_repo_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the directory holding `showcase.json`.
///
/// Search order: `SHOWCASE_ROOT` if it points at a checkout, then the
/// directories above the current executable, then the build-time hint.
pub fn find_repo_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var(ROOT_ENV) {
        if let Some(root) = repo_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("SHOWCASE_ROOT_HINT") {
        if let Some(root) = repo_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate {ROOT_SENTINEL}. Set {ROOT_ENV} to the site checkout or {} to the config file.",
        config::CONFIG_ENV
    );
}

/// Split comma- or whitespace-delimited lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a `dimension=code[,code...]` facet selector.
///
/// The dimension accepts the same spellings as the JSON documents
/// (`platform`, `useCases`, ...).
pub fn parse_facet_selector(raw: &str) -> Result<(FacetDimension, Vec<FacetCode>)> {
    let Some((dimension, codes)) = raw.split_once('=') else {
        bail!("facet selector '{raw}' must look like dimension=code[,code]");
    };
    let dimension = dimension.trim();
    if dimension.is_empty() {
        bail!("facet selector '{raw}' is missing a dimension");
    }
    let codes: Vec<FacetCode> = split_list(codes).into_iter().map(FacetCode).collect();
    if codes.is_empty() {
        bail!("facet selector '{raw}' selects no codes");
    }
    Ok((FacetDimension::parse(dimension), codes))
}
