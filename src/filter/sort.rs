//! Orderings available to the derived view.
//!
//! All comparators are total and used with a stable sort, so items whose keys
//! compare equal keep their input order.

use crate::catalog::{CatalogItem, FacetDimension};
use anyhow::{Result, bail};
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

// Unknown complexity labels sit between beginner and advanced.
const COMPLEXITY_LEVELS: &[(&str, i32)] = &[("beginner", 1), ("intermediate", 2), ("advanced", 3)];
const COMPLEXITY_DEFAULT: i32 = 2;

// Fully supported services first, then partial support, then everything else.
const SUPPORT_LEVELS: &[(&str, i32)] = &[("supported", 0), ("supported with limitations", 1)];
const SUPPORT_DEFAULT: i32 = 2;

/// Closed mapping from level labels to ordinal ranks.
///
/// Labels are matched case-insensitively. A missing or unknown label gets
/// `default_rank`, which callers choose as a neutral middle value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RankTable {
    name: String,
    levels: Vec<(String, i32)>,
    default_rank: i32,
}

impl RankTable {
    pub fn new<I, S>(name: impl Into<String>, levels: I, default_rank: i32) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            levels: levels
                .into_iter()
                .map(|(label, rank)| (label.into().to_lowercase(), rank))
                .collect(),
            default_rank,
        }
    }

    /// beginner < intermediate < advanced.
    pub fn complexity() -> Self {
        Self::new("complexity", COMPLEXITY_LEVELS.iter().copied(), COMPLEXITY_DEFAULT)
    }

    /// supported < supported with limitations < anything else.
    pub fn support_level() -> Self {
        Self::new("support_level", SUPPORT_LEVELS.iter().copied(), SUPPORT_DEFAULT)
    }

    /// Look up one of the built-in tables by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "complexity" => Some(Self::complexity()),
            "support_level" | "support" => Some(Self::support_level()),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self, label: Option<&str>) -> i32 {
        let Some(label) = label else {
            return self.default_rank;
        };
        let folded = label.trim().to_lowercase();
        self.levels
            .iter()
            .find(|(level, _)| *level == folded)
            .map_or(self.default_rank, |(_, rank)| *rank)
    }
}

/// Field the derived view is ordered by.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SortKey {
    /// Name compare ignoring case and accents, ascending.
    Name,
    /// Number of values in one facet dimension, most first.
    FacetCount(FacetDimension),
    /// Ordinal rank of the item's level label, lowest first. Labels that share
    /// a rank are ordered by their text.
    Rank(RankTable),
}

/// A sort key plus direction.
///
/// Descending flips the comparator rather than the output, which keeps ties
/// in input order either way.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortOrder {
    pub key: SortKey,
    pub descending: bool,
}

impl SortOrder {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            descending: false,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            descending: true,
        }
    }

    /// Parse `name`, `count:<dimension>`, or `rank:<table>`, optionally
    /// suffixed with `:desc` or `:asc`.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts: Vec<&str> = raw.trim().split(':').map(str::trim).collect();
        let mut descending = false;
        if let Some(last) = parts.last().copied() {
            if parts.len() > 1 && matches!(last, "desc" | "asc") {
                descending = last == "desc";
                parts.pop();
            }
        }

        let key = match parts.as_slice() {
            ["name"] | ["title"] => SortKey::Name,
            ["count", dimension] if !dimension.is_empty() => {
                SortKey::FacetCount(FacetDimension::parse(dimension))
            }
            ["rank", table] => match RankTable::builtin(table) {
                Some(table) => SortKey::Rank(table),
                None => bail!("unknown rank table '{table}' (expected complexity|support_level)"),
            },
            _ => bail!(
                "invalid sort '{raw}' (expected name, count:<dimension>, or rank:<table>, optionally with :desc)"
            ),
        };
        Ok(Self { key, descending })
    }

    pub fn compare(&self, a: &CatalogItem, b: &CatalogItem) -> Ordering {
        let ordering = self.key.compare(a, b);
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::ascending(SortKey::Name)
    }
}

impl From<SortKey> for SortOrder {
    fn from(key: SortKey) -> Self {
        Self::ascending(key)
    }
}

impl SortKey {
    pub fn compare(&self, a: &CatalogItem, b: &CatalogItem) -> Ordering {
        match self {
            SortKey::Name => compare_text(&a.name, &b.name),
            SortKey::FacetCount(dimension) => b
                .facet(dimension)
                .len()
                .cmp(&a.facet(dimension).len()),
            SortKey::Rank(table) => {
                let rank_a = table.rank(a.rank.as_deref());
                let rank_b = table.rank(b.rank.as_deref());
                rank_a.cmp(&rank_b).then_with(|| {
                    compare_text(
                        a.rank.as_deref().unwrap_or_default(),
                        b.rank.as_deref().unwrap_or_default(),
                    )
                })
            }
        }
    }
}

/// Compare display text the way a reader scans an alphabetical list.
///
/// Both sides are decomposed (NFD), combining marks are dropped, and the
/// remainder is lowercased, so `Émile` sorts with the `e`s. Strings that
/// differ only in case or accents compare equal.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(collation_key(b))
}

fn collation_key(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}
