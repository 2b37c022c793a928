use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Internal code of a facet value (e.g., `s3`, `terraform`).
///
/// Codes are what filters select and what label catalogs are keyed by; the
/// human-readable label is resolved separately through `FacetCatalog`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetCode(pub String);

/// Name of a boolean flag carried by catalog items (e.g., `pro`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagId(pub String);

impl FacetCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FlagId {
    pub fn new(flag: impl Into<String>) -> Self {
        Self(flag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FacetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FlagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Categorical dimension by which catalog items can be filtered.
///
/// Known variants cover the dimensions used by the showcase pages; `Other`
/// keeps collections that introduce a new dimension loadable without a
/// code change.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum FacetDimension {
    Services,
    Platforms,
    Deployments,
    UseCases,
    Integrations,
    Other(String),
}

impl Serialize for FacetDimension {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FacetDimension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

impl FacetDimension {
    pub fn as_str(&self) -> &str {
        match self {
            FacetDimension::Services => "services",
            FacetDimension::Platforms => "platforms",
            FacetDimension::Deployments => "deployments",
            FacetDimension::UseCases => "use_cases",
            FacetDimension::Integrations => "integrations",
            FacetDimension::Other(value) => value.as_str(),
        }
    }

    /// Parse a dimension name, accepting the singular and camelCase spellings
    /// used by the site's front matter and JSON documents.
    pub fn parse(value: &str) -> Self {
        match value {
            "services" | "service" => FacetDimension::Services,
            "platforms" | "platform" => FacetDimension::Platforms,
            "deployments" | "deployment" => FacetDimension::Deployments,
            "use_cases" | "useCases" | "use-cases" => FacetDimension::UseCases,
            "integrations" | "integration" => FacetDimension::Integrations,
            other => FacetDimension::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FacetDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
