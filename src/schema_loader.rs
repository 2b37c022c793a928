//! Bundled JSON Schemas and validation helpers.
//!
//! The schemas under `schema/` are compiled into the binary so loaders can
//! validate documents without locating the repository first. Validation
//! failures list every violation, one per line, prefixed with the instance
//! path.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;

const LABEL_MAP_SCHEMA: &str = include_str!("../schema/label_map.schema.json");
const CATALOG_ITEMS_SCHEMA: &str = include_str!("../schema/catalog_items.schema.json");
const SHOWCASE_CONFIG_SCHEMA: &str = include_str!("../schema/showcase_config.schema.json");

/// Schemas shipped with the crate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BundledSchema {
    LabelMap,
    CatalogItems,
    ShowcaseConfig,
}

impl BundledSchema {
    pub fn name(self) -> &'static str {
        match self {
            BundledSchema::LabelMap => "label_map",
            BundledSchema::CatalogItems => "catalog_items",
            BundledSchema::ShowcaseConfig => "showcase_config",
        }
    }

    fn source(self) -> &'static str {
        match self {
            BundledSchema::LabelMap => LABEL_MAP_SCHEMA,
            BundledSchema::CatalogItems => CATALOG_ITEMS_SCHEMA,
            BundledSchema::ShowcaseConfig => SHOWCASE_CONFIG_SCHEMA,
        }
    }

    /// Parse and compile the schema.
    pub fn compile(self) -> Result<JSONSchema> {
        let raw: Value = serde_json::from_str(self.source())
            .with_context(|| format!("parsing bundled schema {}", self.name()))?;
        JSONSchema::compile(&raw)
            .map_err(|err| anyhow!("compiling bundled schema {}: {err}", self.name()))
    }
}

/// Validate `instance` against a bundled schema.
///
/// `subject` names the document in the error message (usually a path).
pub fn validate_document(schema: BundledSchema, instance: &Value, subject: &str) -> Result<()> {
    let compiled = schema.compile()?;
    if let Err(errors) = compiled.validate(instance) {
        let details = errors
            .map(|err| {
                let pointer = err.instance_path.to_string();
                format!("{}: {}", display_instance_path(&pointer), err)
            })
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "{subject} failed {} schema validation:\n{details}",
            schema.name()
        );
    }
    Ok(())
}

fn display_instance_path(pointer: &str) -> &str {
    if pointer.is_empty() { "/" } else { pointer }
}
