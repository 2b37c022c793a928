//! Catalog items, label tables, and configured collections.
//!
//! `model` converts the site's JSON documents into `CatalogItem`s, `labels`
//! holds the code → label tables, and `collection` loads both for one entry of
//! the showcase configuration.

pub mod collection;
pub mod identity;
pub mod labels;
pub mod model;

pub use collection::Collection;
pub use identity::{FacetCode, FacetDimension, FlagId};
pub use labels::{FacetCatalog, load_label_map};
pub use model::{
    CatalogItem, DocumentKind, IMPLEMENTED_FLAG, PRO_FLAG, TEST_SUITE_FLAG, load_items_from_path,
    parse_items,
};
