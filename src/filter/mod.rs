//! Catalog filter engine.
//!
//! Given a fixed list of catalog items and their label tables, a
//! `FilterState` describes one in-progress query and the functions in
//! `engine` derive the visible, ordered subset from it. `view` layers result
//! counts and pagination on top for table widgets.

pub mod engine;
pub mod sort;
pub mod state;
pub mod view;

pub use engine::{
    FacetOption, derive_facet_options, describe_facet_options, filter_and_sort,
    filter_and_sort_by, matches_filters, matches_search,
};
pub use sort::{RankTable, SortKey, SortOrder, compare_text};
pub use state::FilterState;
pub use view::{CatalogView, DEFAULT_PAGE_SIZE, Page};
