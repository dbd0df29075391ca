//! Batch-level services built on top of the per-widget transformers.
//!
//! - [`comprehensive`]: per-widget views across a batch of entries
//! - [`locations`]: admin-level location titles for project reports

pub mod comprehensive;
pub mod locations;

#[cfg(test)]
mod comprehensive_tests;

pub use comprehensive::{
    build_comprehensive_views, build_comprehensive_views_with, BatchOutcome, ComprehensiveViewBuilder,
    EntryIssue, EntryView,
};
pub use locations::{locations_info, GeoArea, GeoOption, LocationsInfo};
