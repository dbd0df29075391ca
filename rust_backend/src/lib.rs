//! Widget data derivation for analysis frameworks.
//!
//! Turns the raw values tagged on entries into the forms the rest of the
//! platform consumes: filter data for search, export data for spreadsheets
//! and reports, and per-widget comprehensive views for batch reports.
//!
//! ## Modules
//!
//! - [`core`]: widget, entry and projection types
//! - [`parsing`]: time, date and number parsing
//! - [`transformations`]: one transformer per widget type
//! - [`services`]: batch comprehensive views and location info
//! - [`preprocessing`]: field type detection for uploaded sheets
//! - [`api`]: JSON request handlers and the Python bindings

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod parsing;
pub mod preprocessing;
pub mod services;
pub mod transformations;

pub use config::{ConfigError, PipelineConfig};
pub use error::{WidgetError, WidgetResult};
pub use services::{build_comprehensive_views, build_comprehensive_views_with, BatchOutcome};
pub use transformations::{derive_attribute, derive_attribute_with};

/// Python module entry point.
#[cfg(feature = "python")]
#[pymodule]
fn deep_widgets(m: &Bound<'_, PyModule>) -> PyResult<()> {
    api::python::register_api_functions(m)?;
    Ok(())
}
