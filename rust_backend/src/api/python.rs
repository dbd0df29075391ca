//! `#[pyfunction]` exports for the web application.
//!
//! Every function takes JSON strings and returns a JSON string, using the
//! process-wide default configuration. Every [`ApiError`] is raised as
//! `ValueError` with its message.

use pyo3::prelude::*;

use super::requests::{self, ApiError};
use crate::config::PipelineConfig;

fn to_py_err(err: ApiError) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
}

/// Derive filter and export data for one attribute.
///
/// Takes `{"widget": {...}, "attribute": {...}}`.
#[pyfunction]
#[pyo3(signature = (request_json, pretty=false))]
pub fn derive_attribute(request_json: String, pretty: bool) -> PyResult<String> {
    requests::handle_derive(PipelineConfig::default_ref(), &request_json, pretty).map_err(to_py_err)
}

/// Build comprehensive views for `{"widgets": [...], "entries": [...]}`.
#[pyfunction]
#[pyo3(signature = (request_json, pretty=false))]
pub fn build_comprehensive_views(request_json: String, pretty: bool) -> PyResult<String> {
    requests::handle_views(PipelineConfig::default_ref(), &request_json, pretty).map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (request_json, pretty=false))]
pub fn locations_info(request_json: String, pretty: bool) -> PyResult<String> {
    requests::handle_locations(PipelineConfig::default_ref(), &request_json, pretty).map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (request_json, pretty=false))]
pub fn detect_field_types(request_json: String, pretty: bool) -> PyResult<String> {
    requests::handle_fields(PipelineConfig::default_ref(), &request_json, pretty).map_err(to_py_err)
}

/// Register all API functions and name constants with the Python module.
pub fn register_api_functions(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(derive_attribute, m)?)?;
    m.add_function(wrap_pyfunction!(build_comprehensive_views, m)?)?;
    m.add_function(wrap_pyfunction!(locations_info, m)?)?;
    m.add_function(wrap_pyfunction!(detect_field_types, m)?)?;

    m.add("DERIVE_ATTRIBUTE", requests::DERIVE_ATTRIBUTE)?;
    m.add("BUILD_COMPREHENSIVE_VIEWS", requests::BUILD_COMPREHENSIVE_VIEWS)?;
    m.add("LOCATIONS_INFO", requests::LOCATIONS_INFO)?;
    m.add("DETECT_FIELD_TYPES", requests::DETECT_FIELD_TYPES)?;
    Ok(())
}
