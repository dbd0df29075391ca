//! JSON request documents shared by the Python bindings and the CLI.
//!
//! Each request is a single JSON document; each handler returns the JSON
//! encoding of its result.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::PipelineConfig;
use crate::core::{AttributeValue, Entry, WidgetDefinition};
use crate::error::WidgetError;
use crate::preprocessing::{detect_field_types, FieldSpec, GeoIndex};
use crate::services::{build_comprehensive_views_with, locations_info, GeoArea, GeoOption};
use crate::transformations::derive_attribute_with;

/// Errors surfaced at the JSON boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request JSON: {0}")]
    Request(String),

    #[error("Failed to encode response: {0}")]
    Response(String),

    #[error(transparent)]
    Widget(#[from] WidgetError),
}

/// Request name constants, used as CLI subcommand and log labels.
pub const DERIVE_ATTRIBUTE: &str = "derive_attribute";
pub const BUILD_COMPREHENSIVE_VIEWS: &str = "build_comprehensive_views";
pub const LOCATIONS_INFO: &str = "locations_info";
pub const DETECT_FIELD_TYPES: &str = "detect_field_types";

#[derive(Debug, Clone, Deserialize)]
pub struct DeriveRequest {
    pub widget: WidgetDefinition,
    pub attribute: AttributeValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewsRequest {
    pub widgets: Vec<WidgetDefinition>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationsRequest {
    #[serde(default)]
    pub areas: Vec<GeoArea>,
    #[serde(default, alias = "geoOptions")]
    pub geo_options: Vec<GeoOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldsRequest {
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub geos: GeoIndex,
}

fn parse<T: serde::de::DeserializeOwned>(name: &str, json: &str) -> Result<T, ApiError> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::debug!("Rejected {} request at {}", name, e.path());
        ApiError::Request(format!("{}: {} at {}", name, e.inner(), e.path()))
    })
}

fn encode<T: Serialize>(value: &T, pretty: bool) -> Result<String, ApiError> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.map_err(|e| ApiError::Response(e.to_string()))
}

pub fn handle_derive(config: &PipelineConfig, json: &str, pretty: bool) -> Result<String, ApiError> {
    let request: DeriveRequest = parse(DERIVE_ATTRIBUTE, json)?;
    let derived = derive_attribute_with(config, &request.widget, &request.attribute)?;
    encode(&derived, pretty)
}

/// Derive from separate widget and attribute documents; a parse failure
/// names the document it came from.
pub fn handle_derive_parts(
    config: &PipelineConfig,
    widget_json: &str,
    attribute_json: &str,
    pretty: bool,
) -> Result<String, ApiError> {
    let widget: WidgetDefinition = parse("widget", widget_json)?;
    let attribute: AttributeValue = parse("attribute", attribute_json)?;
    let derived = derive_attribute_with(config, &widget, &attribute)?;
    encode(&derived, pretty)
}

pub fn handle_views(config: &PipelineConfig, json: &str, pretty: bool) -> Result<String, ApiError> {
    let request: ViewsRequest = parse(BUILD_COMPREHENSIVE_VIEWS, json)?;
    let outcome = build_comprehensive_views_with(config, &request.widgets, &request.entries)?;
    encode(&outcome, pretty)
}

pub fn handle_locations(config: &PipelineConfig, json: &str, pretty: bool) -> Result<String, ApiError> {
    let request: LocationsRequest = parse(LOCATIONS_INFO, json)?;
    encode(&locations_info(&request.areas, &request.geo_options, config), pretty)
}

pub fn handle_fields(config: &PipelineConfig, json: &str, pretty: bool) -> Result<String, ApiError> {
    let request: FieldsRequest = parse(DETECT_FIELD_TYPES, json)?;
    let types = detect_field_types(&request.rows, &request.fields, &request.geos, config);
    encode(&types, pretty)
}
