//! Per-widget-type transformers.
//!
//! Every supported [`WidgetKind`] has one [`Transformer`] that turns an
//! attribute value into its filter and export projections, and into a
//! comprehensive view for batch reports.
//!
//! # Modules
//!
//! - [`scale`]: ordered scale points with label and color
//! - [`time_range`]: `{from, to}` pairs of `HH:MM` strings
//! - [`time`]: single `HH:MM` values
//! - [`number`]: integer values
//! - [`date`]: `YYYY-MM-DD` values
//! - [`multiselect`]: lists of option keys
//! - [`organigram`]: keys of an organization tree
//! - [`geo`]: geo area references
//!
//! # Example
//!
//! ```
//! use deep_widgets::core::{AttributeValue, WidgetDefinition, WidgetKind};
//! use deep_widgets::transformations::derive_attribute;
//! use serde_json::json;
//!
//! let widget = WidgetDefinition::new("severity", WidgetKind::Scale, "Severity", json!({
//!     "scale_units": [{"key": "a", "label": "Low"}, {"key": "b", "label": "High"}]
//! }));
//! let derived = derive_attribute(&widget, &AttributeValue::new("severity", json!("b"))).unwrap();
//! assert_eq!(derived.filter.values, Some(vec!["b".to_string()]));
//! ```

pub mod date;
pub mod geo;
pub mod multiselect;
pub mod number;
pub mod organigram;
pub mod scale;
pub mod state;
pub mod time;
pub mod time_range;


use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::PipelineConfig;
use crate::core::{AttributeValue, ComprehensiveView, DerivedAttribute, WidgetDefinition, WidgetKind};
use crate::error::{WidgetError, WidgetResult};

pub use state::{ComprehensiveViewState, ScaleBounds};

/// Derivation logic for one widget type.
///
/// Implementations are stateless; the only mutable context is the batch
/// [`ComprehensiveViewState`] handed to [`Transformer::comprehensive`].
pub trait Transformer: Sync {
    fn kind(&self) -> WidgetKind;

    /// Check the options shared by every entry of the widget.
    fn validate_definition(&self, _widget: &WidgetDefinition) -> WidgetResult<()> {
        Ok(())
    }

    /// Filter and export projections of one attribute.
    fn derive(
        &self,
        config: &PipelineConfig,
        widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<DerivedAttribute>;

    /// Summary of one attribute within a batch.
    fn comprehensive(
        &self,
        config: &PipelineConfig,
        state: &mut ComprehensiveViewState,
        widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<ComprehensiveView>;
}

/// The transformer for `kind`, or `None` for unsupported widgets.
pub fn transformer_for(kind: WidgetKind) -> Option<&'static dyn Transformer> {
    match kind {
        WidgetKind::Number => Some(&number::NumberTransformer),
        WidgetKind::Date => Some(&date::DateTransformer),
        WidgetKind::Time => Some(&time::TimeTransformer),
        WidgetKind::TimeRange => Some(&time_range::TimeRangeTransformer),
        WidgetKind::Scale => Some(&scale::ScaleTransformer),
        WidgetKind::Multiselect => Some(&multiselect::MultiselectTransformer),
        WidgetKind::Organigram => Some(&organigram::OrganigramTransformer),
        WidgetKind::Geo => Some(&geo::GeoTransformer),
        WidgetKind::Unsupported => None,
    }
}

/// Derive the filter and export projections of one attribute with the
/// default configuration.
pub fn derive_attribute(
    widget: &WidgetDefinition,
    attribute: &AttributeValue,
) -> WidgetResult<DerivedAttribute> {
    derive_attribute_with(PipelineConfig::default_ref(), widget, attribute)
}

/// Derive the filter and export projections of one attribute.
pub fn derive_attribute_with(
    config: &PipelineConfig,
    widget: &WidgetDefinition,
    attribute: &AttributeValue,
) -> WidgetResult<DerivedAttribute> {
    if attribute.widget_key != widget.key {
        return Err(WidgetError::UnknownWidget(attribute.widget_key.clone()));
    }
    let transformer =
        transformer_for(widget.kind).ok_or_else(|| WidgetError::UnsupportedWidget(widget.key.clone()))?;
    transformer.validate_definition(widget)?;
    transformer.derive(config, widget, attribute)
}

/// Decode a widget's options; `null` options decode like `{}`.
pub(crate) fn decode_options<T: DeserializeOwned>(widget: &WidgetDefinition) -> WidgetResult<T> {
    let empty;
    let source = if widget.options.is_null() {
        empty = Value::Object(Default::default());
        &empty
    } else {
        &widget.options
    };

    serde_path_to_error::deserialize(source).map_err(|e| WidgetError::InvalidOptions {
        widget_key: widget.key.clone(),
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })
}

/// Decode an attribute value into the shape its widget expects.
pub(crate) fn decode_value<T: DeserializeOwned>(attribute: &AttributeValue) -> WidgetResult<T> {
    serde_path_to_error::deserialize(&attribute.value).map_err(|e| WidgetError::MalformedValue {
        widget_key: attribute.widget_key.clone(),
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })
}

pub(crate) fn missing_option(widget: &WidgetDefinition, option: &str) -> WidgetError {
    WidgetError::MissingWidgetOptions {
        widget_key: widget.key.clone(),
        option: option.to_string(),
    }
}

pub(crate) fn unknown_selection(widget: &WidgetDefinition, selection: &str) -> WidgetError {
    WidgetError::UnknownSelection {
        widget_key: widget.key.clone(),
        selection: selection.to_string(),
    }
}
