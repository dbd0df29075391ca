use super::{ComprehensiveViewState, Transformer};
use crate::config::PipelineConfig;
use crate::core::{
    AttributeValue, ComprehensiveView, DerivedAttribute, ExportRepresentation, FilterRepresentation,
    NumberView, SpreadsheetCell, WidgetDefinition, WidgetKind,
};
use crate::error::WidgetResult;
use crate::parsing::number::parse_integer_value;

/// Number widget: an integer value.
pub struct NumberTransformer;

impl Transformer for NumberTransformer {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Number
    }

    fn derive(
        &self,
        _config: &PipelineConfig,
        widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<DerivedAttribute> {
        let value = parse_integer_value(&attribute.value)?;
        Ok(DerivedAttribute {
            filter: FilterRepresentation::with_number(value),
            export: ExportRepresentation::cell(widget, SpreadsheetCell::Value(value.map(|n| n.to_string()))),
        })
    }

    fn comprehensive(
        &self,
        _config: &PipelineConfig,
        _state: &mut ComprehensiveViewState,
        _widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<ComprehensiveView> {
        let value = parse_integer_value(&attribute.value)?;
        Ok(ComprehensiveView::Number(NumberView { value }))
    }
}
