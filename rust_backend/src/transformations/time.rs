use super::{decode_value, ComprehensiveViewState, Transformer};
use crate::config::PipelineConfig;
use crate::core::{
    AttributeValue, ComprehensiveView, DerivedAttribute, ExportRepresentation, FilterRepresentation,
    SpreadsheetCell, TimeView, WidgetDefinition, WidgetKind,
};
use crate::error::WidgetResult;
use crate::parsing::time::{parse_optional_time, ParsedTime};

/// Time widget: a single optional `HH:MM` string.
pub struct TimeTransformer;

fn parse(attribute: &AttributeValue) -> WidgetResult<Option<ParsedTime>> {
    let value: Option<String> = decode_value(attribute)?;
    parse_optional_time(value.as_deref())
}

impl Transformer for TimeTransformer {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Time
    }

    fn derive(
        &self,
        _config: &PipelineConfig,
        widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<DerivedAttribute> {
        let time = parse(attribute)?;
        Ok(DerivedAttribute {
            filter: FilterRepresentation::with_number(time.as_ref().map(|t| i64::from(t.minutes))),
            export: ExportRepresentation::cell(widget, SpreadsheetCell::Value(time.map(|t| t.time_str))),
        })
    }

    fn comprehensive(
        &self,
        _config: &PipelineConfig,
        _state: &mut ComprehensiveViewState,
        _widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<ComprehensiveView> {
        let time = parse(attribute)?;
        Ok(ComprehensiveView::Time(TimeView {
            minutes: time.as_ref().map(|t| t.minutes),
            value: time.map(|t| t.time_str),
        }))
    }
}
