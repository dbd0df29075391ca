use serde::Deserialize;

use super::{decode_value, ComprehensiveViewState, Transformer};
use crate::config::PipelineConfig;
use crate::core::{
    AttributeValue, ComprehensiveView, DerivedAttribute, ExportRepresentation, FilterRepresentation,
    SpreadsheetCell, TimeRangeView, WidgetDefinition, WidgetKind,
};
use crate::error::WidgetResult;
use crate::parsing::time::{parse_optional_time, ParsedTime};

#[derive(Debug, Default, Deserialize)]
struct TimeRangeValue {
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
}

/// Time-range widget: an optional `{from, to}` pair of `HH:MM` strings.
pub struct TimeRangeTransformer;

impl TimeRangeTransformer {
    fn times(attribute: &AttributeValue) -> WidgetResult<(Option<ParsedTime>, Option<ParsedTime>)> {
        let value: Option<TimeRangeValue> = decode_value(attribute)?;
        let value = value.unwrap_or_default();
        Ok((
            parse_optional_time(value.from.as_deref())?,
            parse_optional_time(value.to.as_deref())?,
        ))
    }
}

impl Transformer for TimeRangeTransformer {
    fn kind(&self) -> WidgetKind {
        WidgetKind::TimeRange
    }

    fn derive(
        &self,
        _config: &PipelineConfig,
        widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<DerivedAttribute> {
        let (from, to) = Self::times(attribute)?;
        let minutes = |t: &Option<ParsedTime>| t.as_ref().map(|t| i64::from(t.minutes));

        Ok(DerivedAttribute {
            filter: FilterRepresentation::with_range(minutes(&from), minutes(&to)),
            export: ExportRepresentation::cell(
                widget,
                SpreadsheetCell::List(vec![from.map(|t| t.time_str), to.map(|t| t.time_str)]),
            ),
        })
    }

    fn comprehensive(
        &self,
        _config: &PipelineConfig,
        _state: &mut ComprehensiveViewState,
        _widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<ComprehensiveView> {
        let (from, to) = Self::times(attribute)?;
        Ok(ComprehensiveView::TimeRange(TimeRangeView {
            from: from.map(|t| t.time_str),
            to: to.map(|t| t.time_str),
        }))
    }
}
