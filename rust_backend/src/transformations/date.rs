use chrono::NaiveDate;

use super::{decode_value, ComprehensiveViewState, Transformer};
use crate::config::PipelineConfig;
use crate::core::{
    AttributeValue, ComprehensiveView, DateView, DerivedAttribute, ExportRepresentation,
    FilterRepresentation, SpreadsheetCell, WidgetDefinition, WidgetKind,
};
use crate::error::WidgetResult;
use crate::parsing::date::{days_since_epoch, format_date, parse_date};

/// Date widget: an optional `YYYY-MM-DD` string.
///
/// Filters on whole days since the Unix epoch; exports with the configured
/// `export.date_format`.
pub struct DateTransformer;

fn parse(attribute: &AttributeValue) -> WidgetResult<Option<NaiveDate>> {
    let value: Option<String> = decode_value(attribute)?;
    match value.as_deref() {
        Some(s) if !s.trim().is_empty() => parse_date(s).map(Some),
        _ => Ok(None),
    }
}

impl Transformer for DateTransformer {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Date
    }

    fn derive(
        &self,
        config: &PipelineConfig,
        widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<DerivedAttribute> {
        let date = parse(attribute)?;
        Ok(DerivedAttribute {
            filter: FilterRepresentation::with_number(date.map(days_since_epoch)),
            export: ExportRepresentation::cell(
                widget,
                SpreadsheetCell::Value(date.map(|d| format_date(d, &config.export.date_format))),
            ),
        })
    }

    fn comprehensive(
        &self,
        config: &PipelineConfig,
        _state: &mut ComprehensiveViewState,
        _widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<ComprehensiveView> {
        let date = parse(attribute)?;
        Ok(ComprehensiveView::Date(DateView {
            value: date.map(|d| d.format("%Y-%m-%d").to_string()),
            formatted: date.map(|d| format_date(d, &config.export.date_format)),
        }))
    }
}
