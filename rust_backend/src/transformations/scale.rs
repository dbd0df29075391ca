use serde::Deserialize;

use super::{decode_options, decode_value, missing_option, unknown_selection, ComprehensiveViewState, Transformer};
use crate::config::PipelineConfig;
use crate::core::{
    AttributeValue, ComprehensiveView, DerivedAttribute, ExportRepresentation, FilterRepresentation,
    ReportFragment, ScalePoint, ScaleView, SpreadsheetCell, WidgetDefinition, WidgetKind,
};
use crate::error::{WidgetError, WidgetResult};

#[derive(Debug, Deserialize)]
struct ScaleOptions {
    #[serde(default)]
    scale_units: Vec<ScalePoint>,
}

/// Scale widget: one key selected from an ordered list of points.
pub struct ScaleTransformer;

/// The selected key and the point it resolves to, if any.
struct Selection<'a> {
    key: Option<String>,
    point: Option<(usize, &'a ScalePoint)>,
}

impl ScaleTransformer {
    fn points(widget: &WidgetDefinition) -> WidgetResult<Vec<ScalePoint>> {
        let options: ScaleOptions = decode_options(widget)?;
        if options.scale_units.is_empty() {
            return Err(missing_option(widget, "scale_units"));
        }
        Ok(options.scale_units)
    }

    /// Resolve the attribute against `points`. A key missing from the points
    /// is reported through the returned notice and treated as no selection.
    fn select<'a>(
        widget: &WidgetDefinition,
        points: &'a [ScalePoint],
        attribute: &AttributeValue,
    ) -> WidgetResult<(Selection<'a>, Option<WidgetError>)> {
        let key: Option<String> = decode_value(attribute)?;
        let point = key
            .as_deref()
            .and_then(|k| points.iter().enumerate().find(|(_, p)| p.key == k));

        let notice = match (&key, point) {
            (Some(k), None) => Some(unknown_selection(widget, k)),
            _ => None,
        };
        Ok((Selection { key, point }, notice))
    }
}

impl Transformer for ScaleTransformer {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Scale
    }

    fn validate_definition(&self, widget: &WidgetDefinition) -> WidgetResult<()> {
        Self::points(widget).map(|_| ())
    }

    fn derive(
        &self,
        _config: &PipelineConfig,
        widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<DerivedAttribute> {
        let points = Self::points(widget)?;
        let (selection, notice) = Self::select(widget, &points, attribute)?;
        if let Some(notice) = notice {
            log::warn!("{}; exporting as no selection", notice);
        }

        let report = selection
            .point
            .map(|(_, p)| ReportFragment {
                title: widget.title.clone(),
                label: Some(p.label.clone()),
                color: p.color.clone(),
            })
            .unwrap_or_default();

        let mut export = ExportRepresentation::cell(
            widget,
            SpreadsheetCell::Value(selection.point.map(|(_, p)| p.label.clone())),
        );
        export.report_fragment = Some(report);

        Ok(DerivedAttribute {
            filter: FilterRepresentation::with_values(selection.key.into_iter().collect()),
            export,
        })
    }

    fn comprehensive(
        &self,
        _config: &PipelineConfig,
        state: &mut ComprehensiveViewState,
        widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<ComprehensiveView> {
        let points = Self::points(widget)?;
        let (selection, notice) = Self::select(widget, &points, attribute)?;
        if let Some(notice) = notice {
            state.notice(notice);
        }

        let bounds = state
            .scale_bounds(&widget.key, &points)
            .cloned()
            .ok_or_else(|| missing_option(widget, "scale_units"))?;

        Ok(ComprehensiveView::Scale(ScaleView {
            min: bounds.min,
            max: bounds.max,
            selected: selection.point.map(|(_, p)| p.clone()),
            label: selection.point.map(|(_, p)| p.label.clone()),
            index: selection.point.map(|(i, _)| i + 1),
        }))
    }
}
