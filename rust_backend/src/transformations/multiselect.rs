use serde::Deserialize;

use super::{decode_options, decode_value, missing_option, unknown_selection, ComprehensiveViewState, Transformer};
use crate::config::PipelineConfig;
use crate::core::{
    AttributeValue, ComprehensiveView, DerivedAttribute, ExportRepresentation, FilterRepresentation,
    LabeledValue, ListView, SpreadsheetCell, WidgetDefinition, WidgetKind,
};
use crate::error::{WidgetError, WidgetResult};

#[derive(Debug, Deserialize)]
struct SelectOption {
    key: String,
    #[serde(default)]
    label: String,
}

#[derive(Debug, Deserialize)]
struct MultiselectOptions {
    #[serde(default)]
    options: Option<Vec<SelectOption>>,
}

/// Multiselect widget: a list of option keys.
pub struct MultiselectTransformer;

/// Selected keys, the options they resolve to, and keys with no option.
struct Resolved {
    keys: Vec<String>,
    selected: Vec<LabeledValue>,
    unknown: Vec<WidgetError>,
}

impl MultiselectTransformer {
    fn options(widget: &WidgetDefinition) -> WidgetResult<Vec<SelectOption>> {
        let options: MultiselectOptions = decode_options(widget)?;
        options.options.ok_or_else(|| missing_option(widget, "options"))
    }

    fn resolve(widget: &WidgetDefinition, attribute: &AttributeValue) -> WidgetResult<Resolved> {
        let options = Self::options(widget)?;
        let keys: Option<Vec<String>> = decode_value(attribute)?;
        let keys = keys.unwrap_or_default();

        let mut selected = Vec::with_capacity(keys.len());
        let mut unknown = Vec::new();
        for key in &keys {
            match options.iter().find(|o| &o.key == key) {
                Some(option) => selected.push(LabeledValue {
                    key: option.key.clone(),
                    label: option.label.clone(),
                }),
                None => unknown.push(unknown_selection(widget, key)),
            }
        }

        Ok(Resolved { keys, selected, unknown })
    }
}

impl Transformer for MultiselectTransformer {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Multiselect
    }

    fn validate_definition(&self, widget: &WidgetDefinition) -> WidgetResult<()> {
        Self::options(widget).map(|_| ())
    }

    fn derive(
        &self,
        _config: &PipelineConfig,
        widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<DerivedAttribute> {
        let resolved = Self::resolve(widget, attribute)?;
        for notice in &resolved.unknown {
            log::warn!("{}; dropped from export", notice);
        }

        let labels = resolved.selected.into_iter().map(|v| Some(v.label)).collect();
        Ok(DerivedAttribute {
            filter: FilterRepresentation::with_values(resolved.keys),
            export: ExportRepresentation::cell(widget, SpreadsheetCell::List(labels)),
        })
    }

    fn comprehensive(
        &self,
        _config: &PipelineConfig,
        state: &mut ComprehensiveViewState,
        widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<ComprehensiveView> {
        let resolved = Self::resolve(widget, attribute)?;
        for notice in resolved.unknown {
            state.notice(notice);
        }
        Ok(ComprehensiveView::Multiselect(ListView {
            values: resolved.selected,
        }))
    }
}
