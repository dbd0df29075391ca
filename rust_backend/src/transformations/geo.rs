use serde::Deserialize;

use super::{decode_value, ComprehensiveViewState, Transformer};
use crate::config::PipelineConfig;
use crate::core::{
    AttributeValue, ComprehensiveView, DerivedAttribute, ExportRepresentation, FilterRepresentation,
    LabeledValue, ListView, SpreadsheetCell, WidgetDefinition, WidgetKind,
};
use crate::error::WidgetResult;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AreaKey {
    Id(i64),
    Code(String),
}

impl AreaKey {
    fn into_string(self) -> String {
        match self {
            AreaKey::Id(id) => id.to_string(),
            AreaKey::Code(code) => code,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AreaRef {
    Bare(AreaKey),
    Labeled {
        key: AreaKey,
        #[serde(default)]
        label: Option<String>,
    },
}

/// Geo widget: a list of geo area references.
pub struct GeoTransformer;

fn areas(attribute: &AttributeValue) -> WidgetResult<Vec<LabeledValue>> {
    let refs: Option<Vec<AreaRef>> = decode_value(attribute)?;
    Ok(refs
        .unwrap_or_default()
        .into_iter()
        .map(|area| match area {
            AreaRef::Bare(key) => {
                let key = key.into_string();
                LabeledValue { label: key.clone(), key }
            }
            AreaRef::Labeled { key, label } => {
                let key = key.into_string();
                LabeledValue {
                    label: label.unwrap_or_else(|| key.clone()),
                    key,
                }
            }
        })
        .collect())
}

impl Transformer for GeoTransformer {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Geo
    }

    fn derive(
        &self,
        _config: &PipelineConfig,
        widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<DerivedAttribute> {
        let keys: Vec<String> = areas(attribute)?.into_iter().map(|a| a.key).collect();
        Ok(DerivedAttribute {
            export: ExportRepresentation::cell(
                widget,
                SpreadsheetCell::List(keys.iter().cloned().map(Some).collect()),
            ),
            filter: FilterRepresentation::with_values(keys),
        })
    }

    fn comprehensive(
        &self,
        _config: &PipelineConfig,
        _state: &mut ComprehensiveViewState,
        _widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<ComprehensiveView> {
        Ok(ComprehensiveView::Geo(ListView {
            values: areas(attribute)?,
        }))
    }
}
