use serde::Deserialize;
use std::collections::HashSet;

use super::{decode_options, decode_value, missing_option, unknown_selection, ComprehensiveViewState, Transformer};
use crate::config::PipelineConfig;
use crate::core::{
    AttributeValue, ComprehensiveView, DerivedAttribute, ExportRepresentation, FilterRepresentation,
    OrganigramNode, OrganigramView, SpreadsheetCell, WidgetDefinition, WidgetKind,
};
use crate::error::{WidgetError, WidgetResult};

#[derive(Debug, Deserialize)]
struct Organ {
    key: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    organs: Vec<Organ>,
}

/// Organigram widget: keys selected from an organization tree.
pub struct OrganigramTransformer;

impl OrganigramTransformer {
    fn root(widget: &WidgetDefinition) -> WidgetResult<Organ> {
        if widget.options.get("key").is_none() {
            return Err(missing_option(widget, "key"));
        }
        decode_options(widget)
    }

    fn selected_keys(attribute: &AttributeValue) -> WidgetResult<Vec<String>> {
        let keys: Option<Vec<String>> = decode_value(attribute)?;
        Ok(keys.unwrap_or_default())
    }

    fn unknown(widget: &WidgetDefinition, keys: &[String], nodes: &[OrganigramNode]) -> Vec<WidgetError> {
        keys.iter()
            .filter(|k| !nodes.iter().any(|n| &n.id == *k))
            .map(|k| unknown_selection(widget, k))
            .collect()
    }
}

/// Selected organs in pre-order.
fn collect_nodes(organ: &Organ, selected: &HashSet<&str>, nodes: &mut Vec<OrganigramNode>) {
    if selected.contains(organ.key.as_str()) {
        nodes.push(OrganigramNode {
            id: organ.key.clone(),
            name: organ.title.clone(),
        });
    }
    for child in &organ.organs {
        collect_nodes(child, selected, nodes);
    }
}

/// Keys of selected organs and of every ancestor of a selected organ, in
/// pre-order, so that filtering on a parent matches entries tagged below it.
fn filter_keys(organ: &Organ, selected: &HashSet<&str>) -> Vec<String> {
    let below: Vec<String> = organ
        .organs
        .iter()
        .flat_map(|child| filter_keys(child, selected))
        .collect();

    if below.is_empty() && !selected.contains(organ.key.as_str()) {
        return below;
    }
    let mut keys = Vec::with_capacity(below.len() + 1);
    keys.push(organ.key.clone());
    keys.extend(below);
    keys
}

impl Transformer for OrganigramTransformer {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Organigram
    }

    fn validate_definition(&self, widget: &WidgetDefinition) -> WidgetResult<()> {
        Self::root(widget).map(|_| ())
    }

    fn derive(
        &self,
        _config: &PipelineConfig,
        widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<DerivedAttribute> {
        let root = Self::root(widget)?;
        let keys = Self::selected_keys(attribute)?;
        let selected: HashSet<&str> = keys.iter().map(String::as_str).collect();

        let mut nodes = Vec::new();
        collect_nodes(&root, &selected, &mut nodes);
        for notice in Self::unknown(widget, &keys, &nodes) {
            log::warn!("{}", notice);
        }

        Ok(DerivedAttribute {
            filter: FilterRepresentation::with_values(filter_keys(&root, &selected)),
            export: ExportRepresentation::cell(
                widget,
                SpreadsheetCell::List(nodes.into_iter().map(|n| Some(n.name)).collect()),
            ),
        })
    }

    fn comprehensive(
        &self,
        _config: &PipelineConfig,
        state: &mut ComprehensiveViewState,
        widget: &WidgetDefinition,
        attribute: &AttributeValue,
    ) -> WidgetResult<ComprehensiveView> {
        let root = Self::root(widget)?;
        let keys = Self::selected_keys(attribute)?;
        let selected: HashSet<&str> = keys.iter().map(String::as_str).collect();

        let mut nodes = Vec::new();
        collect_nodes(&root, &selected, &mut nodes);
        for notice in Self::unknown(widget, &keys, &nodes) {
            state.notice(notice);
        }

        Ok(ComprehensiveView::Organigram(OrganigramView { nodes }))
    }
}
