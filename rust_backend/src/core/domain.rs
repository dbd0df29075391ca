use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Widget types with a transformer, keyed by the widget id stored on the
/// analysis framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    #[serde(rename = "numberWidget")]
    Number,
    #[serde(rename = "dateWidget")]
    Date,
    #[serde(rename = "timeWidget")]
    Time,
    #[serde(rename = "timeRangeWidget")]
    TimeRange,
    #[serde(rename = "scaleWidget")]
    Scale,
    #[serde(rename = "multiselectWidget")]
    Multiselect,
    #[serde(rename = "organigramWidget")]
    Organigram,
    #[serde(rename = "geoWidget")]
    Geo,
    /// Excerpt, matrix and other widgets that carry no derived data here.
    #[serde(other)]
    Unsupported,
}

impl WidgetKind {
    pub fn widget_id(self) -> &'static str {
        match self {
            WidgetKind::Number => "numberWidget",
            WidgetKind::Date => "dateWidget",
            WidgetKind::Time => "timeWidget",
            WidgetKind::TimeRange => "timeRangeWidget",
            WidgetKind::Scale => "scaleWidget",
            WidgetKind::Multiselect => "multiselectWidget",
            WidgetKind::Organigram => "organigramWidget",
            WidgetKind::Geo => "geoWidget",
            WidgetKind::Unsupported => "unsupported",
        }
    }
}

/// A widget of an analysis framework.
///
/// `options` is the widget's `properties.data` blob; its shape depends on
/// `kind` and is decoded by the matching transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetDefinition {
    pub key: String,
    #[serde(rename = "widget_id", alias = "widgetId")]
    pub kind: WidgetKind,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "data")]
    pub options: Value,
}

impl WidgetDefinition {
    pub fn new(key: impl Into<String>, kind: WidgetKind, title: impl Into<String>, options: Value) -> Self {
        Self {
            key: key.into(),
            kind,
            title: title.into(),
            options,
        }
    }
}

/// The tagged value of one widget on one entry (`attribute.data.value`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    #[serde(alias = "widgetKey")]
    pub widget_key: String,
    #[serde(default)]
    pub value: Value,
}

impl AttributeValue {
    pub fn new(widget_key: impl Into<String>, value: Value) -> Self {
        Self {
            widget_key: widget_key.into(),
            value,
        }
    }
}

/// Strongly-typed identifier for an entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

/// An entry with its tagged attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    #[serde(default)]
    pub attributes: Vec<AttributeValue>,
}

/// Inclusive numeric range used by range filters. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

/// Normalized form of a tagged value used to build filter predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRepresentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_range: Option<NumberRange>,
}

impl FilterRepresentation {
    pub fn with_values(values: Vec<String>) -> Self {
        Self {
            values: Some(values),
            ..Self::default()
        }
    }

    pub fn with_number(number: Option<i64>) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }

    pub fn with_range(from: Option<i64>, to: Option<i64>) -> Self {
        Self {
            number_range: Some(NumberRange { from, to }),
            ..Self::default()
        }
    }
}

/// Spreadsheet cell content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SpreadsheetCell {
    Value(Option<String>),
    List(Vec<Option<String>>),
}

/// Report snippet for widgets rendered with a label and color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFragment {
    pub title: String,
    pub label: Option<String>,
    pub color: Option<String>,
}

impl ReportFragment {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.label.is_none() && self.color.is_none()
    }
}

/// Normalized form of a tagged value used by the export renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRepresentation {
    pub widget_id: WidgetKind,
    pub widget_key: String,
    pub spreadsheet_cell: SpreadsheetCell,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_fragment: Option<ReportFragment>,
}

impl ExportRepresentation {
    pub fn cell(widget: &WidgetDefinition, spreadsheet_cell: SpreadsheetCell) -> Self {
        Self {
            widget_id: widget.kind,
            widget_key: widget.key.clone(),
            spreadsheet_cell,
            report_fragment: None,
        }
    }
}

/// Filter and export projections of one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedAttribute {
    pub filter: FilterRepresentation,
    pub export: ExportRepresentation,
}

/// One point of a scale widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalePoint {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A selected option with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledValue {
    pub key: String,
    pub label: String,
}

/// A selected organigram node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganigramNode {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleView {
    pub min: ScalePoint,
    pub max: ScalePoint,
    pub selected: Option<ScalePoint>,
    pub label: Option<String>,
    /// 1-based position of the selected point
    pub index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeView {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeView {
    pub value: Option<String>,
    pub minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberView {
    pub value: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateView {
    /// ISO `YYYY-MM-DD`
    pub value: Option<String>,
    pub formatted: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListView {
    pub values: Vec<LabeledValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganigramView {
    pub nodes: Vec<OrganigramNode>,
}

/// Per-widget, per-entry summary used by analysis reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComprehensiveView {
    Scale(ScaleView),
    TimeRange(TimeRangeView),
    Time(TimeView),
    Number(NumberView),
    Date(DateView),
    Multiselect(ListView),
    Organigram(OrganigramView),
    Geo(ListView),
}
