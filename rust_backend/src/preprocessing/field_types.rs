//! Field type detection for uploaded spreadsheets.
//!
//! Each sheet arrives as a list of rows, each row a JSON object keyed by
//! field id. Every non-empty cell is classified and a field keeps its first
//! classified type for as long as the sheet agrees with it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::PipelineConfig;
use crate::parsing::{parse_datetime, parse_number};

/// Column type of a spreadsheet field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Datetime,
    Geo,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Datetime => "datetime",
            FieldType::Geo => "geo",
        }
    }
}

/// A known field of the sheet with the type chosen when it was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: i64,
    #[serde(default, alias = "type")]
    pub default_type: Option<FieldType>,
}

/// Case-insensitive lookup of geo area titles and codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoIndex {
    names: HashSet<String>,
    codes: HashSet<String>,
}

impl GeoIndex {
    pub fn new<N, C>(names: N, codes: C) -> Self
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        Self {
            names: names.into_iter().map(|n| normalize(n.as_ref())).collect(),
            codes: codes.into_iter().map(|c| normalize(c.as_ref())).collect(),
        }
    }

    pub fn contains(&self, text: &str) -> bool {
        let key = normalize(text);
        !key.is_empty() && (self.names.contains(&key) || self.codes.contains(&key))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.codes.is_empty()
    }
}

/// Serialized shape of a [`GeoIndex`]: `{"names": [...], "codes": [...]}`.
#[derive(Debug, Default, Deserialize)]
struct GeoIndexRepr {
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    codes: Vec<String>,
}

impl<'de> Deserialize<'de> for GeoIndex {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = GeoIndexRepr::deserialize(deserializer)?;
        Ok(GeoIndex::new(repr.names, repr.codes))
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn is_empty_cell(cell: &Value) -> bool {
    match cell {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Classify one cell: number, then datetime, then geo, else string.
pub fn classify_cell(cell: &Value, geos: &GeoIndex, config: &PipelineConfig) -> FieldType {
    let text = match cell {
        Value::Number(_) => return FieldType::Number,
        Value::String(s) => s.as_str(),
        _ => return FieldType::String,
    };

    if parse_number(text).is_some() {
        FieldType::Number
    } else if parse_datetime(text, &config.tabular.datetime_formats).is_some() {
        FieldType::Datetime
    } else if geos.contains(text) {
        FieldType::Geo
    } else {
        FieldType::String
    }
}

#[derive(Debug, Clone, Copy)]
enum Detection {
    Pending,
    Seen(FieldType),
    Pinned(FieldType),
}

/// Detect the type of each known field from the rows of one sheet.
///
/// # Arguments
///
/// * `rows` - Sheet rows keyed by field id
/// * `fields` - Known fields; other columns (and non-numeric keys) are ignored
/// * `geos` - Geo titles and codes of the project
/// * `config` - Datetime formats and empty-cell handling
///
/// # Returns
///
/// The detected type of every field in `fields`. A field whose cells
/// disagree is pinned to its default type (`String` when it has none);
/// a field without any classified cell is `String`.
pub fn detect_field_types(
    rows: &[Map<String, Value>],
    fields: &[FieldSpec],
    geos: &GeoIndex,
    config: &PipelineConfig,
) -> BTreeMap<i64, FieldType> {
    let defaults: HashMap<i64, Option<FieldType>> = fields.iter().map(|f| (f.id, f.default_type)).collect();
    let mut detected: HashMap<i64, Detection> = fields.iter().map(|f| (f.id, Detection::Pending)).collect();

    for row in rows {
        for (column, cell) in row {
            let Ok(field_id) = column.parse::<i64>() else {
                continue;
            };
            let Some(detection) = detected.get_mut(&field_id) else {
                continue;
            };
            if matches!(detection, Detection::Pinned(_)) {
                continue;
            }
            if config.tabular.skip_empty_cells && is_empty_cell(cell) {
                continue;
            }

            let cell_type = classify_cell(cell, geos, config);
            *detection = match *detection {
                Detection::Pending => Detection::Seen(cell_type),
                Detection::Seen(current) if current == cell_type => Detection::Seen(current),
                Detection::Seen(current) => {
                    let pinned = defaults.get(&field_id).copied().flatten().unwrap_or(FieldType::String);
                    log::debug!(
                        "Field {} mixes {} and {}, using {}",
                        field_id,
                        current.as_str(),
                        cell_type.as_str(),
                        pinned.as_str()
                    );
                    Detection::Pinned(pinned)
                }
                pinned @ Detection::Pinned(_) => pinned,
            };
        }
    }

    fields
        .iter()
        .map(|field| {
            let field_type = match detected.get(&field.id) {
                Some(Detection::Seen(t)) | Some(Detection::Pinned(t)) => *t,
                _ => FieldType::String,
            };
            (field.id, field_type)
        })
        .collect()
}
