//! Location info for reports: titles of the geo areas tagged on a project,
//! bucketed by administrative level.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

use crate::config::PipelineConfig;

/// A geo area referenced by a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoArea {
    #[serde(deserialize_with = "key_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// One node of the cached geo option tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoOption {
    #[serde(deserialize_with = "key_string")]
    pub key: String,
    #[serde(alias = "adminLevel")]
    pub admin_level: u8,
    #[serde(default, deserialize_with = "optional_key_string")]
    pub parent: Option<String>,
    pub title: String,
}

/// Titles per admin level, serialized as `"Admin N"` keys in level order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationsInfo {
    #[serde(serialize_with = "admin_labels", deserialize_with = "admin_levels")]
    pub locations: BTreeMap<u8, Vec<String>>,
}

impl LocationsInfo {
    pub fn level(&self, admin_level: u8) -> &[String] {
        self.locations
            .get(&admin_level)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn push(&mut self, admin_level: u8, title: &str) {
        let titles = self.locations.entry(admin_level).or_default();
        if !titles.iter().any(|t| t == title) {
            titles.push(title.to_string());
        }
    }
}

const ADMIN_PREFIX: &str = "Admin ";

fn admin_labels<S: Serializer>(levels: &BTreeMap<u8, Vec<String>>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        levels
            .iter()
            .map(|(level, titles)| (format!("{}{}", ADMIN_PREFIX, level), titles)),
    )
}

fn admin_levels<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeMap<u8, Vec<String>>, D::Error> {
    let labelled = HashMap::<String, Vec<String>>::deserialize(deserializer)?;
    labelled
        .into_iter()
        .map(|(label, titles)| {
            label
                .strip_prefix(ADMIN_PREFIX)
                .and_then(|level| level.parse::<u8>().ok())
                .map(|level| (level, titles))
                .ok_or_else(|| {
                    <D::Error as serde::de::Error>::custom(format!("invalid admin level '{}'", label))
                })
        })
        .collect()
}

/// Resolve the titles of `areas` and of all their ancestors.
///
/// # Arguments
///
/// * `areas` - Areas tagged on the project, in display order
/// * `geo_options` - Geo option tree of the project's regions
/// * `config` - Supplies the number of admin levels always present
///
/// Areas without a matching option are logged and skipped. The parent walk
/// stops at level 1 or at the first missing parent.
pub fn locations_info(areas: &[GeoArea], geo_options: &[GeoOption], config: &PipelineConfig) -> LocationsInfo {
    let mut info = LocationsInfo::default();
    for level in 1..=config.locations.admin_levels {
        info.locations.insert(level, Vec::new());
    }

    let options: HashMap<&str, &GeoOption> = geo_options.iter().map(|o| (o.key.as_str(), o)).collect();

    for area in areas {
        let Some(option) = options.get(area.id.as_str()) else {
            log::warn!("No geo option for area {} ('{}'), skipping", area.id, area.title);
            continue;
        };
        info.push(option.admin_level, &area.title);

        let mut level = option.admin_level;
        let mut current = *option;
        while level > 1 {
            level -= 1;
            let Some(parent) = current.parent.as_deref().and_then(|p| options.get(p)) else {
                break;
            };
            info.push(level, &parent.title);
            current = parent;
        }
    }

    log::debug!(
        "Resolved {} areas into {} admin levels",
        areas.len(),
        info.locations.len()
    );
    info
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Int(i64),
    Text(String),
}

impl From<RawKey> for String {
    fn from(key: RawKey) -> Self {
        match key {
            RawKey::Int(id) => id.to_string(),
            RawKey::Text(text) => text,
        }
    }
}

fn key_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawKey::deserialize(deserializer).map(String::from)
}

fn optional_key_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawKey>::deserialize(deserializer)?.map(String::from))
}
