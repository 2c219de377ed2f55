//! Dataset records as they appear in `districtInfo.json`
//!
//! Field names are fixed by existing data files: `name`, `description`,
//! `notableLocations`, `upper`, `middle`, `lower`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw dataset: district identifiers and ward keys mapped to their records.
///
/// Values stay as untyped JSON because the shape of a district record is
/// decided by its identifier, not by the record itself.
pub type Dataset = BTreeMap<String, serde_json::Value>;

/// Notable locations of a level, as two index-paired lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationsDict {
    #[serde(default)]
    pub name: Vec<String>,
    #[serde(default)]
    pub description: Vec<String>,
}

impl LocationsDict {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    pub fn len(&self) -> usize {
        self.name.len()
    }

    /// Both lists pair up one-to-one
    pub fn is_consistent(&self) -> bool {
        self.name.len() == self.description.len()
    }

    /// (name, description) pairs in list order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.name
            .iter()
            .zip(self.description.iter())
            .map(|(n, d)| (n.as_str(), d.as_str()))
    }
}

/// One vertical level of a district, or the only level of a cliffside district
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Older data files omit this for cliffside districts
    #[serde(default)]
    pub notable_locations: LocationsDict,
}

/// Composite record of a three-level district
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredEntry {
    pub upper: LevelEntry,
    pub middle: LevelEntry,
    pub lower: LevelEntry,
}

/// A district record once its shape has been decided from the identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistrictEntry {
    /// Single-level district outside the plateau wards
    Cliffside(LevelEntry),
    /// Upper, middle and lower levels of a ward district
    Tiered(Box<TieredEntry>),
}

/// Name and description of a ward
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
}
