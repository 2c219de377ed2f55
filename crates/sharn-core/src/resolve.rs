//! District resolution
//!
//! Turns a district identifier into everything the info panel shows: the
//! owning ward and one (cliffside) or three (upper, middle, lower) levels.
//! The record's shape is decided here from the identifier's ward prefix and
//! nowhere else.

use crate::error::{Error, Result};
use crate::model::{DistrictEntry, LevelEntry, TieredEntry, WardEntry};
use crate::sanitize::TextRenderer;
use crate::store::DescriptionStore;
use crate::ward::{Level, Ward};
use tracing::debug;

/// One notable location, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationView {
    pub name_html: String,
    pub description_html: String,
}

/// One level of a resolved district
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelView {
    /// Which level this is; `None` for a cliffside district
    pub level: Option<Level>,
    /// Plain level name from the dataset
    pub name: String,
    /// Display label, e.g. "Upper: Highest Towers"
    pub label: String,
    pub description_html: String,
    pub locations: Vec<LocationView>,
}

/// Everything needed to paint a district
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedView {
    pub district_id: String,
    pub ward: Ward,
    pub ward_name: String,
    pub ward_description_html: String,
    pub levels: Vec<LevelView>,
}

/// Decide the record shape from the identifier and read it from the store
pub fn district_entry(district_id: &str, store: &DescriptionStore) -> Result<DistrictEntry> {
    if Ward::for_district(district_id).is_tiered() {
        let tiered: TieredEntry = store.record(district_id)?;
        Ok(DistrictEntry::Tiered(Box::new(tiered)))
    } else {
        let level: LevelEntry = store.record(district_id)?;
        Ok(DistrictEntry::Cliffside(level))
    }
}

/// Resolve a district identifier against the store.
///
/// Fails with a missing-data error if the district or any required level is
/// absent; nothing is partially resolved. A ward without a record shows its
/// display name and no description.
pub fn resolve(
    district_id: &str,
    store: &DescriptionStore,
    text: &impl TextRenderer,
) -> Result<ResolvedView> {
    let ward = Ward::for_district(district_id);
    let entry = district_entry(district_id, store)?;
    let ward_entry = ward_entry(ward, store)?;

    let levels = match &entry {
        DistrictEntry::Cliffside(level) => {
            vec![level_view(district_id, None, level, text)?]
        }
        DistrictEntry::Tiered(tiered) => {
            let mut levels = Vec::with_capacity(Level::ALL.len());
            for level in Level::ALL {
                let record = match level {
                    Level::Upper => &tiered.upper,
                    Level::Middle => &tiered.middle,
                    Level::Lower => &tiered.lower,
                };
                levels.push(level_view(district_id, Some(level), record, text)?);
            }
            levels
        }
    };

    debug!("Resolved {} in ward {} ({} levels)", district_id, ward, levels.len());

    Ok(ResolvedView {
        district_id: district_id.to_string(),
        ward,
        ward_name: ward_entry.name,
        ward_description_html: text.to_safe_html(&ward_entry.description),
        levels,
    })
}

/// Ward record from the store; absent records fall back to the display name,
/// malformed ones are missing data
fn ward_entry(ward: Ward, store: &DescriptionStore) -> Result<WardEntry> {
    if !store.contains(ward.key()) {
        debug!("No record for ward {}, using its display name", ward);
        return Ok(WardEntry {
            name: ward.display_name().to_string(),
            description: String::new(),
        });
    }
    store.record(ward.key())
}

fn level_view(
    district_id: &str,
    level: Option<Level>,
    entry: &LevelEntry,
    text: &impl TextRenderer,
) -> Result<LevelView> {
    let locations = &entry.notable_locations;
    if !locations.is_consistent() {
        let key = level.map_or_else(
            || district_id.to_string(),
            |l| format!("{district_id}.{}", l.key()),
        );
        return Err(Error::missing(
            key,
            format!(
                "{} notable location names but {} descriptions",
                locations.name.len(),
                locations.description.len()
            ),
        ));
    }

    let label = match level {
        Some(level) => format!("{}: {}", level.label(), entry.name),
        None => entry.name.clone(),
    };

    Ok(LevelView {
        level,
        name: entry.name.clone(),
        label,
        description_html: text.to_safe_html(&entry.description),
        locations: locations
            .pairs()
            .map(|(name, description)| LocationView {
                name_html: text.to_safe_html(name),
                description_html: text.to_safe_html(description),
            })
            .collect(),
    })
}
