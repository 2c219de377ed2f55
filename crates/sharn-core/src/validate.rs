//! Dataset checks for authors
//!
//! Resolves every district and reports anything that would stop it from
//! rendering, plus names and descriptions that are still blank.

use crate::model::{DistrictEntry, LevelEntry};
use crate::resolve::{district_entry, resolve};
use crate::sanitize::TextRenderer;
use crate::store::DescriptionStore;
use crate::ward::{Level, Ward};
use std::collections::BTreeSet;
use std::fmt;

/// One problem found in a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// A ward used by some district has no record; its display name is shown
    MissingWard(Ward),
    /// A district cannot be rendered
    Unresolvable { district_id: String, reason: String },
    /// A name or description is still empty
    EmptyText {
        district_id: String,
        level: Option<Level>,
        field: &'static str,
    },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingWard(ward) => write!(f, "ward '{}' has no entry", ward.key()),
            Self::Unresolvable {
                district_id,
                reason,
            } => write!(f, "{district_id}: {reason}"),
            Self::EmptyText {
                district_id,
                level: Some(level),
                field,
            } => write!(f, "{district_id}.{}: empty {field}", level.key()),
            Self::EmptyText {
                district_id,
                level: None,
                field,
            } => write!(f, "{district_id}: empty {field}"),
        }
    }
}

/// Outcome of checking a dataset
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub checked: usize,
    pub issues: Vec<Issue>,
}

impl Report {
    /// No district fails to render
    pub fn is_renderable(&self) -> bool {
        !self
            .issues
            .iter()
            .any(|issue| matches!(issue, Issue::Unresolvable { .. }))
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check the given districts, or every district in the store when `ids` is empty
pub fn check(store: &DescriptionStore, ids: &[String], text: &impl TextRenderer) -> Report {
    let ids: Vec<&str> = if ids.is_empty() {
        store.district_ids().collect()
    } else {
        ids.iter().map(String::as_str).collect()
    };

    let mut report = Report::default();

    let wards: BTreeSet<&str> = ids.iter().map(|id| Ward::for_district(id).key()).collect();
    for ward in Ward::all() {
        if wards.contains(ward.key()) && !store.contains(ward.key()) {
            report.issues.push(Issue::MissingWard(*ward));
        }
    }

    for id in ids {
        report.checked += 1;

        let entry = match district_entry(id, store) {
            Ok(entry) => entry,
            Err(e) => {
                report.issues.push(unresolvable(id, &e));
                continue;
            }
        };

        if let Err(e) = resolve(id, store, text) {
            report.issues.push(unresolvable(id, &e));
            continue;
        }

        match entry {
            DistrictEntry::Cliffside(level) => blank_fields(&mut report, id, None, &level),
            DistrictEntry::Tiered(tiered) => {
                blank_fields(&mut report, id, Some(Level::Upper), &tiered.upper);
                blank_fields(&mut report, id, Some(Level::Middle), &tiered.middle);
                blank_fields(&mut report, id, Some(Level::Lower), &tiered.lower);
            }
        }
    }

    report
}

fn unresolvable(district_id: &str, err: &crate::Error) -> Issue {
    Issue::Unresolvable {
        district_id: district_id.to_string(),
        reason: err.to_string(),
    }
}

fn blank_fields(report: &mut Report, district_id: &str, level: Option<Level>, entry: &LevelEntry) {
    for (field, value) in [("name", &entry.name), ("description", &entry.description)] {
        if value.trim().is_empty() {
            report.issues.push(Issue::EmptyText {
                district_id: district_id.to_string(),
                level,
                field,
            });
        }
    }
}
