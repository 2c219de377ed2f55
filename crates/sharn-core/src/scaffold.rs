//! Boilerplate dataset for authors starting a new description file

use crate::model::{Dataset, LevelEntry, TieredEntry, WardEntry};
use crate::ward::Ward;
use serde_json::json;

/// Number of districts in each plateau ward
const DISTRICT_COUNTS: [(Ward, u32); 5] = [
    (Ward::Menthis, 5),
    (Ward::Central, 6),
    (Ward::Tavicks, 6),
    (Ward::Northedge, 3),
    (Ward::Dura, 8),
];

/// Cliffside districts: (identifier, display name)
const CLIFFSIDE_DISTRICTS: [(&str, &str); 4] = [
    ("grayflood", "Grayflood"),
    ("sharnsWelcome", "Sharn's Welcome"),
    ("mudCaves", "Mud Caves"),
    ("shipsTowers", "Ship's Towers"),
];

/// Every district identifier on the standard map
pub fn district_ids() -> Vec<String> {
    let mut ids: Vec<String> = DISTRICT_COUNTS
        .iter()
        .filter_map(|(ward, count)| ward.prefix().map(|prefix| (prefix, *count)))
        .flat_map(|(prefix, count)| (1..=count).map(move |i| format!("{prefix}{i}")))
        .collect();
    ids.extend(CLIFFSIDE_DISTRICTS.iter().map(|(id, _)| (*id).to_string()));
    ids
}

/// Dataset with every ward and district present and all text left empty
pub fn boilerplate() -> Dataset {
    let mut dataset = Dataset::new();

    for ward in Ward::all() {
        let entry = WardEntry {
            name: ward.display_name().to_string(),
            description: String::new(),
        };
        dataset.insert(ward.key().to_string(), json!(entry));
    }

    for (ward, count) in DISTRICT_COUNTS {
        let Some(prefix) = ward.prefix() else {
            continue;
        };
        for i in 1..=count {
            dataset.insert(format!("{prefix}{i}"), json!(TieredEntry::default()));
        }
    }

    for (id, name) in CLIFFSIDE_DISTRICTS {
        let entry = LevelEntry {
            name: name.to_string(),
            ..LevelEntry::default()
        };
        dataset.insert(id.to_string(), json!(entry));
    }

    dataset
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::resolve::resolve;
    use crate::sanitize::MarkdownSanitizer;
    use crate::store::{DatasetSource, DescriptionStore};

    #[test]
    fn test_district_count() {
        assert_eq!(district_ids().len(), 5 + 6 + 6 + 3 + 8 + 4);
        assert!(district_ids().contains(&"D8".to_string()));
        assert!(!district_ids().contains(&"N4".to_string()));
    }

    #[test]
    fn test_boilerplate_resolves() {
        let store = DescriptionStore::with_dataset(boilerplate(), DatasetSource::Default);
        let text = MarkdownSanitizer::new();
        for id in district_ids() {
            let view = resolve(&id, &store, &text).unwrap();
            let expected = if Ward::for_district(&id).is_tiered() { 3 } else { 1 };
            assert_eq!(view.levels.len(), expected, "{id}");
        }
    }

    #[test]
    fn test_boilerplate_uses_dataset_field_names() {
        let dataset = boilerplate();
        let c1 = &dataset["C1"];
        assert!(c1["upper"]["notableLocations"]["name"].is_array());
        assert_eq!(dataset["tavicks"]["name"], "Tavick's Landing");
        assert_eq!(dataset["sharnsWelcome"]["name"], "Sharn's Welcome");
    }
}
