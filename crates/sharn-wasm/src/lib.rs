//! Sharn WASM - WebAssembly bindings for running the atlas in a browser page
//!
//! The page owns the SVG map and does the fetching; [`Atlas`] owns the dataset
//! and selection. Every call returns an [`AtlasUpdate`] telling the page which
//! regions to (un)highlight, what to put in `location.hash`, whether to show a
//! notice, and whether to fetch the default dataset next.
//!
//! ```js
//! const atlas = new Atlas("districtInfo.json");
//! document.querySelectorAll("#map [id]").forEach(el => atlas.register_region(el.id));
//! const src = atlas.startup_source(location.href);
//! fetch(src).then(r => r.text())
//!     .then(text => apply(atlas.apply_fetched(src, text)))
//!     .catch(err => apply(atlas.apply_fetch_failure(src, String(err))));
//! ```

use sharn_core::location::{PageLocation, Permalink};
use sharn_core::selection::{MapView, Transition};
use sharn_core::session::{LoadReport, MapSession};
use sharn_core::store::{DEFAULT_DATASET, DatasetSource};
use std::collections::HashSet;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Changes the page must apply after an [`Atlas`] call
#[wasm_bindgen]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AtlasUpdate {
    active: Option<String>,
    inactive: Option<String>,
    permalink: Option<String>,
    notice: Option<String>,
    fallback: Option<String>,
    error: Option<String>,
}

#[wasm_bindgen]
impl AtlasUpdate {
    /// Region to mark selected
    #[wasm_bindgen(getter)]
    pub fn active(&self) -> Option<String> {
        self.active.clone()
    }

    /// Region to unmark
    #[wasm_bindgen(getter)]
    pub fn inactive(&self) -> Option<String> {
        self.inactive.clone()
    }

    /// New `location.hash`, e.g. `#C3`
    #[wasm_bindgen(getter)]
    pub fn permalink(&self) -> Option<String> {
        self.permalink.clone()
    }

    /// Message to show to the user as a blocking notice
    #[wasm_bindgen(getter)]
    pub fn notice(&self) -> Option<String> {
        self.notice.clone()
    }

    /// Location the page should fetch next and pass to `apply_fetched`
    #[wasm_bindgen(getter)]
    pub fn fallback(&self) -> Option<String> {
        self.fallback.clone()
    }

    /// Non-blocking failure, for the console
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }
}

/// Map regions known to the page plus the effects requested since the last call
#[derive(Default)]
struct PageEffects {
    regions: HashSet<String>,
    pending: AtlasUpdate,
}

impl PageEffects {
    fn take(&mut self) -> AtlasUpdate {
        std::mem::take(&mut self.pending)
    }
}

impl MapView for PageEffects {
    fn has_region(&self, district_id: &str) -> bool {
        self.regions.contains(district_id)
    }

    fn set_region_active(&mut self, district_id: &str, active: bool) {
        let slot = if active {
            &mut self.pending.active
        } else {
            &mut self.pending.inactive
        };
        *slot = Some(district_id.to_string());
    }

    fn set_permalink(&mut self, permalink: &Permalink) {
        self.pending.permalink = Some(permalink.href());
    }

    fn notify(&mut self, message: &str) {
        self.pending.notice = Some(message.to_string());
    }
}

/// The atlas state behind one map page
#[wasm_bindgen]
pub struct Atlas {
    session: MapSession,
    page: PageEffects,
    default_location: String,
    /// District named by the startup fragment, opened once loading settles
    startup_district: Option<String>,
}

#[wasm_bindgen]
impl Atlas {
    #[wasm_bindgen(constructor)]
    pub fn new(default_location: Option<String>) -> Atlas {
        Atlas {
            session: MapSession::new(),
            page: PageEffects::default(),
            default_location: default_location.unwrap_or_else(|| DEFAULT_DATASET.to_string()),
            startup_district: None,
        }
    }

    /// Location of the first dataset to fetch for a page address.
    ///
    /// Remembers the address's `#district` so it is opened once loading is
    /// done, successful or not.
    pub fn startup_source(&mut self, href: &str) -> String {
        let location = PageLocation::parse(href).unwrap_or_default();
        self.startup_district = location.district.clone();
        location
            .startup_source()
            .location(&self.default_location)
            .unwrap_or(&self.default_location)
            .to_string()
    }

    /// Declare a clickable map region
    pub fn register_region(&mut self, id: &str) {
        self.page.regions.insert(id.to_string());
    }

    /// The page fetched `source` and got `text`
    pub fn apply_fetched(&mut self, source: &str, text: &str) -> AtlasUpdate {
        let source = self.source_for(source);
        let report = self.session.apply_load(source, Ok(text.to_string()), &mut self.page);
        self.finish_load(&report)
    }

    /// Fetching `source` failed, e.g. a network or CORS error
    pub fn apply_fetch_failure(&mut self, source: &str, reason: &str) -> AtlasUpdate {
        let fetched = Err(sharn_core::Error::Fetch {
            url: source.to_string(),
            reason: reason.to_string(),
        });
        let source = self.source_for(source);
        let report = self.session.apply_load(source, fetched, &mut self.page);
        self.finish_load(&report)
    }

    /// A file picked by the user
    pub fn load_from_text(&mut self, label: &str, text: &str) -> AtlasUpdate {
        let report = self.session.load_from_text(label, text, &mut self.page);
        self.finish_load(&report)
    }

    /// A map region was clicked
    pub fn click(&mut self, id: &str) -> AtlasUpdate {
        let result = self.session.click(id, &mut self.page);
        self.finish_selection(result)
    }

    /// `location.hash` changed
    pub fn hash_change(&mut self, hash: &str) -> AtlasUpdate {
        let result = self.session.hash_change(hash, &mut self.page);
        self.finish_selection(result)
    }

    /// HTML for the info box
    pub fn panel_html(&self) -> String {
        self.session.panel().to_html()
    }

    /// Currently selected district
    pub fn selected(&self) -> Option<String> {
        self.session.selection().district_id().map(str::to_string)
    }
}

impl Atlas {
    fn source_for(&self, location: &str) -> DatasetSource {
        if location == self.default_location {
            DatasetSource::Default
        } else {
            DatasetSource::Url(location.to_string())
        }
    }

    fn finish_load(&mut self, report: &LoadReport) -> AtlasUpdate {
        if let Some(fallback) = &report.fallback {
            self.page.pending.fallback = fallback
                .location(&self.default_location)
                .map(str::to_string);
        } else if let Some(district) = self.startup_district.take() {
            // Loading has settled; open the startup permalink
            if let Err(e) = self.session.hash_change(&district, &mut self.page) {
                self.page.pending.error = Some(e.to_string());
            }
        }

        if let Some(e) = &report.render_error {
            self.page.pending.error = Some(e.to_string());
        }
        self.page.take()
    }

    fn finish_selection(&mut self, result: sharn_core::Result<Transition>) -> AtlasUpdate {
        if let Err(e) = result {
            self.page.pending.error = Some(e.to_string());
        }
        self.page.take()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    const DATA: &str = r#"{
        "central": { "name": "Central Plateau", "description": "" },
        "cliffside": { "name": "Cliffside", "description": "" },
        "C3": {
            "upper": { "name": "Korth", "description": "" },
            "middle": { "name": "Ashblack", "description": "" },
            "lower": { "name": "Stairs", "description": "" }
        },
        "grayflood": { "name": "Grayflood", "description": "" }
    }"#;

    fn atlas() -> Atlas {
        let mut atlas = Atlas::new(None);
        for id in ["C3", "grayflood"] {
            atlas.register_region(id);
        }
        atlas
    }

    #[test]
    fn test_startup_source_prefers_query() {
        let mut atlas = atlas();
        assert_eq!(
            atlas.startup_source("https://sharn.example/map.html?json=alt.json#C3"),
            "alt.json"
        );
        assert_eq!(atlas.startup_source("https://sharn.example/map.html"), "districtInfo.json");
    }

    #[test]
    fn test_startup_district_opens_after_load() {
        let mut atlas = atlas();
        let src = atlas.startup_source("https://sharn.example/map.html#C3");
        let update = atlas.apply_fetched(&src, DATA);

        assert_eq!(update.active(), Some("C3".to_string()));
        assert_eq!(update.permalink(), Some("#C3".to_string()));
        assert!(atlas.panel_html().contains("Korth"));
    }

    #[test]
    fn test_failed_query_source_requests_default() {
        let mut atlas = atlas();
        let src = atlas.startup_source("?json=https://elsewhere.example/x.json#grayflood");

        let update = atlas.apply_fetch_failure(&src, "TypeError: Failed to fetch");
        assert!(update.notice().unwrap().contains("ensure that CORS is enabled"));
        assert_eq!(update.fallback(), Some("districtInfo.json".to_string()));
        assert_eq!(update.active(), None);

        let update = atlas.apply_fetched("districtInfo.json", DATA);
        assert_eq!(update.fallback(), None);
        assert_eq!(update.active(), Some("grayflood".to_string()));
    }

    #[test]
    fn test_click_switch_and_toggle() {
        let mut atlas = atlas();
        atlas.load_from_text("upload.json", DATA);

        atlas.click("C3");
        let update = atlas.click("grayflood");
        assert_eq!(update.active(), Some("grayflood".to_string()));
        assert_eq!(update.inactive(), Some("C3".to_string()));

        let update = atlas.click("grayflood");
        assert_eq!(update.inactive(), Some("grayflood".to_string()));
        assert_eq!(atlas.selected(), None);
        assert!(atlas.panel_html().contains("Welcome to Sharn"));
    }

    #[test]
    fn test_missing_district_is_not_a_notice() {
        let mut atlas = atlas();
        atlas.load_from_text("upload.json", r#"{ "cliffside": { "name": "Cliffside" } }"#);

        let update = atlas.click("grayflood");
        assert!(update.notice().is_none());
        assert!(update.error().is_some());
        assert_eq!(atlas.selected(), None);
    }
}
