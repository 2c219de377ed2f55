//! Application state management
//!
//! - `AppState`: the atlas session, the page bridge and persisted settings
//! - `PageBridge`, `PageEffect`: DOM changes queued for the webview
//! - `NoticeBuffer`: notices and log lines shown to the user

mod notice;
mod page;

pub use notice::{NoticeBuffer, NoticeLevel};
pub use page::{PageBridge, PageEffect};

use crate::settings::{self, Settings};
use sharn_core::prelude::*;
use std::path::PathBuf;
use tracing::warn;

/// Global application state
pub struct AppState {
    pub session: MapSession,
    pub page: PageBridge,
    pub settings: Settings,
    pub notices: NoticeBuffer,
    /// Reads datasets, resolving relative locations next to the map
    pub fetcher: SourceFetcher,
    /// SVG markup of the map (None = not loaded)
    pub map_svg: Option<String>,
    /// Dataset loads started and not yet finished
    loads_in_flight: usize,
    /// District to open once loading has settled and the map is wired
    pub pending_district: Option<String>,
}

impl AppState {
    /// Create with loaded settings and the startup location
    pub fn new(settings: Settings, notices: NoticeBuffer, startup: &PageLocation) -> Self {
        let fetcher = match map_dir(&settings) {
            Some(dir) => SourceFetcher::new().with_base_dir(dir),
            None => SourceFetcher::new(),
        };

        let pending_district = startup.district.clone().or_else(|| {
            settings
                .restore_last_district
                .then(|| settings.last_district.clone())
                .flatten()
        });

        Self {
            session: MapSession::new(),
            page: PageBridge::new(notices.clone()),
            settings,
            notices,
            fetcher,
            map_svg: None,
            loads_in_flight: 0,
            pending_district,
        }
    }

    /// Location of the default dataset
    pub fn default_dataset(&self) -> &str {
        &self.settings.default_dataset
    }

    /// Name of the dataset in effect, for display
    pub fn dataset_label(&self) -> String {
        self.session
            .store()
            .source()
            .map_or_else(|| "no descriptions loaded".to_string(), ToString::to_string)
    }

    pub fn panel_html(&self) -> String {
        self.session.panel().to_html()
    }

    pub fn selected(&self) -> Option<&str> {
        self.session.selection().district_id()
    }

    /// Shareable location for the current dataset and district
    pub fn share_location(&self) -> String {
        let dataset = match self.session.store().source() {
            Some(DatasetSource::Url(url)) => Some(url.clone()),
            _ => None,
        };
        PageLocation {
            dataset,
            district: self.selected().map(str::to_string),
        }
        .href()
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub fn click(&mut self, district_id: &str) -> Vec<PageEffect> {
        if let Err(e) = self.session.click(district_id, &mut self.page) {
            warn!("Could not show {}: {}", district_id, e);
        }
        self.finish_selection()
    }

    pub fn hash_change(&mut self, hash: &str) -> Vec<PageEffect> {
        if let Err(e) = self.session.hash_change(hash, &mut self.page) {
            warn!("Could not open {}: {}", hash, e);
        }
        self.finish_selection()
    }

    /// The map reported its clickable regions
    pub fn set_regions(&mut self, ids: Vec<String>) -> Vec<PageEffect> {
        self.page.set_regions(ids);
        self.open_pending()
    }

    /// Apply the outcome of fetching `source`
    pub fn apply_load(&mut self, source: DatasetSource, fetched: Result<String>) -> LoadReport {
        self.session.apply_load(source, fetched, &mut self.page)
    }

    /// A file picked by the user
    pub fn load_from_text(&mut self, label: &str, text: &str) -> LoadReport {
        self.session.load_from_text(label, text, &mut self.page)
    }

    pub fn is_loading(&self) -> bool {
        self.loads_in_flight > 0
    }

    pub fn begin_load(&mut self) {
        self.loads_in_flight += 1;
    }

    /// Mark one load finished and open the startup district if it was the last
    pub fn end_load(&mut self) -> Vec<PageEffect> {
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
        self.open_pending()
    }

    /// Open the startup district once loading is done and the map is wired
    pub fn open_pending(&mut self) -> Vec<PageEffect> {
        if self.is_loading() || !self.page.has_regions() {
            return self.page.take_effects();
        }
        match self.pending_district.take() {
            Some(district) => self.hash_change(&district),
            None => self.page.take_effects(),
        }
    }

    fn finish_selection(&mut self) -> Vec<PageEffect> {
        let selected = self.session.selection().district_id().map(str::to_string);
        if self.settings.remember_district(selected.as_deref())
            && let Err(e) = settings::save_settings(&self.settings)
        {
            warn!("Failed to save settings: {}", e);
        }
        self.page.take_effects()
    }
}

/// Directory holding the map, which relative dataset locations are read from
pub fn map_dir(settings: &Settings) -> Option<PathBuf> {
    settings
        .map_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.to_path_buf())
}
