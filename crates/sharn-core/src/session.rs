//! Map session - the owned state of one open map page
//!
//! Bundles the description store with the selection controller and applies
//! the loading rules: replace on success, keep the previous data on failure,
//! notify the user, fall back to the default dataset only when nothing has
//! ever loaded, and re-render the selection after every attempt.
//!
//! Loads are not sequenced. If two fetches are in flight the one that
//! completes last wins, whatever order they were started in.

use crate::error::{Error, Result};
use crate::fetch::{Fetch, fetch_source};
use crate::location::PageLocation;
use crate::render::{InfoPanel, Renderer};
use crate::sanitize::{MarkdownSanitizer, TextRenderer};
use crate::selection::{MapView, Selection, SelectionController, Transition};
use crate::store::{DatasetSource, DescriptionStore};
use tracing::warn;

/// What happened during one load attempt
#[derive(Debug)]
pub struct LoadReport {
    pub source: DatasetSource,
    /// Load or parse failure, already shown to the user
    pub error: Option<Error>,
    /// Source the caller should load next, if a fallback is due
    pub fallback: Option<DatasetSource>,
    /// Failure while re-rendering the selection against the store
    pub render_error: Option<Error>,
}

impl LoadReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Store plus selection for a single map page
pub struct MapSession<T: TextRenderer = MarkdownSanitizer> {
    store: DescriptionStore,
    controller: SelectionController<T>,
}

impl MapSession<MarkdownSanitizer> {
    pub fn new() -> Self {
        Self::with_renderer(Renderer::new())
    }
}

impl Default for MapSession<MarkdownSanitizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TextRenderer> MapSession<T> {
    pub fn with_renderer(renderer: Renderer<T>) -> Self {
        Self {
            store: DescriptionStore::new(),
            controller: SelectionController::with_renderer(renderer),
        }
    }

    pub fn store(&self) -> &DescriptionStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        self.controller.selection()
    }

    pub fn panel(&self) -> &InfoPanel {
        self.controller.panel()
    }

    pub fn controller(&self) -> &SelectionController<T> {
        &self.controller
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Apply the outcome of fetching `source`.
    ///
    /// `fetched` is the payload text or the error that prevented getting it.
    pub fn apply_load(
        &mut self,
        source: DatasetSource,
        fetched: Result<String>,
        view: &mut impl MapView,
    ) -> LoadReport {
        let outcome =
            fetched.and_then(|text| self.store.load_from_text(&text, source.clone()));

        let error = outcome.err();
        if let Some(err) = &error {
            warn!("Loading {} failed: {}", source, err);
            view.notify(&err.to_string());
        }

        let fallback = (error.is_some() && !self.store.has_loaded() && !source.is_default())
            .then_some(DatasetSource::Default);

        let render_error = self.controller.external_data_reload(&self.store).err();

        LoadReport {
            source,
            error,
            fallback,
            render_error,
        }
    }

    /// Parse a payload handed over directly, e.g. an uploaded file
    pub fn load_from_text(
        &mut self,
        label: &str,
        json_text: &str,
        view: &mut impl MapView,
    ) -> LoadReport {
        self.apply_load(
            DatasetSource::Text {
                label: label.to_string(),
            },
            Ok(json_text.to_string()),
            view,
        )
    }

    /// Fetch and apply a source, following at most one fallback to the
    /// default dataset. Returns a report per attempt.
    pub async fn load(
        &mut self,
        source: DatasetSource,
        fetcher: &impl Fetch,
        default_location: &str,
        view: &mut impl MapView,
    ) -> Vec<LoadReport> {
        let mut reports = Vec::new();
        let mut next = Some(source);

        while let Some(source) = next.take() {
            let fetched = fetch_source(fetcher, &source, default_location).await;
            let report = self.apply_load(source, fetched, view);
            next = report.fallback.clone();
            reports.push(report);
        }

        reports
    }

    /// Startup sequence: load the dataset the location asks for (or the
    /// default), then select the district named by its fragment.
    pub async fn start(
        &mut self,
        location: &PageLocation,
        fetcher: &impl Fetch,
        default_location: &str,
        view: &mut impl MapView,
    ) -> Vec<LoadReport> {
        let reports = self
            .load(location.startup_source(), fetcher, default_location, view)
            .await;

        if let Some(district) = &location.district
            && let Err(e) = self.hash_change(district, view)
        {
            warn!("Could not open #{}: {}", district, e);
        }

        reports
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn click(&mut self, district_id: &str, view: &mut impl MapView) -> Result<Transition> {
        self.controller.click(district_id, &self.store, view)
    }

    pub fn hash_change(&mut self, hash: &str, view: &mut impl MapView) -> Result<Transition> {
        self.controller.hash_change(hash, &self.store, view)
    }

    pub fn deselect(&mut self, view: &mut impl MapView) {
        self.controller.deselect(view);
    }

    pub fn external_data_reload(&mut self) -> Result<Transition> {
        self.controller.external_data_reload(&self.store)
    }
}
