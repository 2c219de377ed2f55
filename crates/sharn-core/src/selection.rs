//! Selection controller
//!
//! Owns the single selected-district state and keeps the map highlight, the
//! permalink and the info panel consistent with it. Clicks toggle, fragment
//! navigation always (re)selects, and data reloads re-render in place.

use crate::error::Result;
use crate::location::Permalink;
use crate::render::{InfoPanel, Renderer};
use crate::resolve::resolve;
use crate::sanitize::{MarkdownSanitizer, TextRenderer};
use crate::store::DescriptionStore;
use tracing::{debug, warn};

/// Which district, if any, is selected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing selected; the help view is shown
    #[default]
    None,
    Selected(String),
}

impl Selection {
    pub fn district_id(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Selected(id) => Some(id),
        }
    }
}

/// Result of a selection event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Selected(String),
    Deselected,
    /// Re-rendered without changing the selection
    Refreshed,
    Unchanged,
}

/// The page around the info panel: map regions, permalink and notices
pub trait MapView {
    /// Whether the map has a clickable region with this identifier
    fn has_region(&self, district_id: &str) -> bool;

    /// Highlight or un-highlight a region
    fn set_region_active(&mut self, district_id: &str, active: bool);

    /// Point the page's permalink at a district
    fn set_permalink(&mut self, permalink: &Permalink);

    /// Show a blocking notice to the user
    fn notify(&mut self, message: &str);
}

/// State machine over `{ None, Selected(id) }`
pub struct SelectionController<T: TextRenderer = MarkdownSanitizer> {
    selection: Selection,
    renderer: Renderer<T>,
    panel: InfoPanel,
}

impl SelectionController<MarkdownSanitizer> {
    pub fn new() -> Self {
        Self::with_renderer(Renderer::new())
    }
}

impl Default for SelectionController<MarkdownSanitizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TextRenderer> SelectionController<T> {
    pub fn with_renderer(renderer: Renderer<T>) -> Self {
        let panel = renderer.help_panel();
        Self {
            selection: Selection::None,
            renderer,
            panel,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selection.district_id()
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn renderer(&self) -> &Renderer<T> {
        &self.renderer
    }

    /// A map region was clicked.
    ///
    /// Clicking the selected district again deselects it and shows help.
    pub fn click(
        &mut self,
        district_id: &str,
        store: &DescriptionStore,
        view: &mut impl MapView,
    ) -> Result<Transition> {
        if self.selected_id() == Some(district_id) {
            self.deselect(view);
            return Ok(Transition::Deselected);
        }
        self.select(district_id, store, view)
    }

    /// The URL fragment changed.
    ///
    /// A known district is selected even if it already is; empty or unknown
    /// hashes leave everything as it was.
    pub fn hash_change(
        &mut self,
        hash: &str,
        store: &DescriptionStore,
        view: &mut impl MapView,
    ) -> Result<Transition> {
        let Some(district_id) = Permalink::parse_hash(hash) else {
            return Ok(Transition::Unchanged);
        };
        if !view.has_region(district_id) {
            debug!("Ignoring hash for unknown district {}", district_id);
            return Ok(Transition::Unchanged);
        }
        self.select(district_id, store, view)
    }

    /// Re-render the current state after the dataset changed (or failed to)
    pub fn external_data_reload(&mut self, store: &DescriptionStore) -> Result<Transition> {
        match &self.selection {
            Selection::None => {
                self.renderer.show_help(&mut self.panel);
                Ok(Transition::Refreshed)
            }
            Selection::Selected(id) => {
                let resolved = resolve(id, store, self.renderer.text()).inspect_err(|e| {
                    warn!("Could not re-render {}: {}", id, e);
                })?;
                self.renderer.render(&mut self.panel, &resolved);
                Ok(Transition::Refreshed)
            }
        }
    }

    /// Clear the selection and show help
    pub fn deselect(&mut self, view: &mut impl MapView) {
        if let Selection::Selected(previous) = &self.selection {
            view.set_region_active(previous, false);
        }
        self.selection = Selection::None;
        self.renderer.show_help(&mut self.panel);
    }

    /// Resolve first, then switch highlight, state, permalink and panel
    /// together so a failed resolution changes nothing.
    fn select(
        &mut self,
        district_id: &str,
        store: &DescriptionStore,
        view: &mut impl MapView,
    ) -> Result<Transition> {
        let resolved = resolve(district_id, store, self.renderer.text()).inspect_err(|e| {
            warn!("Not rendering {}: {}", district_id, e);
        })?;

        if let Selection::Selected(previous) = &self.selection
            && previous != district_id
        {
            view.set_region_active(previous, false);
        }
        view.set_region_active(district_id, true);
        self.selection = Selection::Selected(district_id.to_string());
        view.set_permalink(&Permalink::for_district(district_id));
        self.renderer.render(&mut self.panel, &resolved);

        Ok(Transition::Selected(district_id.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::ErrorKind;
    use crate::store::DatasetSource;
    use std::collections::BTreeSet;

    /// Map stand-in that records what the controller did to it
    #[derive(Default)]
    pub(crate) struct RecordingView {
        pub regions: BTreeSet<String>,
        pub active: BTreeSet<String>,
        pub permalink: Option<String>,
        pub notices: Vec<String>,
    }

    impl RecordingView {
        pub(crate) fn with_regions(ids: &[&str]) -> Self {
            Self {
                regions: ids.iter().map(|s| (*s).to_string()).collect(),
                ..Self::default()
            }
        }
    }

    impl MapView for RecordingView {
        fn has_region(&self, district_id: &str) -> bool {
            self.regions.contains(district_id)
        }

        fn set_region_active(&mut self, district_id: &str, active: bool) {
            if active {
                self.active.insert(district_id.to_string());
            } else {
                self.active.remove(district_id);
            }
        }

        fn set_permalink(&mut self, permalink: &Permalink) {
            self.permalink = Some(permalink.href());
        }

        fn notify(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    pub(crate) const DATA: &str = r#"{
        "central": { "name": "Central Plateau", "description": "" },
        "cliffside": { "name": "Cliffside", "description": "" },
        "C1": {
            "upper": { "name": "Skyway", "description": "" },
            "middle": { "name": "Ring", "description": "" },
            "lower": { "name": "Underside", "description": "" }
        },
        "grayflood": { "name": "Grayflood", "description": "Wet" }
    }"#;

    fn store() -> DescriptionStore {
        let mut store = DescriptionStore::new();
        store.load_from_text(DATA, DatasetSource::Default).unwrap();
        store
    }

    #[test]
    fn test_starts_with_help() {
        let controller = SelectionController::new();
        assert_eq!(controller.selection(), &Selection::None);
        assert!(controller.panel().is_help());
    }

    #[test]
    fn test_click_selects() {
        let store = store();
        let mut view = RecordingView::with_regions(&["C1", "grayflood"]);
        let mut controller = SelectionController::new();

        let transition = controller.click("C1", &store, &mut view).unwrap();
        assert_eq!(transition, Transition::Selected("C1".into()));
        assert_eq!(controller.selected_id(), Some("C1"));
        assert_eq!(view.permalink.as_deref(), Some("#C1"));
        assert_eq!(view.active.iter().collect::<Vec<_>>(), vec!["C1"]);
        assert!(!controller.panel().is_help());
    }

    #[test]
    fn test_switch_keeps_one_active() {
        let store = store();
        let mut view = RecordingView::with_regions(&["C1", "grayflood"]);
        let mut controller = SelectionController::new();

        controller.click("C1", &store, &mut view).unwrap();
        controller.click("grayflood", &store, &mut view).unwrap();
        assert_eq!(view.active.iter().collect::<Vec<_>>(), vec!["grayflood"]);
        assert_eq!(view.permalink.as_deref(), Some("#grayflood"));
    }

    #[test]
    fn test_second_click_toggles_off() {
        let store = store();
        let mut view = RecordingView::with_regions(&["C1"]);
        let mut controller = SelectionController::new();

        controller.click("C1", &store, &mut view).unwrap();
        let transition = controller.click("C1", &store, &mut view).unwrap();
        assert_eq!(transition, Transition::Deselected);
        assert_eq!(controller.selection(), &Selection::None);
        assert!(controller.panel().is_help());
        assert!(view.active.is_empty());
    }

    #[test]
    fn test_hash_never_toggles_off() {
        let store = store();
        let mut view = RecordingView::with_regions(&["C1"]);
        let mut controller = SelectionController::new();

        controller.hash_change("#C1", &store, &mut view).unwrap();
        controller.hash_change("#C1", &store, &mut view).unwrap();
        assert_eq!(controller.selected_id(), Some("C1"));
        assert!(view.active.contains("C1"));
    }

    #[test]
    fn test_unknown_or_empty_hash_is_ignored() {
        let store = store();
        let mut view = RecordingView::with_regions(&["C1"]);
        let mut controller = SelectionController::new();
        controller.click("C1", &store, &mut view).unwrap();

        assert_eq!(controller.hash_change("", &store, &mut view).unwrap(), Transition::Unchanged);
        assert_eq!(
            controller.hash_change("#Q77", &store, &mut view).unwrap(),
            Transition::Unchanged
        );
        assert_eq!(controller.selected_id(), Some("C1"));
    }

    #[test]
    fn test_missing_data_changes_nothing() {
        let store = store();
        let mut view = RecordingView::with_regions(&["C1", "C2"]);
        let mut controller = SelectionController::new();
        controller.click("C1", &store, &mut view).unwrap();
        let before = controller.panel().clone();

        let err = controller.click("C2", &store, &mut view).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingData);
        assert_eq!(controller.selected_id(), Some("C1"));
        assert_eq!(controller.panel(), &before);
        assert_eq!(view.permalink.as_deref(), Some("#C1"));
        assert_eq!(view.active.iter().collect::<Vec<_>>(), vec!["C1"]);
    }

    #[test]
    fn test_reload_re_renders_selection() {
        let mut store = store();
        let mut view = RecordingView::with_regions(&["grayflood"]);
        let mut controller = SelectionController::new();
        controller.click("grayflood", &store, &mut view).unwrap();

        store
            .load_from_text(
                r#"{ "cliffside": { "name": "The Cliffs", "description": "" },
                     "grayflood": { "name": "Grayflood", "description": "Drier now" } }"#,
                DatasetSource::Url("new.json".into()),
            )
            .unwrap();
        controller.external_data_reload(&store).unwrap();

        let html = controller.panel().to_html();
        assert!(html.contains("Drier now"));
        assert_eq!(controller.selected_id(), Some("grayflood"));
    }

    #[test]
    fn test_reload_without_selection_shows_help() {
        let store = store();
        let mut controller = SelectionController::new();
        let transition = controller.external_data_reload(&store).unwrap();
        assert_eq!(transition, Transition::Refreshed);
        assert!(controller.panel().is_help());
    }
}
