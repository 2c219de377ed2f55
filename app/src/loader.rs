//! Dataset and map loading
//!
//! Fetches happen with the state unlocked; only applying the result takes
//! the write lock. Loads are not sequenced against each other, but the
//! startup district waits until none is in flight.

use crate::js_interop;
use crate::state::AppState;
use dioxus::prelude::*;
use sharn_core::fetch::fetch_source;
use sharn_core::store::DatasetSource;
use tracing::{info, warn};

/// Fetch and apply `source`, following the default-dataset fallback, then
/// open any pending startup district.
pub async fn load(mut state: Signal<AppState>, source: DatasetSource) {
    let (fetcher, default_location) = {
        let mut s = state.write();
        s.begin_load();
        (s.fetcher.clone(), s.default_dataset().to_string())
    };

    let mut next = Some(source);
    while let Some(source) = next.take() {
        let fetched = fetch_source(&fetcher, &source, &default_location).await;
        let report = state.write().apply_load(source, fetched);
        next = report.fallback;
    }

    let effects = state.write().end_load();
    js_interop::apply_effects(effects).await;
}

/// Read a file picked by the user and load it as a direct payload
pub async fn load_file(mut state: Signal<AppState>, file: rfd::FileHandle) {
    let label = file.file_name();
    let bytes = file.read().await;
    let text = String::from_utf8_lossy(&bytes);

    let report = state.write().load_from_text(&label, &text);
    if let Some(fallback) = report.fallback {
        load(state, fallback).await;
    }
}

/// Read the SVG map named in the settings
pub async fn load_map(mut state: Signal<AppState>) {
    let path = state.read().settings.map_path.clone();
    match tokio::fs::read_to_string(&path).await {
        Ok(svg) => {
            info!("Loaded map from {}", path.display());
            state.write().map_svg = Some(svg);
        }
        Err(e) => warn!("Could not read map {}: {}", path.display(), e),
    }
}
