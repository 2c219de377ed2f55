//! Bottom status bar component

use crate::notice_bar::use_notice_version;
use crate::state::AppState;
use dioxus::prelude::*;

/// Application version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bottom status bar showing the dataset in effect and the latest log line
#[component]
pub fn StatusBar() -> Element {
    let state = use_context::<Signal<AppState>>();
    let notices = state.read().notices.clone();
    let version = use_notice_version(notices.clone());

    let (dataset, loading) = {
        let s = state.read();
        (s.dataset_label(), s.is_loading())
    };

    let _ = version();
    let latest = notices.latest_line();

    rsx! {
        div { class: "status-bar",
            span { class: "status-item", "{dataset}" }
            if loading {
                span { class: "status-item loading", "Loading…" }
            }
            if let Some(line) = latest {
                span { class: "status-item {line.level.css_class()}", "{line.message}" }
            }
            span { class: "status-item version", "v{VERSION}" }
        }
    }
}
