//! Info box showing the selected district or the help text

use crate::state::AppState;
use dioxus::prelude::*;

/// Rendered district panel; the HTML is sanitized by the atlas
#[component]
pub fn InfoBox() -> Element {
    let state = use_context::<Signal<AppState>>();
    let html = state.read().panel_html();

    rsx! {
        div { class: "panel info-panel",
            div { id: "info", dangerous_inner_html: "{html}" }
        }
    }
}
