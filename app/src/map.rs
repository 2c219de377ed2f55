//! Map panel: the SVG city map and its event channel

use crate::js_interop::{self, MapEvent};
use crate::state::AppState;
use dioxus::prelude::*;
use tracing::debug;

/// The clickable city map
#[component]
pub fn MapPanel() -> Element {
    let mut state = use_context::<Signal<AppState>>();

    // Region clicks, fragment changes and the region list arrive from JS
    use_effect(move || {
        let eval = js_interop::wire_map();

        spawn(async move {
            let mut eval = eval;
            loop {
                match eval.recv::<serde_json::Value>().await {
                    Ok(msg) => {
                        let event = match serde_json::from_value::<MapEvent>(msg) {
                            Ok(event) => event,
                            Err(e) => {
                                debug!("Ignoring map message: {}", e);
                                continue;
                            }
                        };
                        let effects = match event {
                            MapEvent::Regions { ids } => {
                                debug!("Map has {} regions", ids.len());
                                state.write().set_regions(ids)
                            }
                            MapEvent::Click { id } => state.write().click(&id),
                            MapEvent::Hash { hash } => state.write().hash_change(&hash),
                        };
                        js_interop::apply_effects(effects).await;
                    }
                    Err(_) => {
                        // Channel closed, stop listening
                        break;
                    }
                }
            }
        });
    });

    let svg = state.read().map_svg.clone();
    let map_path = state.read().settings.map_path.display().to_string();

    rsx! {
        div { class: "panel map-panel",
            if let Some(svg) = svg {
                div { id: "map", dangerous_inner_html: "{svg}" }
            } else {
                div { class: "map-missing",
                    p { "No map found at {map_path}." }
                    p { "Pass --map <file.svg> or set map_path in settings.json." }
                }
            }
        }
    }
}
