//! Top toolbar: dataset loading and the permalink

use crate::loader;
use crate::state::AppState;
use dioxus::prelude::*;
use sharn_core::location::Permalink;
use sharn_core::store::DatasetSource;
use tracing::{info, warn};

/// Top toolbar with dataset operations and the current permalink
#[component]
pub fn Toolbar() -> Element {
    let state = use_context::<Signal<AppState>>();

    rsx! {
        div { class: "toolbar",
            div { class: "toolbar-title", "Sharn" }

            DatasetOperations { state }

            PermalinkDisplay { state }
        }
    }
}

/// Load JSON and Reload default
#[component]
fn DatasetOperations(state: Signal<AppState>) -> Element {
    let loading = state.read().is_loading();

    rsx! {
        div { class: "toolbar-group",
            ToolbarButton {
                title: "Load a description file from disk",
                label: "Load JSON…",
                onclick: move |_| {
                    spawn(async move {
                        if let Some(file) = rfd::AsyncFileDialog::new()
                            .add_filter("Description files", &["json"])
                            .pick_file()
                            .await
                        {
                            loader::load_file(state, file).await;
                        }
                    });
                }
            }
            ToolbarButton {
                title: "Load the default description file again",
                label: "Reload default",
                class: if loading { "busy" } else { "" },
                onclick: move |_| {
                    spawn(loader::load(state, DatasetSource::Default));
                }
            }
        }
    }
}

/// The selected district's permalink with a copy button
#[component]
fn PermalinkDisplay(state: Signal<AppState>) -> Element {
    let (permalink, share) = {
        let s = state.read();
        (
            s.selected().map(|id| Permalink::for_district(id).href()),
            s.share_location(),
        )
    };

    rsx! {
        div { class: "toolbar-group permalink",
            if let Some(permalink) = permalink {
                a { class: "permalink-link", href: "{permalink}", "{permalink}" }
                ToolbarButton {
                    title: "Copy a link to this district",
                    label: "Copy link",
                    onclick: move |_| copy_to_clipboard(&share)
                }
            }
        }
    }
}

/// Reusable toolbar button component
#[component]
fn ToolbarButton(
    title: &'static str,
    label: &'static str,
    onclick: EventHandler<MouseEvent>,
    #[props(default = "")] class: &'static str,
) -> Element {
    let button_class = if class.is_empty() {
        "toolbar-button".to_string()
    } else {
        format!("toolbar-button {}", class)
    };

    rsx! {
        button {
            class: "{button_class}",
            title: "{title}",
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}

fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => info!("Copied {}", text),
        Err(e) => warn!("Could not copy link: {}", e),
    }
}
