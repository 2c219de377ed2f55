//! JavaScript interop for the map page
//!
//! All `document::eval` calls live here: wiring region clicks and fragment
//! changes back into Rust, and applying queued [`PageEffect`]s to the DOM.

use crate::state::PageEffect;
use dioxus::prelude::document;
use serde::Deserialize;

/// Message sent from the page by [`wire_map`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MapEvent {
    /// The map was (re)inserted; `ids` are its clickable regions
    Regions { ids: Vec<String> },
    /// A region was clicked
    Click { id: String },
    /// `location.hash` changed
    Hash { hash: String },
}

/// Install page listeners. Receive [`MapEvent`]s from the returned handle.
pub fn wire_map() -> document::Eval {
    document::eval(
        r#"
        function reportRegions() {
            const svg = document.querySelector('#map svg');
            if (!svg || svg.dataset.wired) return;
            svg.dataset.wired = 'true';
            svg.classList.add('map');
            const ids = Array.from(svg.querySelectorAll('.districts > path'))
                .map(el => el.id)
                .filter(id => id);
            dioxus.send({ kind: 'regions', ids: ids });
        }

        document.addEventListener('click', function(e) {
            const region = e.target.closest('#map .districts > path');
            if (region && region.id) {
                dioxus.send({ kind: 'click', id: region.id });
            }
        });

        window.addEventListener('hashchange', function() {
            dioxus.send({ kind: 'hash', hash: window.location.hash });
        });

        // The SVG arrives with a later render
        reportRegions();
        const observer = new MutationObserver(reportRegions);
        observer.observe(document.body, { childList: true, subtree: true });
        "#,
    )
}

/// Apply queued DOM changes in order
pub async fn apply_effects(effects: Vec<PageEffect>) {
    if effects.is_empty() {
        return;
    }
    let _ = document::eval(&effects_script(&effects)).await;
}

fn effects_script(effects: &[PageEffect]) -> String {
    let mut js = String::new();
    for effect in effects {
        match effect {
            PageEffect::Highlight { district, active } => {
                let id = serde_json::to_string(district).unwrap_or_default();
                js.push_str(&format!(
                    "document.getElementById({id})?.classList.toggle('selected', {active});\n"
                ));
            }
            PageEffect::Permalink(href) => {
                // replaceState does not fire hashchange
                let href = serde_json::to_string(href).unwrap_or_default();
                js.push_str(&format!("history.replaceState(null, '', {href});\n"));
            }
        }
    }
    js
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_effects_script_quotes_ids() {
        let js = effects_script(&[
            PageEffect::Highlight {
                district: "C1".into(),
                active: false,
            },
            PageEffect::Highlight {
                district: "x'); alert(1); ('".into(),
                active: true,
            },
            PageEffect::Permalink("#C2".into()),
        ]);

        assert!(js.contains("getElementById(\"C1\")?.classList.toggle('selected', false)"));
        assert!(js.contains("getElementById(\"x'); alert(1); ('\")"));
        assert!(js.ends_with("history.replaceState(null, '', \"#C2\");\n"));
    }

    #[test]
    fn test_map_event_decoding() {
        let event: MapEvent =
            serde_json::from_str(r#"{ "kind": "regions", "ids": ["C1", "grayflood"] }"#).unwrap();
        assert_eq!(
            event,
            MapEvent::Regions {
                ids: vec!["C1".into(), "grayflood".into()]
            }
        );

        let event: MapEvent = serde_json::from_str(r#"{ "kind": "hash", "hash": "#C3" }"#).unwrap();
        assert_eq!(event, MapEvent::Hash { hash: "#C3".into() });
    }
}
