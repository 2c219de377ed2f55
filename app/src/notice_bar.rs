//! Blocking notice banner for load and parse failures

use crate::state::{AppState, NoticeBuffer};
use dioxus::prelude::*;

/// How often the notice buffer is checked for new entries
const POLL_INTERVAL_MS: u64 = 200;

/// Signal that changes whenever something is pushed to the buffer
pub fn use_notice_version(notices: NoticeBuffer) -> Signal<u64> {
    let mut version = use_signal(|| notices.version());

    use_hook(move || {
        spawn(async move {
            loop {
                tokio::time::sleep(tokio::time::Duration::from_millis(POLL_INTERVAL_MS)).await;
                let current = notices.version();
                if current != *version.peek() {
                    version.set(current);
                }
            }
        })
    });

    version
}

/// Banner showing the newest undismissed notice
#[component]
pub fn NoticeBar() -> Element {
    let state = use_context::<Signal<AppState>>();
    let notices = state.read().notices.clone();
    let version = use_notice_version(notices.clone());
    let mut dismissed = use_signal(|| 0_u64);

    // Re-read when the buffer or the dismissal changes
    let _ = (version(), dismissed());
    let Some(alert) = notices.pending_alert() else {
        return rsx! {};
    };

    rsx! {
        div { class: "notice-bar {alert.level.css_class()}",
            span { class: "notice-message", "{alert.message}" }
            button {
                class: "notice-dismiss",
                title: "Dismiss",
                onclick: move |_| {
                    notices.dismiss(alert.id);
                    dismissed.set(alert.id);
                },
                "OK"
            }
        }
    }
}
