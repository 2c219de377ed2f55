//! The webview page as the atlas sees it
//!
//! [`PageBridge`] implements [`MapView`] by queueing DOM changes as
//! [`PageEffect`]s. Components drain the queue and apply it through
//! `js_interop` once the state lock is released.

use super::notice::NoticeBuffer;
use sharn_core::location::Permalink;
use sharn_core::selection::MapView;
use std::collections::BTreeSet;

/// A DOM change requested by the atlas
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageEffect {
    /// Add or remove the `selected` class on a map region
    Highlight { district: String, active: bool },
    /// Replace `location.hash`
    Permalink(String),
}

pub struct PageBridge {
    regions: BTreeSet<String>,
    effects: Vec<PageEffect>,
    notices: NoticeBuffer,
}

impl PageBridge {
    pub fn new(notices: NoticeBuffer) -> Self {
        Self {
            regions: BTreeSet::new(),
            effects: Vec::new(),
            notices,
        }
    }

    /// Replace the set of clickable regions reported by the map
    pub fn set_regions(&mut self, ids: impl IntoIterator<Item = String>) {
        self.regions = ids.into_iter().collect();
    }

    pub fn has_regions(&self) -> bool {
        !self.regions.is_empty()
    }

    pub fn take_effects(&mut self) -> Vec<PageEffect> {
        std::mem::take(&mut self.effects)
    }
}

impl MapView for PageBridge {
    fn has_region(&self, district_id: &str) -> bool {
        self.regions.contains(district_id)
    }

    fn set_region_active(&mut self, district_id: &str, active: bool) {
        self.effects.push(PageEffect::Highlight {
            district: district_id.to_string(),
            active,
        });
    }

    fn set_permalink(&mut self, permalink: &Permalink) {
        self.effects.push(PageEffect::Permalink(permalink.href()));
    }

    fn notify(&mut self, message: &str) {
        self.notices.alert(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects_drain_in_order() {
        let notices = NoticeBuffer::new();
        let mut page = PageBridge::new(notices.clone());
        page.set_regions(["C1".to_string(), "C2".to_string()]);

        page.set_region_active("C1", false);
        page.set_region_active("C2", true);
        page.set_permalink(&Permalink::for_district("C2"));

        assert_eq!(
            page.take_effects(),
            vec![
                PageEffect::Highlight { district: "C1".into(), active: false },
                PageEffect::Highlight { district: "C2".into(), active: true },
                PageEffect::Permalink("#C2".into()),
            ]
        );
        assert!(page.take_effects().is_empty());
    }

    #[test]
    fn test_notify_raises_alert() {
        let notices = NoticeBuffer::new();
        let mut page = PageBridge::new(notices.clone());
        page.notify("Error loading from x.json, ensure that CORS is enabled at target");
        assert!(notices.pending_alert().is_some());
    }
}
