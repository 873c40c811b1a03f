//! Content scanner: applies the selector catalog to a page document,
//! removes matched nodes, and emits one blocking event per newly-identified
//! ad via a [`BlockEventSink`].
//!
//! Every selector application is independently fault-isolated: a node that
//! vanished mid-pass (detached by an earlier removal) is skipped silently
//! and never aborts the rest of the scan.

use crate::services::identity_tracker::{
    AdIdentity, IdentityTracker, IdentityTrackerTrait, ResourceKind,
};
use crate::services::selector_catalog::{
    confirms_video_ad, is_ad_link_url, is_ad_network_url, looks_like_video_player,
    AD_CONTAINER_FRAGMENT, AD_LINK_WRAPPERS, AD_TEXT_MARKERS, GENERIC_AD_SELECTORS,
    OVERLAY_SELECTORS, SEARCH_EXEMPT_HOSTS, SKIP_CONTROL_SELECTORS, VIDEO_AD_SELECTORS,
};
use crate::types::dom::PageDocument;
use crate::types::scan::{PageCategory, ScanOutcome};

/// Receives one call per newly-identified blocked ad. Emission must never
/// block or fail the removal; implementations absorb delivery problems.
pub trait BlockEventSink {
    fn on_ad_blocked(&mut self);
}

impl<F: FnMut()> BlockEventSink for F {
    fn on_ad_blocked(&mut self) {
        self()
    }
}

/// Per-page-context scanner. Owns the identity tracker so dedup state lives
/// and dies with the page context.
pub struct ContentScanner {
    tracker: IdentityTracker,
}

impl ContentScanner {
    pub fn new() -> Self {
        Self {
            tracker: IdentityTracker::new(),
        }
    }

    pub fn tracker(&self) -> &IdentityTracker {
        &self.tracker
    }

    /// Runs one full scan pass.
    ///
    /// Returns a whitelisted outcome (zero removals, zero events) when the
    /// hostname contains any whitelist entry as a substring. Entries are
    /// validated upstream; no further validation happens here.
    pub fn scan(
        &mut self,
        document: &mut PageDocument,
        category: PageCategory,
        whitelist: &[String],
        sink: &mut dyn BlockEventSink,
    ) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        let hostname = document.hostname().to_string();

        if whitelist.iter().any(|entry| hostname.contains(entry.as_str())) {
            outcome.whitelisted = true;
            return outcome;
        }

        match category {
            PageCategory::VideoHosting => {
                self.scan_structural_video(document, sink, &mut outcome);
            }
            PageCategory::Generic => {
                if !SEARCH_EXEMPT_HOSTS.contains(&hostname.as_str()) {
                    self.scan_structural_generic(document, sink, &mut outcome);
                }
            }
        }

        self.scan_frames(document, sink, &mut outcome);
        self.scan_links(document, category, sink, &mut outcome);
        self.scan_skip_controls(document, sink, &mut outcome);
        self.remove_overlays(document, &mut outcome);

        outcome
    }

    /// Emits one event if `identity` has not been counted yet.
    fn count_if_new(
        &mut self,
        identity: AdIdentity,
        sink: &mut dyn BlockEventSink,
        outcome: &mut ScanOutcome,
    ) {
        if self.tracker.observe(identity) {
            outcome.events_emitted += 1;
            sink.on_ad_blocked();
        }
    }

    fn scan_structural_video(
        &mut self,
        document: &mut PageDocument,
        sink: &mut dyn BlockEventSink,
        outcome: &mut ScanOutcome,
    ) {
        for selector in VIDEO_AD_SELECTORS {
            let matches = document.query(|el| selector.matches(el));
            for node in matches {
                // A previous removal may have detached this match already.
                let element = match document.get(node) {
                    Some(el) if document.is_attached(node) => el,
                    _ => continue,
                };
                // Broad selectors need secondary confirmation before removal.
                if !confirms_video_ad(element) {
                    continue;
                }
                let identity = self
                    .tracker
                    .identify_element(element, &selector.pattern());
                self.count_if_new(identity, sink, outcome);
                if document.remove(node) {
                    outcome.removed += 1;
                }
            }
        }
    }

    fn scan_structural_generic(
        &mut self,
        document: &mut PageDocument,
        sink: &mut dyn BlockEventSink,
        outcome: &mut ScanOutcome,
    ) {
        for selector in GENERIC_AD_SELECTORS {
            let matches = document.query(|el| selector.matches(el));
            for node in matches {
                let element = match document.get(node) {
                    Some(el) if document.is_attached(node) => el,
                    _ => continue,
                };
                // Never remove the player itself on a false positive.
                if looks_like_video_player(element) {
                    continue;
                }
                let identity = self
                    .tracker
                    .identify_element(element, &selector.pattern());
                self.count_if_new(identity, sink, outcome);
                if document.remove(node) {
                    outcome.removed += 1;
                }
            }
        }

        // Broad "ad-container" fragments need textual confirmation.
        let containers = document.query(|el| {
            el.class_string().contains(AD_CONTAINER_FRAGMENT)
                || el
                    .id
                    .as_deref()
                    .map(|id| id.contains(AD_CONTAINER_FRAGMENT))
                    .unwrap_or(false)
        });
        for node in containers {
            let element = match document.get(node) {
                Some(el) if document.is_attached(node) => el,
                _ => continue,
            };
            let text = element.text.clone();
            if !AD_TEXT_MARKERS.iter().any(|marker| text.contains(marker)) {
                continue;
            }
            if looks_like_video_player(element) {
                continue;
            }
            let identity = self
                .tracker
                .identify_element(element, AD_CONTAINER_FRAGMENT);
            self.count_if_new(identity, sink, outcome);
            if document.remove(node) {
                outcome.removed += 1;
            }
        }
    }

    fn scan_frames(
        &mut self,
        document: &mut PageDocument,
        sink: &mut dyn BlockEventSink,
        outcome: &mut ScanOutcome,
    ) {
        let frames = document.query(|el| el.tag == "iframe");
        for node in frames {
            let src = match document.get(node) {
                Some(el) if document.is_attached(node) => {
                    el.attributes.get("src").cloned().unwrap_or_default()
                }
                _ => continue,
            };
            if !is_ad_network_url(&src) {
                continue;
            }
            let identity = self.tracker.identify_resource(ResourceKind::Iframe, &src);
            self.count_if_new(identity, sink, outcome);
            if document.remove(node) {
                outcome.removed += 1;
            }
        }
    }

    fn scan_links(
        &mut self,
        document: &mut PageDocument,
        category: PageCategory,
        sink: &mut dyn BlockEventSink,
        outcome: &mut ScanOutcome,
    ) {
        let links = document.query(|el| el.tag == "a");
        for node in links {
            let href = match document.get(node) {
                Some(el) if document.is_attached(node) => {
                    el.attributes.get("href").cloned().unwrap_or_default()
                }
                _ => continue,
            };
            if !is_ad_link_url(&href) {
                continue;
            }
            // On video-hosting pages the promoted wrapper goes too.
            if category == PageCategory::VideoHosting {
                for wrapper in AD_LINK_WRAPPERS {
                    if let Some(ancestor) = document.closest(node, |el| wrapper.matches(el)) {
                        if document.remove(ancestor) {
                            outcome.removed += 1;
                        }
                    }
                }
            }
            let identity = self.tracker.identify_resource(ResourceKind::Link, &href);
            self.count_if_new(identity, sink, outcome);
            if document.remove(node) {
                outcome.removed += 1;
            }
        }
    }

    fn scan_skip_controls(
        &mut self,
        document: &mut PageDocument,
        sink: &mut dyn BlockEventSink,
        outcome: &mut ScanOutcome,
    ) {
        for selector in SKIP_CONTROL_SELECTORS {
            let controls = document.query(|el| selector.matches(el));
            for node in controls {
                let element = match document.get(node) {
                    Some(el) if document.is_attached(node) => el,
                    _ => continue,
                };
                let identity = if element.id.is_some() || !element.classes.is_empty() {
                    self.tracker.identify_element(element, &selector.pattern())
                } else {
                    self.tracker
                        .identify_resource(ResourceKind::SkipControl, &element.text)
                };
                self.count_if_new(identity, sink, outcome);
                // Activation happens every pass; only the count is gated.
                document.click(node);
            }
        }
    }

    fn remove_overlays(&mut self, document: &mut PageDocument, outcome: &mut ScanOutcome) {
        // Cosmetic and high-frequency: removed without identity tracking or
        // event emission.
        for selector in OVERLAY_SELECTORS {
            let overlays = document.query(|el| selector.matches(el));
            for node in overlays {
                if document.remove(node) {
                    outcome.removed += 1;
                }
            }
        }
    }
}

impl Default for ContentScanner {
    fn default() -> Self {
        Self::new()
    }
}
