//! Per-page composition: one loaded page's scanner, dedup state, and scan
//! scheduling, owned exclusively by that page context and destroyed on
//! navigation. Nothing here is shared across contexts except the read-only
//! settings snapshot.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use uuid::Uuid;

use crate::managers::counter_aggregator::TabId;
use crate::services::content_scanner::{BlockEventSink, ContentScanner};
use crate::services::reactive_loop::{LoopState, ReactiveLoop, ScanTrigger};
use crate::types::dom::PageDocument;
use crate::types::message::MessageResponse;
use crate::types::scan::{PageCategory, ScanOutcome};
use crate::types::settings::BlockerSettings;

/// One loaded page's isolated engine state.
pub struct PageContext {
    id: String,
    tab_id: TabId,
    category: PageCategory,
    document: PageDocument,
    scanner: ContentScanner,
    reactive: ReactiveLoop,
    /// Live settings snapshot shared with the settings engine subscription.
    settings: Arc<RwLock<BlockerSettings>>,
}

impl PageContext {
    pub fn new(
        tab_id: TabId,
        document: PageDocument,
        settings: Arc<RwLock<BlockerSettings>>,
    ) -> Self {
        let category = PageCategory::for_hostname(document.hostname());
        Self {
            id: Uuid::new_v4().to_string(),
            tab_id,
            category,
            document,
            scanner: ContentScanner::new(),
            reactive: ReactiveLoop::new(category),
            settings,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    pub fn category(&self) -> PageCategory {
        self.category
    }

    pub fn state(&self) -> LoopState {
        self.reactive.state()
    }

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut PageDocument {
        &mut self.document
    }

    pub fn reactive(&self) -> &ReactiveLoop {
        &self.reactive
    }

    /// Reads the persisted enabled flag and starts (or parks) the loop.
    pub fn initialize(&mut self, now: Instant) {
        self.reactive.begin_loading();
        let enabled = self
            .settings
            .read()
            .map(|s| s.is_enabled)
            .unwrap_or(true);
        self.reactive.set_enabled(enabled, now);
    }

    /// Handles a `toggleBlocking` message addressed to this context.
    pub fn handle_toggle(&mut self, enabled: bool, now: Instant) -> MessageResponse {
        self.reactive.set_enabled(enabled, now);
        MessageResponse::ack("toggled")
    }

    pub fn on_mutation(&mut self, added_nodes: usize, now: Instant) {
        self.reactive.on_mutation(added_nodes, now);
    }

    pub fn poll(&mut self, now: Instant) -> Option<ScanTrigger> {
        self.reactive.poll(now)
    }

    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.reactive.next_deadline(now)
    }

    /// Runs one scan pass with the current whitelist snapshot. A poisoned
    /// settings lock degrades to an empty whitelist rather than failing the
    /// scan.
    pub fn run_scan(&mut self, sink: &mut dyn BlockEventSink) -> ScanOutcome {
        let whitelist = self
            .settings
            .read()
            .map(|s| s.whitelist_urls.clone())
            .unwrap_or_default();
        self.scanner
            .scan(&mut self.document, self.category, &whitelist, sink)
    }
}
