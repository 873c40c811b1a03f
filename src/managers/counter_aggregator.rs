//! Cross-tab counter aggregator.
//!
//! A single owned instance per browser session holds the per-tab counters
//! and the running total. Page contexts only ever send delta events; they
//! never touch the maps directly. All mutation happens through `&mut self`,
//! so operations cannot interleave their read-modify-write sequences; the
//! runtime wrapper serializes concurrent senders onto this instance.
//!
//! Known limitation, preserved deliberately: a per-tab counter wraps to 0 at
//! the cap while the global total keeps every increment, so after wraps the
//! total and the sum of live per-tab counters diverge, and closing a wrapped
//! tab gives back only the post-wrap remainder.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::services::session_store::SessionStoreTrait;
use crate::types::errors::StorageError;

/// Host-assigned tab identifier.
pub type TabId = u32;

/// Per-tab counters live in `[0, TAB_COUNT_CAP)`; reaching the cap wraps the
/// counter to 0.
pub const TAB_COUNT_CAP: u32 = 62;

/// Minimum spacing between throttled persistence writes.
pub const PERSIST_THROTTLE: Duration = Duration::from_secs(2);

/// Trait defining the aggregator's operations.
pub trait CounterAggregatorTrait {
    /// Records one blocking event. `None` means the event arrived without
    /// tab attribution and is silently ignored.
    fn on_increment(&mut self, sender_tab: Option<TabId>, now: Instant);
    /// A tab was closed: give back its last known counter value.
    fn on_tab_removed(&mut self, tab: TabId, now: Instant);
    /// Clears all state and persists the reset immediately.
    fn on_reset(&mut self);
    /// Browser cold start: per-tab counters and the total start over.
    fn on_session_start(&mut self);
    /// Current live total, answered from memory with no storage round-trip.
    fn total(&self) -> u64;
    fn tab_count(&self, tab: TabId) -> Option<u32>;
    fn tracked_tabs(&self) -> usize;
    /// Flushes a due throttled write. Returns true if a write happened.
    fn persist_due(&mut self, now: Instant) -> bool;
}

pub struct CounterAggregator<S: SessionStoreTrait> {
    store: S,
    tab_counts: HashMap<TabId, u32>,
    total: u64,
    pending_persist: Option<Instant>,
}

impl<S: SessionStoreTrait> CounterAggregator<S> {
    /// Restores the live total from the session store (default 0 on a fresh
    /// store).
    pub fn new(store: S) -> Result<Self, StorageError> {
        let total = store.load_live_count()?;
        Ok(Self {
            store,
            tab_counts: HashMap::new(),
            total,
            pending_persist: None,
        })
    }

    /// Deadline of the pending throttled write, if any. Drivers sleep until
    /// this before calling [`persist_due`](CounterAggregatorTrait::persist_due).
    pub fn pending_persist_deadline(&self) -> Option<Instant> {
        self.pending_persist
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Coalescing reschedule: a later event replaces the pending write
    /// rather than enqueuing a second one.
    fn schedule_persist(&mut self, now: Instant) {
        self.pending_persist = Some(now + PERSIST_THROTTLE);
    }

    /// Boundary events persist immediately, cancelling any pending write.
    /// Write failures are absorbed; the in-memory total stays authoritative.
    fn persist_now(&mut self) {
        self.pending_persist = None;
        let _ = self.store.save_live_count(self.total);
    }
}

impl<S: SessionStoreTrait> CounterAggregatorTrait for CounterAggregator<S> {
    fn on_increment(&mut self, sender_tab: Option<TabId>, now: Instant) {
        let tab = match sender_tab {
            Some(tab) => tab,
            // No tab attribution: no count change, no persisted write.
            None => return,
        };
        let current = self.tab_counts.get(&tab).copied().unwrap_or(0);
        let next = current + 1;
        let stored = if next >= TAB_COUNT_CAP { 0 } else { next };
        self.tab_counts.insert(tab, stored);
        // The global total keeps the increment even when the tab wraps.
        self.total += 1;
        self.schedule_persist(now);
    }

    fn on_tab_removed(&mut self, tab: TabId, _now: Instant) {
        let count = self.tab_counts.get(&tab).copied().unwrap_or(0);
        if count > 0 {
            self.total = self.total.saturating_sub(u64::from(count));
            self.tab_counts.remove(&tab);
            self.persist_now();
        }
    }

    fn on_reset(&mut self) {
        self.tab_counts.clear();
        self.total = 0;
        self.persist_now();
    }

    fn on_session_start(&mut self) {
        self.tab_counts.clear();
        self.total = 0;
        self.persist_now();
    }

    fn total(&self) -> u64 {
        self.total
    }

    fn tab_count(&self, tab: TabId) -> Option<u32> {
        self.tab_counts.get(&tab).copied()
    }

    fn tracked_tabs(&self) -> usize {
        self.tab_counts.len()
    }

    fn persist_due(&mut self, now: Instant) -> bool {
        match self.pending_persist {
            Some(deadline) if deadline <= now => {
                self.persist_now();
                true
            }
            _ => false,
        }
    }
}
