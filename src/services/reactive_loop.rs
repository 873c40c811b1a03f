//! Reactive scan scheduling for one page context.
//!
//! The loop is a deterministic state machine driven by explicit `Instant`
//! values; a runtime driver wires it to real timers. Each page context runs
//! on a single cooperative timeline, so no locking is needed here: timer
//! ticks, mutation callbacks, and toggle messages are delivered as discrete
//! tasks that never overlap a scan in progress.

use std::time::{Duration, Instant};

use crate::types::scan::PageCategory;

/// Fixed-interval scan cadence on video-hosting pages.
pub const VIDEO_SCAN_INTERVAL: Duration = Duration::from_secs(2);
/// Fixed-interval scan cadence everywhere else.
pub const GENERIC_SCAN_INTERVAL: Duration = Duration::from_secs(3);
/// Quiet period after the last observed mutation before a debounced scan.
pub const MUTATION_QUIET_WINDOW: Duration = Duration::from_secs(1);

/// Lifecycle of the per-page scanning loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Loading,
    Active,
    Disabled,
}

/// Why a scan became due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTrigger {
    /// First scan after entering Active.
    Initial,
    /// Fixed-interval timer fired.
    Interval,
    /// The mutation debounce window elapsed with no further mutations.
    MutationDebounce,
}

pub struct ReactiveLoop {
    state: LoopState,
    interval: Duration,
    immediate_pending: bool,
    next_interval_scan: Option<Instant>,
    debounce_deadline: Option<Instant>,
}

impl ReactiveLoop {
    pub fn new(category: PageCategory) -> Self {
        let interval = match category {
            PageCategory::VideoHosting => VIDEO_SCAN_INTERVAL,
            PageCategory::Generic => GENERIC_SCAN_INTERVAL,
        };
        Self {
            state: LoopState::Uninitialized,
            interval,
            immediate_pending: false,
            next_interval_scan: None,
            debounce_deadline: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn scan_interval(&self) -> Duration {
        self.interval
    }

    /// Uninitialized → Loading, while persisted settings are read.
    pub fn begin_loading(&mut self) {
        if self.state == LoopState::Uninitialized {
            self.state = LoopState::Loading;
        }
    }

    /// Enters Active: requests one immediate scan and arms the interval
    /// timer. Re-entering from Disabled re-arms from scratch; historical
    /// removals are not replayed.
    pub fn activate(&mut self, now: Instant) {
        self.state = LoopState::Active;
        self.immediate_pending = true;
        self.next_interval_scan = Some(now + self.interval);
        self.debounce_deadline = None;
    }

    /// Applies a toggle message. Disabling halts future scans but does not
    /// undo already-removed content; stale timers that still fire are
    /// discarded by the state check in [`poll`](Self::poll).
    pub fn set_enabled(&mut self, enabled: bool, now: Instant) {
        if enabled {
            if self.state != LoopState::Active {
                self.activate(now);
            }
        } else {
            self.state = LoopState::Disabled;
            self.immediate_pending = false;
            self.next_interval_scan = None;
            self.debounce_deadline = None;
        }
    }

    /// Notification from the content-container observer. Only newly-added
    /// nodes schedule a scan; the debounce is cancel-and-reschedule, so only
    /// the most recent request within the quiet window survives.
    pub fn on_mutation(&mut self, added_nodes: usize, now: Instant) {
        if self.state != LoopState::Active || added_nodes == 0 {
            return;
        }
        self.debounce_deadline = Some(now + MUTATION_QUIET_WINDOW);
    }

    /// Yields at most one due trigger and re-arms the interval timer.
    /// Returns `None` outside Active regardless of pending deadlines.
    pub fn poll(&mut self, now: Instant) -> Option<ScanTrigger> {
        if self.state != LoopState::Active {
            return None;
        }
        if self.immediate_pending {
            self.immediate_pending = false;
            return Some(ScanTrigger::Initial);
        }
        if let Some(deadline) = self.debounce_deadline {
            if deadline <= now {
                self.debounce_deadline = None;
                return Some(ScanTrigger::MutationDebounce);
            }
        }
        if let Some(due) = self.next_interval_scan {
            if due <= now {
                self.next_interval_scan = Some(now + self.interval);
                return Some(ScanTrigger::Interval);
            }
        }
        None
    }

    /// Earliest pending deadline, for a driver deciding how long to sleep.
    /// `None` when nothing is scheduled (not Active, or idle).
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        if self.state != LoopState::Active {
            return None;
        }
        if self.immediate_pending {
            return Some(now);
        }
        match (self.debounce_deadline, self.next_interval_scan) {
            (Some(d), Some(t)) => Some(d.min(t)),
            (Some(d), None) => Some(d),
            (None, Some(t)) => Some(t),
            (None, None) => None,
        }
    }
}
