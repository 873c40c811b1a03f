use std::time::{Duration, Instant};

use jablock::services::reactive_loop::{
    LoopState, ReactiveLoop, ScanTrigger, GENERIC_SCAN_INTERVAL, MUTATION_QUIET_WINDOW,
    VIDEO_SCAN_INTERVAL,
};
use jablock::types::scan::PageCategory;

fn active_loop(category: PageCategory, now: Instant) -> ReactiveLoop {
    let mut rl = ReactiveLoop::new(category);
    rl.begin_loading();
    rl.activate(now);
    rl
}

// === Lifecycle ===

#[test]
fn test_lifecycle_states() {
    let now = Instant::now();
    let mut rl = ReactiveLoop::new(PageCategory::Generic);
    assert_eq!(rl.state(), LoopState::Uninitialized);
    rl.begin_loading();
    assert_eq!(rl.state(), LoopState::Loading);
    rl.activate(now);
    assert_eq!(rl.state(), LoopState::Active);
    rl.set_enabled(false, now);
    assert_eq!(rl.state(), LoopState::Disabled);
    rl.set_enabled(true, now);
    assert_eq!(rl.state(), LoopState::Active);
}

#[test]
fn test_interval_follows_category() {
    assert_eq!(
        ReactiveLoop::new(PageCategory::VideoHosting).scan_interval(),
        VIDEO_SCAN_INTERVAL
    );
    assert_eq!(
        ReactiveLoop::new(PageCategory::Generic).scan_interval(),
        GENERIC_SCAN_INTERVAL
    );
}

// === Initial trigger ===

#[test]
fn test_activation_yields_one_initial_trigger() {
    let now = Instant::now();
    let mut rl = active_loop(PageCategory::VideoHosting, now);
    assert_eq!(rl.poll(now), Some(ScanTrigger::Initial));
    assert_eq!(rl.poll(now), None);
}

// === Interval trigger ===

#[test]
fn test_interval_fires_and_rearms() {
    let start = Instant::now();
    let mut rl = active_loop(PageCategory::VideoHosting, start);
    assert_eq!(rl.poll(start), Some(ScanTrigger::Initial));

    let first_due = start + VIDEO_SCAN_INTERVAL;
    assert_eq!(rl.poll(first_due - Duration::from_millis(1)), None);
    assert_eq!(rl.poll(first_due), Some(ScanTrigger::Interval));
    // Re-armed relative to the poll that consumed it.
    assert_eq!(rl.poll(first_due), None);
    assert_eq!(
        rl.poll(first_due + VIDEO_SCAN_INTERVAL),
        Some(ScanTrigger::Interval)
    );
}

// === Mutation debounce ===

#[test]
fn test_mutation_debounce_fires_after_quiet_window() {
    let start = Instant::now();
    let mut rl = active_loop(PageCategory::VideoHosting, start);
    rl.poll(start);

    rl.on_mutation(2, start);
    assert_eq!(rl.poll(start + Duration::from_millis(500)), None);
    assert_eq!(
        rl.poll(start + MUTATION_QUIET_WINDOW),
        Some(ScanTrigger::MutationDebounce)
    );
    // One-shot.
    assert_eq!(rl.poll(start + MUTATION_QUIET_WINDOW), None);
}

#[test]
fn test_mutation_debounce_cancel_and_reschedule() {
    let start = Instant::now();
    let mut rl = active_loop(PageCategory::Generic, start);
    rl.poll(start);

    rl.on_mutation(1, start);
    let second = start + Duration::from_millis(800);
    rl.on_mutation(1, second);
    // The first deadline was superseded.
    assert_eq!(rl.poll(start + MUTATION_QUIET_WINDOW), None);
    assert_eq!(
        rl.poll(second + MUTATION_QUIET_WINDOW),
        Some(ScanTrigger::MutationDebounce)
    );
}

#[test]
fn test_mutation_without_added_nodes_is_ignored() {
    let start = Instant::now();
    let mut rl = active_loop(PageCategory::Generic, start);
    rl.poll(start);

    rl.on_mutation(0, start);
    assert_eq!(rl.poll(start + MUTATION_QUIET_WINDOW), None);
}

#[test]
fn test_mutation_ignored_while_disabled() {
    let start = Instant::now();
    let mut rl = active_loop(PageCategory::Generic, start);
    rl.set_enabled(false, start);
    rl.on_mutation(5, start);
    rl.set_enabled(true, start);
    rl.poll(start); // consume Initial from re-activation
    assert_eq!(rl.poll(start + MUTATION_QUIET_WINDOW), None);
}

// === Trigger priority ===

#[test]
fn test_debounce_beats_interval_when_both_due() {
    let start = Instant::now();
    let mut rl = active_loop(PageCategory::VideoHosting, start);
    rl.poll(start);

    rl.on_mutation(1, start + Duration::from_millis(1500));
    let late = start + Duration::from_secs(3);
    assert_eq!(rl.poll(late), Some(ScanTrigger::MutationDebounce));
    assert_eq!(rl.poll(late), Some(ScanTrigger::Interval));
    assert_eq!(rl.poll(late), None);
}

// === Disable semantics ===

#[test]
fn test_disable_discards_pending_triggers() {
    let start = Instant::now();
    let mut rl = active_loop(PageCategory::VideoHosting, start);
    rl.on_mutation(1, start);
    rl.set_enabled(false, start);
    // Initial, debounce, and interval are all gone.
    assert_eq!(rl.poll(start + Duration::from_secs(10)), None);
    assert_eq!(rl.next_deadline(start), None);
}

#[test]
fn test_reenable_requests_fresh_initial_scan() {
    let start = Instant::now();
    let mut rl = active_loop(PageCategory::VideoHosting, start);
    rl.poll(start);
    rl.set_enabled(false, start);

    let later = start + Duration::from_secs(5);
    rl.set_enabled(true, later);
    assert_eq!(rl.poll(later), Some(ScanTrigger::Initial));
    assert_eq!(
        rl.poll(later + VIDEO_SCAN_INTERVAL),
        Some(ScanTrigger::Interval)
    );
}

#[test]
fn test_enable_while_active_is_noop() {
    let start = Instant::now();
    let mut rl = active_loop(PageCategory::VideoHosting, start);
    rl.poll(start);
    rl.set_enabled(true, start);
    // No second Initial.
    assert_eq!(rl.poll(start), None);
}

// === Deadline reporting ===

#[test]
fn test_next_deadline_tracks_earliest() {
    let start = Instant::now();
    let mut rl = active_loop(PageCategory::VideoHosting, start);
    // Immediate scan pending: deadline is now.
    assert_eq!(rl.next_deadline(start), Some(start));
    rl.poll(start);
    assert_eq!(rl.next_deadline(start), Some(start + VIDEO_SCAN_INTERVAL));

    rl.on_mutation(1, start);
    // Debounce (1s) comes before the interval (2s).
    assert_eq!(rl.next_deadline(start), Some(start + MUTATION_QUIET_WINDOW));
}

#[test]
fn test_poll_returns_none_before_activation() {
    let mut rl = ReactiveLoop::new(PageCategory::Generic);
    rl.begin_loading();
    assert_eq!(rl.poll(Instant::now()), None);
    assert_eq!(rl.next_deadline(Instant::now()), None);
}
