use jablock::services::identity_tracker::{
    IdentityTracker, IdentityTrackerTrait, ResourceKind,
};
use jablock::types::dom::ElementNode;

// === Identity derivation precedence ===

#[test]
fn test_identity_prefers_element_id() {
    let tracker = IdentityTracker::new();
    let el = ElementNode::new("div")
        .with_id("ad-slot-3")
        .with_class("video-ads")
        .with_text("Advertisement");
    let identity = tracker.identify_element(&el, ".video-ads");
    assert_eq!(identity.as_str(), "ad-slot-3");
}

#[test]
fn test_identity_falls_back_to_class_string() {
    let tracker = IdentityTracker::new();
    let el = ElementNode::new("div")
        .with_class("video-ads")
        .with_class("overlay")
        .with_text("Advertisement");
    let identity = tracker.identify_element(&el, ".video-ads");
    assert_eq!(identity.as_str(), "video-ads overlay");
}

#[test]
fn test_identity_empty_id_is_skipped() {
    let tracker = IdentityTracker::new();
    let mut el = ElementNode::new("div").with_class("video-ads");
    el.id = Some(String::new());
    let identity = tracker.identify_element(&el, ".video-ads");
    assert_eq!(identity.as_str(), "video-ads");
}

#[test]
fn test_identity_fingerprint_uses_hint_and_truncated_text() {
    let tracker = IdentityTracker::new();
    let long_text = "x".repeat(80);
    let el = ElementNode::new("div").with_text(&long_text);
    let identity = tracker.identify_element(&el, ".video-ads");
    let expected = format!(".video-ads{}", "x".repeat(50));
    assert_eq!(identity.as_str(), expected);
}

#[test]
fn test_identity_fingerprint_short_text_untruncated() {
    let tracker = IdentityTracker::new();
    let el = ElementNode::new("div").with_text("Skip Ad");
    let identity = tracker.identify_element(&el, ".skip");
    assert_eq!(identity.as_str(), ".skipSkip Ad");
}

// === Resource identities ===

#[test]
fn test_resource_identity_prefixes() {
    let tracker = IdentityTracker::new();
    assert_eq!(
        tracker
            .identify_resource(ResourceKind::Iframe, "https://doubleclick.net/f")
            .as_str(),
        "iframe_https://doubleclick.net/f"
    );
    assert_eq!(
        tracker
            .identify_resource(ResourceKind::Link, "https://doubleclick.net/f")
            .as_str(),
        "link_https://doubleclick.net/f"
    );
    assert_eq!(
        tracker
            .identify_resource(ResourceKind::SkipControl, "Skip Ad")
            .as_str(),
        "skip_Skip Ad"
    );
}

#[test]
fn test_kinds_do_not_collide_on_shared_locator() {
    let mut tracker = IdentityTracker::new();
    let iframe = tracker.identify_resource(ResourceKind::Iframe, "https://doubleclick.net/f");
    let link = tracker.identify_resource(ResourceKind::Link, "https://doubleclick.net/f");
    assert!(tracker.observe(iframe));
    assert!(tracker.observe(link));
    assert_eq!(tracker.seen_count(), 2);
}

// === Seen-set semantics ===

#[test]
fn test_observe_returns_true_exactly_once() {
    let mut tracker = IdentityTracker::new();
    let el = ElementNode::new("div").with_id("ad-1");
    let identity = tracker.identify_element(&el, "#ad-1");
    assert!(tracker.observe(identity.clone()));
    assert!(!tracker.observe(identity.clone()));
    assert!(!tracker.observe(identity));
    assert_eq!(tracker.seen_count(), 1);
}

#[test]
fn test_is_new_and_mark_seen() {
    let mut tracker = IdentityTracker::new();
    let identity = tracker.identify_resource(ResourceKind::Iframe, "u");
    assert!(tracker.is_new(&identity));
    tracker.mark_seen(identity.clone());
    assert!(!tracker.is_new(&identity));
}

#[test]
fn test_derivation_is_side_effect_free() {
    let tracker = IdentityTracker::new();
    let el = ElementNode::new("div").with_id("ad-1");
    let _ = tracker.identify_element(&el, "#ad-1");
    let _ = tracker.identify_resource(ResourceKind::Link, "u");
    assert_eq!(tracker.seen_count(), 0);
}

#[test]
fn test_separate_trackers_do_not_share_state() {
    let mut first = IdentityTracker::new();
    let mut second = IdentityTracker::new();
    let identity = first.identify_resource(ResourceKind::Iframe, "u");
    assert!(first.observe(identity.clone()));
    assert!(second.observe(identity));
}
