//! Identity derivation and per-page deduplication of handled ads.
//!
//! Identities are best-effort fingerprints, not strong keys. Known
//! limitation: once an identity is marked seen it is never re-counted for
//! the lifetime of the page context, even if the underlying element is
//! later recreated with identical derived attributes.

use std::collections::HashSet;
use std::fmt;

use crate::types::dom::ElementNode;

/// Characters of text content folded into a fingerprint when an element has
/// neither an id nor any classes.
const FINGERPRINT_TEXT_LEN: usize = 50;

/// Opaque derived key for a handled ad element or resource.
///
/// Deterministic for the same physical element/resource within one page
/// lifetime; not unique across reloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdIdentity(String);

impl AdIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind prefix keeping resources of different kinds from colliding on a
/// shared locator fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Iframe,
    Link,
    SkipControl,
}

impl ResourceKind {
    fn prefix(self) -> &'static str {
        match self {
            ResourceKind::Iframe => "iframe_",
            ResourceKind::Link => "link_",
            ResourceKind::SkipControl => "skip_",
        }
    }
}

/// Trait defining identity derivation and seen-set operations.
pub trait IdentityTrackerTrait {
    /// Derives an identity for an element. Side-effect-free. Precedence:
    /// explicit id, then the class-list string, then a selector-tagged
    /// truncated content fingerprint.
    fn identify_element(&self, element: &ElementNode, selector_hint: &str) -> AdIdentity;
    /// Derives an identity for a resource from its kind and locator.
    fn identify_resource(&self, kind: ResourceKind, locator: &str) -> AdIdentity;
    fn is_new(&self, identity: &AdIdentity) -> bool;
    fn mark_seen(&mut self, identity: AdIdentity);
    /// Checked-then-marked in one step: returns true exactly once per
    /// identity. Membership test precedes the insertion.
    fn observe(&mut self, identity: AdIdentity) -> bool;
    fn seen_count(&self) -> usize;
}

/// Per-page-context identity tracker. Reset by dropping it with the context.
pub struct IdentityTracker {
    seen: HashSet<AdIdentity>,
}

impl IdentityTracker {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }
}

impl Default for IdentityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityTrackerTrait for IdentityTracker {
    fn identify_element(&self, element: &ElementNode, selector_hint: &str) -> AdIdentity {
        if let Some(id) = &element.id {
            if !id.is_empty() {
                return AdIdentity(id.clone());
            }
        }
        if !element.classes.is_empty() {
            return AdIdentity(element.class_string());
        }
        let fingerprint: String = element.text.chars().take(FINGERPRINT_TEXT_LEN).collect();
        AdIdentity(format!("{}{}", selector_hint, fingerprint))
    }

    fn identify_resource(&self, kind: ResourceKind, locator: &str) -> AdIdentity {
        AdIdentity(format!("{}{}", kind.prefix(), locator))
    }

    fn is_new(&self, identity: &AdIdentity) -> bool {
        !self.seen.contains(identity)
    }

    fn mark_seen(&mut self, identity: AdIdentity) {
        self.seen.insert(identity);
    }

    fn observe(&mut self, identity: AdIdentity) -> bool {
        if self.seen.contains(&identity) {
            return false;
        }
        self.seen.insert(identity);
        true
    }

    fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
