//! Static selector catalog for jablock.
//!
//! Versioned, best-effort lists of structural patterns and resource-locator
//! fragments that identify advertising content. Pure data: no state, no
//! errors. The selector lists are site-specific and make no completeness
//! guarantee.

use crate::types::dom::ElementNode;
use crate::types::scan::PageCategory;

/// A structural pattern interpreted against the page model, the crate's
/// equivalent of a CSS selector string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Exact tag name.
    Tag(&'static str),
    /// Exact id.
    Id(&'static str),
    /// Exact class-list member.
    Class(&'static str),
    /// Substring of any class-list member.
    ClassFragment(&'static str),
    /// Presence of an attribute.
    Attr(&'static str),
}

impl Selector {
    pub fn matches(&self, element: &ElementNode) -> bool {
        match self {
            Selector::Tag(tag) => element.tag == *tag,
            Selector::Id(id) => element.id.as_deref() == Some(*id),
            Selector::Class(class) => element.classes.iter().any(|c| c == class),
            Selector::ClassFragment(fragment) => {
                element.classes.iter().any(|c| c.contains(fragment))
            }
            Selector::Attr(name) => element.attributes.contains_key(*name),
        }
    }

    /// Printable pattern, used as the fingerprint hint for identity
    /// derivation (mirrors the source selector string in markup terms).
    pub fn pattern(&self) -> String {
        match self {
            Selector::Tag(tag) => tag.to_string(),
            Selector::Id(id) => format!("#{}", id),
            Selector::Class(class) => format!(".{}", class),
            Selector::ClassFragment(fragment) => format!("[class*=\"{}\"]", fragment),
            Selector::Attr(name) => format!("[{}]", name),
        }
    }
}

/// Structural selectors for video-hosting pages: ad slots, overlays, skip
/// controls, and promoted-content renderers.
pub const VIDEO_AD_SELECTORS: &[Selector] = &[
    Selector::Class("video-ads"),
    Selector::Class("ytp-ad-module"),
    Selector::Class("ad-div"),
    Selector::Id("player-ads"),
    Selector::Class("ytp-ad-overlay-container"),
    Selector::Class("ytp-ad-player-overlay"),
    Selector::Class("ytp-ad-message-overlay"),
    Selector::Class("ytp-ad-progress"),
    Selector::Class("ytp-ad-skip-button"),
    Selector::Tag("ytd-promoted-sparkles-web-renderer"),
    Selector::Tag("ytd-promoted-video-renderer"),
    Selector::Tag("ytd-action-companion-ad-renderer"),
    Selector::Tag("ytd-ad-slot-renderer"),
    Selector::Tag("ytd-companion-ad-slot-renderer"),
    Selector::Tag("ytd-display-ad-renderer"),
    Selector::Tag("ytd-in-feed-ad-layout-renderer"),
    Selector::ClassFragment("ytp-ce-"),
];

/// Generic fallback selectors for everything else.
pub const GENERIC_AD_SELECTORS: &[Selector] = &[
    Selector::Class("advertisement"),
    Selector::Class("adsbygoogle"),
    Selector::Class("ad-unit"),
    Selector::Class("ad-wrapper"),
    Selector::Class("sponsored"),
    Selector::Class("promoted"),
    Selector::Attr("data-ad"),
    Selector::Attr("data-ads"),
];

/// Resource-locator fragments identifying ad/analytics networks, used for
/// iframe and anchor scanning.
pub const AD_NETWORK_FRAGMENTS: &[&str] = &[
    "googleadservices",
    "doubleclick",
    "pagead",
    "ads.youtube",
    "adservice",
];

/// Endpoint fragments the request shim rejects. Broader than the iframe set:
/// path fragments catch same-origin ad endpoints too.
pub const AD_REQUEST_FRAGMENTS: &[&str] =
    &["googleadservices", "doubleclick", "pagead", "/ads/", "/ad/"];

/// Anchor locator fragments whose surrounding promoted wrapper is removed.
pub const AD_LINK_FRAGMENTS: &[&str] = &["googleadservices", "doubleclick", "pagead"];

/// Known ancestor wrappers around ad links on video-hosting pages.
pub const AD_LINK_WRAPPERS: &[Selector] = &[
    Selector::Tag("ytd-promoted-video-renderer"),
    Selector::Class("ytwFeedAdMetadataViewModelHost"),
];

/// Skip controls whose primary action is simulated.
pub const SKIP_CONTROL_SELECTORS: &[Selector] = &[
    Selector::Class("ytp-ad-skip-button"),
    Selector::Class("ytp-ad-skip-button-modern"),
    Selector::ClassFragment("skip"),
];

/// Pure overlay/progress elements, removed without identity tracking or
/// event emission.
pub const OVERLAY_SELECTORS: &[Selector] = &[
    Selector::Class("ytp-ad-overlay-container"),
    Selector::Class("ytp-ad-player-overlay"),
    Selector::Class("ytp-ad-message-overlay"),
    Selector::Class("ytp-ad-progress"),
];

/// Keywords that mark an element as part of a video player. Broad generic
/// selectors must never remove the player itself.
pub const PLAYER_KEYWORDS: &[&str] = &[
    "video",
    "player",
    "ytp",
    "html5-video",
    "video-stream",
    "movie_player",
];

/// Broad container fragment requiring textual confirmation before removal.
pub const AD_CONTAINER_FRAGMENT: &str = "ad-container";

/// Text markers confirming a broad container is actually an ad.
pub const AD_TEXT_MARKERS: &[&str] = &["advertisement", "sponsored"];

/// Search-engine hosts where generic scanning is suppressed to avoid
/// breaking result pages.
pub const SEARCH_EXEMPT_HOSTS: &[&str] = &["www.google.com", "google.com"];

pub fn selectors_for(category: PageCategory) -> &'static [Selector] {
    match category {
        PageCategory::VideoHosting => VIDEO_AD_SELECTORS,
        PageCategory::Generic => GENERIC_AD_SELECTORS,
    }
}

/// Secondary confirmation for the broad video-hosting selectors: require a
/// specific class membership or tag identity before removal.
pub fn confirms_video_ad(element: &ElementNode) -> bool {
    element.classes.iter().any(|c| c == "video-ads")
        || element.classes.iter().any(|c| c == "ytp-ad-module")
        || element.tag == "ytd-promoted-video-renderer"
        || element.tag == "ytd-ad-slot-renderer"
}

/// True when the element looks like (part of) a video player.
pub fn looks_like_video_player(element: &ElementNode) -> bool {
    if element.tag == "video" {
        return true;
    }
    let classes = element.class_string().to_lowercase();
    let id = element.id.as_deref().unwrap_or("").to_lowercase();
    PLAYER_KEYWORDS
        .iter()
        .any(|keyword| classes.contains(keyword) || id.contains(keyword))
}

pub fn is_ad_network_url(url: &str) -> bool {
    AD_NETWORK_FRAGMENTS.iter().any(|f| url.contains(f))
}

pub fn is_ad_link_url(url: &str) -> bool {
    AD_LINK_FRAGMENTS.iter().any(|f| url.contains(f))
}

pub fn is_ad_request_url(url: &str) -> bool {
    AD_REQUEST_FRAGMENTS.iter().any(|f| url.contains(f))
}
