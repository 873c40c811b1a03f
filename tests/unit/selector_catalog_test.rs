use jablock::services::selector_catalog::*;
use jablock::types::dom::ElementNode;
use jablock::types::scan::PageCategory;

use rstest::rstest;

// === Selector matching ===

#[test]
fn test_tag_selector_matches_exact_tag() {
    let sel = Selector::Tag("ytd-ad-slot-renderer");
    assert!(sel.matches(&ElementNode::new("ytd-ad-slot-renderer")));
    assert!(!sel.matches(&ElementNode::new("div")));
}

#[test]
fn test_id_selector_requires_exact_id() {
    let sel = Selector::Id("player-ads");
    assert!(sel.matches(&ElementNode::new("div").with_id("player-ads")));
    assert!(!sel.matches(&ElementNode::new("div").with_id("player-ads-2")));
    assert!(!sel.matches(&ElementNode::new("div")));
}

#[test]
fn test_class_selector_matches_list_member() {
    let sel = Selector::Class("video-ads");
    let el = ElementNode::new("div").with_class("foo").with_class("video-ads");
    assert!(sel.matches(&el));
    // Substrings of a class are not exact members.
    let near = ElementNode::new("div").with_class("video-ads-wrapper");
    assert!(!sel.matches(&near));
}

#[test]
fn test_class_fragment_selector_matches_substring() {
    let sel = Selector::ClassFragment("ytp-ce-");
    assert!(sel.matches(&ElementNode::new("div").with_class("ytp-ce-element")));
    assert!(!sel.matches(&ElementNode::new("div").with_class("ytp-ad-module")));
}

#[test]
fn test_attr_selector_matches_presence() {
    let sel = Selector::Attr("data-ad");
    assert!(sel.matches(&ElementNode::new("div").with_attr("data-ad", "")));
    assert!(!sel.matches(&ElementNode::new("div")));
}

#[test]
fn test_pattern_rendering() {
    assert_eq!(Selector::Tag("video").pattern(), "video");
    assert_eq!(Selector::Id("player-ads").pattern(), "#player-ads");
    assert_eq!(Selector::Class("video-ads").pattern(), ".video-ads");
    assert_eq!(
        Selector::ClassFragment("ytp-ce-").pattern(),
        "[class*=\"ytp-ce-\"]"
    );
    assert_eq!(Selector::Attr("data-ad").pattern(), "[data-ad]");
}

// === Category lookup ===

#[test]
fn test_selectors_for_category() {
    assert_eq!(
        selectors_for(PageCategory::VideoHosting).len(),
        VIDEO_AD_SELECTORS.len()
    );
    assert_eq!(
        selectors_for(PageCategory::Generic).len(),
        GENERIC_AD_SELECTORS.len()
    );
}

#[test]
fn test_category_for_hostname() {
    assert_eq!(
        PageCategory::for_hostname("www.youtube.com"),
        PageCategory::VideoHosting
    );
    assert_eq!(
        PageCategory::for_hostname("m.youtube.com"),
        PageCategory::VideoHosting
    );
    assert_eq!(
        PageCategory::for_hostname("news.example.org"),
        PageCategory::Generic
    );
}

// === URL classification ===

#[rstest]
#[case("https://static.doubleclick.net/instream/ad_status.js", true)]
#[case("https://www.googleadservices.com/pagead/conversion", true)]
#[case("https://example.com/pagead/slot", true)]
#[case("https://example.com/ads/banner.js", true)]
#[case("https://example.com/ad/unit", true)]
#[case("https://example.com/article/today", false)]
#[case("https://example.com/advice/column", false)]
fn test_is_ad_request_url(#[case] url: &str, #[case] expected: bool) {
    assert_eq!(is_ad_request_url(url), expected);
}

#[rstest]
#[case("https://tpc.googlesyndication.com/adservice/frame", true)]
#[case("https://ads.youtube.com/slot", true)]
#[case("https://example.com/ads/banner", false)]
fn test_is_ad_network_url(#[case] url: &str, #[case] expected: bool) {
    assert_eq!(is_ad_network_url(url), expected);
}

#[rstest]
#[case("https://www.googleadservices.com/click?id=1", true)]
#[case("https://static.doubleclick.net/click", true)]
#[case("https://example.com/ads/click", false)]
fn test_is_ad_link_url(#[case] url: &str, #[case] expected: bool) {
    assert_eq!(is_ad_link_url(url), expected);
}

// === Confirmation predicates ===

#[test]
fn test_confirms_video_ad_positive_cases() {
    assert!(confirms_video_ad(
        &ElementNode::new("div").with_class("video-ads")
    ));
    assert!(confirms_video_ad(
        &ElementNode::new("div").with_class("ytp-ad-module")
    ));
    assert!(confirms_video_ad(&ElementNode::new(
        "ytd-promoted-video-renderer"
    )));
    assert!(confirms_video_ad(&ElementNode::new("ytd-ad-slot-renderer")));
}

#[test]
fn test_confirms_video_ad_rejects_unrelated() {
    assert!(!confirms_video_ad(
        &ElementNode::new("div").with_class("ytp-ce-element")
    ));
    assert!(!confirms_video_ad(&ElementNode::new("div")));
}

#[test]
fn test_looks_like_video_player() {
    assert!(looks_like_video_player(&ElementNode::new("video")));
    assert!(looks_like_video_player(
        &ElementNode::new("div").with_class("html5-video-player")
    ));
    assert!(looks_like_video_player(
        &ElementNode::new("div").with_id("movie_player")
    ));
    // Case-insensitive on class and id text.
    assert!(looks_like_video_player(
        &ElementNode::new("div").with_class("Video-Container")
    ));
    assert!(!looks_like_video_player(
        &ElementNode::new("div").with_class("sidebar")
    ));
}

#[test]
fn test_search_exempt_hosts_cover_bare_and_www() {
    assert!(SEARCH_EXEMPT_HOSTS.contains(&"google.com"));
    assert!(SEARCH_EXEMPT_HOSTS.contains(&"www.google.com"));
}
