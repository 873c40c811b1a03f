//! jablock — a reactive in-page ad blocking engine with cross-tab live
//! counters.
//!
//! Entry point: runs an interactive console demo walking each component.
//! The real integration surface is the library plus the `jablock-agg`
//! NDJSON server binary.

use std::time::{Duration, Instant};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                 jablock v{} — Demo Mode                   ║", env!("CARGO_PKG_VERSION"));
    println!("║     Reactive ad blocking engine with cross-tab counters      ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    demo_catalog();
    demo_scanner();
    demo_request_shim();
    demo_reactive_loop();
    demo_aggregator();
    demo_messages();

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ All components demonstrated successfully!");
    println!("═══════════════════════════════════════════════════════════════");
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn demo_catalog() {
    use jablock::services::selector_catalog::{
        is_ad_request_url, selectors_for, VIDEO_AD_SELECTORS,
    };
    use jablock::types::scan::PageCategory;
    section("Selector Catalog");
    println!(
        "  video-hosting selectors: {}",
        selectors_for(PageCategory::VideoHosting).len()
    );
    println!(
        "  generic selectors:       {}",
        selectors_for(PageCategory::Generic).len()
    );
    println!("  sample pattern:          {}", VIDEO_AD_SELECTORS[0].pattern());
    println!(
        "  request check:           doubleclick blocked = {}",
        is_ad_request_url("https://static.doubleclick.net/instream/ad_status.js")
    );
}

fn demo_scanner() {
    use jablock::services::content_scanner::ContentScanner;
    use jablock::types::dom::{ElementNode, PageDocument};
    use jablock::types::scan::PageCategory;
    section("Content Scanner");

    let mut doc = PageDocument::new("www.youtube.com");
    let root = doc.create_root(ElementNode::new("body"));
    let _ = doc.append_child(root, ElementNode::new("div").with_class("video-ads"));
    let _ = doc.append_child(
        root,
        ElementNode::new("iframe").with_attr("src", "https://googleadservices.com/slot"),
    );
    let _ = doc.append_child(root, ElementNode::new("div").with_class("content"));

    let mut scanner = ContentScanner::new();
    let mut events = 0u32;
    let mut sink = || events += 1;
    let outcome = scanner.scan(&mut doc, PageCategory::VideoHosting, &[], &mut sink);
    println!("  removed: {}  events: {}", outcome.removed, outcome.events_emitted);

    // Second pass on the unchanged page: dedup keeps events at zero.
    let outcome = scanner.scan(&mut doc, PageCategory::VideoHosting, &[], &mut sink);
    println!("  re-scan events (deduped): {}", outcome.events_emitted);
}

fn demo_request_shim() {
    use jablock::services::request_shim::{RequestShim, RequestTransport, TransportReply};
    use jablock::types::errors::RequestError;
    section("Request Shim");

    struct EchoTransport;
    impl RequestTransport for EchoTransport {
        fn dispatch(&mut self, _method: &str, url: &str) -> Result<TransportReply, RequestError> {
            Ok(TransportReply {
                status: 200,
                body: url.to_string(),
            })
        }
    }

    let mut shim = RequestShim::install(EchoTransport);
    match shim.fetch("https://pagead2.googlesyndication.com/pagead/js") {
        Err(e) => println!("  ad fetch rejected: {}", e),
        Ok(_) => println!("  ad fetch unexpectedly passed"),
    }
    match shim.fetch("https://example.com/article") {
        Ok(reply) => println!("  clean fetch passed: status {}", reply.status),
        Err(e) => println!("  clean fetch failed: {}", e),
    }
}

fn demo_reactive_loop() {
    use jablock::services::reactive_loop::ReactiveLoop;
    use jablock::types::scan::PageCategory;
    section("Reactive Loop");

    let start = Instant::now();
    let mut rl = ReactiveLoop::new(PageCategory::VideoHosting);
    rl.begin_loading();
    rl.activate(start);
    println!("  initial trigger: {:?}", rl.poll(start));
    rl.on_mutation(3, start);
    println!(
        "  debounced trigger after quiet window: {:?}",
        rl.poll(start + Duration::from_millis(1100))
    );
    println!(
        "  interval trigger at +2s: {:?}",
        rl.poll(start + Duration::from_secs(2))
    );
}

fn demo_aggregator() {
    use jablock::managers::counter_aggregator::{
        CounterAggregator, CounterAggregatorTrait, TAB_COUNT_CAP,
    };
    use jablock::services::session_store::MemorySessionStore;
    section("Counter Aggregator");

    let mut agg = CounterAggregator::new(MemorySessionStore::new()).expect("fresh store");
    let now = Instant::now();
    for _ in 0..TAB_COUNT_CAP {
        agg.on_increment(Some(7), now);
    }
    println!(
        "  after {} increments: tab counter = {:?}, total = {}",
        TAB_COUNT_CAP,
        agg.tab_count(7),
        agg.total()
    );
    agg.on_increment(Some(9), now);
    agg.on_tab_removed(9, now);
    println!("  after tab 9 closed: total = {}", agg.total());
}

fn demo_messages() {
    use jablock::types::message::Message;
    section("Messages");
    let msg = Message::ToggleBlocking { enabled: false };
    println!(
        "  wire form: {}",
        serde_json::to_string(&msg).unwrap_or_default()
    );
    let parsed: Message =
        serde_json::from_str("{\"action\":\"incrementBlocked\"}").expect("valid wire message");
    println!("  parsed: {:?}", parsed);
}
