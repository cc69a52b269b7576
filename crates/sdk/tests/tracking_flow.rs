//! Integration test for the full mount → navigate → click → unmount flow
//! over the in-memory host.

use std::sync::Arc;

use clicktrail_core::sink::capture_sink;
use clicktrail_core::CaptureSink;
use clicktrail_sdk::{IncludeAllMode, MemoryElement, MemoryHost, TrackerConfig, TrackerEngine};

fn checkout_page() -> (MemoryHost, Arc<CaptureSink>) {
    (MemoryHost::new("/"), capture_sink())
}

#[test]
fn test_full_tracking_flow() {
    let (host, sink) = checkout_page();
    let engine =
        TrackerEngine::attach(&host, TrackerConfig::default(), Some(sink.clone())).unwrap();

    // Mount counts as the first navigation.
    assert_eq!(sink.count_event("pageview"), 1);

    host.navigate("/products").unwrap();
    host.navigate("/checkout").unwrap();

    // Click a span nested inside a styled buy button.
    let button = MemoryElement::with_attributes(
        "BUTTON",
        &[
            ("data-action", "buy"),
            ("data-sku", "plan-pro"),
            ("class", "btn btn-primary"),
            ("aria-label", "Buy now"),
        ],
    );
    let span = MemoryElement::child_of(&button, "SPAN", &[]);
    host.click(Some(&span)).unwrap();

    // A bare layout div produces nothing.
    host.click(Some(&MemoryElement::new("DIV"))).unwrap();

    let records = sink.records();
    assert_eq!(records.len(), 4);
    assert_eq!(
        records.iter().map(|r| r.event.as_str()).collect::<Vec<_>>(),
        vec!["pageview", "pageview", "pageview", "buttonclick"]
    );
    assert!(records.iter().all(|r| r.session_id == engine.session_id()));

    let click = &records[3];
    assert_eq!(click.url, "/checkout");
    assert_eq!(
        click.attributes.as_deref(),
        Some(r#"{"data-action":"buy","data-sku":"plan-pro"}"#)
    );

    let metrics = engine.metrics();
    assert_eq!(metrics.page_views, 3);
    assert_eq!(metrics.clicks_emitted, 1);
    assert_eq!(metrics.clicks_dropped, 1);

    engine.detach();
    host.navigate("/gone").unwrap();
    host.click(Some(&MemoryElement::new("BUTTON"))).unwrap();
    assert_eq!(sink.count(), 4);
}

#[test]
fn test_prefix_mode_flow() {
    let (host, sink) = checkout_page();
    let config = TrackerConfig {
        allow_prefix: Some("data-track-".into()),
        ..TrackerConfig::default()
    };
    let _engine = TrackerEngine::attach(&host, config, Some(sink.clone())).unwrap();

    let link = MemoryElement::with_attributes(
        "A",
        &[
            ("data-track-campaign", "spring"),
            ("data-other", "ignored"),
            ("href", "/sale"),
        ],
    );
    host.click(Some(&link)).unwrap();

    let records = sink.records();
    let click = records.last().unwrap();
    assert_eq!(click.event, "linkclick");
    assert_eq!(click.attributes.as_deref(), Some(r#"{"campaign":"spring"}"#));
}

#[test]
fn test_misconfigured_attach_creates_nothing() {
    let (host, sink) = checkout_page();
    let config = TrackerConfig {
        ignore_patterns: vec!["class".into()],
        include_all: IncludeAllMode::All,
        ..TrackerConfig::default()
    };

    assert!(TrackerEngine::attach(&host, config, Some(sink.clone())).is_err());
    assert_eq!(host.subscriber_count(), 0);
    assert_eq!(sink.count(), 0);
}
