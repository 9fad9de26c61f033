mod common;

use common::{event_log, FakeDriver};
use qaforge::explorer::sampler::{sample_links, SamplerConfig};

const SEED: &str = "https://shop.test/";

fn config(max_links: usize, max_depth: usize) -> SamplerConfig {
    SamplerConfig {
        max_links,
        max_depth,
        settle_ms: 0,
    }
}

#[test]
fn collects_up_to_the_link_budget() {
    let events = event_log();
    let mut driver = FakeDriver::new(events).with_links(
        SEED,
        &[
            "https://shop.test/catalog",
            "https://shop.test/cart",
            "https://shop.test/about",
            "https://shop.test/contact",
        ],
    );

    let links = sample_links(&mut driver, SEED, &config(3, 1));

    assert_eq!(
        links,
        vec![
            "https://shop.test/catalog".to_string(),
            "https://shop.test/cart".to_string(),
            "https://shop.test/about".to_string(),
        ]
    );
}

#[test]
fn skips_relative_and_fragment_targets() {
    let events = event_log();
    let mut driver = FakeDriver::new(events).with_links(
        SEED,
        &["#top", "/catalog", "mailto:sales@shop.test", "https://shop.test/cart"],
    );

    let links = sample_links(&mut driver, SEED, &config(5, 1));

    assert_eq!(links, vec!["https://shop.test/cart".to_string()]);
}

#[test]
fn deduplicates_repeated_targets() {
    let events = event_log();
    let mut driver = FakeDriver::new(events).with_links(
        SEED,
        &[
            "https://shop.test/cart",
            "https://shop.test/cart",
            "https://shop.test/about",
        ],
    );

    let links = sample_links(&mut driver, SEED, &config(5, 1));

    assert_eq!(
        links,
        vec![
            "https://shop.test/cart".to_string(),
            "https://shop.test/about".to_string(),
        ]
    );
}

#[test]
fn visits_each_page_at_most_once() {
    // The two pages link back to each other; without the visited set the
    // crawl would ping-pong forever.
    let events = event_log();
    let mut driver = FakeDriver::new(events.clone())
        .with_links(SEED, &["https://shop.test/cart"])
        .with_links("https://shop.test/cart", &[SEED]);

    let links = sample_links(&mut driver, SEED, &config(10, 5));

    assert_eq!(links, vec!["https://shop.test/cart".to_string()]);
    let navigations = events
        .borrow()
        .iter()
        .filter(|e| e.starts_with("navigate"))
        .count();
    assert_eq!(navigations, 2);
}

#[test]
fn depth_bound_stops_the_crawl_not_the_collection() {
    // Depth-1 pages are visited; what they link to is still collected as
    // plan material but never navigated to.
    let events = event_log();
    let mut driver = FakeDriver::new(events.clone())
        .with_links(SEED, &["https://shop.test/catalog"])
        .with_links("https://shop.test/catalog", &["https://shop.test/item/1"]);

    let links = sample_links(&mut driver, SEED, &config(10, 1));

    assert_eq!(
        links,
        vec![
            "https://shop.test/catalog".to_string(),
            "https://shop.test/item/1".to_string(),
        ]
    );
    let visited: Vec<_> = events
        .borrow()
        .iter()
        .filter(|e| e.starts_with("navigate"))
        .cloned()
        .collect();
    assert!(!visited.contains(&"navigate https://shop.test/item/1".to_string()));
}

#[test]
fn navigation_failure_skips_the_page() {
    let events = event_log();
    let mut driver = FakeDriver::new(events)
        .with_links(SEED, &["https://shop.test/broken", "https://shop.test/cart"])
        .with_links("https://shop.test/cart", &["https://shop.test/about"])
        .with_failing_url("https://shop.test/broken");

    let links = sample_links(&mut driver, SEED, &config(10, 2));

    // The broken page contributes its URL as a link but yields no anchors of
    // its own; the healthy sibling is still crawled.
    assert_eq!(
        links,
        vec![
            "https://shop.test/broken".to_string(),
            "https://shop.test/cart".to_string(),
            "https://shop.test/about".to_string(),
        ]
    );
}
