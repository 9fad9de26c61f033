use std::collections::{HashSet, VecDeque};

use crate::browser::Driver;

/// Bounds for the link-sampling crawl.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Stop once this many links have been collected.
    pub max_links: usize,
    /// Pages deeper than this from the seed are not visited.
    pub max_depth: usize,
    /// Settle delay after each navigation, in milliseconds.
    pub settle_ms: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_links: 5,
            max_depth: 1,
            settle_ms: 2000,
        }
    }
}

/// Breadth-first, depth-bounded sampling of outbound hyperlinks.
///
/// Maintains a FIFO frontier of `(url, depth)` pairs and a visited set.
/// Each page is loaded at most once; anchors with absolute targets are
/// collected until `max_links` is reached or the frontier runs dry.
/// Navigation failures skip the offending URL without aborting the pass.
pub fn sample_links(driver: &mut dyn Driver, seed: &str, config: &SamplerConfig) -> Vec<String> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut frontier: VecDeque<(String, usize)> = VecDeque::new();
    let mut links: Vec<String> = Vec::new();

    frontier.push_back((seed.to_string(), 0));

    while let Some((url, depth)) = frontier.pop_front() {
        if links.len() >= config.max_links {
            break;
        }
        if visited.contains(&url) || depth > config.max_depth {
            continue;
        }

        if let Err(e) = driver.navigate(&url) {
            log::warn!("sampler: skipping {url}: {e}");
            continue;
        }
        let _ = driver.sleep(config.settle_ms);
        visited.insert(url);

        let anchors = match driver.links() {
            Ok(anchors) => anchors,
            Err(e) => {
                log::warn!("sampler: failed to scan anchors: {e}");
                continue;
            }
        };

        for target in anchors {
            // Only absolute, scheme-qualified targets qualify as plan material.
            if !target.starts_with("http") || links.contains(&target) {
                continue;
            }
            links.push(target.clone());
            if depth + 1 <= config.max_depth {
                frontier.push_back((target, depth + 1));
            }
            if links.len() >= config.max_links {
                break;
            }
        }
    }

    log::info!("sampled {} links from {seed}", links.len());
    links
}
