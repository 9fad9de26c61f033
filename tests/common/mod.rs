#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use qaforge::browser::Driver;
use qaforge::error::PipelineError;
use qaforge::llm::TextModel;

// ============================================================================
// FakeDriver — scripted in-process browser
// ============================================================================

/// Shared event log so tests can observe driver traffic after the driver has
/// been boxed and handed to the code under test.
pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// In-process [`Driver`] with canned pages.
///
/// Each URL maps to a list of anchor targets and optional markup. URLs in
/// `failing_urls` refuse to navigate. Every call is appended to the shared
/// event log as `"<method> <arg>"`.
pub struct FakeDriver {
    pub links_by_url: HashMap<String, Vec<String>>,
    pub html_by_url: HashMap<String, String>,
    pub failing_urls: HashSet<String>,
    pub failing_selectors: HashSet<String>,
    pub current: Option<String>,
    pub events: EventLog,
}

impl FakeDriver {
    pub fn new(events: EventLog) -> Self {
        Self {
            links_by_url: HashMap::new(),
            html_by_url: HashMap::new(),
            failing_urls: HashSet::new(),
            failing_selectors: HashSet::new(),
            current: None,
            events,
        }
    }

    pub fn with_links(mut self, url: &str, links: &[&str]) -> Self {
        self.links_by_url
            .insert(url.to_string(), links.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_html(mut self, url: &str, html: &str) -> Self {
        self.html_by_url.insert(url.to_string(), html.to_string());
        self
    }

    pub fn with_failing_url(mut self, url: &str) -> Self {
        self.failing_urls.insert(url.to_string());
        self
    }

    pub fn with_failing_selector(mut self, selector: &str) -> Self {
        self.failing_selectors.insert(selector.to_string());
        self
    }

    fn record(&self, event: String) {
        self.events.borrow_mut().push(event);
    }

    fn check_selector(&self, method: &str, selector: &str) -> Result<(), PipelineError> {
        if self.failing_selectors.contains(selector) {
            return Err(PipelineError::ScriptHost(format!(
                "{method}: element '{selector}' not found"
            )));
        }
        Ok(())
    }
}

impl Driver for FakeDriver {
    fn navigate(&mut self, url: &str) -> Result<(), PipelineError> {
        self.record(format!("navigate {url}"));
        if self.failing_urls.contains(url) {
            return Err(PipelineError::ScriptHost(format!("navigation refused: {url}")));
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    fn page_source(&mut self) -> Result<String, PipelineError> {
        self.record("page_source".to_string());
        let current = self.current.clone().unwrap_or_default();
        Ok(self
            .html_by_url
            .get(&current)
            .cloned()
            .unwrap_or_else(|| "<html><body></body></html>".to_string()))
    }

    fn links(&mut self) -> Result<Vec<String>, PipelineError> {
        self.record("links".to_string());
        let current = self.current.clone().unwrap_or_default();
        Ok(self.links_by_url.get(&current).cloned().unwrap_or_default())
    }

    fn click(&mut self, selector: &str) -> Result<(), PipelineError> {
        self.record(format!("click {selector}"));
        self.check_selector("click", selector)
    }

    fn fill(&mut self, selector: &str, value: &str) -> Result<(), PipelineError> {
        self.record(format!("fill {selector}={value}"));
        self.check_selector("fill", selector)
    }

    fn wait_for(&mut self, selector: &str, _timeout_ms: u64) -> Result<(), PipelineError> {
        self.record(format!("wait_for {selector}"));
        self.check_selector("wait_for", selector)
    }

    fn query_text(&mut self, selector: &str) -> Result<Option<String>, PipelineError> {
        self.record(format!("query_text {selector}"));
        self.check_selector("query_text", selector)?;
        Ok(Some(format!("text of {selector}")))
    }

    fn query_visible(&mut self, selector: &str) -> Result<bool, PipelineError> {
        self.record(format!("query_visible {selector}"));
        Ok(!self.failing_selectors.contains(selector))
    }

    fn query_count(&mut self, selector: &str) -> Result<u32, PipelineError> {
        self.record(format!("query_count {selector}"));
        Ok(if self.failing_selectors.contains(selector) { 0 } else { 1 })
    }

    fn current_url(&mut self) -> Result<String, PipelineError> {
        self.record("current_url".to_string());
        Ok(self.current.clone().unwrap_or_default())
    }

    fn sleep(&mut self, ms: u64) -> Result<(), PipelineError> {
        self.record(format!("sleep {ms}"));
        Ok(())
    }

    fn screenshot(&mut self, path: &str) -> Result<(), PipelineError> {
        self.record(format!("screenshot {path}"));
        std::fs::write(path, b"png")?;
        Ok(())
    }

    fn quit(&mut self) -> Result<(), PipelineError> {
        self.record("quit".to_string());
        Ok(())
    }
}

// ============================================================================
// Scripted text-model backends
// ============================================================================

/// Returns the same canned response for every prompt and records the prompts
/// it saw.
pub struct CannedModel {
    pub response: String,
    pub prompts: RefCell<Vec<String>>,
}

impl CannedModel {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl TextModel for CannedModel {
    fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.response.clone())
    }
}
