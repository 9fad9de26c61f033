pub mod session;
pub mod snapshot;

use crate::error::PipelineError;

/// Narrow browser-automation capability used by every pipeline stage.
///
/// The production implementation is [`session::BrowserSession`] (a Playwright
/// sidecar); tests substitute scripted fakes. Selectors are CSS unless the
/// string is prefixed `xpath=` or `text=`, which the sidecar resolves.
pub trait Driver {
    fn navigate(&mut self, url: &str) -> Result<(), PipelineError>;

    /// Full rendered markup of the current page.
    fn page_source(&mut self) -> Result<String, PipelineError>;

    /// `href` targets of all anchor elements on the current page.
    fn links(&mut self) -> Result<Vec<String>, PipelineError>;

    fn click(&mut self, selector: &str) -> Result<(), PipelineError>;

    fn fill(&mut self, selector: &str, value: &str) -> Result<(), PipelineError>;

    /// Block until the element is present and visible, or time out.
    fn wait_for(&mut self, selector: &str, timeout_ms: u64) -> Result<(), PipelineError>;

    /// Text content of the first matching element, if any.
    fn query_text(&mut self, selector: &str) -> Result<Option<String>, PipelineError>;

    fn query_visible(&mut self, selector: &str) -> Result<bool, PipelineError>;

    fn query_count(&mut self, selector: &str) -> Result<u32, PipelineError>;

    fn current_url(&mut self) -> Result<String, PipelineError>;

    /// Fixed settle delay, served by the sidecar so fakes can skip it.
    fn sleep(&mut self, ms: u64) -> Result<(), PipelineError>;

    fn screenshot(&mut self, path: &str) -> Result<(), PipelineError>;

    /// Release the underlying browser. Implementations must tolerate being
    /// called more than once.
    fn quit(&mut self) -> Result<(), PipelineError>;
}
