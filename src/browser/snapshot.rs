use crate::browser::session::BrowserSession;
use crate::browser::Driver;
use crate::error::PipelineError;

/// Load a URL in the given driver, wait the fixed settle interval for dynamic
/// content to render, and return the full rendered markup.
///
/// Navigation failures propagate to the caller; there is no retry.
pub fn capture_with(
    driver: &mut dyn Driver,
    url: &str,
    settle_ms: u64,
) -> Result<String, PipelineError> {
    driver.navigate(url)?;
    driver.sleep(settle_ms)?;
    driver.page_source()
}

/// One-shot snapshot: launch a headless session, capture the page, release
/// the session. Release failures are swallowed; the markup wins.
pub fn page_source(url: &str, settle_ms: u64) -> Result<String, PipelineError> {
    let mut session = BrowserSession::launch()?;
    let result = capture_with(&mut session, url, settle_ms);
    let _ = session.quit();
    result
}
