use std::path::Path;

use crate::browser::Driver;
use crate::report::results::ExecutionResult;
use crate::runner::js_host::{install_driver, screenshot_active, take_driver, ScriptHost};

/// Execute one materialized unit against a dedicated browser session.
///
/// The session is handed over for the duration of the run and reclaimed on
/// every exit path; its release is always attempted and release failures are
/// swallowed. A `Fail` verdict carries the error text and, best-effort, a
/// screenshot named after the case id (a failed screenshot leaves the field
/// empty without masking the original error).
pub fn run_unit(
    case_id: &str,
    code: &str,
    driver: Box<dyn Driver>,
    screenshot_dir: &Path,
) -> ExecutionResult {
    install_driver(driver);

    let outcome = match ScriptHost::new() {
        Ok(mut host) => host.run(code),
        Err(e) => Err(format!("script host setup failed: {e}")),
    };

    let result = match outcome {
        Ok(()) => ExecutionResult::pass(case_id),
        Err(error) => {
            let screenshot = capture_failure_screenshot(case_id, screenshot_dir);
            ExecutionResult::fail(case_id, error, screenshot)
        }
    };

    if let Some(mut session) = take_driver() {
        let _ = session.quit();
    }

    result
}

/// Screenshot `<dir>/<case_id>.png` through the still-installed session.
/// Any failure along the way simply yields `None`.
fn capture_failure_screenshot(case_id: &str, dir: &Path) -> Option<String> {
    if std::fs::create_dir_all(dir).is_err() {
        return None;
    }
    let path = dir.join(format!("{case_id}.png"));
    let path = path.to_string_lossy().into_owned();
    if screenshot_active(&path) {
        Some(path)
    } else {
        None
    }
}
