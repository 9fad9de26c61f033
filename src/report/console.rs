use crate::report::results::ExecutionResult;

// ============================================================================
// Console reporter — formatted terminal output
// ============================================================================

/// Format a run's verdicts for terminal output.
///
/// Produces output like:
/// ```text
/// === Test Run ===
///
/// ✓ PASS  SMOKE-1
/// ✗ FAIL  FORMS-2
///     [ERROR] element '#signup' not found
///     [SCREENSHOT] output/screenshots/FORMS-2.png
///
/// === Results: 1 passed, 1 failed (2 total) ===
/// ```
pub fn format_run_summary(results: &[ExecutionResult]) -> String {
    let mut out = String::new();

    out.push_str("=== Test Run ===\n\n");

    for result in results {
        let marker = if result.passed() {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };
        out.push_str(&format!("{}  {}\n", marker, result.id));

        if let Some(ref error) = result.error {
            out.push_str(&format!("    [ERROR] {}\n", error));
        }
        if let Some(ref screenshot) = result.screenshot {
            out.push_str(&format!("    [SCREENSHOT] {}\n", screenshot));
        }
    }

    let passed = results.iter().filter(|r| r.passed()).count();
    let failed = results.len() - passed;
    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ({} total) ===\n",
        passed,
        failed,
        results.len()
    ));

    out
}
