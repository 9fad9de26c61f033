use qaforge::report::console::format_run_summary;
use qaforge::report::results::{write_results, ExecutionResult};

fn sample_results() -> Vec<ExecutionResult> {
    vec![
        ExecutionResult::pass("SMOKE-1"),
        ExecutionResult::fail(
            "FORMS-2",
            "element '#signup' not found".to_string(),
            Some("output/screenshots/FORMS-2.png".to_string()),
        ),
    ]
}

#[test]
fn results_json_records_verdicts_in_run_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");

    write_results(&sample_results(), &path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0]["id"], "SMOKE-1");
    assert_eq!(records[0]["status"], "Pass");
    assert!(records[0]["error"].is_null());
    assert!(records[0]["screenshot"].is_null());

    assert_eq!(records[1]["id"], "FORMS-2");
    assert_eq!(records[1]["status"], "Fail");
    assert_eq!(records[1]["error"], "element '#signup' not found");
    assert_eq!(records[1]["screenshot"], "output/screenshots/FORMS-2.png");
}

#[test]
fn results_file_is_overwritten_on_rerun() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");

    write_results(&sample_results(), &path).unwrap();
    write_results(&[ExecutionResult::pass("SMOKE-1")], &path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[test]
fn missing_parent_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/out/results.json");

    write_results(&sample_results(), &path).unwrap();
    assert!(path.is_file());
}

#[test]
fn summary_lists_each_verdict_with_diagnostics() {
    let summary = format_run_summary(&sample_results());

    assert!(summary.contains("=== Test Run ==="));
    assert!(summary.contains("\u{2713} PASS  SMOKE-1"));
    assert!(summary.contains("\u{2717} FAIL  FORMS-2"));
    assert!(summary.contains("[ERROR] element '#signup' not found"));
    assert!(summary.contains("[SCREENSHOT] output/screenshots/FORMS-2.png"));
    assert!(summary.contains("=== Results: 1 passed, 1 failed (2 total) ==="));
}

#[test]
fn summary_of_an_empty_run_still_prints_totals() {
    let summary = format_run_summary(&[]);
    assert!(summary.contains("=== Results: 0 passed, 0 failed (0 total) ==="));
}
