use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::plan::model::TestPlan;

pub const PLAN_JSON: &str = "plan.json";
pub const PLAN_CSV: &str = "plan.csv";

/// Delimiter used to join a case's steps into one spreadsheet cell.
pub const STEP_DELIMITER: &str = " | ";

/// Persist the plan under `out_dir` as `plan.json` (nested, human-diffable)
/// and `plan.csv` (one row per case, for review in a spreadsheet).
///
/// Both files fully overwrite any previous plan artifacts.
pub fn write_plan(plan: &TestPlan, out_dir: &Path) -> Result<(PathBuf, PathBuf), PipelineError> {
    std::fs::create_dir_all(out_dir)?;

    let json_path = out_dir.join(PLAN_JSON);
    let json = serde_json::to_string_pretty(plan).map_err(|e| PipelineError::Json {
        context: "plan.json".into(),
        source: e,
    })?;
    std::fs::write(&json_path, json)?;

    let csv_path = out_dir.join(PLAN_CSV);
    let mut writer = csv::Writer::from_path(&csv_path)?;
    writer.write_record(["ID", "Suite", "Steps", "Expected", "Priority"])?;
    for case in &plan.cases {
        writer.write_record([
            case.id.as_str(),
            case.suite.as_str(),
            case.steps.join(STEP_DELIMITER).as_str(),
            case.expected.as_str(),
            case.priority.as_str(),
        ])?;
    }
    writer.flush()?;

    log::info!("wrote plan artifacts to {}", out_dir.display());
    Ok((json_path, csv_path))
}

/// Load a previously persisted plan.
pub fn load_plan(path: &Path) -> Result<TestPlan, PipelineError> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| PipelineError::Json {
        context: format!("plan file {}", path.display()),
        source: e,
    })
}
