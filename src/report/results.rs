use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

pub const RESULTS_JSON: &str = "results.json";

/// Terminal verdict of one executed case. No retry transition exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Pass,
    Fail,
}

/// Verdict plus diagnostic detail for one executed case.
///
/// Created once during execution and never mutated; `error` and `screenshot`
/// are only populated on failure, and a missing screenshot never hides the
/// original error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub id: String,
    pub status: Status,
    pub error: Option<String>,
    pub screenshot: Option<String>,
}

impl ExecutionResult {
    pub fn pass(id: &str) -> Self {
        Self {
            id: id.to_string(),
            status: Status::Pass,
            error: None,
            screenshot: None,
        }
    }

    pub fn fail(id: &str, error: String, screenshot: Option<String>) -> Self {
        Self {
            id: id.to_string(),
            status: Status::Fail,
            error: Some(error),
            screenshot,
        }
    }

    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }
}

/// Serialize the full run, in execution order, overwriting any prior results
/// artifact.
pub fn write_results(results: &[ExecutionResult], path: &Path) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(results).map_err(|e| PipelineError::Json {
        context: "results.json".into(),
        source: e,
    })?;
    std::fs::write(path, json)?;
    log::info!("wrote {} results to {}", results.len(), path.display());
    Ok(())
}
