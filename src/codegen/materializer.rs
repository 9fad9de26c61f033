use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// The concatenated automation code for all steps of one case.
///
/// Derived from, but independent of, its source case; the runner consumes it
/// by case id only. No fragment inside a unit closes the browser session —
/// the runner does that once the whole unit has finished.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedUnit {
    pub case_id: String,
    pub code: String,
}

/// Join a case's step fragments, in step order, with a blank-line separator.
pub fn materialize(case_id: &str, fragments: &[String]) -> GeneratedUnit {
    GeneratedUnit {
        case_id: case_id.to_string(),
        code: fragments.join("\n\n"),
    }
}

/// Persist a unit as `<units_dir>/<case_id>.js`, overwriting any prior run.
pub fn write_unit(unit: &GeneratedUnit, units_dir: &Path) -> Result<PathBuf, PipelineError> {
    std::fs::create_dir_all(units_dir)?;
    let path = units_dir.join(format!("{}.js", unit.case_id));
    std::fs::write(&path, &unit.code)?;
    log::info!("materialized unit {}", path.display());
    Ok(path)
}
