use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::browser::session::BrowserSession;
use crate::browser::snapshot::page_source;
use crate::browser::Driver;
use crate::cli::config::{build_backend, AppConfig};
use crate::cli::target::validate_target;
use crate::codegen::materializer::{materialize, write_unit};
use crate::codegen::synthesizer::{StepCodeSynthesizer, StepRequest};
use crate::error::PipelineError;
use crate::explorer::sampler::{sample_links, SamplerConfig};
use crate::llm::TextModel;
use crate::plan::persist::{load_plan, write_plan};
use crate::plan::synthesizer::PlanSynthesizer;
use crate::report::console::format_run_summary;
use crate::report::results::{write_results, ExecutionResult};
use crate::runner::executor::run_unit;

// ============================================================================
// plan — validate, sample, synthesize, persist
// ============================================================================

#[allow(clippy::too_many_arguments)]
pub fn cmd_plan(
    url: &str,
    num_tests: usize,
    depth: usize,
    email: Option<&str>,
    pm: &str,
    backend_name: &str,
    config: &AppConfig,
    llm_endpoint: Option<&str>,
    llm_model: Option<&str>,
) -> Result<()> {
    if let Err(reason) = validate_target(url) {
        eprintln!("Target validation failed: {reason}");
        eprintln!("No plan was generated.");
        return Ok(());
    }

    if let Some(email) = email {
        println!("Notifications would go to: {email}");
    }
    println!("Tracking tool: {pm}");

    let endpoint = llm_endpoint.or(config.llm.endpoint.as_deref());
    let model_name = llm_model.or(config.llm.model.as_deref());
    let model = build_backend(backend_name, endpoint, model_name);

    let sampler_config = SamplerConfig {
        max_links: num_tests,
        max_depth: depth,
        settle_ms: config.plan.settle_ms,
    };

    println!("Sampling links from {url} ...");
    let mut session = BrowserSession::launch()?;
    let links = sample_links(&mut session, url, &sampler_config);
    let _ = session.quit();
    println!("Sampled {} links", links.len());

    println!("Capturing page snapshot ...");
    let page_html = page_source(url, config.plan.settle_ms)?;

    println!("Synthesizing test plan ...");
    let synthesizer = PlanSynthesizer::new(model.as_ref());
    let plan = synthesizer.synthesize(url, &page_html, &links)?;
    println!(
        "Plan covers {} suites, {} cases",
        plan.suites.len(),
        plan.cases.len()
    );

    let out_dir = Path::new(&config.plan.output_dir);
    let (json_path, csv_path) = write_plan(&plan, out_dir)?;
    println!("Wrote {}", json_path.display());
    println!("Wrote {}", csv_path.display());

    Ok(())
}

// ============================================================================
// exec — synthesize step code, materialize units, run, report
// ============================================================================

/// Returns whether every case passed; callers map `false` to a nonzero exit.
pub fn cmd_exec(
    plan_path: &str,
    backend_name: &str,
    config: &AppConfig,
    llm_endpoint: Option<&str>,
    llm_model: Option<&str>,
) -> Result<bool> {
    let plan = load_plan(Path::new(plan_path))?;
    println!(
        "Loaded plan for {} ({} cases)",
        plan.website,
        plan.cases.len()
    );

    let endpoint = llm_endpoint.or(config.llm.endpoint.as_deref());
    let model_name = llm_model.or(config.llm.model.as_deref());
    let model = build_backend(backend_name, endpoint, model_name);

    let units_dir = Path::new(&config.exec.units_dir);
    let screenshot_dir = Path::new(&config.exec.screenshot_dir);

    // All units are materialized before anything runs, so a partial model
    // outage never leaves a half-executed run behind.
    let mut units: Vec<(String, Result<PathBuf, String>)> =
        Vec::with_capacity(plan.cases.len());
    for case in &plan.cases {
        println!("Generating code for {} ...", case.id);
        let outcome = synthesize_case(
            model.as_ref(),
            &plan.website,
            &case.steps,
            &case.expected,
            config.exec.settle_ms,
        );
        match outcome {
            Ok(fragments) => {
                let unit = materialize(&case.id, &fragments);
                let path = write_unit(&unit, units_dir)?;
                println!("Wrote {}", path.display());
                units.push((case.id.clone(), Ok(path)));
            }
            Err(e) => {
                // Siblings still get their chance; this case is a verdict,
                // not an abort.
                log::warn!("step synthesis failed for {}: {e}", case.id);
                units.push((case.id.clone(), Err(format!("step code synthesis failed: {e}"))));
            }
        }
    }

    let results = run_units(&units, screenshot_dir, || {
        BrowserSession::launch().map(|s| Box::new(s) as Box<dyn Driver>)
    });

    let results_path = Path::new(&config.exec.results_path);
    write_results(&results, results_path)?;
    println!("Wrote {}", results_path.display());

    print!("{}", format_run_summary(&results));

    Ok(results.iter().all(|r| r.passed()))
}

/// Run materialized units in order, one fresh session per case.
///
/// Every per-case failure becomes a `Fail` verdict for that case only:
/// a synthesis error carried in from the generation phase, an unreadable
/// unit file, a session that will not launch, or a script error. Siblings
/// always run.
pub fn run_units(
    units: &[(String, Result<PathBuf, String>)],
    screenshot_dir: &Path,
    mut launch: impl FnMut() -> Result<Box<dyn Driver>, PipelineError>,
) -> Vec<ExecutionResult> {
    let mut results: Vec<ExecutionResult> = Vec::with_capacity(units.len());

    for (case_id, unit) in units {
        let unit_path = match unit {
            Ok(path) => path,
            Err(reason) => {
                results.push(ExecutionResult::fail(case_id, reason.clone(), None));
                continue;
            }
        };

        println!("\u{25b6} Running test {case_id} ...");
        let code = match std::fs::read_to_string(unit_path) {
            Ok(code) => code,
            Err(e) => {
                results.push(ExecutionResult::fail(
                    case_id,
                    format!("unit file {} unreadable: {e}", unit_path.display()),
                    None,
                ));
                continue;
            }
        };
        let session = match launch() {
            Ok(session) => session,
            Err(e) => {
                results.push(ExecutionResult::fail(
                    case_id,
                    format!("browser session launch failed: {e}"),
                    None,
                ));
                continue;
            }
        };
        results.push(run_unit(case_id, &code, session, screenshot_dir));
    }

    results
}

/// One model round-trip per step, against a fresh snapshot of the target.
/// Any failed step fails the whole case's synthesis.
fn synthesize_case(
    model: &dyn TextModel,
    website: &str,
    steps: &[String],
    expected: &str,
    settle_ms: u64,
) -> Result<Vec<String>> {
    let page_html = page_source(website, settle_ms)?;
    let synthesizer = StepCodeSynthesizer::new(model);

    let mut fragments = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let fragment = synthesizer.synthesize(&StepRequest {
            step,
            expected,
            website,
            page_html: &page_html,
            first_step: index == 0,
        })?;
        fragments.push(fragment);
    }
    Ok(fragments)
}
