use serde_json::Value;

use crate::error::PipelineError;
use crate::llm::{strip_code_fences, TextModel};
use crate::plan::model::{TestCase, TestPlan};

/// Builds the plan prompt, invokes the model once, and parses the response
/// into a typed [`TestPlan`].
pub struct PlanSynthesizer<'a> {
    model: &'a dyn TextModel,
}

impl<'a> PlanSynthesizer<'a> {
    pub fn new(model: &'a dyn TextModel) -> Self {
        Self { model }
    }

    /// Synthesize a plan for `website` from its rendered markup.
    ///
    /// `links` is sampled plan material; it is not fed into the prompt yet
    /// but kept in the signature so grounding on the sampled pages can be
    /// added without changing callers.
    pub fn synthesize(
        &self,
        website: &str,
        page_html: &str,
        links: &[String],
    ) -> Result<TestPlan, PipelineError> {
        log::info!(
            "synthesizing plan for {website} ({} chars of markup, {} sampled links)",
            page_html.len(),
            links.len()
        );
        let prompt = build_plan_prompt(page_html);
        let raw = self.model.generate(&prompt)?;
        log::debug!("model plan output: {raw}");
        parse_plan(website, &raw)
    }
}

/// Instruction template for plan synthesis. The three suite names are fixed;
/// the model may omit suites it finds nothing for.
pub fn build_plan_prompt(page_html: &str) -> String {
    format!(
        r#"You are an expert QA engineer.
Here is the FULL HTML of the target website:
{page_html}

Generate a structured test plan in JSON with:
- Suites: Smoke, Navigation, Forms
- Each test case must include: id, suite, steps, expected, priority.
- Only use elements that are actually present in the HTML.
- Do NOT invent links, forms, or buttons that are not in the HTML.
- Make steps clear and actionable (like clicking buttons, filling inputs).
Return only JSON."#
    )
}

/// Parse a raw model response into a [`TestPlan`].
///
/// Tolerates two top-level shapes: `{"testPlan": {"suites": {…}}}` and
/// `{"suites": {…}}`. Suites appear in `plan.suites` in encounter order and
/// cases are flattened across suites in the same order. A missing `suites`
/// key yields an empty plan; a `suites` value of the wrong type is rejected.
pub fn parse_plan(website: &str, raw: &str) -> Result<TestPlan, PipelineError> {
    let cleaned = strip_code_fences(raw);

    let parsed: Value = serde_json::from_str(&cleaned).map_err(|_| {
        PipelineError::InvalidModelOutput {
            raw: cleaned.clone(),
        }
    })?;

    let suites_value = match parsed.get("testPlan") {
        Some(wrapper) => wrapper.get("suites"),
        None => parsed.get("suites"),
    };

    let mut suites = Vec::new();
    let mut cases = Vec::new();

    match suites_value {
        Some(Value::Object(suite_map)) => {
            for (suite_name, suite_cases) in suite_map {
                suites.push(suite_name.clone());
                let records = suite_cases.as_array().cloned().unwrap_or_default();
                for record in records {
                    let case: TestCase = serde_json::from_value(record).map_err(|e| {
                        PipelineError::PlanValidation {
                            suite: suite_name.clone(),
                            detail: e.to_string(),
                        }
                    })?;
                    cases.push(case);
                }
            }
        }
        // A `suites` value of the wrong JSON type is malformed output, not
        // an empty plan.
        Some(_) => return Err(PipelineError::InvalidModelOutput { raw: cleaned }),
        None => {}
    }

    Ok(TestPlan {
        website: website.to_string(),
        suites,
        cases,
    })
}
