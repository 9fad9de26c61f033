use crate::error::PipelineError;
use crate::llm::{strip_code_fences, TextModel};

/// Everything the model needs to translate one step into automation code.
pub struct StepRequest<'a> {
    /// Human-readable step description from the plan.
    pub step: &'a str,
    /// The owning case's expected-result text.
    pub expected: &'a str,
    /// Target website URL.
    pub website: &'a str,
    /// Freshly captured markup of the website.
    pub page_html: &'a str,
    /// Whether this is the first step of its case; the first fragment must
    /// open the target page before interacting with it.
    pub first_step: bool,
}

/// Translates one plan step at a time into a driver-script fragment.
pub struct StepCodeSynthesizer<'a> {
    model: &'a dyn TextModel,
}

impl<'a> StepCodeSynthesizer<'a> {
    pub fn new(model: &'a dyn TextModel) -> Self {
        Self { model }
    }

    /// One model round-trip; returns the trimmed, de-fenced code fragment.
    pub fn synthesize(&self, request: &StepRequest) -> Result<String, PipelineError> {
        let prompt = build_step_prompt(request);
        let raw = self.model.generate(&prompt)?;
        Ok(strip_code_fences(&raw))
    }
}

/// Instruction template for step-code synthesis.
///
/// The contract mirrors what the runner actually provides: a single `driver`
/// global bridged to an already-open browser session, with no way to end it.
pub fn build_step_prompt(request: &StepRequest) -> String {
    let first_step_rule = if request.first_step {
        format!(
            "- This is the FIRST step of its test case: begin with driver.get(\"{}\") before interacting with the page.\n",
            request.website
        )
    } else {
        String::new()
    };

    format!(
        r#"You are an expert QA engineer.

Convert the following test step into runnable browser-automation JavaScript using the provided `driver` object.

The execution environment exposes exactly one global, `driver`, with these methods and nothing else:
  driver.get(url)               - navigate the shared browser to a URL
  driver.waitFor(selector, ms)  - wait until the element is visible
  driver.click(selector)
  driver.fill(selector, value)
  driver.text(selector)         - element text content, or null
  driver.isVisible(selector)
  driver.count(selector)
  driver.currentUrl()
  driver.sleep(ms)
  driver.screenshot(path)

Selectors are CSS; prefix with `xpath=` for XPath or `text=` for visible text matching.

Rules:
{first_step_rule}- You are given the full HTML of the page. You MUST use the exact attributes that appear in the HTML (id, name, placeholder, value, visible text, class if unique).
- Do NOT invent or assume element IDs or names. Only use selectors that appear exactly in the provided HTML.
- Priority for locators: ID > Name > Placeholder/Text > CSS Selector > XPath.
- If no clean locator exists, construct an XPath using visible text or hierarchy from the given HTML.
- For non-Latin text, match the exact visible text from the HTML, preserving spaces, punctuation, and case.
- Call driver.waitFor on every element before interacting with it.
- The shared browser session is already open. Never end, close, or recreate it in any way.
- Do NOT navigate away from the provided Website URL unless the step explicitly says so.
- If an element cannot be located or an action fails, call driver.screenshot("step_failure.png") before rethrowing the error, and do not terminate the session.
- The code must be executable standalone for this step.
- Output only raw JavaScript, no markdown, no backticks, no explanations.

Website URL: {website}

Full HTML: {html}

Step: {step}
Expected result: {expected}"#,
        website = request.website,
        html = request.page_html,
        step = request.step,
        expected = request.expected,
    )
}
