pub mod ollama;

use crate::error::PipelineError;

// ============================================================================
// TextModel trait — core abstraction over the text-generation service
// ============================================================================

/// One blocking prompt/response round-trip to a text-generation model.
///
/// Both synthesis stages (plan and step code) go through this single method,
/// so the whole pipeline can be exercised with canned backends.
pub trait TextModel {
    fn generate(&self, prompt: &str) -> Result<String, PipelineError>;
}

/// Remove an optional markdown code-fence wrapper (with or without a language
/// tag, payload on the same line or the next) from a model response.
pub fn strip_code_fences(raw: &str) -> String {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("```") {
        let tag_len = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .count();
        s = &rest[tag_len..];
    }
    let mut s = s.trim();
    if let Some(rest) = s.strip_suffix("```") {
        s = rest.trim_end();
    }
    s.to_string()
}

// ============================================================================
// Mock backend (offline smoke runs and tests, no model service needed)
// ============================================================================

/// Canned backend selected with `--backend mock`.
///
/// Answers plan prompts with a one-case Smoke plan and step prompts with a
/// script that opens the target page, so the full pipeline can be walked
/// end-to-end without a model service.
pub struct MockBackend;

impl TextModel for MockBackend {
    fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        if prompt.contains("structured test plan") {
            return Ok(r#"{
  "suites": {
    "Smoke": [
      {
        "id": "SMOKE-1",
        "suite": "Smoke",
        "steps": ["Open the page", "Verify the page body is visible"],
        "expected": "Page loads and renders content",
        "priority": "High"
      }
    ]
  }
}"#
            .to_string());
        }

        // Step prompt: emit a minimal grounded fragment.
        let website = prompt
            .lines()
            .find_map(|l| l.strip_prefix("Website URL: "))
            .unwrap_or("about:blank")
            .trim();
        let code = if prompt.contains("the FIRST step") {
            format!("driver.get(\"{website}\");\ndriver.waitFor(\"body\", 10000);")
        } else {
            "driver.waitFor(\"body\", 10000);".to_string()
        };
        Ok(code)
    }
}
