use thiserror::Error;

/// Errors surfaced by the planning and execution pipeline.
///
/// Failures local to one test case (step synthesis, unit execution) are
/// handled where they occur and recorded as `Fail` verdicts; the variants
/// here cover everything that propagates between components.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Node.js sidecar failed to spawn.
    #[error("failed to spawn {script} (is Node.js installed?): {source}")]
    SubprocessSpawn {
        script: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O on the browser sidecar's stdin/stdout failed.
    #[error("browser session I/O: {0}")]
    SessionIo(String),

    /// The sidecar answered a command with ok=false.
    #[error("browser command '{command}' failed: {error}")]
    SessionProtocol { command: String, error: String },

    /// JSON (de)serialization failed outside of model-output parsing.
    #[error("JSON error ({context}): {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP request to the text-generation backend failed.
    #[error("model request failed: {0}")]
    ModelRequest(#[from] reqwest::Error),

    /// The model's plan response was not valid JSON. Carries the raw
    /// text (after fence stripping) for diagnosis.
    #[error("model did not return valid JSON; raw output:\n{raw}")]
    InvalidModelOutput { raw: String },

    /// A case record in the plan response is missing required fields.
    #[error("invalid test case in suite '{suite}': {detail}")]
    PlanValidation { suite: String, detail: String },

    /// Filesystem error while reading/writing artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export of the plan failed.
    #[error("CSV export: {0}")]
    Csv(#[from] csv::Error),

    /// The embedded script host could not be set up.
    #[error("script host: {0}")]
    ScriptHost(String),
}
