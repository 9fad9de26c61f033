use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::llm::TextModel;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "qwen2.5:1.5b";

/// Blocking Ollama backend.
pub struct OllamaBackend {
    pub endpoint: String,
    pub model: String,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaBackend {
    pub fn new(endpoint: &str, model: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for OllamaBackend {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }
}

impl TextModel for OllamaBackend {
    fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        let request = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        log::debug!("ollama request to {} ({} chars)", self.endpoint, prompt.len());
        let response: OllamaResponse = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response.response)
    }
}
