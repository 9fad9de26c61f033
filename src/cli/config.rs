use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::llm::ollama::{OllamaBackend, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::llm::{MockBackend, TextModel};

// ============================================================================
// CLI argument parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "qaforge",
    version,
    about = "LLM-assisted browser QA: test plan generation and execution"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Text-generation API endpoint
    #[arg(long, global = true)]
    pub llm_endpoint: Option<String>,

    /// Text-generation model name
    #[arg(long, global = true)]
    pub llm_model: Option<String>,

    /// Path to config file (default: qaforge.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a target site, sample its links, and synthesize a test plan
    Plan {
        /// Target website URL (http, https, or file scheme)
        #[arg(long)]
        url: String,

        /// Maximum number of links to sample
        #[arg(long, default_value_t = 5)]
        num_tests: usize,

        /// Maximum crawl depth from the seed URL
        #[arg(long, default_value_t = 1)]
        depth: usize,

        /// Notification email (echoed only; no integration)
        #[arg(long)]
        email: Option<String>,

        /// Project-management tool identifier (echoed only; no integration)
        #[arg(long, default_value = "jira")]
        pm: String,

        /// Text-model backend: mock or ollama
        #[arg(long, default_value = "mock")]
        backend: String,
    },

    /// Synthesize step code for a persisted plan, run it, and record verdicts
    Exec {
        /// Path to the persisted plan JSON
        #[arg(long, default_value = "output/plan.json")]
        plan: String,

        /// Text-model backend: mock or ollama
        #[arg(long, default_value = "mock")]
        backend: String,
    },
}

// ============================================================================
// Config file model (optional YAML)
// ============================================================================

/// Optional YAML config file: `qaforge.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub plan: PlanConfig,
    #[serde(default)]
    pub exec: ExecConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LlmConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Directory for plan.json / plan.csv.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Settle delay after each navigation, in milliseconds.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            settle_ms: default_settle_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecConfig {
    /// Directory for materialized per-case units.
    #[serde(default = "default_units_dir")]
    pub units_dir: String,

    /// Directory for failure screenshots.
    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: String,

    /// Path of the results record.
    #[serde(default = "default_results_path")]
    pub results_path: String,

    /// Settle delay for the per-step page snapshots, in milliseconds.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            units_dir: default_units_dir(),
            screenshot_dir: default_screenshot_dir(),
            results_path: default_results_path(),
            settle_ms: default_settle_ms(),
        }
    }
}

// Serde default helpers
fn default_output_dir() -> String {
    "output".to_string()
}
fn default_units_dir() -> String {
    "output/units".to_string()
}
fn default_screenshot_dir() -> String {
    "output/screenshots".to_string()
}
fn default_results_path() -> String {
    "output/results.json".to_string()
}
fn default_settle_ms() -> u64 {
    2000
}

// ============================================================================
// Config file loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if the file is missing or
/// malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("qaforge.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Backend selection
// ============================================================================

/// Build the text-model backend by name, with CLI > config > default
/// precedence for the endpoint and model.
pub fn build_backend(
    name: &str,
    endpoint: Option<&str>,
    model: Option<&str>,
) -> Box<dyn TextModel> {
    match name {
        "ollama" => {
            let endpoint = endpoint.unwrap_or(DEFAULT_ENDPOINT);
            let model = model.unwrap_or(DEFAULT_MODEL);
            Box::new(OllamaBackend::new(endpoint, model))
        }
        _ => Box::new(MockBackend),
    }
}
