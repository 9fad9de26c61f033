//! LLM-assisted browser QA pipeline.
//!
//! The `plan` stage validates a target site, samples its links, and asks a
//! text-generation model for a structured test plan, persisted as JSON and
//! CSV. The `exec` stage translates each planned step into driver-script
//! JavaScript, materializes one unit per case, runs the units against a
//! headless browser, and records a verdict per case.

pub mod browser;
pub mod cli;
pub mod codegen;
pub mod error;
pub mod explorer;
pub mod llm;
pub mod plan;
pub mod report;
pub mod runner;
