pub mod materializer;
pub mod synthesizer;
