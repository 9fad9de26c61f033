pub mod model;
pub mod persist;
pub mod synthesizer;
