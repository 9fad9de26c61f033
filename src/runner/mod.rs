pub mod executor;
pub mod js_host;
