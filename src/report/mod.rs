pub mod console;
pub mod results;
