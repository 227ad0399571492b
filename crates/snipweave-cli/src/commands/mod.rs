//! CLI command implementations

pub mod generate;
pub mod info;
pub mod json_output;
pub mod validate;

mod progress;
