//! Output formatting for CLI results

pub mod formatters;
pub mod json;
pub mod progress;
pub mod table;
pub mod tree;
