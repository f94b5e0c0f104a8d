//! Display models for CLI output
//!
//! This module converts SMERSH resources into the rows and trees the shell prints.

pub mod display;
