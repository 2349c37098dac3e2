//! Command-line front end for the vaccine mandate utility model
//!
//! Loads scenarios from YAML, applies command-line overrides, runs the
//! analyses in `vaxpolicy_core` and renders the results as text tables or
//! JSON.

pub mod cli;
pub mod config;
pub mod logging;
pub mod report;
pub mod util;

pub use cli::{Args, Command, OutputFormat, run};
pub use logging::init_logging;
