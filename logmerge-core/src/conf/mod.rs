//! Optional HCL configuration file.
//!
//! Every value has a built-in default and every command line flag overrides the file, so a
//! config file only needs the settings a user wants to pin down for repeated runs.

#[cfg(test)]
mod tests;

mod error;
mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{compile_pattern, load_config};
pub use types::LogmergeConfig;
