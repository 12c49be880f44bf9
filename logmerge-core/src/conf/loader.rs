use crate::conf::error::ConfigError;
use crate::conf::types::LogmergeConfig;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

pub fn load_config(path: &Path) -> Result<LogmergeConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let text = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let config: LogmergeConfig = hcl::from_str(&text).map_err(|e| ConfigError::parse(path, e))?;

    //--------------------------------------------------------------------------
    // Validation
    //--------------------------------------------------------------------------
    validate(&config)?;

    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Compile a user supplied regex, naming the setting it came from on failure.
pub fn compile_pattern(field: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        field: field.to_string(),
        source,
    })
}

fn validate(config: &LogmergeConfig) -> Result<(), ConfigError> {
    if config.merge.max_entry_size == Some(0) {
        return Err(ConfigError::invalid_value(
            "merge.max_entry_size",
            "must be greater than zero",
        ));
    }

    if config.merge.channel_capacity == Some(0) {
        return Err(ConfigError::invalid_value(
            "merge.channel_capacity",
            "must be greater than zero",
        ));
    }

    if let Some(grep) = &config.filter.grep {
        compile_pattern("filter.grep", grep)?;
    }
    if let Some(highlight) = &config.filter.highlight {
        compile_pattern("filter.highlight", highlight)?;
    }

    Ok(())
}
