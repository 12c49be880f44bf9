use crate::chunk::DEFAULT_MAX_ENTRY_SIZE;
use crate::conf::{ConfigError, load_config};
use crate::merge::{DEFAULT_BATCH_SIZE, DEFAULT_CHANNEL_CAPACITY};
use std::path::PathBuf;

pub fn check(path: PathBuf) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            let stale = match cfg.merge.stale_timeout_ms.unwrap_or(0) {
                0 => "wait for every source".to_string(),
                ms => format!("flush after {ms} ms"),
            };

            println!("✔ Config loaded successfully");
            println!(
                "✔ batch size {}",
                cfg.merge.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
            );
            println!(
                "✔ channel capacity {} per source",
                cfg.merge.channel_capacity.unwrap_or(DEFAULT_CHANNEL_CAPACITY)
            );
            println!(
                "✔ max entry size {} bytes",
                cfg.merge.max_entry_size.unwrap_or(DEFAULT_MAX_ENTRY_SIZE)
            );
            println!("✔ silent sources: {stale}");
            println!(
                "✔ color {:?}, full names {}",
                cfg.display.color.unwrap_or_default(),
                cfg.display.full_names.unwrap_or(false)
            );
            if let Some(grep) = &cfg.filter.grep {
                println!("✔ grep /{grep}/");
            }
            if let Some(highlight) = &cfg.filter.highlight {
                println!("✔ highlight /{highlight}/");
            }
            Ok(())
        }
        Err(err) => {
            if let Some(hint) = config_error_hint(&err) {
                eprintln!("{hint}");
                eprintln!();
            }
            Err(err.into())
        }
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::Parse { .. } => Some(
            "Config files are HCL with three optional sections.\n\
             \n\
             Example:\n\
             \n\
             merge = {\n\
             \x20 batch_size = 20\n\
             }\n\
             \n\
             display = {\n\
             \x20 color = \"dark\"\n\
             }\n\
             \n\
             filter = {\n\
             \x20 grep = \"SomeException\"\n\
             }",
        ),

        ConfigError::InvalidPattern { .. } => Some(
            "Patterns use Rust regex syntax. Escape literal brackets and dots,\n\
             for example `\\[main\\]` or `foo\\.bar`.",
        ),

        ConfigError::InvalidValue { .. } => Some(
            "Sizes and capacities must be positive. Remove the field to use the default.",
        ),

        _ => None,
    }
}
