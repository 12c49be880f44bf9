use crate::conf::ConfigError;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = r#"# logmerge configuration
#
# Every section and field is optional. Command line flags override these values.

merge = {
  # Records accepted between two flush attempts.
  batch_size = 20

  # Channel slots reserved per source.
  channel_capacity = 100

  # Largest single entry, in bytes.
  max_entry_size = 65536

  # Milliseconds to wait for a silent source before flushing without it.
  # 0 waits forever.
  stale_timeout_ms = 0
}

display = {
  # dark | light | off
  color      = "dark"
  full_names = false
}

# filter = {
#   grep      = "SomeException"
#   highlight = "ERROR"
# }
"#;

pub fn init(path: PathBuf) -> Result<(), ConfigError> {
    // Refuse to overwrite an existing file
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(ConfigError::AlreadyExists { path });
        }
        Err(source) => return Err(ConfigError::WriteFile { path, source }),
    };

    if let Err(source) = file.write_all(DEFAULT_CONFIG.as_bytes()) {
        return Err(ConfigError::WriteFile { path, source });
    }

    // User feedback
    println!("✔ Wrote default config to {}", path.display());
    println!();
    println!("Next steps:");
    println!("  logmerge config check {}", path.display());
    println!("  logmerge merge --config {} <FILES>...", path.display());

    Ok(())
}
