use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A header line stamped at `08:52:<seconds>.<millis>` on 2015/11/19 in `zone`.
pub fn entry(level: &str, seconds: u32, millis: u32, zone: &str, text: &str) -> String {
    format!("[{level} 2015/11/19 08:52:{seconds:02}.{millis:03} {zone}  {text}")
}

/// Scratch directory holding log files for one test.
pub struct LogDir {
    dir: TempDir,
}

impl LogDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Write `lines` joined by `\n` to `name` and return the full path.
    pub fn write(&self, name: &str, lines: &[String]) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, lines.join("\n")).expect("failed to write log fixture");
        path
    }

    pub fn write_raw(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("failed to write log fixture");
        path
    }
}

impl Default for LogDir {
    fn default() -> Self {
        Self::new()
    }
}
