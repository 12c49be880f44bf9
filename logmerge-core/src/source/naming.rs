use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// `<prefix>-<n>-<m>.log`, the shape of a rotated log file.
static ROLLED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(.*)-\d+-\d+\.log").expect("rolled file pattern is a valid regex")
});

const STDIN_ARG: &str = "-";
const STDIN_NAME: &str = "stdin";

/// A `[tag:]path` command line argument, resolved into a path and a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceName {
    /// What to open; `-` stands for standard input.
    pub path: PathBuf,

    /// Display name: the base name (or full path) with rotation numbers removed.
    pub name: String,

    pub tag: Option<String>,

    /// The file looks like one piece of a rotated sequence.
    pub rolled: bool,
}

impl SourceName {
    pub fn parse(arg: &str, full_name: bool) -> Self {
        let (tag, path) = match arg.split_once(':') {
            Some((tag, path)) if !path.contains(':') => (Some(tag.to_string()), path),
            _ => (None, arg),
        };

        if path == STDIN_ARG {
            return Self {
                path: PathBuf::from(STDIN_ARG),
                name: STDIN_NAME.to_string(),
                tag,
                rolled: false,
            };
        }

        let rolled_group = ROLLED
            .captures(path)
            .and_then(|caps| caps.get(1))
            .map(|prefix| format!("{}.log", prefix.as_str()));
        let rolled = rolled_group.is_some();
        let shorter = rolled_group.unwrap_or_else(|| path.to_string());

        let name = if full_name {
            shorter
        } else {
            Path::new(&shorter)
                .file_name()
                .map(|base| base.to_string_lossy().into_owned())
                .unwrap_or(shorter)
        };

        Self {
            path: PathBuf::from(path),
            name,
            tag,
            rolled,
        }
    }

    /// The tag when one was given, the display name otherwise.
    pub fn alias(&self) -> &str {
        self.tag.as_deref().unwrap_or(&self.name)
    }

    pub fn is_stdin(&self) -> bool {
        self.path.as_os_str() == STDIN_ARG
    }
}
