use crate::chunk::DEFAULT_MAX_ENTRY_SIZE;
use crate::color::ColorScheme;
use crate::conf::{ConfigError, LogmergeConfig, compile_pattern, load_config};
use crate::entry::TimeRange;
use crate::merge::{
    DEFAULT_BATCH_SIZE, DEFAULT_CHANNEL_CAPACITY, MergeError, MergeSettings, Merger, StalePolicy,
};
use crate::source::{SourceInput, SourceName};
use crate::timestamp::parse_stamp;
use anyhow::{Context, Result};
use clap::Args;
use regex::Regex;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs::File;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Args, Debug, Default)]
pub struct MergeArgs {
    /// Log files to merge, each `[tag:]path`; `-` reads standard input
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<String>,

    /// Color scheme
    #[arg(long, value_enum)]
    pub color: Option<ColorScheme>,

    /// Earliest entry to show, as `YYYY/MM/DD HH:MM:SS.mmm ZONE`
    #[arg(long)]
    pub start: Option<String>,

    /// Latest entry to show, as `YYYY/MM/DD HH:MM:SS.mmm ZONE`
    #[arg(long)]
    pub stop: Option<String>,

    /// Seconds to show after --start, or before --stop
    #[arg(long, value_name = "SECS")]
    pub duration: Option<u64>,

    /// Only show entries with a line matching this regex
    #[arg(long, value_name = "REGEX")]
    pub grep: Option<String>,

    /// Mark every match of this regex
    #[arg(long, value_name = "REGEX")]
    pub highlight: Option<String>,

    /// Largest single entry, in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_buffer: Option<usize>,

    /// Records accepted between flush attempts
    #[arg(long, value_name = "N")]
    pub batch_size: Option<usize>,

    /// Channel slots per source
    #[arg(long, value_name = "N")]
    pub channel_capacity: Option<usize>,

    /// Seconds to wait for a silent source before flushing without it (0 waits forever)
    #[arg(long, value_name = "SECS")]
    pub stale_timeout: Option<u64>,

    /// Show full paths instead of base names
    #[arg(long)]
    pub full_names: bool,

    /// HCL config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl MergeArgs {
    pub fn load_config(&self) -> Result<LogmergeConfig, ConfigError> {
        match &self.config {
            Some(path) => load_config(path),
            None => Ok(LogmergeConfig::default()),
        }
    }

    /// Resolve flags over the config file over built-in defaults.
    pub fn settings(&self, config: &LogmergeConfig) -> Result<MergeSettings, ConfigError> {
        let start = self.start.as_deref().map(parse_bound).transpose()?;
        let stop = self.stop.as_deref().map(parse_bound).transpose()?;
        let range = TimeRange::from_bounds(start, stop, self.duration.map(Duration::from_secs));
        if range.is_empty() {
            return Err(ConfigError::invalid_value("--start", "must not be after --stop"));
        }

        let grep = pattern("grep", self.grep.as_deref(), config.filter.grep.as_deref())?;
        let highlight = pattern(
            "highlight",
            self.highlight.as_deref(),
            config.filter.highlight.as_deref(),
        )?;

        let max_entry_size = self
            .max_buffer
            .or(config.merge.max_entry_size)
            .unwrap_or(DEFAULT_MAX_ENTRY_SIZE);
        if max_entry_size == 0 {
            return Err(ConfigError::invalid_value("--max-buffer", "must be greater than zero"));
        }

        let channel_capacity = self
            .channel_capacity
            .or(config.merge.channel_capacity)
            .unwrap_or(DEFAULT_CHANNEL_CAPACITY);
        if channel_capacity == 0 {
            return Err(ConfigError::invalid_value(
                "--channel-capacity",
                "must be greater than zero",
            ));
        }

        let stale_ms = self
            .stale_timeout
            .map(|secs| secs.saturating_mul(1000))
            .or(config.merge.stale_timeout_ms)
            .unwrap_or(0);
        let stale = match stale_ms {
            0 => StalePolicy::Wait,
            ms => StalePolicy::ForceFlush(Duration::from_millis(ms)),
        };

        Ok(MergeSettings {
            range,
            grep,
            highlight,
            batch_size: self
                .batch_size
                .or(config.merge.batch_size)
                .unwrap_or(DEFAULT_BATCH_SIZE),
            channel_capacity,
            max_entry_size,
            stale,
        })
    }

    pub fn color(&self, config: &LogmergeConfig) -> ColorScheme {
        self.color.or(config.display.color).unwrap_or_default()
    }

    pub fn full_names(&self, config: &LogmergeConfig) -> bool {
        self.full_names || config.display.full_names.unwrap_or(false)
    }
}

fn parse_bound(value: &str) -> Result<i64, ConfigError> {
    parse_stamp(value).map_err(|source| ConfigError::InvalidTimestamp {
        value: value.to_string(),
        source,
    })
}

fn pattern(
    field: &str,
    flag: Option<&str>,
    file: Option<&str>,
) -> Result<Option<Regex>, ConfigError> {
    flag.or(file)
        .map(|pattern| compile_pattern(field, pattern))
        .transpose()
}

/// Open every source, merge them to stdout, and stop early if `cancel` fires.
pub async fn run_merge(args: MergeArgs, cancel: CancellationToken) -> Result<()> {
    let config = args.load_config()?;
    let settings = args.settings(&config)?;
    let full_names = args.full_names(&config);

    let mut merger = Merger::new(settings, args.color(&config).palettes());

    for arg in &args.files {
        let name = SourceName::parse(arg, full_names);
        let input = if name.is_stdin() {
            SourceInput::new(name.alias(), name.rolled, tokio::io::stdin())
        } else {
            let file = File::open(&name.path)
                .await
                .with_context(|| format!("failed to open {}", name.path.display()))?;
            SourceInput::new(name.alias(), name.rolled, file)
        };
        merger.add_source(input);
    }

    info!(
        sources = merger.source_count(),
        alias_width = merger.alias_width(),
        "merge starting"
    );

    match merger.run(io::stdout(), cancel).await {
        Ok(_) => Ok(()),
        Err(MergeError::Cancelled) => {
            warn!("merge interrupted, buffered entries were not written");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
