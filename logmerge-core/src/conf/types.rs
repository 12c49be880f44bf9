use crate::color::ColorScheme;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogmergeConfig {
    pub merge: MergeSection,
    pub display: DisplaySection,
    pub filter: FilterSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeSection {
    pub batch_size: Option<usize>,
    pub channel_capacity: Option<usize>,
    pub max_entry_size: Option<usize>,

    /// 0 keeps waiting for silent sources forever.
    pub stale_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySection {
    pub color: Option<ColorScheme>,
    pub full_names: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSection {
    pub grep: Option<String>,
    pub highlight: Option<String>,
}
