pub mod fixtures;
mod runner;
pub mod tracing;

pub use fixtures::{LogDir, entry};
pub use runner::merge_files;
pub use tracing::{CapturedEvent, CapturedEvents, capture_events};
