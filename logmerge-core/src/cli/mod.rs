pub mod config;
mod merge;

#[cfg(test)]
mod tests;

pub use merge::{MergeArgs, run_merge};
