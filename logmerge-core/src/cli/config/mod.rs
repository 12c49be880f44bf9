mod check;
mod init;

pub use check::*;
pub use init::*;

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate a config file and print the resolved values
    Check {
        /// Path to the config file
        #[arg(default_value = "logmerge.hcl")]
        path: PathBuf,
    },

    /// Write a commented default config file
    Init {
        /// Path to the config file
        #[arg(default_value = "logmerge.hcl")]
        path: PathBuf,
    },
}

pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(path),
        ConfigCmd::Init { path } => Ok(init(path)?),
    }
}
