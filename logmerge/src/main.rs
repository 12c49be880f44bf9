use clap::{Parser, Subcommand};
use logmerge_core::cli::config::{self, ConfigCmd};
use logmerge_core::cli::{MergeArgs, run_merge};
use logmerge_core::logging::{LogFormat, default_log_format, init_logging};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Parser, Debug)]
#[command(
    name = "logmerge",
    version,
    about = "logmerge: merge timestamped multi-line logs into one ordered stream"
)]
struct Cli {
    /// Diagnostics format on stderr (default: text on a terminal, json otherwise)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge log files by entry timestamp
    Merge(MergeArgs),

    /// Config file tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format.unwrap_or_else(default_log_format));

    let result = match cli.command {
        Command::Merge(args) => {
            let cancel = CancellationToken::new();
            spawn_interrupt_handler(cancel.clone());
            run_merge(args, cancel).await
        }
        Command::Config { cmd } => config::run(cmd),
    };

    if let Err(e) = result {
        eprintln!("logmerge: {e:#}");
        std::process::exit(1);
    }
}

fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                debug!("interrupt received");
                cancel.cancel();
            }
            Err(e) => warn!(error = %e, "failed to listen for ctrl-c"),
        }
    });
}
