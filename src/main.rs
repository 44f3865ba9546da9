use std::process::ExitCode;

use clap::Parser;
use fizkin::command::Commands;
use fizkin::runtime::{setup_global_logger, LogLevel};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    // trace, debug, info, warn, error or off. RUST_LOG takes precedence
    #[arg(long = "log-level", global = true, default_value = "info")]
    log_level: LogLevel,
}

fn main() -> ExitCode {
    let mut cli = Cli::parse();
    setup_global_logger(cli.log_level);
    log::debug!("Starting {}", cli.command);

    if let Err(e) = cli.command.try_execute() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
