//! `shoplist` entry point.
//!
//! # Responsibility
//! - Resolve data/log locations, start logging, run one command.
//! - Report failures on stderr with a non-zero exit status.

use clap::Parser;
use shoplist_cli::{open_service, run_command, Cli, CliError};
use shoplist_core::{default_log_level, init_logging, AppPaths};
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("shoplist: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let paths = AppPaths::resolve(cli.data_dir, cli.log_dir)?;
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    // Logging is diagnostics only; the command still runs without it.
    if let Err(err) = init_logging(level, &paths.log_dir) {
        eprintln!("shoplist: logging disabled: {err}");
    }

    let mut service = open_service(&paths);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = BufWriter::new(io::stdout().lock());
    run_command(cli.command, &mut service, &mut input, &mut out)?;
    out.flush()?;
    Ok(())
}
