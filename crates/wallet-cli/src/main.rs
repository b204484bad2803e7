//! # bch-wallet
//!
//! Entry point for the `bch-wallet` binary. Parses arguments, initializes
//! logging, runs one command, and maps failures to exit code 1.

use std::process::ExitCode;

use clap::Parser;

use wallet_cli::cli::WalletCli;
use wallet_cli::logging;
use wallet_cli::output::Console;

fn main() -> ExitCode {
    let cli = match WalletCli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version go to stdout and are not failures.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init_logging(cli.verbose);

    let mut console = Console::stdio(!cli.no_color);
    match wallet_cli::run(&cli, &mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            let _ = console.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
