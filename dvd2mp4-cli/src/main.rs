// dvd2mp4-cli/src/main.rs
//
// Entry point for the `dvd2mp4` binary.
//
// Responsibilities:
// - Parsing command-line arguments (usage errors exit with 1).
// - Setting up console logging (the run log file is attached by `convert`).
// - Dispatching to the selected command.
// - Mapping the run outcome to the process exit code:
//   0 = everything converted, 2 = some files failed, 1 = nothing converted
//   or the run could not start.

use clap::Parser;
use dvd2mp4_cli::config::{EXIT_FAILURE, EXIT_PARTIAL};
use dvd2mp4_cli::logging::setup_logging;
use dvd2mp4_cli::{Cli, Commands, run_check, run_convert, run_scan};
use dvd2mp4_core::RunOutcome;

use std::process;

fn main() {
    // clap's own exit code for usage errors is 2, which means "partial" here
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(if e.use_stderr() { EXIT_FAILURE } else { 0 });
        }
    };

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Error: {}", e);
        process::exit(EXIT_FAILURE);
    }

    let result = match cli.command {
        Commands::Convert(args) => run_convert(args).map(exit_code_for),
        Commands::Scan(args) => run_scan(args).map(|()| 0),
        Commands::Check(args) => run_check(args).map(|()| 0),
    };

    match result {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            log::error!("{}", e);
            process::exit(EXIT_FAILURE);
        }
    }
}

fn exit_code_for(outcome: RunOutcome) -> i32 {
    match outcome {
        RunOutcome::AllConverted => 0,
        RunOutcome::Partial => EXIT_PARTIAL,
        RunOutcome::NothingConverted => EXIT_FAILURE,
    }
}
