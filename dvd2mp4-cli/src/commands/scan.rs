//! Implementation of the 'scan' subcommand: a dry run of discovery.

use crate::cli::ScanArgs;
use crate::commands::convert::{discover_vob_files, resolve_input_dir};
use crate::error::CliResult;
use crate::output;

use dvd2mp4_core::{default_output_dir, format_bytes};

/// Lists the VOBs `convert` would pick up and where their MP4s would go.
pub fn run_scan(args: ScanArgs) -> CliResult<()> {
    let input_dir = resolve_input_dir(&args.input_dir)?;
    let files = discover_vob_files(&input_dir, args.min_size)?;

    output::print_file_list(&files);

    let total: u64 = files.iter().map(|f| f.size).sum();
    println!();
    output::print_info("Total size:", format_bytes(total));
    output::print_info("Output directory:", default_output_dir(&input_dir).display());
    Ok(())
}
