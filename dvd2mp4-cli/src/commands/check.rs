//! Implementation of the 'check' subcommand.

use crate::cli::CheckArgs;
use crate::commands::convert::ffmpeg_unavailable;
use crate::error::CliResult;
use crate::output;

use dvd2mp4_core::{check_ffmpeg, locate_ffmpeg};

/// Resolves ffmpeg the same way `convert` does and runs `ffmpeg -version`.
pub fn run_check(args: CheckArgs) -> CliResult<()> {
    let location = locate_ffmpeg(args.ffmpeg.as_deref());
    let version = check_ffmpeg(&location.path).map_err(|e| ffmpeg_unavailable(&location, e))?;

    output::print_ffmpeg(&location, &version);
    Ok(())
}
