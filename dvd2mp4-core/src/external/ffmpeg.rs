//! FFmpeg command building and execution for VOB to MP4 conversion.
//!
//! Every file is converted with one fixed-shape invocation:
//!
//! ```text
//! ffmpeg -i <in.VOB> -c:v libx264 -preset medium -crf 20 -c:a aac -b:a 192k
//!        -movflags +faststart -y <out.mp4>
//! ```
//!
//! H.264 + AAC keeps the output playable nearly everywhere, and `+faststart`
//! moves the index to the front of the file for streaming playback.

use crate::config::CoreConfig;
use crate::error::{CoreResult, command_failed_error};
use crate::external::executor::{FfmpegProcess, FfmpegSpawner};
use crate::progress::FfmpegProgressHandler;

use ffmpeg_sidecar::command::FfmpegCommand;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const VIDEO_CODEC: &str = "libx264";
pub const AUDIO_CODEC: &str = "aac";

/// Parameters for a single VOB to MP4 encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeParams {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub crf: u8,
    pub preset: String,
    pub audio_bitrate_kbps: u32,
    /// Pass `-y` so an existing output is replaced without prompting.
    pub overwrite: bool,
}

impl EncodeParams {
    pub fn from_config(config: &CoreConfig, input_path: &Path, output_path: &Path) -> Self {
        Self {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            crf: config.crf,
            preset: config.preset.clone(),
            audio_bitrate_kbps: config.audio_bitrate_kbps,
            overwrite: !config.skip_existing,
        }
    }
}

/// Builds the ffmpeg command for one encode.
pub fn build_ffmpeg_command(ffmpeg_program: &Path, params: &EncodeParams) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new_with_path(ffmpeg_program);

    cmd.input(params.input_path.to_string_lossy().as_ref());

    cmd.args(["-c:v", VIDEO_CODEC]);
    cmd.args(["-preset", &params.preset]);
    cmd.args(["-crf", &params.crf.to_string()]);

    cmd.args(["-c:a", AUDIO_CODEC]);
    cmd.args(["-b:a", &format!("{}k", params.audio_bitrate_kbps)]);

    cmd.args(["-movflags", "+faststart"]);

    if params.overwrite {
        cmd.arg("-y");
    }

    cmd.output(params.output_path.to_string_lossy().as_ref());

    let args: Vec<String> = cmd
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    log::debug!("Built ffmpeg command: {} {}", ffmpeg_program.display(), args.join(" "));
    cmd
}

/// Runs an encode to completion, feeding events to `handler`.
///
/// A non-zero exit becomes `CoreError::CommandFailed` carrying the tail of
/// ffmpeg's error output. Any partial file at `output_path` is removed.
pub fn run_ffmpeg_encode<S: FfmpegSpawner>(
    spawner: &S,
    cmd: FfmpegCommand,
    output_path: &Path,
    handler: &mut FfmpegProgressHandler<'_>,
) -> CoreResult<()> {
    let mut process = spawner.spawn(cmd)?;

    process.handle_events(|event| {
        handler.handle_event(event);
        Ok(())
    })?;

    let status = process.wait()?;
    if status.success() {
        return Ok(());
    }

    remove_partial_output(output_path);
    let tail = handler.error_tail();
    let stderr = if tail.is_empty() {
        "no error output captured".to_string()
    } else {
        tail
    };
    Err(command_failed_error("ffmpeg", status, stderr))
}

fn remove_partial_output(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => log::warn!("Removed partial output: {}", path.display()),
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => log::warn!(
            "Failed to remove partial output at {}: {}",
            path.display(),
            err
        ),
    }
}
