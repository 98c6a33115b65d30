//! Implementation of the 'convert' subcommand.
//!
//! Resolves the DVD folder, finds its title VOBs, makes sure ffmpeg is usable,
//! then hands the files to `dvd2mp4_core::process_videos` and reports the
//! outcome.

use crate::cli::ConvertArgs;
use crate::config::{DEFAULT_LOG_DIR_NAME, FFMPEG_DOWNLOAD_URL, LOG_FILE_PREFIX};
use crate::error::CliResult;
use crate::logging::attach_run_log;
use crate::output;
use crate::progress::TerminalReporter;

use dvd2mp4_core::external::SidecarSpawner;
use dvd2mp4_core::platform::open_folder;
use dvd2mp4_core::progress::{LogReporter, ProgressReporter};
use dvd2mp4_core::{
    CoreConfig, CoreError, FfmpegLocation, RunOutcome, RunSummary, VobFile, check_ffmpeg,
    default_output_dir, find_vob_files, format_duration, locate_ffmpeg, process_videos,
};

use log::{debug, info, warn};
use serde::Serialize;

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Shape of the `--json` report on stdout.
#[derive(Debug, Serialize)]
pub struct ConvertReport<'a> {
    pub outcome: RunOutcome,
    pub ffmpeg: &'a FfmpegLocation,
    pub ffmpeg_version: &'a str,
    pub log_file: Option<&'a Path>,
    #[serde(flatten)]
    pub summary: &'a RunSummary,
}

/// Canonicalizes the input folder, with a message that names what the user typed.
pub fn resolve_input_dir(input: &Path) -> CliResult<PathBuf> {
    input.canonicalize().map_err(|e| {
        CoreError::PathError(format!("Invalid input path '{}': {}", input.display(), e))
    })
}

/// Finds the title VOBs in `input_dir`, turning "nothing found" into a hint.
pub fn discover_vob_files(input_dir: &Path, min_size: u64) -> CliResult<Vec<VobFile>> {
    find_vob_files(input_dir, min_size).map_err(|e| match e {
        CoreError::NoFilesFound => CoreError::OperationFailed(format!(
            "No DVD video files (.VOB) found in '{}'. Make sure you selected the correct folder.",
            input_dir.display()
        )),
        other => other,
    })
}

/// Explains a missing ffmpeg in terms of what the user can do about it.
pub fn ffmpeg_unavailable(location: &FfmpegLocation, err: CoreError) -> CoreError {
    match err {
        CoreError::DependencyNotFound(_) => CoreError::OperationFailed(format!(
            "FFmpeg is required but was not found ({}: '{}').\n\
             Install it from {} or pass its location with --ffmpeg.",
            location.source,
            location.path.display(),
            FFMPEG_DOWNLOAD_URL
        )),
        other => other,
    }
}

fn select_reporter(json: bool) -> Box<dyn ProgressReporter> {
    if !json && console::Term::stderr().is_term() {
        Box::new(TerminalReporter::new())
    } else {
        Box::new(LogReporter::default())
    }
}

/// Runs a full conversion and returns how it went.
///
/// Errors are reserved for problems that stop the run before any file is
/// attempted. Per-file failures show up in the returned outcome.
pub fn run_convert(args: ConvertArgs) -> CliResult<RunOutcome> {
    let run_start = Instant::now();

    let input_dir = resolve_input_dir(&args.input_dir)?;
    let files = discover_vob_files(&input_dir, args.min_size)?;

    if args.json {
        info!("Found {} video file(s) to convert", files.len());
        for line in output::file_list_lines(&files) {
            info!("{}", line);
        }
    } else {
        output::print_file_list(&files);
    }

    let ffmpeg = locate_ffmpeg(args.ffmpeg.as_deref());
    let ffmpeg_version = check_ffmpeg(&ffmpeg.path).map_err(|e| ffmpeg_unavailable(&ffmpeg, e))?;
    debug!("Using {} ({}): {}", ffmpeg.path.display(), ffmpeg.source, ffmpeg_version);

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&input_dir));
    let log_dir = args
        .log_dir
        .clone()
        .unwrap_or_else(|| output_dir.join(DEFAULT_LOG_DIR_NAME));
    let log_path = attach_run_log(&log_dir, LOG_FILE_PREFIX)?;

    info!("Input folder: {}", input_dir.display());
    info!("Output folder: {}", output_dir.display());
    debug!("Run log: {}", log_path.display());

    let mut config = CoreConfig::new(input_dir, output_dir, log_dir);
    config.ffmpeg_path = Some(ffmpeg.path.clone());
    config.crf = args.crf;
    config.preset = args.preset.clone();
    config.audio_bitrate_kbps = args.audio_bitrate;
    config.min_vob_size = args.min_size;
    config.skip_existing = args.skip_existing;
    config.validate()?;

    if !args.json {
        output::print_ffmpeg(&ffmpeg, &ffmpeg_version);
        output::print_info("Output directory:", config.output_dir.display());
        println!();
    }

    let reporter = select_reporter(args.json);
    let summary = process_videos(&SidecarSpawner, &config, &files, reporter.as_ref())?;
    let outcome = summary.outcome();

    info!("Total time: {}", format_duration(run_start.elapsed()));

    if args.json {
        let report = ConvertReport {
            outcome,
            ffmpeg: &ffmpeg,
            ffmpeg_version: &ffmpeg_version,
            log_file: Some(&log_path),
            summary: &summary,
        };
        let json = serde_json::to_string_pretty(&report).map_err(|e| {
            CoreError::OperationFailed(format!("Failed to serialize run summary: {}", e))
        })?;
        println!("{}", json);
    } else {
        output::print_summary(&summary, Some(&log_path));
    }

    if args.open && !summary.converted.is_empty() {
        if let Err(e) = open_folder(&summary.output_dir) {
            warn!("Could not open output folder: {}", e);
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dvd2mp4_core::FfmpegSource;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_input_dir_reports_original_path() {
        let err = resolve_input_dir(Path::new("/definitely/not/here/VIDEO_TS")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid input path"));
        assert!(msg.contains("/definitely/not/here/VIDEO_TS"));
    }

    #[test]
    fn test_discover_vob_files_hint_when_empty() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("VIDEO_TS.IFO")).unwrap();

        let err = discover_vob_files(dir.path(), 1_000_000).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("No DVD video files (.VOB) found in"));
        assert!(msg.contains("correct folder"));
    }

    #[test]
    fn test_discover_vob_files_finds_titles() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("VTS_01_1.VOB"))
            .unwrap()
            .set_len(2_000_000)
            .unwrap();

        let files = discover_vob_files(dir.path(), 1_000_000).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name(), "VTS_01_1.VOB");
    }

    #[test]
    fn test_ffmpeg_unavailable_mentions_download_and_flag() {
        let location = FfmpegLocation {
            path: PathBuf::from("ffmpeg"),
            source: FfmpegSource::SystemPath,
        };
        let err = ffmpeg_unavailable(&location, CoreError::DependencyNotFound("ffmpeg".into()));
        let msg = err.to_string();
        assert!(msg.contains(FFMPEG_DOWNLOAD_URL));
        assert!(msg.contains("--ffmpeg"));
        assert!(msg.contains("system PATH"));
    }

    #[test]
    fn test_ffmpeg_unavailable_passes_other_errors_through() {
        let location = FfmpegLocation {
            path: PathBuf::from("/opt/ffmpeg"),
            source: FfmpegSource::Explicit,
        };
        let err = ffmpeg_unavailable(&location, CoreError::Config("bad".into()));
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_convert_report_json_shape() {
        let location = FfmpegLocation {
            path: PathBuf::from("/usr/bin/ffmpeg"),
            source: FfmpegSource::SystemPath,
        };
        let mut summary = RunSummary::new(1, PathBuf::from("/dvd/Converted_MP4"));
        summary.skipped.push("VTS_01_1.VOB".to_string());
        let report = ConvertReport {
            outcome: summary.outcome(),
            ffmpeg: &location,
            ffmpeg_version: "ffmpeg version 6.1",
            log_file: None,
            summary: &summary,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["outcome"], "all_converted");
        assert_eq!(value["ffmpeg"]["source"], "system_path");
        assert_eq!(value["total"], 1);
        assert_eq!(value["skipped"][0], "VTS_01_1.VOB");
        assert!(value["log_file"].is_null());
    }
}
