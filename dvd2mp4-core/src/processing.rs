// ============================================================================
// dvd2mp4-core/src/processing.rs
// ============================================================================
//
// CONVERSION DRIVER: Sequential VOB to MP4 Conversion
//
// Converts each discovered VOB with one ffmpeg run, strictly one after another.
// A failed file is recorded and the loop moves on; the caller decides what the
// mix of successes and failures means (see RunSummary::outcome).
//
// WORKFLOW:
// 1. Create the output directory
// 2. For each file:
//    a. Report "Converting i/total: name"
//    b. Determine the output path and honour skip_existing
//    c. Build and run the ffmpeg command
//    d. Record sizes and timing, or the failure reason
// 3. Return the run summary

// ---- Internal crate imports ----
use crate::config::CoreConfig;
use crate::discovery::VobFile;
use crate::error::CoreResult;
use crate::external::{EncodeParams, FfmpegSpawner, build_ffmpeg_command, run_ffmpeg_encode};
use crate::output::{output_path_for, prepare_output_dir};
use crate::progress::{FfmpegProgressHandler, ProgressReporter};
use crate::reporting::{ConversionFailure, ConversionResult, RunSummary};
use crate::utils::{format_bytes, format_duration, get_filename_safe};

// ---- External crate imports ----
use log::{error, info, warn};

// ---- Standard library imports ----
use std::fs;
use std::time::Instant;

/// Converts `files` to MP4 according to `config`.
///
/// Only failing to create the output directory is fatal. Every per-file
/// problem ends up in [`RunSummary::failed`].
///
/// # Examples
///
/// ```rust,no_run
/// use dvd2mp4_core::{CoreConfig, find_vob_files, process_videos};
/// use dvd2mp4_core::external::SidecarSpawner;
/// use dvd2mp4_core::progress::NullReporter;
/// use std::path::PathBuf;
///
/// let config = CoreConfig::new(
///     PathBuf::from("/dvd/VIDEO_TS"),
///     PathBuf::from("/dvd/Converted_MP4"),
///     PathBuf::from("/dvd/Converted_MP4/logs"),
/// );
/// let files = find_vob_files(&config.input_dir, config.min_vob_size).unwrap();
/// let summary = process_videos(&SidecarSpawner, &config, &files, &NullReporter).unwrap();
/// println!("{}/{} converted", summary.converted.len(), summary.total);
/// ```
pub fn process_videos<S: FfmpegSpawner>(
    spawner: &S,
    config: &CoreConfig,
    files: &[VobFile],
    reporter: &dyn ProgressReporter,
) -> CoreResult<RunSummary> {
    prepare_output_dir(&config.output_dir)?;

    let total = files.len();
    let ffmpeg_program = config.ffmpeg_program();
    let mut summary = RunSummary::new(total, config.output_dir.clone());

    reporter.run_started(total);

    for (position, file) in files.iter().enumerate() {
        let index = position + 1;
        let file_start_time = Instant::now();
        let filename = file.name();

        reporter.file_started(index, total, &filename);
        info!("Converting {}/{}: {}", index, total, filename);

        let output_path = match output_path_for(&file.path, &config.output_dir) {
            Ok(path) => path,
            Err(e) => {
                error!("Cannot determine output path for {}: {}", filename, e);
                summary.failed.push(ConversionFailure {
                    filename: filename.clone(),
                    reason: e.to_string(),
                });
                reporter.file_finished(&filename, false);
                continue;
            }
        };

        if config.skip_existing && output_path.exists() {
            warn!(
                "Output file already exists: {}. Skipping.",
                output_path.display()
            );
            summary.skipped.push(filename.clone());
            reporter.file_finished(&filename, true);
            continue;
        }

        let params = EncodeParams::from_config(config, &file.path, &output_path);
        let cmd = build_ffmpeg_command(&ffmpeg_program, &params);
        let mut handler = FfmpegProgressHandler::new(reporter);

        match run_ffmpeg_encode(spawner, cmd, &output_path, &mut handler) {
            Ok(()) => {
                let elapsed = file_start_time.elapsed();
                let output_size = fs::metadata(&output_path).map(|m| m.len()).unwrap_or_else(|e| {
                    warn!("Could not read size of {}: {}", output_path.display(), e);
                    0
                });
                let output_name =
                    get_filename_safe(&output_path).unwrap_or_else(|_| output_path.display().to_string());

                info!(
                    "Done: {} in {} ({} -> {})",
                    output_name,
                    format_duration(elapsed),
                    format_bytes(file.size),
                    format_bytes(output_size)
                );

                summary.converted.push(ConversionResult {
                    filename: filename.clone(),
                    output_path,
                    duration: elapsed,
                    input_size: file.size,
                    output_size,
                });
                reporter.file_finished(&filename, true);
            }
            Err(e) => {
                error!("Error converting {}: {}", filename, e);
                summary.failed.push(ConversionFailure {
                    filename: filename.clone(),
                    reason: e.to_string(),
                });
                reporter.file_finished(&filename, false);
            }
        }
    }

    info!(
        "Conversion complete: {}/{} files converted",
        summary.converted.len(),
        total
    );
    reporter.run_finished(&summary);

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::external::mocks::MockFfmpegSpawner;
    use crate::progress::NullReporter;
    use crate::reporting::RunOutcome;
    use ffmpeg_sidecar::event::{FfmpegDuration, FfmpegEvent, FfmpegProgress};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingReporter {
        events: RefCell<Vec<String>>,
    }

    impl ProgressReporter for RecordingReporter {
        fn run_started(&self, total: usize) {
            self.events.borrow_mut().push(format!("run {total}"));
        }

        fn file_started(&self, index: usize, total: usize, name: &str) {
            self.events
                .borrow_mut()
                .push(format!("Converting {index}/{total}: {name}"));
        }

        fn file_progress(&self, percent: f64, _current_secs: f64, _total_secs: f64) {
            self.events.borrow_mut().push(format!("{percent:.0}%"));
        }

        fn file_finished(&self, name: &str, success: bool) {
            self.events.borrow_mut().push(format!("{name} ok={success}"));
        }

        fn run_finished(&self, summary: &RunSummary) {
            self.events
                .borrow_mut()
                .push(format!("finished {}/{}", summary.converted.len(), summary.total));
        }
    }

    fn vob(dir: &Path, name: &str, size: usize) -> VobFile {
        let path = dir.join(name);
        fs::write(&path, vec![0u8; size]).unwrap();
        VobFile {
            path,
            size: size as u64,
        }
    }

    fn setup() -> (TempDir, CoreConfig) {
        let root = tempfile::tempdir().unwrap();
        let input_dir = root.path().join("VIDEO_TS");
        fs::create_dir(&input_dir).unwrap();
        let output_dir = root.path().join("Converted_MP4");
        let log_dir = output_dir.join("logs");
        let config = CoreConfig::new(input_dir, output_dir, log_dir);
        (root, config)
    }

    fn progress_events() -> Vec<FfmpegEvent> {
        vec![
            FfmpegEvent::ParsedDuration(FfmpegDuration {
                input_index: 0,
                duration: 100.0,
                raw_log_message: String::new(),
            }),
            FfmpegEvent::Progress(FfmpegProgress {
                frame: 1250,
                fps: 25.0,
                q: 28.0,
                size_kb: 2048,
                time: "00:00:50.00".to_string(),
                bitrate_kbps: 335.5,
                speed: 2.0,
                raw_log_message: String::new(),
            }),
        ]
    }

    #[test]
    fn test_converts_every_file_in_order() {
        let (_root, config) = setup();
        let files = vec![
            vob(&config.input_dir, "VTS_01_1.VOB", 64),
            vob(&config.input_dir, "VTS_01_2.VOB", 32),
        ];

        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("VTS_01_1.VOB", progress_events(), true);
        spawner.add_success_expectation("VTS_01_2.VOB", vec![], true);

        let reporter = RecordingReporter::default();
        let summary = process_videos(&spawner, &config, &files, &reporter).unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.converted.len(), 2);
        assert!(summary.failed.is_empty());
        assert_eq!(summary.outcome(), RunOutcome::AllConverted);
        assert!(config.output_dir.is_dir());

        let first = &summary.converted[0];
        assert_eq!(first.filename, "VTS_01_1.VOB");
        assert_eq!(first.output_path, config.output_dir.join("VTS_01_1.mp4"));
        assert_eq!(first.input_size, 64);
        assert_eq!(first.output_size, 0);

        let calls = spawner.get_received_calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].iter().any(|a| a.ends_with("VTS_01_1.VOB")));
        assert!(calls[1].iter().any(|a| a.ends_with("VTS_01_2.VOB")));
        assert_eq!(
            calls[0].last().map(PathBuf::from),
            Some(config.output_dir.join("VTS_01_1.mp4"))
        );

        assert_eq!(
            *reporter.events.borrow(),
            vec![
                "run 2".to_string(),
                "Converting 1/2: VTS_01_1.VOB".to_string(),
                "50%".to_string(),
                "VTS_01_1.VOB ok=true".to_string(),
                "Converting 2/2: VTS_01_2.VOB".to_string(),
                "VTS_01_2.VOB ok=true".to_string(),
                "finished 2/2".to_string(),
            ]
        );
    }

    #[test]
    fn test_failure_does_not_stop_the_run() {
        let (_root, config) = setup();
        let files = vec![
            vob(&config.input_dir, "VTS_01_1.VOB", 10),
            vob(&config.input_dir, "VTS_01_2.VOB", 10),
            vob(&config.input_dir, "VTS_01_3.VOB", 10),
        ];

        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("VTS_01_1.VOB", vec![], true);
        spawner.add_exit_error_expectation(
            "VTS_01_2.VOB",
            vec![FfmpegEvent::Error("Invalid data found when processing input".to_string())],
            1,
        );
        spawner.add_success_expectation("VTS_01_3.VOB", vec![], true);

        let summary = process_videos(&spawner, &config, &files, &NullReporter).unwrap();

        assert_eq!(summary.converted.len(), 2);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].filename, "VTS_01_2.VOB");
        assert!(summary.failed[0].reason.contains("Invalid data found"));
        assert_eq!(summary.outcome(), RunOutcome::Partial);
        assert_eq!(spawner.get_received_calls().len(), 3);
    }

    #[test]
    fn test_spawn_error_is_recorded_as_failure() {
        let (_root, config) = setup();
        let files = vec![vob(&config.input_dir, "VTS_01_1.VOB", 10)];

        let spawner = MockFfmpegSpawner::new();
        spawner.add_spawn_error_expectation(
            "VTS_01_1.VOB",
            CoreError::DependencyNotFound("ffmpeg".to_string()),
        );

        let summary = process_videos(&spawner, &config, &files, &NullReporter).unwrap();

        assert!(summary.converted.is_empty());
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.outcome(), RunOutcome::NothingConverted);
    }

    #[test]
    fn test_skip_existing_leaves_output_untouched() {
        let (_root, mut config) = setup();
        config.skip_existing = true;
        let files = vec![
            vob(&config.input_dir, "VTS_01_1.VOB", 10),
            vob(&config.input_dir, "VTS_01_2.VOB", 10),
        ];
        fs::create_dir_all(&config.output_dir).unwrap();
        fs::write(config.output_dir.join("VTS_01_1.mp4"), b"already here").unwrap();

        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("VTS_01_2.VOB", vec![], true);

        let summary = process_videos(&spawner, &config, &files, &NullReporter).unwrap();

        assert_eq!(summary.skipped, vec!["VTS_01_1.VOB".to_string()]);
        assert_eq!(summary.converted.len(), 1);
        assert_eq!(summary.outcome(), RunOutcome::AllConverted);
        assert_eq!(
            fs::read(config.output_dir.join("VTS_01_1.mp4")).unwrap(),
            b"already here"
        );

        let calls = spawner.get_received_calls();
        assert_eq!(calls.len(), 1);
        assert!(!calls[0].iter().any(|a| a == "-y"));
    }

    #[test]
    fn test_existing_output_is_overwritten_by_default() {
        let (_root, config) = setup();
        let files = vec![vob(&config.input_dir, "VTS_01_1.VOB", 10)];
        fs::create_dir_all(&config.output_dir).unwrap();
        fs::write(config.output_dir.join("VTS_01_1.mp4"), b"stale").unwrap();

        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("VTS_01_1.VOB", vec![], true);

        let summary = process_videos(&spawner, &config, &files, &NullReporter).unwrap();

        assert_eq!(summary.converted.len(), 1);
        assert!(summary.skipped.is_empty());
        let calls = spawner.get_received_calls();
        assert!(calls[0].iter().any(|a| a == "-y"));
    }

    #[test]
    fn test_uses_configured_encoder_settings() {
        let (_root, mut config) = setup();
        config.crf = 18;
        config.preset = "slow".to_string();
        let files = vec![vob(&config.input_dir, "VTS_02_1.VOB", 10)];

        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("libx264", vec![], true);

        process_videos(&spawner, &config, &files, &NullReporter).unwrap();

        let args = &spawner.get_received_calls()[0];
        let crf = args.iter().position(|a| a == "-crf").unwrap();
        assert_eq!(args[crf + 1], "18");
        let preset = args.iter().position(|a| a == "-preset").unwrap();
        assert_eq!(args[preset + 1], "slow");
    }
}
