// dvd2mp4-cli/src/config.rs
//
// Defaults specific to the CLI front end. Encoder defaults live in
// dvd2mp4_core::config.

/// Subdirectory of the output folder used for run logs when --log-dir is absent.
pub const DEFAULT_LOG_DIR_NAME: &str = "logs";

/// Prefix of per-run log file names.
pub const LOG_FILE_PREFIX: &str = "dvd2mp4_convert_run";

/// Where users are sent when ffmpeg is missing.
pub const FFMPEG_DOWNLOAD_URL: &str = "https://ffmpeg.org/download.html";

/// Process exit code when some files converted and some failed.
pub const EXIT_PARTIAL: i32 = 2;

/// Process exit code for fatal errors and runs where nothing converted.
pub const EXIT_FAILURE: i32 = 1;
