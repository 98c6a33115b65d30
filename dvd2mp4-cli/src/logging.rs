// ============================================================================
// dvd2mp4-cli/src/logging.rs
// ============================================================================
//
// LOGGING: Console and Run Log File Setup
//
// The CLI logs through the `log` facade and dispatches with fern:
// - console (stderr): colored level tags, INFO by default, DEBUG with --verbose.
//   ffmpeg's own lines (target "ffmpeg_log") only appear with --verbose.
// - run log file: attached once the output folder is known, always DEBUG,
//   timestamped, ANSI codes stripped.
//
// Records logged before the file is attached only reach the console.

use crate::error::{CliErrorContext, CliResult};
use crate::progress::suspend_progress;

use dvd2mp4_core::CoreError;
use log::{Level, LevelFilter, Record};
use owo_colors::OwoColorize;

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Target used by the core library for ffmpeg's log lines.
const FFMPEG_LOG_TARGET: &str = "ffmpeg_log";

static RUN_LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// Used for unique per-run log file names.
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Installs the global logger. Call once, before any other logging.
pub fn setup_logging(verbose: bool) -> CliResult<()> {
    let console_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let ffmpeg_console_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Off
    };
    let colors = console::colors_enabled_stderr();

    let console_dispatch = fern::Dispatch::new()
        .level(console_level)
        .level_for(FFMPEG_LOG_TARGET, ffmpeg_console_level)
        .chain(fern::Output::call(move |record| {
            let line = format_console_line(record, colors);
            suspend_progress(|| eprintln!("{}", line));
        }));

    let file_dispatch = fern::Dispatch::new()
        .level(LevelFilter::Debug)
        .chain(fern::Output::call(write_to_run_log));

    fern::Dispatch::new()
        .chain(console_dispatch)
        .chain(file_dispatch)
        .apply()
        .map_err(|e| CoreError::OperationFailed(format!("Failed to initialize logging: {}", e)))
}

/// Starts copying log records into `<log_dir>/<prefix>_<timestamp>.log`.
///
/// Returns the path of the new log file.
pub fn attach_run_log(log_dir: &Path, prefix: &str) -> CliResult<std::path::PathBuf> {
    std::fs::create_dir_all(log_dir)
        .cli_with_context(|| format!("Failed to create log directory '{}'", log_dir.display()))?;

    let path = log_dir.join(format!("{}_{}.log", prefix, get_timestamp()));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .cli_with_context(|| format!("Failed to create log file '{}'", path.display()))?;

    if let Ok(mut guard) = RUN_LOG_FILE.lock() {
        *guard = Some(file);
    }
    Ok(path)
}

fn write_to_run_log(record: &Record) {
    let Ok(mut guard) = RUN_LOG_FILE.lock() else {
        return;
    };
    if let Some(file) = guard.as_mut() {
        let message = strip_ansi_escapes::strip_str(record.args().to_string());
        // Losing a log line is not worth failing the conversion over
        let _ = writeln!(
            file,
            "[{} {:<5} {}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            message
        );
    }
}

fn format_console_line(record: &Record, colors: bool) -> String {
    let message = record.args().to_string();
    let tag = match record.level() {
        Level::Info => return message,
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };

    if !colors {
        return format!("{} {}", tag, message);
    }

    let tag = match record.level() {
        Level::Error => tag.red().bold().to_string(),
        Level::Warn => tag.yellow().to_string(),
        Level::Debug => tag.blue().to_string(),
        _ => tag.magenta().to_string(),
    };
    format!("{} {}", tag, message)
}
