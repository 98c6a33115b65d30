//! Progress reporting for conversion runs.
//!
//! The conversion driver blocks on one ffmpeg process at a time. It announces
//! run and file boundaries through a [`ProgressReporter`], and
//! [`FfmpegProgressHandler`] turns ffmpeg's event stream into percentage updates
//! on the same reporter. Front ends decide how to render them (a terminal
//! progress bar, plain log lines, nothing at all).

use crate::reporting::RunSummary;
use crate::utils::parse_ffmpeg_time;

use std::collections::VecDeque;

use ffmpeg_sidecar::event::{FfmpegEvent, FfmpegProgress, LogLevel as FfmpegLogLevel};

/// Minimum percentage step between two progress updates.
const PROGRESS_STEP_PERCENT: f64 = 3.0;

/// Number of ffmpeg error lines kept for failure messages.
const STDERR_TAIL_LINES: usize = 5;

/// Receives progress notifications from the conversion driver.
///
/// Every method has an empty default so implementors only override what they
/// render.
pub trait ProgressReporter {
    fn run_started(&self, _total: usize) {}

    /// `index` is 1-based.
    fn file_started(&self, _index: usize, _total: usize, _name: &str) {}

    fn file_progress(&self, _percent: f64, _current_secs: f64, _total_secs: f64) {}

    fn file_finished(&self, _name: &str, _success: bool) {}

    fn run_finished(&self, _summary: &RunSummary) {}
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {}

/// Reporter that writes progress as log lines, one per 10% step.
///
/// Meant for output that is not a terminal, such as a redirected stderr. File
/// start and completion are already logged by the conversion driver.
#[derive(Debug, Default)]
pub struct LogReporter {
    last_logged_decile: std::cell::Cell<i32>,
}

impl ProgressReporter for LogReporter {
    fn file_started(&self, _index: usize, _total: usize, _name: &str) {
        self.last_logged_decile.set(-1);
    }

    fn file_progress(&self, percent: f64, current_secs: f64, total_secs: f64) {
        if self.advance_decile(percent) {
            log::info!(
                "Progress: {:.0}% ({:.0}s / {:.0}s)",
                percent,
                current_secs,
                total_secs
            );
        }
    }
}

impl LogReporter {
    /// Returns true when `percent` enters a 10% band not yet logged for this file.
    fn advance_decile(&self, percent: f64) -> bool {
        let decile = (percent as i32) / 10;
        if decile > self.last_logged_decile.get() {
            self.last_logged_decile.set(decile);
            true
        } else {
            false
        }
    }
}

// ============================================================================
// FFMPEG EVENT HANDLING
// ============================================================================

/// Consumes ffmpeg events for a single encode.
///
/// The input duration is learned from ffmpeg's own banner (`Duration: ...`),
/// so no separate probe run is needed.
pub struct FfmpegProgressHandler<'a> {
    reporter: &'a dyn ProgressReporter,
    duration: Option<f64>,
    last_progress_percent: f64,
    stderr_lines: VecDeque<String>,
}

impl<'a> FfmpegProgressHandler<'a> {
    pub fn new(reporter: &'a dyn ProgressReporter) -> Self {
        Self {
            reporter,
            duration: None,
            last_progress_percent: -PROGRESS_STEP_PERCENT,
            stderr_lines: VecDeque::with_capacity(STDERR_TAIL_LINES),
        }
    }

    /// Input duration in seconds, once ffmpeg has reported it.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn handle_event(&mut self, event: FfmpegEvent) {
        match event {
            FfmpegEvent::ParsedDuration(parsed) => {
                if self.duration.is_none() && parsed.duration > 0.0 {
                    log::debug!("ffmpeg reported input duration: {:.2}s", parsed.duration);
                    self.duration = Some(parsed.duration);
                }
            }
            FfmpegEvent::Progress(progress) => self.handle_progress(&progress),
            FfmpegEvent::Log(level, message) => self.handle_log(&level, &message),
            FfmpegEvent::Error(error) => self.handle_error(error),
            _ => {}
        }
    }

    /// Last few error lines ffmpeg printed, joined for an error message.
    pub fn error_tail(&self) -> String {
        self.stderr_lines
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn remember_error_line(&mut self, line: String) {
        if self.stderr_lines.len() == STDERR_TAIL_LINES {
            self.stderr_lines.pop_front();
        }
        self.stderr_lines.push_back(line);
    }

    fn handle_progress(&mut self, progress: &FfmpegProgress) {
        let current_secs = parse_ffmpeg_time(&progress.time).unwrap_or(0.0);
        let total = self.duration.unwrap_or(0.0);
        let percent = if total > 0.0 {
            (current_secs / total * 100.0).min(100.0)
        } else {
            0.0
        };

        if percent >= self.last_progress_percent + PROGRESS_STEP_PERCENT
            || (percent >= 100.0 && self.last_progress_percent < 100.0)
        {
            self.reporter.file_progress(percent, current_secs, total);
            self.last_progress_percent = percent;
        }
    }

    fn handle_log(&mut self, level: &FfmpegLogLevel, message: &str) {
        match level {
            FfmpegLogLevel::Fatal | FfmpegLogLevel::Error => {
                self.handle_error(message.to_string());
            }
            FfmpegLogLevel::Warning => log::warn!(target: "ffmpeg_log", "{message}"),
            _ => log::debug!(target: "ffmpeg_log", "{message}"),
        }
    }

    fn handle_error(&mut self, error: String) {
        // MPEG-PS sources routinely start mid-GOP
        if is_non_critical_ffmpeg_error(&error) {
            log::debug!("ffmpeg non-critical message: {error}");
            return;
        }
        log::error!(target: "ffmpeg_log", "{error}");
        self.remember_error_line(error);
    }
}

fn is_non_critical_ffmpeg_error(error: &str) -> bool {
    error.contains("first frame is no keyframe")
        || error.contains("Timestamps are unset")
        || error.contains("Packet corrupt")
        || error.contains("max_analyze_duration")
        || error.contains("Stream map")
}
