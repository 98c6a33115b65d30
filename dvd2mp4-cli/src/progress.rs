//! Terminal progress display for conversion runs.
//!
//! One progress bar per file, labelled "Converting i/total: name...". While a
//! bar is on screen, console log lines are printed through
//! [`suspend_progress`] so they do not tear the bar.

use dvd2mp4_core::progress::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};

use std::sync::Mutex;
use std::time::Duration;

static ACTIVE_BAR: Mutex<Option<ProgressBar>> = Mutex::new(None);

const BAR_TEMPLATE: &str =
    "{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos:>3}% ({elapsed_precise}, ETA {eta})";

/// Runs `f` with the active progress bar (if any) hidden.
pub fn suspend_progress<F: FnOnce()>(f: F) {
    let bar = ACTIVE_BAR.lock().ok().and_then(|guard| guard.clone());
    match bar {
        Some(bar) => bar.suspend(f),
        None => f(),
    }
}

fn set_active_bar(bar: Option<ProgressBar>) {
    if let Ok(mut guard) = ACTIVE_BAR.lock() {
        *guard = bar;
    }
}

/// Renders conversion progress with indicatif on stderr.
#[derive(Debug, Default)]
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    fn current_bar() -> Option<ProgressBar> {
        ACTIVE_BAR.lock().ok().and_then(|guard| guard.clone())
    }
}

impl ProgressReporter for TerminalReporter {
    fn file_started(&self, index: usize, total: usize, name: &str) {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ ");
        bar.set_style(style);
        bar.set_message(format!("Converting {}/{}: {}...", index, total, name));
        bar.enable_steady_tick(Duration::from_millis(120));
        set_active_bar(Some(bar));
    }

    fn file_progress(&self, percent: f64, _current_secs: f64, _total_secs: f64) {
        if let Some(bar) = Self::current_bar() {
            bar.set_position(percent.clamp(0.0, 100.0) as u64);
        }
    }

    fn file_finished(&self, _name: &str, _success: bool) {
        if let Some(bar) = Self::current_bar() {
            bar.finish_and_clear();
        }
        set_active_bar(None);
    }
}
