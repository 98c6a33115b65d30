//! Human-readable output on stdout: file listings, run summary, final status.

use dvd2mp4_core::{
    FfmpegLocation, RunOutcome, RunSummary, VobFile, format_bytes, format_duration, format_size_mb,
};
use owo_colors::{OwoColorize, Style};

use std::path::Path;

fn paint(text: &str, style: Style) -> String {
    if console::colors_enabled() {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Print a heading with a separator line above and below
pub fn print_heading(text: &str) {
    let line = "=".repeat(60);
    println!("{}", paint(&line, Style::new().bright_blue()));
    println!("{}", paint(text, Style::new().bold()));
    println!("{}", paint(&line, Style::new().bright_blue()));
}

/// Print a label/value line with the label emphasised
pub fn print_info(label: &str, value: impl std::fmt::Display) {
    println!("{} {}", paint(label, Style::new().bold()), value);
}

/// Lines for a discovered-files listing, e.g. "  - VTS_01_1.VOB (1023.4 MB)".
pub fn file_list_lines(files: &[VobFile]) -> Vec<String> {
    files
        .iter()
        .map(|f| format!("  - {} ({})", f.name(), format_size_mb(f.size)))
        .collect()
}

pub fn print_file_list(files: &[VobFile]) {
    println!("Found {} video file(s) to convert:", files.len());
    for line in file_list_lines(files) {
        println!("{}", line);
    }
}

pub fn print_ffmpeg(location: &FfmpegLocation, version: &str) {
    print_info("FFmpeg:", format!("{} ({})", location.path.display(), location.source));
    if !version.is_empty() {
        print_info("Version:", version);
    }
}

/// The one-line result message shown at the end of a run.
pub fn status_message(summary: &RunSummary) -> String {
    let converted = summary.converted.len();
    match summary.outcome() {
        RunOutcome::AllConverted => {
            if summary.skipped.is_empty() {
                format!("✓ Successfully converted {} video(s)!", converted)
            } else {
                format!(
                    "✓ Successfully converted {} video(s)! ({} already converted, skipped)",
                    converted,
                    summary.skipped.len()
                )
            }
        }
        RunOutcome::Partial => format!(
            "⚠ Converted {}/{} videos (some failed)",
            converted, summary.total
        ),
        RunOutcome::NothingConverted => "✗ Conversion failed".to_string(),
    }
}

pub fn print_summary(summary: &RunSummary, log_path: Option<&Path>) {
    println!();
    print_heading("Conversion Summary");

    for result in &summary.converted {
        println!("{}", result.filename);
        println!("  Output:      {}", result.output_path.display());
        println!("  Encode time: {}", format_duration(result.duration));
        println!("  Input size:  {}", format_bytes(result.input_size));
        println!("  Output size: {}", format_bytes(result.output_size));
        println!("  Reduced by:  {}%", result.size_reduction_percent());
        println!("{}", "-".repeat(40));
    }

    for failure in &summary.failed {
        println!("{} {}", paint("FAILED", Style::new().red().bold()), failure.filename);
        for line in failure.reason.lines() {
            println!("  {}", line);
        }
        println!("{}", "-".repeat(40));
    }

    print_info(
        "Conversion complete:",
        format!("{}/{} files converted", summary.converted.len(), summary.total),
    );
    print_info("Output directory:", summary.output_dir.display());
    if let Some(path) = log_path {
        print_info("Log file:", path.display());
    }

    let status = status_message(summary);
    let style = match summary.outcome() {
        RunOutcome::AllConverted => Style::new().green().bold(),
        RunOutcome::Partial => Style::new().yellow().bold(),
        RunOutcome::NothingConverted => Style::new().red().bold(),
    };
    println!();
    println!("{}", paint(&status, style));
}
