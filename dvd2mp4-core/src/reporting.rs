//! Run results and their classification.

use crate::utils::calculate_size_reduction;

use serde::Serialize;

use std::path::PathBuf;
use std::time::Duration;

/// A successfully converted file.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    pub filename: String,
    pub output_path: PathBuf,
    #[serde(rename = "duration_secs", serialize_with = "serialize_secs")]
    pub duration: Duration,
    pub input_size: u64,
    pub output_size: u64,
}

impl ConversionResult {
    pub fn size_reduction_percent(&self) -> u64 {
        calculate_size_reduction(self.input_size, self.output_size)
    }
}

/// A file ffmpeg could not convert.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionFailure {
    pub filename: String,
    pub reason: String,
}

/// Overall result of a run, mirroring the three end states a user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every file converted (or was already present and skipped).
    AllConverted,
    /// Some files converted, some failed.
    Partial,
    /// Files failed and none converted.
    NothingConverted,
}

/// Everything that happened during one call to `process_videos`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub output_dir: PathBuf,
    pub converted: Vec<ConversionResult>,
    pub failed: Vec<ConversionFailure>,
    pub skipped: Vec<String>,
}

impl RunSummary {
    pub fn new(total: usize, output_dir: PathBuf) -> Self {
        Self {
            total,
            output_dir,
            converted: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn outcome(&self) -> RunOutcome {
        match (self.converted.is_empty(), self.failed.is_empty()) {
            (_, true) => RunOutcome::AllConverted,
            (false, false) => RunOutcome::Partial,
            (true, false) => RunOutcome::NothingConverted,
        }
    }

    pub fn total_input_size(&self) -> u64 {
        self.converted.iter().map(|r| r.input_size).sum()
    }

    pub fn total_output_size(&self) -> u64 {
        self.converted.iter().map(|r| r.output_size).sum()
    }
}

fn serialize_secs<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}
