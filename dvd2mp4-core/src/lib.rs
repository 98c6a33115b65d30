//! Core library for converting ripped DVD folders to MP4 using ffmpeg.
//!
//! This crate finds the title VOBs in a DVD folder, locates an ffmpeg binary,
//! and converts each VOB to an H.264/AAC MP4 in a `Converted_MP4` folder next
//! to the input.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use dvd2mp4_core::{CoreConfig, check_ffmpeg, default_output_dir, find_vob_files, locate_ffmpeg, process_videos};
//! use dvd2mp4_core::external::SidecarSpawner;
//! use dvd2mp4_core::progress::LogReporter;
//! use std::path::PathBuf;
//!
//! let input_dir = PathBuf::from("/media/dvd/VIDEO_TS");
//! let output_dir = default_output_dir(&input_dir);
//! let mut config = CoreConfig::new(input_dir, output_dir.clone(), output_dir.join("logs"));
//!
//! let ffmpeg = locate_ffmpeg(None);
//! check_ffmpeg(&ffmpeg.path).unwrap();
//! config.ffmpeg_path = Some(ffmpeg.path);
//! config.validate().unwrap();
//!
//! let files = find_vob_files(&config.input_dir, config.min_vob_size).unwrap();
//! let summary = process_videos(&SidecarSpawner, &config, &files, &LogReporter::default()).unwrap();
//! println!("{:?}", summary.outcome());
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod output;
pub mod platform;
pub mod processing;
pub mod progress;
pub mod reporting;
pub mod utils;

// Re-exports for public API
pub use config::CoreConfig;
pub use discovery::{VobFile, find_vob_files, is_vob_file};
pub use error::{CoreError, CoreResult};
pub use external::{FfmpegLocation, FfmpegSource, check_ffmpeg, locate_ffmpeg};
pub use output::{OUTPUT_DIR_NAME, default_output_dir, output_path_for};
pub use processing::process_videos;
pub use reporting::{ConversionFailure, ConversionResult, RunOutcome, RunSummary};
pub use utils::{format_bytes, format_duration, format_size_mb, parse_ffmpeg_time};
