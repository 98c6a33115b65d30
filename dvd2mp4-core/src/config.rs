// ============================================================================
// dvd2mp4-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// This module defines the configuration used by the conversion driver. The
// defaults reproduce a fixed ffmpeg invocation (H.264 via libx264 at CRF 20 with
// the "medium" preset, AAC audio at 192 kbps). Every field can be overridden by
// consumers such as dvd2mp4-cli.
//
// KEY COMPONENTS:
// - CoreConfig: Main configuration structure for the library
// - Default constants: Predefined values for encoder and discovery settings
// - X264_PRESETS: Accepted values for the encoder preset

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::path::PathBuf;

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Default CRF for libx264. 18-23 is the visually lossless range.
pub const DEFAULT_CRF: u8 = 20;

/// Default libx264 preset, balancing speed against compression.
pub const DEFAULT_PRESET: &str = "medium";

/// Default AAC audio bitrate in kbit/s.
pub const DEFAULT_AUDIO_BITRATE_KBPS: u32 = 192;

/// VOBs at or below this size are menus or navigation stubs.
pub const MIN_VOB_SIZE_BYTES: u64 = 1_000_000;

/// Highest CRF libx264 accepts for 8-bit content.
pub const MAX_CRF: u8 = 51;

/// Presets understood by libx264, fastest first.
pub const X264_PRESETS: [&str; 10] = [
    "ultrafast",
    "superfast",
    "veryfast",
    "faster",
    "fast",
    "medium",
    "slow",
    "slower",
    "veryslow",
    "placebo",
];

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Main configuration structure for the dvd2mp4-core library.
///
/// Created by the consumer of the library and passed to
/// [`process_videos`](crate::process_videos).
///
/// # Examples
///
/// ```rust
/// use dvd2mp4_core::CoreConfig;
/// use std::path::PathBuf;
///
/// let mut config = CoreConfig::new(
///     PathBuf::from("/dvd/VIDEO_TS"),
///     PathBuf::from("/dvd/Converted_MP4"),
///     PathBuf::from("/dvd/Converted_MP4/logs"),
/// );
/// config.crf = 18;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    // ---- Path Configuration ----

    /// Directory containing the DVD's VOB files
    pub input_dir: PathBuf,

    /// Directory where converted MP4 files are written
    pub output_dir: PathBuf,

    /// Directory for run log files
    pub log_dir: PathBuf,

    /// ffmpeg binary to run. `None` means "ffmpeg" from PATH.
    pub ffmpeg_path: Option<PathBuf>,

    // ---- Encoder Settings ----

    /// libx264 constant rate factor (0-51, lower is higher quality)
    pub crf: u8,

    /// libx264 preset name
    pub preset: String,

    /// AAC bitrate in kbit/s
    pub audio_bitrate_kbps: u32,

    // ---- Processing Options ----

    /// Files must be strictly larger than this to be converted
    pub min_vob_size: u64,

    /// Leave existing MP4 outputs untouched instead of overwriting them
    pub skip_existing: bool,
}

impl CoreConfig {
    /// Creates a configuration with the default encoder settings.
    pub fn new(input_dir: PathBuf, output_dir: PathBuf, log_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            log_dir,
            ffmpeg_path: None,
            crf: DEFAULT_CRF,
            preset: DEFAULT_PRESET.to_string(),
            audio_bitrate_kbps: DEFAULT_AUDIO_BITRATE_KBPS,
            min_vob_size: MIN_VOB_SIZE_BYTES,
            skip_existing: false,
        }
    }

    /// Checks encoder settings for values ffmpeg would reject.
    pub fn validate(&self) -> CoreResult<()> {
        if self.crf > MAX_CRF {
            return Err(CoreError::Config(format!(
                "CRF must be between 0 and {}, got {}",
                MAX_CRF, self.crf
            )));
        }

        if !X264_PRESETS.contains(&self.preset.as_str()) {
            return Err(CoreError::Config(format!(
                "Unknown x264 preset '{}'. Expected one of: {}",
                self.preset,
                X264_PRESETS.join(", ")
            )));
        }

        if !(32..=512).contains(&self.audio_bitrate_kbps) {
            return Err(CoreError::Config(format!(
                "Audio bitrate must be between 32 and 512 kbit/s, got {}",
                self.audio_bitrate_kbps
            )));
        }

        Ok(())
    }

    /// The ffmpeg program to invoke.
    pub fn ffmpeg_program(&self) -> PathBuf {
        self.ffmpeg_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("ffmpeg"))
    }
}
