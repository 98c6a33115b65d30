//! Locating the ffmpeg binary.
//!
//! A release of the converter can ship `ffmpeg` (`ffmpeg.exe` on Windows) in the
//! same folder as the `dvd2mp4` executable, so end users need no separate
//! install. Resolution order:
//!
//! 1. an explicitly configured path (`--ffmpeg` / `DVD2MP4_FFMPEG`)
//! 2. a bundled binary beside the running executable
//! 3. `ffmpeg` looked up on `PATH`

use serde::Serialize;

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// File name of a bundled ffmpeg on this platform.
pub const FFMPEG_BINARY_NAME: &str = if cfg!(windows) { "ffmpeg.exe" } else { "ffmpeg" };

/// Where the ffmpeg path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FfmpegSource {
    Explicit,
    Bundled,
    SystemPath,
}

impl fmt::Display for FfmpegSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FfmpegSource::Explicit => "configured path",
            FfmpegSource::Bundled => "bundled with dvd2mp4",
            FfmpegSource::SystemPath => "system PATH",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FfmpegLocation {
    pub path: PathBuf,
    pub source: FfmpegSource,
}

/// Resolves ffmpeg relative to the running executable.
pub fn locate_ffmpeg(explicit: Option<&Path>) -> FfmpegLocation {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    resolve_ffmpeg(explicit, exe_dir.as_deref())
}

/// Resolves ffmpeg given the directory holding the application binary.
pub fn resolve_ffmpeg(explicit: Option<&Path>, exe_dir: Option<&Path>) -> FfmpegLocation {
    if let Some(path) = explicit {
        log::debug!("Using configured ffmpeg: {}", path.display());
        return FfmpegLocation {
            path: path.to_path_buf(),
            source: FfmpegSource::Explicit,
        };
    }

    if let Some(dir) = exe_dir {
        let bundled = dir.join(FFMPEG_BINARY_NAME);
        if bundled.is_file() {
            log::debug!("Using bundled ffmpeg: {}", bundled.display());
            return FfmpegLocation {
                path: bundled,
                source: FfmpegSource::Bundled,
            };
        }
    }

    FfmpegLocation {
        path: PathBuf::from("ffmpeg"),
        source: FfmpegSource::SystemPath,
    }
}
