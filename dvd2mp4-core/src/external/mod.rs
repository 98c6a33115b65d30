// ============================================================================
// dvd2mp4-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg CLI
//
// This module wraps everything that touches the ffmpeg binary: finding it,
// checking that it runs, building the conversion command, and spawning it
// through a trait seam so the driver can be exercised without ffmpeg installed.
//
// KEY COMPONENTS:
// - FfmpegSpawner / FfmpegProcess traits and the ffmpeg-sidecar implementation
// - ffmpeg location (explicit, bundled beside the executable, PATH)
// - Dependency check via `ffmpeg -version`
// - Command construction and execution for the VOB to MP4 encode

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};

// ---- Standard library imports ----
use std::io;
use std::path::Path;
use std::process::Command;

// ============================================================================
// SUBMODULES
// ============================================================================

/// Traits and implementations for spawning ffmpeg processes
pub mod executor;

/// Command building and execution for the conversion encode
pub mod ffmpeg;

/// Resolution of the ffmpeg binary path
pub mod ffmpeg_locator;

/// Mock spawner for tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};
pub use ffmpeg::{EncodeParams, build_ffmpeg_command, run_ffmpeg_encode};
pub use ffmpeg_locator::{FfmpegLocation, FfmpegSource, locate_ffmpeg, resolve_ffmpeg};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that ffmpeg at `ffmpeg_program` runs, returning its version banner line.
///
/// # Returns
///
/// * `Ok(String)` - First line of `ffmpeg -version` (e.g. "ffmpeg version 6.1 ...")
/// * `Err(CoreError::DependencyNotFound)` - If the binary does not exist
/// * `Err(CoreError::CommandStart)` - If it exists but could not be started
/// * `Err(CoreError::CommandFailed)` - If it ran but exited with an error
pub fn check_ffmpeg(ffmpeg_program: &Path) -> CoreResult<String> {
    let display_name = ffmpeg_program.display().to_string();

    let output = match Command::new(ffmpeg_program).arg("-version").output() {
        Ok(output) => output,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", display_name);
            return Err(CoreError::DependencyNotFound(display_name));
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", display_name, e);
            return Err(command_start_error(display_name, e));
        }
    };

    if !output.status.success() {
        return Err(command_failed_error(
            display_name,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let version_line = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    log::debug!("Found ffmpeg: {}", version_line);
    Ok(version_line)
}
